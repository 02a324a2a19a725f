//! Core netlist data structures.
//!
//! Defines the placed netlist as handed over by the physical-design database:
//! module instances, primary-IO terminals, and nets with their pin membership.
//! From the weighting engine's point of view the [`Netlist`] is read-mostly:
//! only each net's `timing_weight` and `lumped_cap` fields are mutated between
//! optimization iterations.

use crate::ids::{InstanceId, NetId, TerminalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The placed netlist consumed by the timing-driven weighting engine.
///
/// Contains all instances, terminals, and nets of the design, an auxiliary
/// net-name index, and (in the LEF/DEF/Verilog flow) per-owner pin-name
/// tables. In the bookshelf flow no tables exist and pin names are
/// synthesized from direction and ordinal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    /// All module instances in the design.
    pub instances: Vec<Instance>,
    /// All primary-IO terminals in the design.
    pub terminals: Vec<Terminal>,
    /// All nets in the design.
    pub nets: Vec<Net>,
    /// Per-owner pin-name tables (`None` = bookshelf regime).
    pub pin_names: Option<PinNameTables>,
    /// Auxiliary index: net name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub net_by_name: HashMap<String, NetId>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            terminals: Vec::new(),
            nets: Vec::new(),
            pin_names: None,
            net_by_name: HashMap::new(),
        }
    }

    /// Adds an instance and returns its ID.
    pub fn add_instance(&mut self, mut instance: Instance) -> InstanceId {
        let id = InstanceId::from_raw(self.instances.len() as u32);
        instance.id = id;
        self.instances.push(instance);
        id
    }

    /// Adds a terminal and returns its ID.
    pub fn add_terminal(&mut self, mut terminal: Terminal) -> TerminalId {
        let id = TerminalId::from_raw(self.terminals.len() as u32);
        terminal.id = id;
        self.terminals.push(terminal);
        id
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, mut net: Net) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        net.id = id;
        self.net_by_name.insert(net.name.clone(), id);
        self.nets.push(net);
        id
    }

    /// Returns the instance with the given ID.
    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.as_raw() as usize]
    }

    /// Returns the terminal with the given ID.
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.as_raw() as usize]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the net with the given ID.
    pub fn net_mut(&mut self, id: NetId) -> &mut Net {
        &mut self.nets[id.as_raw() as usize]
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the name of a pin's owning object.
    pub fn owner_name(&self, owner: PinOwner) -> &str {
        match owner {
            PinOwner::Instance(id) => &self.instance(id).name,
            PinOwner::Terminal(id) => &self.terminal(id).name,
        }
    }

    /// Looks up a pin-name suffix in the per-owner tables.
    ///
    /// Returns `None` in the bookshelf regime (no tables loaded) or if the
    /// owner/ordinal pair is outside the tables.
    pub fn pin_suffix(&self, owner: PinOwner, ordinal: u32) -> Option<&str> {
        let tables = self.pin_names.as_ref()?;
        let table = match owner {
            PinOwner::Instance(id) => tables.instances.get(id.as_raw() as usize)?,
            PinOwner::Terminal(id) => tables.terminals.get(id.as_raw() as usize)?,
        };
        table.get(ordinal as usize).map(String::as_str)
    }

    /// Rebuilds the net-name index after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.net_by_name.clear();
        for (i, net) in self.nets.iter().enumerate() {
            self.net_by_name
                .insert(net.name.clone(), NetId::from_raw(i as u32));
        }
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-owner pin-name tables from the LEF/DEF/Verilog flow.
///
/// Outer index is the owner's raw ID, inner index the pin ordinal within the
/// owner. Absence of the tables as a whole marks the bookshelf regime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinNameTables {
    /// Pin names per instance, indexed by [`InstanceId`].
    pub instances: Vec<Vec<String>>,
    /// Pin names per terminal, indexed by [`TerminalId`].
    pub terminals: Vec<Vec<String>>,
}

/// A placed module instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// The unique ID of this instance.
    pub id: InstanceId,
    /// Instance name as known to the netlist source (e.g., "u_core/alu_0").
    pub name: String,
}

/// A primary-IO terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    /// The unique ID of this terminal.
    pub id: TerminalId,
    /// Terminal name (e.g., "clk", "dout[3]").
    pub name: String,
    /// Whether this terminal has no internal pin hierarchy.
    ///
    /// Such terminals are addressed by their bare name; all others compose
    /// `<name>/<pin>` like instances do.
    pub no_internal_structure: bool,
}

/// The I/O direction of a pin relative to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// The pin consumes a signal.
    Input,
    /// The pin drives a signal.
    Output,
}

/// The object a real pin belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinOwner {
    /// The pin sits on a module instance.
    Instance(InstanceId),
    /// The pin sits on a primary-IO terminal.
    Terminal(TerminalId),
}

/// A real pin: a physical connection point present in the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealPin {
    /// The instance or terminal that owns this pin.
    pub owner: PinOwner,
    /// The pin's I/O direction.
    pub direction: PinDirection,
    /// The pin's ordinal position within its owner.
    pub ordinal: u32,
}

impl RealPin {
    /// Returns `true` if this pin sits on a primary-IO terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self.owner, PinOwner::Terminal(_))
    }
}

/// An endpoint of a wire segment: either a real pin or a Steiner point.
///
/// Steiner points are virtual branch points introduced by the wirelength
/// estimator; they are not present in the netlist and are never resolved to
/// a textual name. Each carries a per-net sequential index instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinRef {
    /// A real pin present in the netlist.
    Pin(RealPin),
    /// A virtual branch point with its per-net sequential index.
    Steiner(u32),
}

impl PinRef {
    /// Returns `true` for a virtual (Steiner) endpoint.
    pub fn is_steiner(&self) -> bool {
        matches!(self, PinRef::Steiner(_))
    }
}

/// A resistive wire segment produced by the wirelength estimator.
///
/// Belongs to exactly one net and connects two endpoints (real or virtual).
/// Lengths are in design distance units; the engine converts to microns via
/// the configured scale factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WireSegment {
    /// The endpoint on the segment's input side.
    pub from: PinRef,
    /// The endpoint on the segment's output side.
    pub to: PinRef,
    /// Segment length in design distance units.
    pub length_du: f64,
}

/// Per-net wire-segment lists, as decomposed by the external estimator.
///
/// Indexed by [`NetId`]; read-only to the weighting engine. Rebuilt by the
/// estimator whenever placement moves, so the engine never caches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePlan {
    segments: Vec<Vec<WireSegment>>,
}

impl WirePlan {
    /// Creates an empty plan with a slot for each of `net_count` nets.
    pub fn new(net_count: usize) -> Self {
        Self {
            segments: vec![Vec::new(); net_count],
        }
    }

    /// Appends a segment to the given net's list.
    pub fn add_segment(&mut self, net: NetId, segment: WireSegment) {
        self.segments[net.as_raw() as usize].push(segment);
    }

    /// Returns the segments of the given net.
    pub fn segments(&self, net: NetId) -> &[WireSegment] {
        &self.segments[net.as_raw() as usize]
    }
}

/// A net: a named signal with its ordered pin membership.
///
/// `timing_weight` is the engine's output and the only field that persists
/// across weighting passes; `lumped_cap` is a per-pass diagnostic accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// Net name as known to the netlist source.
    pub name: String,
    /// The real pins on this net, in netlist order.
    pub pins: Vec<RealPin>,
    /// The timing weight consumed by the placement optimizer.
    pub timing_weight: f64,
    /// Total lumped capacitance accumulated in the last pass (diagnostic).
    pub lumped_cap: f64,
}

impl Net {
    /// Returns the number of pins on this net.
    pub fn degree(&self) -> usize {
        self.pins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pin_net(nl: &mut Netlist) -> NetId {
        let a = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "a".into(),
        });
        let b = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "b".into(),
        });
        nl.add_net(Net {
            id: NetId::from_raw(0),
            name: "n1".into(),
            pins: vec![
                RealPin {
                    owner: PinOwner::Instance(a),
                    direction: PinDirection::Output,
                    ordinal: 0,
                },
                RealPin {
                    owner: PinOwner::Instance(b),
                    direction: PinDirection::Input,
                    ordinal: 0,
                },
            ],
            timing_weight: 0.0,
            lumped_cap: 0.0,
        })
    }

    #[test]
    fn empty_netlist() {
        let nl = Netlist::new();
        assert_eq!(nl.net_count(), 0);
        assert!(nl.pin_names.is_none());
    }

    #[test]
    fn add_and_look_up_net() {
        let mut nl = Netlist::new();
        let id = two_pin_net(&mut nl);
        assert_eq!(nl.net_count(), 1);
        assert_eq!(nl.net(id).name, "n1");
        assert_eq!(nl.net(id).degree(), 2);
        assert_eq!(nl.net_by_name.get("n1"), Some(&id));
    }

    #[test]
    fn owner_name_resolution() {
        let mut nl = Netlist::new();
        let inst = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "u_alu".into(),
        });
        let term = nl.add_terminal(Terminal {
            id: TerminalId::from_raw(0),
            name: "clk".into(),
            no_internal_structure: true,
        });
        assert_eq!(nl.owner_name(PinOwner::Instance(inst)), "u_alu");
        assert_eq!(nl.owner_name(PinOwner::Terminal(term)), "clk");
    }

    #[test]
    fn pin_suffix_bookshelf_regime() {
        let mut nl = Netlist::new();
        let inst = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "a".into(),
        });
        // No tables loaded: lookup must report absence, not panic.
        assert_eq!(nl.pin_suffix(PinOwner::Instance(inst), 0), None);
    }

    #[test]
    fn pin_suffix_table_regime() {
        let mut nl = Netlist::new();
        let inst = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "a".into(),
        });
        nl.pin_names = Some(PinNameTables {
            instances: vec![vec!["D".into(), "Q".into()]],
            terminals: vec![],
        });
        assert_eq!(nl.pin_suffix(PinOwner::Instance(inst), 1), Some("Q"));
        assert_eq!(nl.pin_suffix(PinOwner::Instance(inst), 5), None);
    }

    #[test]
    fn steiner_pin_ref() {
        let real = PinRef::Pin(RealPin {
            owner: PinOwner::Instance(InstanceId::from_raw(0)),
            direction: PinDirection::Input,
            ordinal: 0,
        });
        let virt = PinRef::Steiner(3);
        assert!(!real.is_steiner());
        assert!(virt.is_steiner());
        assert_ne!(real, virt);
    }

    #[test]
    fn pin_ref_as_map_key() {
        use std::collections::HashMap;
        let mut caps: HashMap<PinRef, f64> = HashMap::new();
        let p = PinRef::Steiner(0);
        *caps.entry(p).or_insert(0.0) += 1.0;
        *caps.entry(p).or_insert(0.0) += 1.0;
        assert_eq!(caps[&p], 2.0);
        assert_eq!(caps.len(), 1);
    }

    #[test]
    fn wire_plan_per_net() {
        let mut nl = Netlist::new();
        let id = two_pin_net(&mut nl);
        let mut plan = WirePlan::new(nl.net_count());
        assert!(plan.segments(id).is_empty());

        plan.add_segment(
            id,
            WireSegment {
                from: PinRef::Pin(nl.net(id).pins[0]),
                to: PinRef::Steiner(0),
                length_du: 1500.0,
            },
        );
        assert_eq!(plan.segments(id).len(), 1);
        assert_eq!(plan.segments(id)[0].length_du, 1500.0);
    }

    #[test]
    fn rebuild_indices() {
        let mut nl = Netlist::new();
        two_pin_net(&mut nl);
        nl.net_by_name.clear();
        assert!(!nl.net_by_name.contains_key("n1"));
        nl.rebuild_indices();
        assert!(nl.net_by_name.contains_key("n1"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut nl = Netlist::new();
        let id = two_pin_net(&mut nl);
        nl.net_mut(id).timing_weight = 1.8;

        let json = serde_json::to_string(&nl).unwrap();
        let mut restored: Netlist = serde_json::from_str(&json).unwrap();
        restored.rebuild_indices();

        assert_eq!(restored.net_count(), 1);
        assert_eq!(restored.net(id).timing_weight, 1.8);
        assert!(restored.net_by_name.contains_key("n1"));
    }

    #[test]
    fn terminal_flags() {
        let mut nl = Netlist::new();
        let t = nl.add_terminal(Terminal {
            id: TerminalId::from_raw(0),
            name: "dout".into(),
            no_internal_structure: false,
        });
        assert!(!nl.terminal(t).no_internal_structure);
        let pin = RealPin {
            owner: PinOwner::Terminal(t),
            direction: PinDirection::Output,
            ordinal: 0,
        };
        assert!(pin.is_terminal());
    }
}
