//! Lumped RC parasitic model construction.
//!
//! Rebuilds, for every net, a complete RC network inside the timing oracle
//! from the net's wire segments. Each segment becomes a resistor between its
//! two endpoint nodes; its capacitance is split evenly between the
//! endpoints and installed as grounded node capacitance. Primary-output
//! terminals additionally receive a fixed configured load that geometry
//! cannot express.
//!
//! Virtual (Steiner) endpoints get synthetic node indices allocated
//! strictly above the oracle's current pin count, so branch points can
//! never alias real pins. A pin shared by several segments has its
//! capacitance installed exactly once per pass, guarded by a per-net
//! written set.

use crate::error::TimingError;
use crate::pin_name::pin_name;
use lodestone_config::RcConfig;
use lodestone_netlist::{NetId, Netlist, PinDirection, PinOwner, PinRef, WirePlan};
use lodestone_sta::{AnalysisPoint, NodeId, ParasiticId, TimingOracle};
use std::collections::{HashMap, HashSet};

/// Pass-scoped capacitance state for one net.
#[derive(Debug, Default)]
struct NetCaps {
    /// Accumulated lumped capacitance per endpoint.
    lumped: HashMap<PinRef, f64>,
    /// Endpoints whose capacitance has already been installed.
    written: HashSet<PinRef>,
}

/// Transient state of one parasitic-building pass.
///
/// Constructed fresh at the start of each pass and discarded at its end;
/// nothing here survives between passes.
#[derive(Debug)]
struct ParasiticsPass {
    nets: Vec<NetCaps>,
}

impl ParasiticsPass {
    fn new(net_count: usize) -> Self {
        let mut nets = Vec::with_capacity(net_count);
        nets.resize_with(net_count, NetCaps::default);
        Self { nets }
    }
}

/// Rebuilds every net's RC parasitic model inside the oracle.
///
/// Resets and re-accumulates each net's `lumped_cap` diagnostic, opens a
/// fresh parasitic network scope per net, and invalidates the oracle's
/// cached delays so the next timing update recomputes from the new model.
///
/// Fails fatally if a net or composed pin name cannot be resolved in the
/// oracle's network: the geometry and netlist inputs are inconsistent and
/// continuing would build a wrong model.
pub fn build_parasitics(
    netlist: &mut Netlist,
    plan: &WirePlan,
    rc: &RcConfig,
    oracle: &mut dyn TimingOracle,
) -> Result<(), TimingError> {
    let mut pass = ParasiticsPass::new(netlist.net_count());

    // Accumulate lumped caps: half a segment's capacitance on each endpoint,
    // the full value on the net total, plus the fixed external load on each
    // primary-output terminal pin.
    for i in 0..netlist.net_count() {
        let id = NetId::from_raw(i as u32);
        let caps = &mut pass.nets[i];
        let mut net_total = 0.0;

        for seg in plan.segments(id) {
            let cap = seg.length_du / rc.dbu_per_micron * rc.cap_per_micron;
            net_total += cap;
            *caps.lumped.entry(seg.from).or_insert(0.0) += cap * 0.5;
            *caps.lumped.entry(seg.to).or_insert(0.0) += cap * 0.5;
        }

        for pin in &netlist.net(id).pins {
            let is_output_terminal = pin.direction == PinDirection::Output
                && match pin.owner {
                    PinOwner::Terminal(t) => netlist.terminal(t).no_internal_structure,
                    PinOwner::Instance(_) => false,
                };
            if is_output_terminal {
                net_total += rc.terminal_output_cap;
                *caps.lumped.entry(PinRef::Pin(*pin)).or_insert(0.0) += rc.terminal_output_cap;
            }
        }

        netlist.net_mut(id).lumped_cap = net_total;
    }

    // Synthetic (Steiner) nodes live strictly above the current pin count so
    // they can never collide with real-pin nodes.
    let base_index = oracle.pin_count() + 1;
    let ap = oracle.worst_analysis_point();

    for i in 0..netlist.net_count() {
        let id = NetId::from_raw(i as u32);
        let net_name = &netlist.net(id).name;
        let oracle_net = oracle
            .find_net(net_name)
            .ok_or_else(|| TimingError::NetNotFound {
                net: net_name.clone(),
            })?;
        let model = oracle.make_parasitic_network(oracle_net, ap);
        let caps = &mut pass.nets[i];

        for seg in plan.segments(id) {
            let n1 = resolve_node(netlist, oracle, model, seg.from, base_index, net_name)?;
            install_cap_once(caps, oracle, seg.from, n1, ap);

            let n2 = resolve_node(netlist, oracle, model, seg.to, base_index, net_name)?;
            install_cap_once(caps, oracle, seg.to, n2, ap);

            let res = seg.length_du / rc.dbu_per_micron * rc.res_per_micron;
            oracle.make_resistor(model, n1, n2, res, ap);
        }
    }

    oracle.invalidate_delays();
    Ok(())
}

/// Resolves a segment endpoint to an RC node.
///
/// Real pins resolve by composed name through the oracle's network (fatal if
/// absent); Steiner endpoints map to `base_index + local index`.
fn resolve_node(
    netlist: &Netlist,
    oracle: &mut dyn TimingOracle,
    model: ParasiticId,
    endpoint: PinRef,
    base_index: u32,
    net_name: &str,
) -> Result<NodeId, TimingError> {
    match endpoint {
        PinRef::Pin(pin) => {
            let name = pin_name(netlist, &pin, false);
            let handle = oracle
                .find_pin(&name)
                .ok_or_else(|| TimingError::PinNotFound {
                    pin: name,
                    net: net_name.to_string(),
                })?;
            Ok(oracle.ensure_pin_node(model, handle))
        }
        PinRef::Steiner(index) => Ok(oracle.ensure_steiner_node(model, base_index + index)),
    }
}

/// Installs an endpoint's lumped capacitance unless already written.
///
/// A pin with degree > 1 in the segment graph is visited once per touching
/// segment; its capacitance must reach the oracle exactly once.
fn install_cap_once(
    caps: &mut NetCaps,
    oracle: &mut dyn TimingOracle,
    endpoint: PinRef,
    node: NodeId,
    ap: AnalysisPoint,
) {
    if caps.written.insert(endpoint) {
        let cap = caps.lumped.get(&endpoint).copied().unwrap_or(0.0);
        oracle.increment_cap(node, cap, ap);
    }
}
