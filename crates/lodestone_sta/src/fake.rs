//! An in-memory [`TimingOracle`] for testing the weighting engine.
//!
//! [`FakeOracle`] records every parasitic network the engine installs
//! (nodes, individual capacitance increments, resistors) and serves
//! slack queries from values the test sets up front. It performs no timing
//! propagation of its own; `update_timing` only keeps counters so tests can
//! assert orchestration behavior.

use crate::ids::{AnalysisPoint, NodeId, OracleNetId, OraclePinId, ParasiticId};
use crate::oracle::{ConstraintMode, ParasiticDevice, TimingOracle};
use std::collections::HashMap;

/// The sentinel reported for a slack the oracle never computed.
///
/// A large finite value rather than infinity so that the engine's
/// epsilon comparison against it is well-defined.
pub const SLACK_INIT: f64 = 1e30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NodeKey {
    Pin(OraclePinId),
    Steiner(u32),
}

#[derive(Debug)]
struct FakeNode {
    key: NodeKey,
    cap: f64,
}

/// One parasitic network scope opened via `make_parasitic_network`.
#[derive(Debug)]
struct FakeNetwork {
    net: OracleNetId,
    node_index: HashMap<NodeKey, NodeId>,
    node_ids: Vec<NodeId>,
    resistors: Vec<(NodeId, NodeId, f64)>,
}

/// An in-memory oracle that records parasitics and serves canned slacks.
#[derive(Debug, Default)]
pub struct FakeOracle {
    net_names: Vec<String>,
    net_by_name: HashMap<String, OracleNetId>,
    pin_names: Vec<String>,
    pin_by_name: HashMap<String, OraclePinId>,
    nodes: Vec<FakeNode>,
    networks: Vec<FakeNetwork>,
    model_by_net: HashMap<OracleNetId, ParasiticId>,
    cap_events: Vec<(NodeId, f64)>,
    net_slacks: HashMap<OracleNetId, f64>,
    worst: f64,
    worst_vertex: Option<OraclePinId>,
    tns: f64,
    /// The incremental delay tolerance last set by the engine.
    pub tolerance: f64,
    /// Whether cached delays are currently valid.
    pub delays_valid: bool,
    /// Number of `update_timing` calls.
    pub update_count: u32,
    /// Number of `update_timing(full = true)` calls.
    pub full_update_count: u32,
}

impl FakeOracle {
    /// Creates an empty oracle with no nets or pins registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a net name and returns its handle.
    pub fn add_net(&mut self, name: impl Into<String>) -> OracleNetId {
        let name = name.into();
        let id = OracleNetId::from_raw(self.net_names.len() as u32);
        self.net_by_name.insert(name.clone(), id);
        self.net_names.push(name);
        id
    }

    /// Registers a pin name and returns its handle.
    pub fn add_pin(&mut self, name: impl Into<String>) -> OraclePinId {
        let name = name.into();
        let id = OraclePinId::from_raw(self.pin_names.len() as u32);
        self.pin_by_name.insert(name.clone(), id);
        self.pin_names.push(name);
        id
    }

    /// Sets the slack served for a net. Unset nets report [`SLACK_INIT`].
    pub fn set_net_slack(&mut self, net: OracleNetId, slack: f64) {
        self.net_slacks.insert(net, slack);
    }

    /// Sets the worst slack and the pin it occurs at.
    pub fn set_worst_slack(&mut self, slack: f64, vertex: Option<OraclePinId>) {
        self.worst = slack;
        self.worst_vertex = vertex;
    }

    /// Sets the total negative slack.
    pub fn set_total_negative_slack(&mut self, tns: f64) {
        self.tns = tns;
    }

    /// Returns the accumulated capacitance at a node.
    pub fn node_cap(&self, node: NodeId) -> f64 {
        self.nodes[node.as_raw() as usize].cap
    }

    /// Returns every capacitance increment in installation order.
    pub fn cap_events(&self) -> &[(NodeId, f64)] {
        &self.cap_events
    }

    /// Returns the resistors of a net's latest installed model.
    pub fn resistors(&self, net: OracleNetId) -> &[(NodeId, NodeId, f64)] {
        match self.model_by_net.get(&net) {
            Some(model) => &self.networks[model.as_raw() as usize].resistors,
            None => &[],
        }
    }

    /// Returns the node holding a pin in a net's latest model, if any.
    pub fn pin_node(&self, net: OracleNetId, pin: OraclePinId) -> Option<NodeId> {
        let model = self.model_by_net.get(&net)?;
        self.networks[model.as_raw() as usize]
            .node_index
            .get(&NodeKey::Pin(pin))
            .copied()
    }

    /// Returns the synthetic indices installed in a net's latest model.
    pub fn steiner_indices(&self, net: OracleNetId) -> Vec<u32> {
        let Some(model) = self.model_by_net.get(&net) else {
            return Vec::new();
        };
        self.networks[model.as_raw() as usize]
            .node_index
            .keys()
            .filter_map(|key| match key {
                NodeKey::Steiner(index) => Some(*index),
                NodeKey::Pin(_) => None,
            })
            .collect()
    }

    /// Returns the number of parasitic network scopes opened so far.
    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    fn ensure_node(&mut self, model: ParasiticId, key: NodeKey) -> NodeId {
        let network = &mut self.networks[model.as_raw() as usize];
        if let Some(&node) = network.node_index.get(&key) {
            return node;
        }
        let node = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(FakeNode { key, cap: 0.0 });
        network.node_index.insert(key, node);
        network.node_ids.push(node);
        node
    }
}

impl TimingOracle for FakeOracle {
    fn find_net(&self, name: &str) -> Option<OracleNetId> {
        self.net_by_name.get(name).copied()
    }

    fn find_pin(&self, name: &str) -> Option<OraclePinId> {
        self.pin_by_name.get(name).copied()
    }

    fn pin_count(&self) -> u32 {
        self.pin_names.len() as u32
    }

    fn worst_analysis_point(&mut self) -> AnalysisPoint {
        AnalysisPoint::from_raw(0)
    }

    fn make_parasitic_network(&mut self, net: OracleNetId, _ap: AnalysisPoint) -> ParasiticId {
        let id = ParasiticId::from_raw(self.networks.len() as u32);
        self.networks.push(FakeNetwork {
            net,
            node_index: HashMap::new(),
            node_ids: Vec::new(),
            resistors: Vec::new(),
        });
        self.model_by_net.insert(net, id);
        id
    }

    fn ensure_pin_node(&mut self, model: ParasiticId, pin: OraclePinId) -> NodeId {
        self.ensure_node(model, NodeKey::Pin(pin))
    }

    fn ensure_steiner_node(&mut self, model: ParasiticId, index: u32) -> NodeId {
        self.ensure_node(model, NodeKey::Steiner(index))
    }

    fn increment_cap(&mut self, node: NodeId, value: f64, _ap: AnalysisPoint) {
        self.nodes[node.as_raw() as usize].cap += value;
        self.cap_events.push((node, value));
    }

    fn make_resistor(
        &mut self,
        model: ParasiticId,
        a: NodeId,
        b: NodeId,
        value: f64,
        _ap: AnalysisPoint,
    ) {
        self.networks[model.as_raw() as usize]
            .resistors
            .push((a, b, value));
    }

    fn invalidate_delays(&mut self) {
        self.delays_valid = false;
    }

    fn update_timing(&mut self, full: bool) {
        self.delays_valid = true;
        self.update_count += 1;
        if full {
            self.full_update_count += 1;
        }
    }

    fn set_incremental_delay_tolerance(&mut self, epsilon: f64) {
        self.tolerance = epsilon;
    }

    fn worst_slack(&self, _mode: ConstraintMode) -> (f64, Option<OraclePinId>) {
        (self.worst, self.worst_vertex)
    }

    fn total_negative_slack(&self, _mode: ConstraintMode) -> f64 {
        self.tns
    }

    fn net_slack(&self, net: OracleNetId, _mode: ConstraintMode) -> f64 {
        self.net_slacks.get(&net).copied().unwrap_or(SLACK_INIT)
    }

    fn parasitic_devices(&self, net: OracleNetId, _ap: AnalysisPoint) -> Vec<ParasiticDevice> {
        let Some(model) = self.model_by_net.get(&net) else {
            return Vec::new();
        };
        let network = &self.networks[model.as_raw() as usize];
        debug_assert_eq!(network.net, net);

        let mut devices: Vec<ParasiticDevice> = network
            .resistors
            .iter()
            .map(|&(_, _, value)| ParasiticDevice {
                is_resistor: true,
                value,
            })
            .collect();
        // Grounded caps are devices too; consumers scanning for resistance
        // must skip them.
        for &node in &network.node_ids {
            let cap = self.nodes[node.as_raw() as usize].cap;
            if cap != 0.0 {
                devices.push(ParasiticDevice {
                    is_resistor: false,
                    value: cap,
                });
            }
        }
        devices
    }

    fn slack_init_value(&self) -> f64 {
        SLACK_INIT
    }
}
