//! The abstract timing-oracle contract.
//!
//! The weighting engine talks to an external static-timing-analysis engine
//! through [`TimingOracle`]. The trait mirrors the operations the engine
//! actually needs: name lookup, parasitic network construction, timing
//! updates, and slack queries. It is object-safe so the engine can hold a
//! `&mut dyn TimingOracle` and tests can substitute [`FakeOracle`](crate::FakeOracle).
//!
//! The oracle's network is not designed for concurrent mutation; callers
//! must serialize all mutating calls behind a single writer.

use crate::ids::{AnalysisPoint, NodeId, OracleNetId, OraclePinId, ParasiticId};
use serde::{Deserialize, Serialize};

/// The constraint mode a timing quantity is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintMode {
    /// Hold-style (minimum-delay) analysis.
    Min,
    /// Setup-style (maximum-delay) analysis.
    Max,
}

/// One device of a net's installed parasitic model, as reported back by the
/// oracle. Non-resistor devices (grounded capacitors) carry their value too;
/// consumers that only care about resistance skip them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParasiticDevice {
    /// `true` for a resistor, `false` for any other device kind.
    pub is_resistor: bool,
    /// The device value (ohms for resistors, farads otherwise).
    pub value: f64,
}

/// Blocking interface to an external static-timing-analysis engine.
///
/// All calls are synchronous; a slow timing update blocks the caller for its
/// duration. Handles returned by one oracle are meaningless to another.
pub trait TimingOracle {
    /// Looks up a net by name in the oracle's network.
    fn find_net(&self, name: &str) -> Option<OracleNetId>;

    /// Looks up a pin by its composed textual name.
    fn find_pin(&self, name: &str) -> Option<OraclePinId>;

    /// Returns the number of pins currently known to the oracle's network.
    ///
    /// Synthetic (Steiner) node indices are allocated strictly above this
    /// count so they can never alias a real pin's node.
    fn pin_count(&self) -> u32;

    /// Selects the worst (max) process/voltage/temperature analysis point of
    /// the oracle's first corner. All parasitics are installed against this
    /// single point; multi-corner parasitics are unsupported.
    fn worst_analysis_point(&mut self) -> AnalysisPoint;

    /// Opens a fresh parasitic network scope for a net, discarding any model
    /// previously installed for it at this analysis point.
    fn make_parasitic_network(&mut self, net: OracleNetId, ap: AnalysisPoint) -> ParasiticId;

    /// Returns the RC node for a real pin, creating it on first use.
    fn ensure_pin_node(&mut self, model: ParasiticId, pin: OraclePinId) -> NodeId;

    /// Returns the RC node for a synthetic (Steiner) index, creating it on
    /// first use. Indices must not collide with real-pin node numbering.
    fn ensure_steiner_node(&mut self, model: ParasiticId, index: u32) -> NodeId;

    /// Adds `value` farads of grounded capacitance to a node.
    fn increment_cap(&mut self, node: NodeId, value: f64, ap: AnalysisPoint);

    /// Installs a resistor of `value` ohms between two nodes of a model.
    fn make_resistor(
        &mut self,
        model: ParasiticId,
        a: NodeId,
        b: NodeId,
        value: f64,
        ap: AnalysisPoint,
    );

    /// Invalidates cached delay results so the next update recomputes from
    /// the installed parasitics.
    fn invalidate_delays(&mut self);

    /// Runs timing propagation. `full` requests a complete (non-incremental)
    /// update; the incremental delay tolerance bounds recomputation either way.
    fn update_timing(&mut self, full: bool);

    /// Sets the incremental delay tolerance. Zero forces exact recomputation.
    fn set_incremental_delay_tolerance(&mut self, epsilon: f64);

    /// Returns the worst slack over all endpoints and the pin it occurs at.
    fn worst_slack(&self, mode: ConstraintMode) -> (f64, Option<OraclePinId>);

    /// Returns the total negative slack over all endpoints.
    fn total_negative_slack(&self, mode: ConstraintMode) -> f64;

    /// Returns the slack of a single net.
    fn net_slack(&self, net: OracleNetId, mode: ConstraintMode) -> f64;

    /// Iterates the devices of a net's installed parasitic model.
    ///
    /// Returns an empty sequence for a net with no model installed.
    fn parasitic_devices(&self, net: OracleNetId, ap: AnalysisPoint) -> Vec<ParasiticDevice>;

    /// The sentinel value the oracle reports for a slack it never computed
    /// (e.g., a net with no constrained timing path through it).
    fn slack_init_value(&self) -> f64;
}
