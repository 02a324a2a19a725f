//! Timing pass orchestration.
//!
//! Drives the oracle through a complete weighting pass: parasitic rebuild,
//! timing propagation, weight derivation, and WNS/TNS extraction. Two
//! flavors exist:
//!
//! - [`run_full_pass`] for the first invocation, which finishes by setting
//!   the incremental delay tolerance to zero so the very next update is an
//!   exact recomputation;
//! - [`run_incremental_pass`] for every later iteration of the outer
//!   optimization loop, which zeroes stale weights, applies the configured
//!   nonzero tolerance to bound re-propagation, and reports each phase's
//!   wall-clock duration.
//!
//! Both request a full propagation from the oracle; the tolerance, not the
//! update flag, is what bounds recomputation on repeat passes. Either call
//! is safe to repeat: nothing outside the oracle's timing graph and the
//! reported metrics is touched twice.

use crate::error::TimingError;
use crate::parasitics::build_parasitics;
use crate::weight::update_net_weights;
use lodestone_config::RcConfig;
use lodestone_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use lodestone_netlist::{Netlist, WirePlan};
use lodestone_sta::{ConstraintMode, TimingOracle};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Headline timing metrics extracted after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Worst negative slack at the max constraint mode.
    pub wns: f64,
    /// Total negative slack at the max constraint mode.
    pub tns: f64,
}

/// Runs the first timing pass.
///
/// Rebuilds parasitics, requests a full timing update, derives net weights,
/// and reports WNS/TNS. Finishes by zeroing the incremental delay tolerance
/// so the next pass starts from an exact baseline.
pub fn run_full_pass(
    netlist: &mut Netlist,
    plan: &WirePlan,
    rc: &RcConfig,
    oracle: &mut dyn TimingOracle,
    sink: &DiagnosticSink,
) -> Result<TimingSummary, TimingError> {
    build_parasitics(netlist, plan, rc, oracle)?;
    oracle.update_timing(true);
    update_net_weights(netlist, oracle, sink)?;

    let summary = read_summary(oracle, sink);
    oracle.set_incremental_delay_tolerance(0.0);
    Ok(summary)
}

/// Runs a repeat timing pass inside the outer optimization loop.
///
/// Zeroes every net's stale weight, rebuilds parasitics, applies the
/// configured incremental delay tolerance, updates timing, and re-derives
/// the weights. Each phase's wall-clock duration is reported through the
/// sink.
pub fn run_incremental_pass(
    netlist: &mut Netlist,
    plan: &WirePlan,
    rc: &RcConfig,
    oracle: &mut dyn TimingOracle,
    sink: &DiagnosticSink,
) -> Result<TimingSummary, TimingError> {
    for net in &mut netlist.nets {
        net.timing_weight = 0.0;
    }

    let start = Instant::now();
    build_parasitics(netlist, plan, rc, oracle)?;
    report_runtime(sink, 10, "parasitic rebuild", start);

    oracle.set_incremental_delay_tolerance(rc.incremental_tolerance);

    let start = Instant::now();
    oracle.update_timing(true);
    report_runtime(sink, 11, "timing update", start);

    let start = Instant::now();
    update_net_weights(netlist, oracle, sink)?;
    report_runtime(sink, 12, "net weighting", start);

    Ok(read_summary(oracle, sink))
}

/// Reads WNS/TNS at the max constraint mode and reports them.
fn read_summary(oracle: &dyn TimingOracle, sink: &DiagnosticSink) -> TimingSummary {
    let (wns, _) = oracle.worst_slack(ConstraintMode::Max);
    let tns = oracle.total_negative_slack(ConstraintMode::Max);

    sink.emit(Diagnostic::note(
        DiagnosticCode::new(Category::Timing, 1),
        format!("WNS = {wns:.4e}"),
    ));
    sink.emit(Diagnostic::note(
        DiagnosticCode::new(Category::Timing, 2),
        format!("TNS = {tns:.4e}"),
    ));

    TimingSummary { wns, tns }
}

/// Reports a phase's wall-clock duration as a note diagnostic.
fn report_runtime(sink: &DiagnosticSink, number: u16, phase: &str, start: Instant) {
    sink.emit(Diagnostic::note(
        DiagnosticCode::new(Category::Timing, number),
        format!("{phase} took {:.3}s", start.elapsed().as_secs_f64()),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_netlist::{
        Instance, InstanceId, Net, NetId, PinDirection, PinOwner, PinRef, RealPin, WireSegment,
    };
    use lodestone_sta::FakeOracle;

    /// One net `n1` between instances `a` and `b` with a single segment.
    fn small_design() -> (Netlist, WirePlan, FakeOracle) {
        let mut nl = Netlist::new();
        let a = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "a".into(),
        });
        let b = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: "b".into(),
        });
        let driver = RealPin {
            owner: PinOwner::Instance(a),
            direction: PinDirection::Output,
            ordinal: 0,
        };
        let load = RealPin {
            owner: PinOwner::Instance(b),
            direction: PinDirection::Input,
            ordinal: 0,
        };
        let id = nl.add_net(Net {
            id: NetId::from_raw(0),
            name: "n1".into(),
            pins: vec![driver, load],
            timing_weight: 0.0,
            lumped_cap: 0.0,
        });

        let mut plan = WirePlan::new(nl.net_count());
        plan.add_segment(
            id,
            WireSegment {
                from: PinRef::Pin(driver),
                to: PinRef::Pin(load),
                length_du: 1000.0,
            },
        );

        let mut oracle = FakeOracle::new();
        oracle.add_net("n1");
        oracle.add_pin("a/O0");
        oracle.add_pin("b/I0");
        (nl, plan, oracle)
    }

    #[test]
    fn full_pass_reports_and_zeroes_tolerance() {
        let (mut nl, plan, mut oracle) = small_design();
        oracle.set_worst_slack(-0.3, None);
        oracle.set_total_negative_slack(-1.2);
        oracle.set_net_slack(oracle.find_net("n1").unwrap(), -0.3);
        let rc = RcConfig::default();
        let sink = DiagnosticSink::new();

        let summary = run_full_pass(&mut nl, &plan, &rc, &mut oracle, &sink).unwrap();

        assert_eq!(summary.wns, -0.3);
        assert_eq!(summary.tns, -1.2);
        assert_eq!(oracle.tolerance, 0.0);
        assert_eq!(oracle.full_update_count, 1);
        assert_eq!(nl.net(NetId::from_raw(0)).timing_weight, 1.8);

        let messages: Vec<String> = sink.take_all().into_iter().map(|d| d.message).collect();
        assert!(messages.iter().any(|m| m.starts_with("WNS")));
        assert!(messages.iter().any(|m| m.starts_with("TNS")));
    }

    #[test]
    fn incremental_pass_applies_tolerance_and_times_phases() {
        let (mut nl, plan, mut oracle) = small_design();
        oracle.set_worst_slack(0.5, None);
        let rc = RcConfig::default();
        let sink = DiagnosticSink::new();

        // Stale weight from a previous pass must be reset even if the net
        // is no longer critical.
        nl.net_mut(NetId::from_raw(0)).timing_weight = 1.8;

        let summary = run_incremental_pass(&mut nl, &plan, &rc, &mut oracle, &sink).unwrap();

        assert_eq!(summary.wns, 0.5);
        assert_eq!(oracle.tolerance, rc.incremental_tolerance);
        assert_eq!(nl.net(NetId::from_raw(0)).timing_weight, 1.0);

        let messages: Vec<String> = sink.take_all().into_iter().map(|d| d.message).collect();
        assert!(messages.iter().any(|m| m.starts_with("parasitic rebuild took")));
        assert!(messages.iter().any(|m| m.starts_with("timing update took")));
        assert!(messages.iter().any(|m| m.starts_with("net weighting took")));
    }

    #[test]
    fn passes_are_repeatable() {
        let (mut nl, plan, mut oracle) = small_design();
        let rc = RcConfig::default();
        let sink = DiagnosticSink::new();

        run_full_pass(&mut nl, &plan, &rc, &mut oracle, &sink).unwrap();
        let first = nl.net(NetId::from_raw(0)).timing_weight;
        run_incremental_pass(&mut nl, &plan, &rc, &mut oracle, &sink).unwrap();
        run_incremental_pass(&mut nl, &plan, &rc, &mut oracle, &sink).unwrap();

        assert_eq!(nl.net(NetId::from_raw(0)).timing_weight, first);
        assert_eq!(oracle.update_count, 3);
        // Each pass opens a fresh model scope for the net.
        assert_eq!(oracle.network_count(), 3);
    }

    #[test]
    fn full_pass_propagates_fatal_errors() {
        let (mut nl, plan, _) = small_design();
        let rc = RcConfig::default();
        let sink = DiagnosticSink::new();
        let mut empty_oracle = FakeOracle::new();

        let err = run_full_pass(&mut nl, &plan, &rc, &mut empty_oracle, &sink).unwrap_err();
        assert!(matches!(err, TimingError::NetNotFound { .. }));
        // No update was requested against an inconsistent model.
        assert_eq!(empty_oracle.update_count, 0);
    }

    #[test]
    fn summary_serde_roundtrip() {
        let summary = TimingSummary {
            wns: -0.25,
            tns: -3.5,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: TimingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
