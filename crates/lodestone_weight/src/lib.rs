//! Timing-driven net weighting for placement optimization.
//!
//! This crate sits between a wirelength estimator that has decomposed each
//! net into resistive wire segments and an external static-timing-analysis
//! oracle. Each pass rebuilds a lumped RC parasitic model per net inside the
//! oracle, triggers a timing update, and derives a per-net `timing_weight`
//! from worst negative slack, per-net slack, and per-net resistance. The
//! downstream placer reads the weights to pull timing-critical nets shorter.
//!
//! # Usage
//!
//! ```ignore
//! use lodestone_weight::{run_full_pass, run_incremental_pass};
//!
//! // First iteration: exact baseline.
//! let summary = run_full_pass(&mut netlist, &plan, &config.rc, &mut oracle, &sink)?;
//! println!("WNS {:.3} TNS {:.3}", summary.wns, summary.tns);
//!
//! // Every later iteration of the optimization loop.
//! let summary = run_incremental_pass(&mut netlist, &plan, &config.rc, &mut oracle, &sink)?;
//! ```
//!
//! # Architecture
//!
//! - [`pin_name`] — resolves real pins to the oracle's naming scheme
//!   (bookshelf, LEF/DEF/Verilog tables, or bare terminal names)
//! - [`parasitics`] — rebuilds per-net RC networks from wire segments
//! - [`weight`] — derives net weights from slack and resistance
//! - [`pass`] — orchestrates full and incremental passes and extracts
//!   WNS/TNS
//!
//! All failure modes are static input inconsistencies between the geometry
//! and netlist sources; they surface as [`TimingError`] and are never
//! retried.

#![warn(missing_docs)]

pub mod error;
pub mod parasitics;
pub mod pass;
pub mod pin_name;
pub mod weight;

pub use error::TimingError;
pub use parasitics::build_parasitics;
pub use pass::{run_full_pass, run_incremental_pass, TimingSummary};
pub use pin_name::pin_name;
pub use weight::{update_net_weights, WeightBounds};
