//! Netlist data model for the lodestone timing-driven weighting engine.
//!
//! This crate defines the placed netlist as seen by the weighting engine:
//! module instances, primary-IO terminals, nets with their pin membership,
//! and the per-net wire segments produced by the external wirelength
//! estimator. The engine treats everything here as read-only except each
//! net's `timing_weight` (its output) and `lumped_cap` (a per-pass
//! diagnostic accumulator).
//!
//! Real pins and virtual (Steiner) branch points are modeled as the tagged
//! variant [`PinRef`]; only real pins ever resolve to textual names.

#![warn(missing_docs)]

pub mod data;
pub mod ids;

pub use data::{
    Instance, Net, Netlist, PinDirection, PinNameTables, PinOwner, PinRef, RealPin, Terminal,
    WirePlan, WireSegment,
};
pub use ids::{InstanceId, NetId, TerminalId};
