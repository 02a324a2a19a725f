//! Abstract timing-oracle interface for the lodestone weighting engine.
//!
//! The engine never links against a concrete STA library. Instead it drives
//! any implementation of the [`TimingOracle`] trait: net/pin lookup by name,
//! per-net parasitic network construction (RC nodes, capacitance increments,
//! resistors), full and tolerance-bounded timing updates, and slack queries
//! at a constraint mode.
//!
//! [`FakeOracle`] is the bundled in-memory implementation used by the
//! engine's unit tests; production deployments provide an adapter over a
//! real timing engine.

#![warn(missing_docs)]

pub mod fake;
pub mod ids;
pub mod oracle;

pub use fake::{FakeOracle, SLACK_INIT};
pub use ids::{AnalysisPoint, NodeId, OracleNetId, OraclePinId, ParasiticId};
pub use oracle::{ConstraintMode, ParasiticDevice, TimingOracle};
