//! Opaque handle newtypes for entities living inside the timing oracle.
//!
//! The oracle owns its network, parasitic models, and RC nodes; the engine
//! only ever holds these copyable handles. They are thin `u32` wrappers in
//! the same style as the netlist IDs.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a net inside the oracle's network.
    OracleNetId
);

define_id!(
    /// Handle to a pin inside the oracle's network.
    OraclePinId
);

define_id!(
    /// Handle to a per-net parasitic model inside the oracle.
    ParasiticId
);

define_id!(
    /// Handle to an RC node inside a parasitic model.
    NodeId
);

define_id!(
    /// Handle to a process/voltage/temperature analysis point.
    AnalysisPoint
);
