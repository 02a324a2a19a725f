//! Error types for the weighting engine.

/// Fatal input-consistency errors raised while driving the timing oracle.
///
/// Both variants mean the geometry source and the netlist source describe
/// different designs. There is nothing to retry: continuing would silently
/// build a wrong or partial RC model, so callers must abort the pass and
/// surface the offending name.
#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    /// A net name from the netlist is absent from the oracle's network.
    #[error("cannot find net '{net}' in the timing network; the netlist and geometry inputs describe different designs")]
    NetNotFound {
        /// The unresolved net name.
        net: String,
    },

    /// A composed pin name is absent from the oracle's network.
    #[error("cannot find pin '{pin}' of net '{net}' in the timing network; the netlist and geometry inputs describe different designs")]
    PinNotFound {
        /// The unresolved pin name.
        pin: String,
        /// The net whose model was being built.
        net: String,
    },
}
