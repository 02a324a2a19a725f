//! Configuration types deserialized from `lodestone.toml`.

use serde::Deserialize;

/// The top-level engine configuration parsed from `lodestone.toml`.
///
/// Every section and field has a default, so an absent or empty file yields
/// a usable configuration.
#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    /// Electrical and geometry constants for parasitic extraction.
    #[serde(default)]
    pub rc: RcConfig,
}

/// Electrical and geometry constants consumed by the parasitic builder and
/// the timing orchestrator.
///
/// Defaults match the ICCAD-contest technology assumptions: 1000 design
/// units per micron, 2e-16 F and 0.5 Ω of wire per micron, and a fixed
/// 4e-15 F external load on each primary output terminal.
#[derive(Debug, Clone, Deserialize)]
pub struct RcConfig {
    /// Design distance units per micron.
    #[serde(default = "default_dbu_per_micron")]
    pub dbu_per_micron: f64,
    /// Wire capacitance in farads per micron.
    #[serde(default = "default_cap_per_micron")]
    pub cap_per_micron: f64,
    /// Wire resistance in ohms per micron.
    #[serde(default = "default_res_per_micron")]
    pub res_per_micron: f64,
    /// Fixed capacitance added once per primary-output terminal pin, in
    /// farads. Models an externally-specified load (normally read from an
    /// SDC file) that is not derivable from geometry.
    #[serde(default = "default_terminal_output_cap")]
    pub terminal_output_cap: f64,
    /// Incremental delay tolerance applied on repeat timing passes. Zero
    /// forces exact recomputation.
    #[serde(default = "default_incremental_tolerance")]
    pub incremental_tolerance: f64,
}

fn default_dbu_per_micron() -> f64 {
    1000.0
}

fn default_cap_per_micron() -> f64 {
    2e-16
}

fn default_res_per_micron() -> f64 {
    0.5
}

fn default_terminal_output_cap() -> f64 {
    4e-15
}

fn default_incremental_tolerance() -> f64 {
    1e-6
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            dbu_per_micron: default_dbu_per_micron(),
            cap_per_micron: default_cap_per_micron(),
            res_per_micron: default_res_per_micron(),
            terminal_output_cap: default_terminal_output_cap(),
            incremental_tolerance: default_incremental_tolerance(),
        }
    }
}
