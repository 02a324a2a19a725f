//! Structured diagnostics for the lodestone weighting engine.
//!
//! Non-fatal reporting (timing metrics such as WNS/TNS, phase runtimes,
//! weight bounds, input warnings) flows through a [`DiagnosticSink`] as structured
//! [`Diagnostic`] values with category-prefixed codes. Fatal input
//! mismatches are `Err` values in the engine's API and never pass through
//! here.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
