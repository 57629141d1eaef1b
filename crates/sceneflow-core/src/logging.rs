//! Logging facilities for sceneflow.
//!
//! sceneflow uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("sceneflow::adapter=debug")
//!     .init();
//! ```
//!
//! The [`targets`] constants name the subsystems so they can be filtered
//! individually.

/// Span names used throughout sceneflow for tracing.
pub mod span_names {
    /// Source resolution in the adapter.
    pub const SET_SOURCE: &str = "sceneflow::set_source";
    /// Structural change handling in the adapter.
    pub const STRUCTURE: &str = "sceneflow::structure";
    /// Deferred task processing.
    pub const DEFERRED: &str = "sceneflow::deferred";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "sceneflow_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sceneflow_core::signal";
    /// Deferred queue target.
    pub const DEFERRED: &str = "sceneflow_core::deferred";
    /// Screenplay model target.
    pub const MODEL: &str = "sceneflow::model";
    /// Screenplay adapter target.
    pub const ADAPTER: &str = "sceneflow::adapter";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a whole operation such as a source swap.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "sceneflow::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
