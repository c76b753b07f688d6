//! Logging facilities for Horizon Grid.
//!
//! Horizon Grid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_grid=trace")
//!         .init();
//! }
//! ```
//!
//! Cell dispatch decisions are logged at `trace`, soft degradations (for
//! example an edit-mode cell without a form) at `debug`.

/// Span names used throughout Horizon Grid for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Cell dispatch span.
    pub const CELL_RENDER: &str = "horizon_grid::cell_render";
    /// Edit-mode composition span.
    pub const CELL_COMPOSE: &str = "horizon_grid::cell_compose";
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_grid::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_grid_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_grid_core::signal";
    /// Snapshot publication target.
    pub const SNAPSHOT: &str = "horizon_grid_core::snapshot";
    /// Cell dispatcher target.
    pub const CELL: &str = "horizon_grid::cell";
    /// Form document target.
    pub const FORM: &str = "horizon_grid::form";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::CELL, targets::FORM] {
            assert!(target.starts_with("horizon_grid::"));
        }
        for target in [targets::SIGNAL, targets::SNAPSHOT] {
            assert!(target.starts_with(targets::CORE));
        }
    }
}
