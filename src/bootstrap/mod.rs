//! Process bootstrap: configuration loading, tracing and dependency wiring.
//!
//! The only place that depends on juke-infra and juke-app at the same time.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use wiring::{resolve_config, wire_dependencies, ConfigOverrides};
