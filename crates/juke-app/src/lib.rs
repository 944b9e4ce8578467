//! Juke Application Orchestration Layer
//!
//! This crate contains the session controller, one use case per user-facing
//! operation, and the view-state objects that turn results into UI text.

pub mod deps;
pub mod session;
pub mod usecases;
pub mod view_state;

pub use deps::AppDeps;
pub use session::SessionController;
pub use usecases::UseCases;

#[cfg(test)]
pub(crate) mod test_support;
