//! Session state orchestration.

mod controller;

pub use controller::SessionController;
