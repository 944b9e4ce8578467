//! # juke-core
//!
//! Core domain models and business logic for the Juke client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod observable;
pub mod onboarding;
pub mod playback;
pub mod ports;
pub mod profile;
pub mod session;
pub mod world;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use error::{CredentialStoreError, GatewayError};
pub use observable::{Observable, Projection, Subscription};
pub use profile::{MusicProfile, ProfileSummary};
pub use session::{Credential, PersistedSession, UiSessionState};
