//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `juke-app` and the
//! adapters in `juke-infra`. The core crate never performs I/O itself.
//!
//! Every gateway takes the bearer token explicitly; reading the stored
//! credential is the use case's job, not the adapter's.

mod auth_gateway;
mod catalog_gateway;
mod credential_store;
mod playback_gateway;
mod profile_gateway;
mod world_gateway;

pub use auth_gateway::AuthGatewayPort;
pub use catalog_gateway::CatalogGatewayPort;
pub use credential_store::CredentialStorePort;
pub use playback_gateway::PlaybackGatewayPort;
pub use profile_gateway::ProfileGatewayPort;
pub use world_gateway::WorldGatewayPort;
