//! # juke-infra
//!
//! Adapters behind the `juke-core` ports: the file-backed and in-memory
//! credential stores, the REST client with one gateway per backend area, and
//! application data directory resolution.

pub mod fs;
pub mod http;
pub mod session;

pub use http::{
    ApiClient, HttpAuthGateway, HttpCatalogGateway, HttpPlaybackGateway, HttpProfileGateway,
    HttpWorldGateway,
};
pub use session::{FileCredentialStore, InMemoryCredentialStore};
