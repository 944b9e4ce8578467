mod file_credential_store;
mod memory;

pub use file_credential_store::{FileCredentialStore, SESSION_FILE_NAME, STORE_NAME};
pub use memory::InMemoryCredentialStore;
