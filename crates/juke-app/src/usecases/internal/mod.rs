//! Helpers shared by the use cases.

mod credential;

pub(crate) use credential::{optional_token, require_credential};
