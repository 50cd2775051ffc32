pub mod client;
pub mod credential_store;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod query;

pub use client::{BacklogClient, BacklogConfig, Payload};
pub use error::Error;
pub use models::*;

// Credential store re-exports
pub use credential_store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, PROPERTY_KEY_API_KEY,
    PROPERTY_KEY_ORG_DOMAIN, check_credential, load_config, set_credential,
};

// URL builder re-exports
pub use query::{QueryParams, QueryValue, build_request_url};
