//! # omnicut-auth
//!
//! API key resolution for Omnicut.
//!
//! - [`CredentialProvider`]: async source of an [`ApiKey`]
//! - [`EnvCredentials`], [`FileCredentials`], [`StaticCredentials`], [`ChainCredentials`]
//! - [`storage`]: `~/.omnicut/auth.json` with owner-only permissions

#![deny(unsafe_code)]

pub mod errors;
pub mod provider;
pub mod storage;
pub mod types;

pub use errors::AuthError;
pub use provider::{
    API_KEY_ENV_VARS, ChainCredentials, CredentialProvider, EnvCredentials, FileCredentials,
    StaticCredentials,
};
pub use storage::{
    auth_file_path, clear_api_key, default_auth_file_path, get_api_key, load_auth_storage,
    save_api_key, save_auth_storage,
};
pub use types::{ApiKey, AuthStorage};
