//! reqwest bindings of the backend collaborator traits.
//!
//! # Module Structure
//!
//! - `client`: Shared [`ApiClient`] (base URL, timeout, bearer token, error mapping)
//! - `config_api`: `/config` endpoints ([`HttpConfigApi`])
//! - `document_api`: `/documents` endpoints ([`HttpDocumentApi`])

mod client;
mod config_api;
mod document_api;

pub use client::ApiClient;
pub use config_api::HttpConfigApi;
pub use document_api::HttpDocumentApi;
