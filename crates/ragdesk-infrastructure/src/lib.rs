//! Infrastructure layer for Ragdesk.
//!
//! - `http`: reqwest bindings of the backend collaborator traits
//! - `session_store`: in-memory [`AuthProvider`](ragdesk_core::session::AuthProvider)
//! - `settings`: client settings file (`client.toml`)
//! - `paths`: platform directories

pub mod http;
pub mod paths;
pub mod session_store;
pub mod settings;

pub use crate::http::{ApiClient, HttpConfigApi, HttpDocumentApi};
pub use crate::paths::RagdeskPaths;
pub use crate::session_store::SessionStore;
pub use crate::settings::ClientSettings;
