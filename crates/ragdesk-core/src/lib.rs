//! Domain layer for Ragdesk.
//!
//! Holds the types shared by every layer of the client shell (session, routes,
//! configuration, health, documents), the collaborator traits the application
//! layer talks to, and the shared error type.

pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod health;
pub mod route;
pub mod session;

// Re-export common error type
pub use error::{RagdeskError, Result};
