//! Session domain module.
//!
//! The session is owned by the authentication collaborator. The shell only
//! reads snapshots of it and asks the provider to log out.
//!
//! # Module Structure
//!
//! - `model`: Session snapshot and user information (`Session`, `UserInfo`)
//! - `provider`: Trait the authentication collaborator implements (`AuthProvider`)

mod model;
mod provider;

// Re-export public API
pub use model::{Session, UserInfo};
pub use provider::AuthProvider;
