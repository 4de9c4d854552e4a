//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a JWT Bearer token.
//! - [`rbac::RequireWriter`] -- Requires a role allowed to change records.

pub mod auth;
pub mod rbac;
