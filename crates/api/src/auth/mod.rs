//! Token issuance and the per-email sign-in service.

pub mod jwt;
pub mod service;

pub use service::{AuthService, SignedIn};
