//! HARSIA data-access core.
//!
//! - [`repository`] -- per-collection caches with loading/error flags and
//!   CRUD that keeps the cache in step with the record store.
//! - [`auth`] -- the sign-in state machine for console staff.

pub mod auth;
pub mod repository;

pub use auth::{AuthError, AuthGate, AuthState, Session};
pub use repository::{RecommendationsRepository, ReportsRepository, Repository, Snapshot};
