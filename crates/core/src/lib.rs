//! HARSIA domain core.
//!
//! Pure domain logic with no I/O: identifier and timestamp types, error
//! taxonomy, report and recommendation enumerations, the client-side filter
//! engine, bilingual field resolution, and dashboard statistics. Shared by the
//! record store, the client repositories, and the HTTP service.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod locale;
pub mod otp;
pub mod recommendation;
pub mod report;
pub mod roles;
pub mod translations;
pub mod types;
