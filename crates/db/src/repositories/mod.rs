//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod recommendation_repo;
pub mod report_repo;

pub use admin_user_repo::AdminUserRepo;
pub use recommendation_repo::RecommendationRepo;
pub use report_repo::ReportRepo;
