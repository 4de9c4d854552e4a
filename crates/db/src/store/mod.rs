//! Collection-oriented record store contract.
//!
//! The client repositories talk to the store only through these traits, so
//! the PostgreSQL store and the in-memory store are interchangeable:
//!
//! - [`CollectionStore`] -- list/get/insert/update/delete for one collection.
//! - [`AuthorizationStore`] -- admin user lookup by email.
//! - [`RecordStore`] -- everything the service needs, usable as
//!   `Arc<dyn RecordStore>`.
//!
//! Every operation resolves to `Result<_, StoreError>`. Nothing is retried.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use async_trait::async_trait;
use harsia_core::error::CoreError;
use harsia_core::types::{DbId, Timestamp};

use crate::models::admin_user::AdminUser;
use crate::models::recommendation::{
    CreateRecommendation, SafetyRecommendation, UpdateRecommendation,
};
use crate::models::report::{CreateReport, InvestigationReport, UpdateReport};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure reported by a record store. `Display` is the message shown to the
/// user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("No {collection} record with id {id}")]
    NotFound { collection: &'static str, id: DbId },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Backend(String),
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => StoreError::NotFound {
                collection: entity,
                id,
            },
            CoreError::Validation(msg) => StoreError::Invalid(msg),
            CoreError::Conflict(msg) => StoreError::Conflict(msg),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// A stored record with a store-assigned identifier.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> DbId;
}

impl Record for InvestigationReport {
    fn id(&self) -> DbId {
        self.id
    }
}

impl Record for SafetyRecommendation {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Marker describing one named collection and its record/DTO types.
pub trait Collection: Send + Sync + 'static {
    const NAME: &'static str;
    type Record: Record;
    type Create: Send + Sync + 'static;
    type Update: Send + Sync + 'static;
}

/// The `investigation_reports` collection.
pub struct Reports;

impl Collection for Reports {
    const NAME: &'static str = "investigation_reports";
    type Record = InvestigationReport;
    type Create = CreateReport;
    type Update = UpdateReport;
}

/// The `safety_recommendations` collection.
pub struct Recommendations;

impl Collection for Recommendations {
    const NAME: &'static str = "safety_recommendations";
    type Record = SafetyRecommendation;
    type Create = CreateRecommendation;
    type Update = UpdateRecommendation;
}

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// CRUD over one collection.
///
/// `list` returns records in the collection's canonical order (newest date
/// first, undated last); callers never re-sort.
#[async_trait]
pub trait CollectionStore<C: Collection>: Send + Sync {
    async fn list(&self) -> Result<Vec<C::Record>, StoreError>;

    async fn get(&self, id: DbId) -> Result<C::Record, StoreError>;

    /// Insert and return the canonical stored record.
    async fn insert(&self, input: C::Create) -> Result<C::Record, StoreError>;

    /// Apply a patch, stamping `updated_at`, and return the stored record.
    async fn update(
        &self,
        id: DbId,
        patch: C::Update,
        updated_at: Timestamp,
    ) -> Result<C::Record, StoreError>;

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;
}

/// Lookup of console staff authorization records.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    async fn find_admin_user_by_email(&self, email: &str)
        -> Result<Option<AdminUser>, StoreError>;
}

/// The full record store used by the service.
pub trait RecordStore:
    CollectionStore<Reports> + CollectionStore<Recommendations> + AuthorizationStore
{
}

impl<T> RecordStore for T where
    T: CollectionStore<Reports> + CollectionStore<Recommendations> + AuthorizationStore
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_becomes_invalid() {
        let err: StoreError = CoreError::Validation("title_en is required".into()).into();
        assert_eq!(err, StoreError::Invalid("title_en is required".into()));
        assert_eq!(err.to_string(), "title_en is required");
    }

    #[test]
    fn not_found_names_collection() {
        let err = StoreError::NotFound {
            collection: Reports::NAME,
            id: 9,
        };
        assert_eq!(err.to_string(), "No investigation_reports record with id 9");
    }
}
