//! PostgreSQL-backed record store.

use async_trait::async_trait;
use harsia_core::types::{DbId, Timestamp};

use super::{
    AuthorizationStore, Collection, CollectionStore, Recommendations, Reports, StoreError,
};
use crate::models::admin_user::AdminUser;
use crate::models::recommendation::{
    CreateRecommendation, SafetyRecommendation, UpdateRecommendation,
};
use crate::models::report::{CreateReport, InvestigationReport, UpdateReport};
use crate::repositories::{AdminUserRepo, RecommendationRepo, ReportRepo};
use crate::DbPool;

/// Record store over a PostgreSQL pool. Cheap to clone.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a sqlx error onto the store taxonomy.
///
/// - Unique violations (`23505`) become `Conflict`, naming the constraint.
/// - Check violations (`23514`) and data exceptions (`22xxx`) become `Invalid`.
/// - Everything else is logged and becomes `Backend`.
pub fn classify(collection: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        match code.as_deref() {
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            Some("23514") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Invalid(format!(
                    "Value violates check constraint: {constraint}"
                ));
            }
            Some(c) if c.starts_with("22") => {
                return StoreError::Invalid(db_err.message().to_string());
            }
            _ => {}
        }
    }
    tracing::error!(collection, error = %err, "Record store error");
    StoreError::Backend(err.to_string())
}

fn not_found(collection: &'static str, id: DbId) -> StoreError {
    StoreError::NotFound { collection, id }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[async_trait]
impl CollectionStore<Reports> for PgRecordStore {
    async fn list(&self) -> Result<Vec<InvestigationReport>, StoreError> {
        ReportRepo::list(&self.pool)
            .await
            .map_err(|e| classify(Reports::NAME, e))
    }

    async fn get(&self, id: DbId) -> Result<InvestigationReport, StoreError> {
        ReportRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| classify(Reports::NAME, e))?
            .ok_or_else(|| not_found(Reports::NAME, id))
    }

    async fn insert(&self, input: CreateReport) -> Result<InvestigationReport, StoreError> {
        let input = input.normalized();
        input.check()?;
        ReportRepo::create(&self.pool, &input)
            .await
            .map_err(|e| classify(Reports::NAME, e))
    }

    async fn update(
        &self,
        id: DbId,
        patch: UpdateReport,
        updated_at: Timestamp,
    ) -> Result<InvestigationReport, StoreError> {
        let patch = patch.normalized();
        patch.check()?;
        ReportRepo::update(&self.pool, id, &patch, updated_at)
            .await
            .map_err(|e| classify(Reports::NAME, e))?
            .ok_or_else(|| not_found(Reports::NAME, id))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let deleted = ReportRepo::delete(&self.pool, id)
            .await
            .map_err(|e| classify(Reports::NAME, e))?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(Reports::NAME, id))
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[async_trait]
impl CollectionStore<Recommendations> for PgRecordStore {
    async fn list(&self) -> Result<Vec<SafetyRecommendation>, StoreError> {
        RecommendationRepo::list(&self.pool)
            .await
            .map_err(|e| classify(Recommendations::NAME, e))
    }

    async fn get(&self, id: DbId) -> Result<SafetyRecommendation, StoreError> {
        RecommendationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| classify(Recommendations::NAME, e))?
            .ok_or_else(|| not_found(Recommendations::NAME, id))
    }

    async fn insert(
        &self,
        input: CreateRecommendation,
    ) -> Result<SafetyRecommendation, StoreError> {
        let input = input.normalized();
        input.check()?;
        RecommendationRepo::create(&self.pool, &input)
            .await
            .map_err(|e| classify(Recommendations::NAME, e))
    }

    async fn update(
        &self,
        id: DbId,
        patch: UpdateRecommendation,
        updated_at: Timestamp,
    ) -> Result<SafetyRecommendation, StoreError> {
        let patch = patch.normalized();
        patch.check()?;
        RecommendationRepo::update(&self.pool, id, &patch, updated_at)
            .await
            .map_err(|e| classify(Recommendations::NAME, e))?
            .ok_or_else(|| not_found(Recommendations::NAME, id))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let deleted = RecommendationRepo::delete(&self.pool, id)
            .await
            .map_err(|e| classify(Recommendations::NAME, e))?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(Recommendations::NAME, id))
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[async_trait]
impl AuthorizationStore for PgRecordStore {
    async fn find_admin_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        AdminUserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(|e| classify("admin_users", e))
    }
}
