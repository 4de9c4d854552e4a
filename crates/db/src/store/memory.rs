//! In-memory record store.
//!
//! Honours the same contract as the PostgreSQL store: sequential ids,
//! canonical ordering, unique record numbers, enumeration checks, patch
//! semantics and related-report resolution at read time. Used by tests and
//! when the service runs without `DATABASE_URL`.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use harsia_core::roles::ROLE_ADMIN;
use harsia_core::types::{Date, DbId, Timestamp};
use tokio::sync::RwLock;

use super::{
    AuthorizationStore, Collection, CollectionStore, Recommendations, Reports, StoreError,
};
use crate::models::admin_user::{AdminUser, CreateAdminUser};
use crate::models::recommendation::{
    CreateRecommendation, RelatedReport, SafetyRecommendation, UpdateRecommendation,
};
use crate::models::report::{CreateReport, InvestigationReport, UpdateReport};

#[derive(Default)]
struct Tables {
    reports: Vec<InvestigationReport>,
    recommendations: Vec<SafetyRecommendation>,
    admin_users: Vec<AdminUser>,
    next_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn related(&self, id: Option<DbId>) -> Option<RelatedReport> {
        let id = id?;
        self.reports
            .iter()
            .find(|r| r.id == id)
            .map(|r| RelatedReport {
                id: r.id,
                report_number: r.report_number.clone(),
                title_en: r.title_en.clone(),
                title_gr: r.title_gr.clone(),
            })
    }

    fn resolve(&self, rec: &SafetyRecommendation) -> SafetyRecommendation {
        SafetyRecommendation {
            related_report: self.related(rec.related_report_id),
            ..rec.clone()
        }
    }
}

/// Sort key for "date DESC NULLS LAST, id DESC".
fn newest_first(date: Option<Date>, id: DbId) -> (bool, Reverse<Option<Date>>, Reverse<DbId>) {
    (date.is_none(), Reverse(date), Reverse(id))
}

fn duplicate(constraint: &str) -> StoreError {
    StoreError::Conflict(format!(
        "Duplicate value violates unique constraint: {constraint}"
    ))
}

/// Record store kept entirely in process memory.
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a staff member who may attempt to sign in.
    pub async fn seed_admin_user(&self, input: CreateAdminUser) -> Result<AdminUser, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.admin_users.iter().any(|u| u.email == input.email) {
            return Err(duplicate("uq_admin_users_email"));
        }
        let user = AdminUser {
            id: tables.next_id(),
            email: input.email,
            name: input.name,
            role: input.role.unwrap_or_else(|| ROLE_ADMIN.to_string()),
            created_at: Utc::now(),
        };
        tables.admin_users.push(user.clone());
        Ok(user)
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[async_trait]
impl CollectionStore<Reports> for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<InvestigationReport>, StoreError> {
        let tables = self.tables.read().await;
        let mut reports = tables.reports.clone();
        reports.sort_by_key(|r| newest_first(r.publication_date, r.id));
        Ok(reports)
    }

    async fn get(&self, id: DbId) -> Result<InvestigationReport, StoreError> {
        let tables = self.tables.read().await;
        tables
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                collection: Reports::NAME,
                id,
            })
    }

    async fn insert(&self, input: CreateReport) -> Result<InvestigationReport, StoreError> {
        let input = input.normalized();
        input.check()?;

        let mut tables = self.tables.write().await;
        if tables
            .reports
            .iter()
            .any(|r| r.report_number == input.report_number)
        {
            return Err(duplicate("uq_investigation_reports_report_number"));
        }
        let now = Utc::now();
        let report = InvestigationReport {
            id: tables.next_id(),
            category: input.category_or_default().to_string(),
            status: input.status_or_default().to_string(),
            report_number: input.report_number,
            title_en: input.title_en,
            title_gr: input.title_gr,
            description_en: input.description_en,
            description_gr: input.description_gr,
            investigation_date: input.investigation_date,
            publication_date: input.publication_date,
            aircraft_type: input.aircraft_type,
            location_en: input.location_en,
            location_gr: input.location_gr,
            pdf_url: input.pdf_url,
            created_at: now,
            updated_at: now,
        };
        tables.reports.push(report.clone());
        Ok(report)
    }

    async fn update(
        &self,
        id: DbId,
        patch: UpdateReport,
        updated_at: Timestamp,
    ) -> Result<InvestigationReport, StoreError> {
        let patch = patch.normalized();
        patch.check()?;

        let mut tables = self.tables.write().await;
        if let Some(number) = &patch.report_number {
            if tables
                .reports
                .iter()
                .any(|r| r.id != id && &r.report_number == number)
            {
                return Err(duplicate("uq_investigation_reports_report_number"));
            }
        }
        let report = tables
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                collection: Reports::NAME,
                id,
            })?;

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { report.$field = v; })*
            };
        }
        macro_rules! apply_opt {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() { report.$field = patch.$field; })*
            };
        }
        apply!(report_number, title_en, title_gr, description_en, description_gr, category, status);
        apply_opt!(
            investigation_date,
            publication_date,
            aircraft_type,
            location_en,
            location_gr,
            pdf_url,
        );
        report.updated_at = updated_at;
        Ok(report.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.reports.len();
        tables.reports.retain(|r| r.id != id);
        if tables.reports.len() == before {
            return Err(StoreError::NotFound {
                collection: Reports::NAME,
                id,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[async_trait]
impl CollectionStore<Recommendations> for MemoryRecordStore {
    async fn list(&self) -> Result<Vec<SafetyRecommendation>, StoreError> {
        let tables = self.tables.read().await;
        let mut recs: Vec<SafetyRecommendation> = tables
            .recommendations
            .iter()
            .map(|r| tables.resolve(r))
            .collect();
        recs.sort_by_key(|r| newest_first(Some(r.issue_date), r.id));
        Ok(recs)
    }

    async fn get(&self, id: DbId) -> Result<SafetyRecommendation, StoreError> {
        let tables = self.tables.read().await;
        tables
            .recommendations
            .iter()
            .find(|r| r.id == id)
            .map(|r| tables.resolve(r))
            .ok_or(StoreError::NotFound {
                collection: Recommendations::NAME,
                id,
            })
    }

    async fn insert(
        &self,
        input: CreateRecommendation,
    ) -> Result<SafetyRecommendation, StoreError> {
        let input = input.normalized();
        input.check()?;

        let mut tables = self.tables.write().await;
        if tables
            .recommendations
            .iter()
            .any(|r| r.recommendation_number == input.recommendation_number)
        {
            return Err(duplicate(
                "uq_safety_recommendations_recommendation_number",
            ));
        }
        let now = Utc::now();
        let rec = SafetyRecommendation {
            id: tables.next_id(),
            status: input.status_or_default().to_string(),
            category: input.category_or_default().to_string(),
            recommendation_number: input.recommendation_number,
            title_en: input.title_en,
            title_gr: input.title_gr,
            description_en: input.description_en,
            description_gr: input.description_gr,
            issue_date: input.issue_date,
            recipient_en: input.recipient_en,
            recipient_gr: input.recipient_gr,
            related_report_id: input.related_report_id,
            related_report: None,
            created_at: now,
            updated_at: now,
        };
        tables.recommendations.push(rec.clone());
        Ok(tables.resolve(&rec))
    }

    async fn update(
        &self,
        id: DbId,
        patch: UpdateRecommendation,
        updated_at: Timestamp,
    ) -> Result<SafetyRecommendation, StoreError> {
        let patch = patch.normalized();
        patch.check()?;

        let mut tables = self.tables.write().await;
        if let Some(number) = &patch.recommendation_number {
            if tables
                .recommendations
                .iter()
                .any(|r| r.id != id && &r.recommendation_number == number)
            {
                return Err(duplicate(
                    "uq_safety_recommendations_recommendation_number",
                ));
            }
        }
        let rec = tables
            .recommendations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                collection: Recommendations::NAME,
                id,
            })?;

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { rec.$field = v; })*
            };
        }
        macro_rules! apply_opt {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() { rec.$field = patch.$field; })*
            };
        }
        apply!(
            recommendation_number,
            title_en,
            title_gr,
            description_en,
            description_gr,
            issue_date,
            recipient_en,
            recipient_gr,
            status,
            category,
        );
        apply_opt!(related_report_id);
        rec.updated_at = updated_at;
        let stored = rec.clone();
        Ok(tables.resolve(&stored))
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.recommendations.len();
        tables.recommendations.retain(|r| r.id != id);
        if tables.recommendations.len() == before {
            return Err(StoreError::NotFound {
                collection: Recommendations::NAME,
                id,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[async_trait]
impl AuthorizationStore for MemoryRecordStore {
    async fn find_admin_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .admin_users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}
