//! Repository for the `investigation_reports` table.

use harsia_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::report::{CreateReport, InvestigationReport, UpdateReport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, report_number, title_en, title_gr, description_en, description_gr, \
    investigation_date, publication_date, aircraft_type, location_en, location_gr, \
    category, status, pdf_url, created_at, updated_at";

/// Newest publication first; undated drafts sink to the end.
const ORDER: &str = "publication_date DESC NULLS LAST, id DESC";

/// Provides CRUD operations for investigation reports.
pub struct ReportRepo;

impl ReportRepo {
    /// List every report in publication order.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvestigationReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investigation_reports ORDER BY {ORDER}");
        sqlx::query_as::<_, InvestigationReport>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a report by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InvestigationReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM investigation_reports WHERE id = $1");
        sqlx::query_as::<_, InvestigationReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new report, returning the created row.
    ///
    /// Omitted category and status fall back to `Accident` and `Draft`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReport,
    ) -> Result<InvestigationReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO investigation_reports \
                (report_number, title_en, title_gr, description_en, description_gr, \
                 investigation_date, publication_date, aircraft_type, location_en, \
                 location_gr, category, status, pdf_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvestigationReport>(&query)
            .bind(&input.report_number)
            .bind(&input.title_en)
            .bind(&input.title_gr)
            .bind(&input.description_en)
            .bind(&input.description_gr)
            .bind(input.investigation_date)
            .bind(input.publication_date)
            .bind(&input.aircraft_type)
            .bind(&input.location_en)
            .bind(&input.location_gr)
            .bind(input.category_or_default())
            .bind(input.status_or_default())
            .bind(&input.pdf_url)
            .fetch_one(pool)
            .await
    }

    /// Patch a report. Only non-`None` fields are applied; `updated_at` is
    /// always set to the caller's stamp.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReport,
        updated_at: Timestamp,
    ) -> Result<Option<InvestigationReport>, sqlx::Error> {
        let query = format!(
            "UPDATE investigation_reports SET \
                report_number = COALESCE($2, report_number), \
                title_en = COALESCE($3, title_en), \
                title_gr = COALESCE($4, title_gr), \
                description_en = COALESCE($5, description_en), \
                description_gr = COALESCE($6, description_gr), \
                investigation_date = COALESCE($7, investigation_date), \
                publication_date = COALESCE($8, publication_date), \
                aircraft_type = COALESCE($9, aircraft_type), \
                location_en = COALESCE($10, location_en), \
                location_gr = COALESCE($11, location_gr), \
                category = COALESCE($12, category), \
                status = COALESCE($13, status), \
                pdf_url = COALESCE($14, pdf_url), \
                updated_at = $15 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvestigationReport>(&query)
            .bind(id)
            .bind(&input.report_number)
            .bind(&input.title_en)
            .bind(&input.title_gr)
            .bind(&input.description_en)
            .bind(&input.description_gr)
            .bind(input.investigation_date)
            .bind(input.publication_date)
            .bind(&input.aircraft_type)
            .bind(&input.location_en)
            .bind(&input.location_gr)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.pdf_url)
            .bind(updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a report by ID. Returns `true` if a row was removed.
    ///
    /// Recommendations referencing it are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM investigation_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
