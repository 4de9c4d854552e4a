//! Repository for the `safety_recommendations` table.
//!
//! Every read resolves `related_report_id` against `investigation_reports`
//! with a single LEFT JOIN, so a dangling reference reads back as no
//! related report rather than an error.

use harsia_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::recommendation::{
    CreateRecommendation, RecommendationRow, SafetyRecommendation, UpdateRecommendation,
};

/// Columns of the joined projection. `r` is the recommendation relation,
/// `ir` the related report.
const JOINED_COLUMNS: &str = "\
    r.id, r.recommendation_number, r.title_en, r.title_gr, \
    r.description_en, r.description_gr, r.issue_date, r.recipient_en, r.recipient_gr, \
    r.status, r.category, r.related_report_id, \
    ir.id AS related_id, ir.report_number AS related_report_number, \
    ir.title_en AS related_title_en, ir.title_gr AS related_title_gr, \
    r.created_at, r.updated_at";

const JOIN: &str = "LEFT JOIN investigation_reports ir ON ir.id = r.related_report_id";

const ORDER: &str = "r.issue_date DESC, r.id DESC";

/// Provides CRUD operations for safety recommendations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// List every recommendation, newest issue first, with related reports.
    pub async fn list(pool: &PgPool) -> Result<Vec<SafetyRecommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM safety_recommendations r {JOIN} ORDER BY {ORDER}"
        );
        let rows = sqlx::query_as::<_, RecommendationRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SafetyRecommendation::from).collect())
    }

    /// Find a recommendation by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SafetyRecommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM safety_recommendations r {JOIN} WHERE r.id = $1"
        );
        let row = sqlx::query_as::<_, RecommendationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SafetyRecommendation::from))
    }

    /// Insert a new recommendation and return it with its related report.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRecommendation,
    ) -> Result<SafetyRecommendation, sqlx::Error> {
        let query = format!(
            "WITH r AS ( \
                INSERT INTO safety_recommendations \
                    (recommendation_number, title_en, title_gr, description_en, \
                     description_gr, issue_date, recipient_en, recipient_gr, status, \
                     category, related_report_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM r {JOIN}"
        );
        let row = sqlx::query_as::<_, RecommendationRow>(&query)
            .bind(&input.recommendation_number)
            .bind(&input.title_en)
            .bind(&input.title_gr)
            .bind(&input.description_en)
            .bind(&input.description_gr)
            .bind(input.issue_date)
            .bind(&input.recipient_en)
            .bind(&input.recipient_gr)
            .bind(input.status_or_default())
            .bind(input.category_or_default())
            .bind(input.related_report_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Patch a recommendation. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecommendation,
        updated_at: Timestamp,
    ) -> Result<Option<SafetyRecommendation>, sqlx::Error> {
        let query = format!(
            "WITH r AS ( \
                UPDATE safety_recommendations SET \
                    recommendation_number = COALESCE($2, recommendation_number), \
                    title_en = COALESCE($3, title_en), \
                    title_gr = COALESCE($4, title_gr), \
                    description_en = COALESCE($5, description_en), \
                    description_gr = COALESCE($6, description_gr), \
                    issue_date = COALESCE($7, issue_date), \
                    recipient_en = COALESCE($8, recipient_en), \
                    recipient_gr = COALESCE($9, recipient_gr), \
                    status = COALESCE($10, status), \
                    category = COALESCE($11, category), \
                    related_report_id = COALESCE($12, related_report_id), \
                    updated_at = $13 \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM r {JOIN}"
        );
        let row = sqlx::query_as::<_, RecommendationRow>(&query)
            .bind(id)
            .bind(&input.recommendation_number)
            .bind(&input.title_en)
            .bind(&input.title_gr)
            .bind(&input.description_en)
            .bind(&input.description_gr)
            .bind(input.issue_date)
            .bind(&input.recipient_en)
            .bind(&input.recipient_gr)
            .bind(&input.status)
            .bind(&input.category)
            .bind(input.related_report_id)
            .bind(updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SafetyRecommendation::from))
    }

    /// Delete a recommendation by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM safety_recommendations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
