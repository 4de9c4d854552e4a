//! Safety recommendation entity model and DTOs.

use harsia_core::error::CoreError;
use harsia_core::filter::{contains_ci, exact_matches, year_matches, Filterable};
use harsia_core::locale::{Bilingual, Language};
use harsia_core::recommendation::{
    self, RecommendationCategory, RecommendationFilterKey, RecommendationStatus,
};
use harsia_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{non_blank, require_non_empty, validation_error};

/// Summary of the report a recommendation was issued under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedReport {
    pub id: DbId,
    pub report_number: String,
    pub title_en: String,
    pub title_gr: String,
}

/// A safety recommendation with its related report resolved.
///
/// `related_report` is `None` both when no report is referenced and when the
/// referenced report no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRecommendation {
    pub id: DbId,
    pub recommendation_number: String,
    pub title_en: String,
    pub title_gr: String,
    pub description_en: String,
    pub description_gr: String,
    pub issue_date: Date,
    pub recipient_en: String,
    pub recipient_gr: String,
    pub status: String,
    pub category: String,
    pub related_report_id: Option<DbId>,
    pub related_report: Option<RelatedReport>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SafetyRecommendation {
    pub fn title(&self, lang: Language) -> &str {
        Bilingual::new(self.title_en.as_str(), self.title_gr.as_str()).pick(lang)
    }

    pub fn description(&self, lang: Language) -> &str {
        Bilingual::new(self.description_en.as_str(), self.description_gr.as_str()).pick(lang)
    }

    pub fn recipient(&self, lang: Language) -> &str {
        Bilingual::new(self.recipient_en.as_str(), self.recipient_gr.as_str()).pick(lang)
    }
}

impl Filterable for SafetyRecommendation {
    type Key = RecommendationFilterKey;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title_en.as_str()),
            Some(self.title_gr.as_str()),
            Some(self.recommendation_number.as_str()),
            Some(self.recipient_en.as_str()),
            Some(self.recipient_gr.as_str()),
        ]
    }

    fn matches_filter(&self, key: RecommendationFilterKey, value: &str) -> bool {
        match key {
            RecommendationFilterKey::Year => year_matches(Some(self.issue_date), value),
            RecommendationFilterKey::Status => exact_matches(&self.status, value),
            RecommendationFilterKey::Recipient => {
                let needle = value.to_lowercase();
                contains_ci(Some(&self.recipient_en), &needle)
                    || contains_ci(Some(&self.recipient_gr), &needle)
            }
        }
    }
}

/// Flat row produced by the recommendation/report LEFT JOIN.
#[derive(Debug, FromRow)]
pub(crate) struct RecommendationRow {
    pub id: DbId,
    pub recommendation_number: String,
    pub title_en: String,
    pub title_gr: String,
    pub description_en: String,
    pub description_gr: String,
    pub issue_date: Date,
    pub recipient_en: String,
    pub recipient_gr: String,
    pub status: String,
    pub category: String,
    pub related_report_id: Option<DbId>,
    pub related_id: Option<DbId>,
    pub related_report_number: Option<String>,
    pub related_title_en: Option<String>,
    pub related_title_gr: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<RecommendationRow> for SafetyRecommendation {
    fn from(row: RecommendationRow) -> Self {
        let related_report = match (
            row.related_id,
            row.related_report_number,
            row.related_title_en,
            row.related_title_gr,
        ) {
            (Some(id), Some(report_number), Some(title_en), Some(title_gr)) => {
                Some(RelatedReport {
                    id,
                    report_number,
                    title_en,
                    title_gr,
                })
            }
            _ => None,
        };
        Self {
            id: row.id,
            recommendation_number: row.recommendation_number,
            title_en: row.title_en,
            title_gr: row.title_gr,
            description_en: row.description_en,
            description_gr: row.description_gr,
            issue_date: row.issue_date,
            recipient_en: row.recipient_en,
            recipient_gr: row.recipient_gr,
            status: row.status,
            category: row.category,
            related_report_id: row.related_report_id,
            related_report,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new recommendation.
///
/// `status` defaults to `Open` and `category` to `Operational` when omitted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRecommendation {
    #[validate(length(min = 1, message = "recommendation_number is required"))]
    pub recommendation_number: String,
    #[validate(length(min = 1, message = "title_en is required"))]
    pub title_en: String,
    #[validate(length(min = 1, message = "title_gr is required"))]
    pub title_gr: String,
    #[validate(length(min = 1, message = "description_en is required"))]
    pub description_en: String,
    #[validate(length(min = 1, message = "description_gr is required"))]
    pub description_gr: String,
    pub issue_date: Date,
    #[validate(length(min = 1, message = "recipient_en is required"))]
    pub recipient_en: String,
    #[validate(length(min = 1, message = "recipient_gr is required"))]
    pub recipient_gr: String,
    pub status: Option<String>,
    pub category: Option<String>,
    pub related_report_id: Option<DbId>,
}

impl CreateRecommendation {
    pub fn normalized(self) -> Self {
        Self {
            recipient_en: self.recipient_en.trim().to_string(),
            recipient_gr: self.recipient_gr.trim().to_string(),
            status: non_blank(self.status),
            category: non_blank(self.category),
            ..self
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        if let Some(status) = &self.status {
            recommendation::validate_status(status)?;
        }
        if let Some(category) = &self.category {
            recommendation::validate_category(category)?;
        }
        Ok(())
    }

    pub fn status_or_default(&self) -> &str {
        self.status
            .as_deref()
            .unwrap_or(RecommendationStatus::default().as_str())
    }

    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .unwrap_or(RecommendationCategory::default().as_str())
    }
}

/// DTO for updating an existing recommendation. Omitted fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecommendation {
    pub recommendation_number: Option<String>,
    pub title_en: Option<String>,
    pub title_gr: Option<String>,
    pub description_en: Option<String>,
    pub description_gr: Option<String>,
    pub issue_date: Option<Date>,
    pub recipient_en: Option<String>,
    pub recipient_gr: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub related_report_id: Option<DbId>,
}

impl UpdateRecommendation {
    pub fn normalized(self) -> Self {
        Self {
            recipient_en: non_blank(self.recipient_en),
            recipient_gr: non_blank(self.recipient_gr),
            status: non_blank(self.status),
            category: non_blank(self.category),
            ..self
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        require_non_empty(
            "recommendation_number",
            self.recommendation_number.as_deref(),
        )?;
        require_non_empty("title_en", self.title_en.as_deref())?;
        require_non_empty("title_gr", self.title_gr.as_deref())?;
        require_non_empty("description_en", self.description_en.as_deref())?;
        require_non_empty("description_gr", self.description_gr.as_deref())?;
        require_non_empty("recipient_en", self.recipient_en.as_deref())?;
        require_non_empty("recipient_gr", self.recipient_gr.as_deref())?;
        if let Some(status) = &self.status {
            recommendation::validate_status(status)?;
        }
        if let Some(category) = &self.category {
            recommendation::validate_category(category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use harsia_core::filter::{filter_records, FilterMap};

    use super::*;

    fn make_recommendation(id: DbId, recipient_en: &str, recipient_gr: &str) -> SafetyRecommendation {
        SafetyRecommendation {
            id,
            recommendation_number: format!("SR-{id}"),
            title_en: "Crew training".into(),
            title_gr: "Εκπαίδευση πληρώματος".into(),
            description_en: "d".into(),
            description_gr: "δ".into(),
            issue_date: "2023-03-01".parse().unwrap(),
            recipient_en: recipient_en.into(),
            recipient_gr: recipient_gr.into(),
            status: "Open".into(),
            category: "Training".into(),
            related_report_id: None,
            related_report: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn row(related: Option<(DbId, &str)>) -> RecommendationRow {
        RecommendationRow {
            id: 7,
            recommendation_number: "SR-7".into(),
            title_en: "t".into(),
            title_gr: "τ".into(),
            description_en: "d".into(),
            description_gr: "δ".into(),
            issue_date: "2023-03-01".parse().unwrap(),
            recipient_en: "Operator".into(),
            recipient_gr: "Φορέας".into(),
            status: "Open".into(),
            category: "Operational".into(),
            related_report_id: Some(42),
            related_id: related.map(|(id, _)| id),
            related_report_number: related.map(|(_, n)| n.to_string()),
            related_title_en: related.map(|_| "Report".to_string()),
            related_title_gr: related.map(|_| "Έκθεση".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn recipient_filter_matches_either_language() {
        let recs = vec![
            make_recommendation(1, "Civil Aviation Authority", "Υπηρεσία Πολιτικής Αεροπορίας"),
            make_recommendation(2, "Airline operator", "Αερομεταφορέας"),
        ];
        let en = FilterMap::from([(RecommendationFilterKey::Recipient, "AVIATION".to_string())]);
        let gr = FilterMap::from([(RecommendationFilterKey::Recipient, "αερομεταφ".to_string())]);
        assert_eq!(filter_records(&recs, "", &en)[0].id, 1);
        assert_eq!(filter_records(&recs, "", &gr)[0].id, 2);
    }

    #[test]
    fn year_filter_uses_issue_date() {
        let recs = vec![make_recommendation(1, "a", "α")];
        let hit = FilterMap::from([(RecommendationFilterKey::Year, "2023".to_string())]);
        let miss = FilterMap::from([(RecommendationFilterKey::Year, "2021".to_string())]);
        assert_eq!(filter_records(&recs, "", &hit).len(), 1);
        assert!(filter_records(&recs, "", &miss).is_empty());
    }

    #[test]
    fn joined_row_resolves_related_report() {
        let rec = SafetyRecommendation::from(row(Some((42, "HARSIA-2023-004"))));
        let related = rec.related_report.expect("related report resolved");
        assert_eq!(related.id, 42);
        assert_eq!(related.report_number, "HARSIA-2023-004");
    }

    #[test]
    fn dangling_reference_resolves_to_none() {
        let rec = SafetyRecommendation::from(row(None));
        assert_eq!(rec.related_report_id, Some(42));
        assert_eq!(rec.related_report, None);
    }

    #[test]
    fn localized_recipient() {
        let rec = make_recommendation(1, "Operator", "Φορέας");
        assert_eq!(rec.recipient(Language::Gr), "Φορέας");
        assert_eq!(rec.title(Language::En), "Crew training");
    }

    #[test]
    fn create_defaults_to_open_operational() {
        let input = CreateRecommendation {
            recommendation_number: "SR-1".into(),
            title_en: "t".into(),
            title_gr: "τ".into(),
            description_en: "d".into(),
            description_gr: "δ".into(),
            issue_date: "2023-03-01".parse().unwrap(),
            recipient_en: "Operator".into(),
            recipient_gr: "Φορέας".into(),
            ..Default::default()
        };
        assert!(input.check().is_ok());
        assert_eq!(input.status_or_default(), "Open");
        assert_eq!(input.category_or_default(), "Operational");
    }

    #[test]
    fn create_requires_both_recipients() {
        let input = CreateRecommendation {
            recommendation_number: "SR-1".into(),
            title_en: "t".into(),
            title_gr: "τ".into(),
            description_en: "d".into(),
            description_gr: "δ".into(),
            issue_date: "2023-03-01".parse().unwrap(),
            recipient_en: "Operator".into(),
            recipient_gr: "   ".into(),
            ..Default::default()
        }
        .normalized();
        let err = input.check().unwrap_err();
        assert!(err.to_string().contains("recipient_gr"), "{err}");
    }

    #[test]
    fn update_rejects_blank_recipient() {
        let patch = UpdateRecommendation {
            recipient_en: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }

    #[test]
    fn update_rejects_unknown_status() {
        let patch = UpdateRecommendation {
            status: Some("Pending".into()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }
}
