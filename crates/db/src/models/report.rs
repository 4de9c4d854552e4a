//! Investigation report entity model and DTOs.

use harsia_core::error::CoreError;
use harsia_core::filter::{contains_ci, exact_matches, year_matches, Filterable};
use harsia_core::locale::{Bilingual, Language};
use harsia_core::report::{self, ReportCategory, ReportFilterKey, ReportStatus};
use harsia_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{non_blank, require_non_empty, validation_error};

/// A row from the `investigation_reports` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct InvestigationReport {
    pub id: DbId,
    pub report_number: String,
    pub title_en: String,
    pub title_gr: String,
    pub description_en: String,
    pub description_gr: String,
    pub investigation_date: Option<Date>,
    pub publication_date: Option<Date>,
    pub aircraft_type: Option<String>,
    pub location_en: Option<String>,
    pub location_gr: Option<String>,
    pub category: String,
    pub status: String,
    pub pdf_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InvestigationReport {
    pub fn title(&self, lang: Language) -> &str {
        Bilingual::new(self.title_en.as_str(), self.title_gr.as_str()).pick(lang)
    }

    pub fn description(&self, lang: Language) -> &str {
        Bilingual::new(self.description_en.as_str(), self.description_gr.as_str()).pick(lang)
    }

    pub fn location(&self, lang: Language) -> Option<&str> {
        Bilingual::new(self.location_en.as_deref(), self.location_gr.as_deref()).pick(lang)
    }
}

impl Filterable for InvestigationReport {
    type Key = ReportFilterKey;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title_en.as_str()),
            Some(self.title_gr.as_str()),
            Some(self.report_number.as_str()),
            self.aircraft_type.as_deref(),
        ]
    }

    fn matches_filter(&self, key: ReportFilterKey, value: &str) -> bool {
        match key {
            ReportFilterKey::Year => year_matches(self.publication_date, value),
            ReportFilterKey::Status => exact_matches(&self.status, value),
            ReportFilterKey::Category => exact_matches(&self.category, value),
        }
    }
}

/// DTO for creating a new report.
///
/// `category` defaults to `Accident` and `status` to `Draft` when omitted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReport {
    #[validate(length(min = 1, message = "report_number is required"))]
    pub report_number: String,
    #[validate(length(min = 1, message = "title_en is required"))]
    pub title_en: String,
    #[validate(length(min = 1, message = "title_gr is required"))]
    pub title_gr: String,
    #[validate(length(min = 1, message = "description_en is required"))]
    pub description_en: String,
    #[validate(length(min = 1, message = "description_gr is required"))]
    pub description_gr: String,
    pub investigation_date: Option<Date>,
    pub publication_date: Option<Date>,
    pub aircraft_type: Option<String>,
    pub location_en: Option<String>,
    pub location_gr: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[validate(url(message = "pdf_url must be a valid URL"))]
    pub pdf_url: Option<String>,
}

impl CreateReport {
    /// Turn blank optional inputs into `None`.
    pub fn normalized(self) -> Self {
        Self {
            aircraft_type: non_blank(self.aircraft_type),
            location_en: non_blank(self.location_en),
            location_gr: non_blank(self.location_gr),
            category: non_blank(self.category),
            status: non_blank(self.status),
            pdf_url: non_blank(self.pdf_url),
            ..self
        }
    }

    /// Check required fields, URL shape and the closed enumerations.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        if let Some(category) = &self.category {
            report::validate_category(category)?;
        }
        if let Some(status) = &self.status {
            report::validate_status(status)?;
        }
        Ok(())
    }

    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .unwrap_or(ReportCategory::default().as_str())
    }

    pub fn status_or_default(&self) -> &str {
        self.status
            .as_deref()
            .unwrap_or(ReportStatus::default().as_str())
    }
}

/// DTO for updating an existing report. All fields are optional; omitted
/// fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReport {
    pub report_number: Option<String>,
    pub title_en: Option<String>,
    pub title_gr: Option<String>,
    pub description_en: Option<String>,
    pub description_gr: Option<String>,
    pub investigation_date: Option<Date>,
    pub publication_date: Option<Date>,
    pub aircraft_type: Option<String>,
    pub location_en: Option<String>,
    pub location_gr: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[validate(url(message = "pdf_url must be a valid URL"))]
    pub pdf_url: Option<String>,
}

impl UpdateReport {
    pub fn normalized(self) -> Self {
        Self {
            aircraft_type: non_blank(self.aircraft_type),
            location_en: non_blank(self.location_en),
            location_gr: non_blank(self.location_gr),
            category: non_blank(self.category),
            status: non_blank(self.status),
            pdf_url: non_blank(self.pdf_url),
            ..self
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        require_non_empty("report_number", self.report_number.as_deref())?;
        require_non_empty("title_en", self.title_en.as_deref())?;
        require_non_empty("title_gr", self.title_gr.as_deref())?;
        require_non_empty("description_en", self.description_en.as_deref())?;
        require_non_empty("description_gr", self.description_gr.as_deref())?;
        if let Some(category) = &self.category {
            report::validate_category(category)?;
        }
        if let Some(status) = &self.status {
            report::validate_status(status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use harsia_core::filter::{filter_records, FilterMap};

    use super::*;

    fn make_report(
        id: DbId,
        number: &str,
        title: &str,
        published: &str,
        category: &str,
        status: &str,
    ) -> InvestigationReport {
        InvestigationReport {
            id,
            report_number: number.into(),
            title_en: title.into(),
            title_gr: format!("{title} (ελ)"),
            description_en: "d".into(),
            description_gr: "δ".into(),
            investigation_date: None,
            publication_date: published.parse().ok(),
            aircraft_type: None,
            location_en: None,
            location_gr: None,
            category: category.into(),
            status: status.into(),
            pdf_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn seed() -> Vec<InvestigationReport> {
        vec![
            make_report(1, "R-1", "Engine failure", "2023-01-01", "Accident", "Final"),
            make_report(2, "R-2", "Runway excursion", "2022-05-01", "Incident", "Draft"),
        ]
    }

    fn ids(reports: &[InvestigationReport]) -> Vec<DbId> {
        reports.iter().map(|r| r.id).collect()
    }

    #[test]
    fn query_matches_title() {
        assert_eq!(ids(&filter_records(&seed(), "runway", &FilterMap::new())), vec![2]);
    }

    #[test]
    fn category_filter_is_exact() {
        let filters = FilterMap::from([(ReportFilterKey::Category, "Accident".to_string())]);
        assert_eq!(ids(&filter_records(&seed(), "", &filters)), vec![1]);
    }

    #[test]
    fn year_filter_uses_publication_date() {
        let filters = FilterMap::from([(ReportFilterKey::Year, "2022".to_string())]);
        assert_eq!(ids(&filter_records(&seed(), "", &filters)), vec![2]);
    }

    #[test]
    fn report_number_and_aircraft_type_are_searched() {
        let mut reports = seed();
        reports[0].aircraft_type = Some("ATR 72-500".into());
        assert_eq!(ids(&filter_records(&reports, "atr", &FilterMap::new())), vec![1]);
        assert_eq!(ids(&filter_records(&reports, "r-2", &FilterMap::new())), vec![2]);
    }

    #[test]
    fn filter_order_does_not_matter() {
        let reports = seed();
        let a = FilterMap::from([
            (ReportFilterKey::Status, "Final".to_string()),
            (ReportFilterKey::Year, "2023".to_string()),
        ]);
        let only_status = FilterMap::from([(ReportFilterKey::Status, "Final".to_string())]);
        let only_year = FilterMap::from([(ReportFilterKey::Year, "2023".to_string())]);

        let combined = filter_records(&reports, "", &a);
        let status_then_year =
            filter_records(&filter_records(&reports, "", &only_status), "", &only_year);
        let year_then_status =
            filter_records(&filter_records(&reports, "", &only_year), "", &only_status);
        assert_eq!(combined, status_then_year);
        assert_eq!(combined, year_then_status);
    }

    #[test]
    fn localized_accessors_pick_language() {
        let mut r = seed().remove(0);
        r.location_gr = Some("Αθήνα".into());
        assert_eq!(r.title(Language::En), "Engine failure");
        assert_eq!(r.title(Language::Gr), "Engine failure (ελ)");
        assert_eq!(r.location(Language::Gr), Some("Αθήνα"));
        assert_eq!(r.location(Language::En), None);
    }

    fn valid_create() -> CreateReport {
        CreateReport {
            report_number: "HARSIA-2024-001".into(),
            title_en: "t".into(),
            title_gr: "τ".into(),
            description_en: "d".into(),
            description_gr: "δ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_defaults_to_draft_accident() {
        let input = valid_create();
        assert!(input.check().is_ok());
        assert_eq!(input.status_or_default(), "Draft");
        assert_eq!(input.category_or_default(), "Accident");
    }

    #[test]
    fn create_requires_mandatory_fields() {
        let input = CreateReport {
            title_gr: String::new(),
            ..valid_create()
        };
        assert!(input.check().is_err());
    }

    #[test]
    fn create_rejects_unknown_enumerations() {
        let input = CreateReport {
            status: Some("Preliminary".into()),
            ..valid_create()
        };
        assert!(input.check().is_err());
    }

    #[test]
    fn blank_optional_inputs_become_none() {
        let input = CreateReport {
            pdf_url: Some(String::new()),
            aircraft_type: Some("  ".into()),
            ..valid_create()
        }
        .normalized();
        assert_eq!(input.pdf_url, None);
        assert_eq!(input.aircraft_type, None);
        assert!(input.check().is_ok());
    }

    #[test]
    fn update_rejects_emptied_required_field() {
        let patch = UpdateReport {
            title_en: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
        assert!(UpdateReport::default().check().is_ok());
    }
}
