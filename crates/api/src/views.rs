//! Localized presentation of records.
//!
//! Each view carries the stored record unchanged (both languages) plus the
//! fields resolved for the requested language.

use harsia_core::locale::Language;
use harsia_db::models::recommendation::SafetyRecommendation;
use harsia_db::models::report::InvestigationReport;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: InvestigationReport,
    pub lang: Language,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
}

impl ReportView {
    pub fn new(report: InvestigationReport, lang: Language) -> Self {
        Self {
            title: report.title(lang).to_string(),
            description: report.description(lang).to_string(),
            location: report.location(lang).map(str::to_string),
            lang,
            report,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    #[serde(flatten)]
    pub recommendation: SafetyRecommendation,
    pub lang: Language,
    pub title: String,
    pub description: String,
    pub recipient: String,
    /// Title of the related report in the same language, when it resolves.
    pub related_report_title: Option<String>,
}

impl RecommendationView {
    pub fn new(recommendation: SafetyRecommendation, lang: Language) -> Self {
        let related_report_title = recommendation.related_report.as_ref().map(|r| {
            match lang {
                Language::En => r.title_en.clone(),
                Language::Gr => r.title_gr.clone(),
            }
        });
        Self {
            title: recommendation.title(lang).to_string(),
            description: recommendation.description(lang).to_string(),
            recipient: recommendation.recipient(lang).to_string(),
            related_report_title,
            lang,
            recommendation,
        }
    }
}

/// Filtered list plus the repository's fetch status.
#[derive(Debug, Serialize)]
pub struct ListView<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
}
