//! Handler for the admin overview.

use axum::extract::{Query, State};
use axum::Json;
use harsia_core::dashboard::{most_recent, DashboardStats};
use serde::Serialize;

use crate::middleware::rbac::RequireWriter;
use crate::query::LangParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{RecommendationView, ReportView};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub recent_reports: Vec<ReportView>,
    pub recent_recommendations: Vec<RecommendationView>,
}

/// GET /api/v1/dashboard
///
/// Computed from the caches; never reads the store.
pub async fn overview(
    RequireWriter(_user): RequireWriter,
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> Json<DataResponse<Dashboard>> {
    let lang = params.language();
    let reports = state.reports.records().await;
    let recommendations = state.recommendations.records().await;

    let stats = DashboardStats::compute(
        reports.len(),
        recommendations.iter().map(|r| r.status.as_str()),
    );

    Json(DataResponse {
        data: Dashboard {
            stats,
            recent_reports: most_recent(&reports)
                .into_iter()
                .map(|r| ReportView::new(r, lang))
                .collect(),
            recent_recommendations: most_recent(&recommendations)
                .into_iter()
                .map(|r| RecommendationView::new(r, lang))
                .collect(),
        },
    })
}
