//! Handlers for the `/reports` resource.
//!
//! Lists come from the repository cache, narrowed by the filter engine.
//! Single-record reads go to the store. Mutations go through the repository
//! so the cache follows them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use harsia_core::filter::{available_years, filter_records};
use harsia_core::report::ReportFilterKey;
use harsia_core::types::DbId;
use harsia_db::models::report::{CreateReport, UpdateReport};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireWriter;
use crate::query::{LangParams, ListParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{ListView, ReportView};

/// Result of a manual cache refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResult {
    pub count: usize,
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<ListView<ReportView>>>> {
    let filters = params.filter_map::<ReportFilterKey>()?;
    let lang = params.language();
    let snapshot = state.reports.snapshot().await;

    let items: Vec<ReportView> = filter_records(&snapshot.records, &params.q, &filters)
        .into_iter()
        .map(|r| ReportView::new(r, lang))
        .collect();

    Ok(Json(DataResponse {
        data: ListView {
            total: items.len(),
            items,
            loading: snapshot.loading,
            error: snapshot.error,
        },
    }))
}

/// GET /api/v1/reports/years
pub async fn years(State(state): State<AppState>) -> Json<DataResponse<Vec<i32>>> {
    let records = state.reports.records().await;
    Json(DataResponse {
        data: available_years(&records, |r| r.publication_date),
    })
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<ReportView>>> {
    let report = state.reports.get_by_id(id).await?;
    Ok(Json(DataResponse {
        data: ReportView::new(report, params.language()),
    }))
}

/// POST /api/v1/reports
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<DataResponse<ReportView>>)> {
    let report = state.reports.create(input).await?;
    tracing::info!(user_id = user.user_id, report_id = report.id, "Report created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ReportView::new(report, Default::default()),
        }),
    ))
}

/// PUT /api/v1/reports/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<DataResponse<ReportView>>> {
    let report = state.reports.update(id, input).await?;
    tracing::info!(user_id = user.user_id, report_id = id, "Report updated");
    Ok(Json(DataResponse {
        data: ReportView::new(report, Default::default()),
    }))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.reports.remove(id).await?;
    tracing::info!(user_id = user.user_id, report_id = id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reports/refresh
pub async fn refresh(
    RequireWriter(_user): RequireWriter,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RefreshResult>>> {
    let records = state.reports.fetch_all().await?;
    Ok(Json(DataResponse {
        data: RefreshResult {
            count: records.len(),
        },
    }))
}
