//! Handlers for the `/recommendations` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use harsia_core::filter::{available_years, filter_records};
use harsia_core::recommendation::RecommendationFilterKey;
use harsia_core::types::DbId;
use harsia_db::models::recommendation::{CreateRecommendation, UpdateRecommendation};

use super::report::RefreshResult;
use crate::error::AppResult;
use crate::middleware::rbac::RequireWriter;
use crate::query::{LangParams, ListParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{ListView, RecommendationView};

/// GET /api/v1/recommendations
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<ListView<RecommendationView>>>> {
    let filters = params.filter_map::<RecommendationFilterKey>()?;
    let lang = params.language();
    let snapshot = state.recommendations.snapshot().await;

    let items: Vec<RecommendationView> = filter_records(&snapshot.records, &params.q, &filters)
        .into_iter()
        .map(|r| RecommendationView::new(r, lang))
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

/// GET /api/v1/recommendations/years
pub async fn years(State(state): State<AppState>) -> Json<DataResponse<Vec<i32>>> {
    let records = state.recommendations.records().await;
    Json(DataResponse {
        data: available_years(&records, |r| Some(r.issue_date)),
    })
}

/// GET /api/v1/recommendations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<RecommendationView>>> {
    let rec = state.recommendations.get_by_id(id).await?;
    Ok(Json(DataResponse {
        data: RecommendationView::new(rec, params.language()),
    }))
}

/// POST /api/v1/recommendations
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateRecommendation>,
) -> AppResult<(StatusCode, Json<DataResponse<RecommendationView>>)> {
    let rec = state.recommendations.create(input).await?;
    tracing::info!(user_id = user.user_id, recommendation_id = rec.id, "Recommendation created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecommendationView::new(rec, Default::default()),
        }),
    ))
}

/// PUT /api/v1/recommendations/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecommendation>,
) -> AppResult<Json<DataResponse<RecommendationView>>> {
    let rec = state.recommendations.update(id, input).await?;
    tracing::info!(user_id = user.user_id, recommendation_id = id, "Recommendation updated");
    Ok(Json(DataResponse {
        data: RecommendationView::new(rec, Default::default()),
    }))
}

/// DELETE /api/v1/recommendations/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.recommendations.remove(id).await?;
    tracing::info!(user_id = user.user_id, recommendation_id = id, "Recommendation deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/recommendations/refresh
pub async fn refresh(
    RequireWriter(_user): RequireWriter,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RefreshResult>>> {
    let records = state.recommendations.fetch_all().await?;
    Ok(Json(DataResponse {
        data: RefreshResult {
            count: records.len(),
        },
    }))
}
