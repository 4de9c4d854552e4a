use std::sync::Arc;

use harsia_client::{RecommendationsRepository, ReportsRepository};
use harsia_db::store::RecordStore;
use harsia_db::DbPool;

use crate::auth::AuthService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Record store behind both repositories and the sign-in service.
    pub store: Arc<dyn RecordStore>,
    /// Cached investigation reports.
    pub reports: Arc<ReportsRepository<dyn RecordStore>>,
    /// Cached safety recommendations.
    pub recommendations: Arc<RecommendationsRepository<dyn RecordStore>>,
    /// Two-step sign-in and token bookkeeping.
    pub auth: Arc<AuthService>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Database pool when running on PostgreSQL; `None` on the in-memory store.
    pub pool: Option<DbPool>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        auth: AuthService,
        config: ServerConfig,
        pool: Option<DbPool>,
    ) -> Self {
        Self {
            reports: Arc::new(ReportsRepository::new(store.clone())),
            recommendations: Arc::new(RecommendationsRepository::new(store.clone())),
            store,
            auth: Arc::new(auth),
            config: Arc::new(config),
            pool,
        }
    }

    /// Fill both caches. A failed fetch is logged and recorded on the
    /// repository; the service still starts.
    pub async fn load_caches(&self) {
        let (reports, recommendations) =
            tokio::join!(self.reports.fetch_all(), self.recommendations.fetch_all());
        match reports {
            Ok(records) => tracing::info!(count = records.len(), "Reports loaded"),
            Err(e) => tracing::warn!(error = %e, "Initial report fetch failed"),
        }
        match recommendations {
            Ok(records) => tracing::info!(count = records.len(), "Recommendations loaded"),
            Err(e) => tracing::warn!(error = %e, "Initial recommendation fetch failed"),
        }
    }
}
