//! Interface label catalog.

use std::collections::BTreeMap;

use axum::extract::Path;
use axum::Json;
use harsia_core::locale::Language;
use harsia_core::translations::labels;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub lang: Language,
    pub labels: BTreeMap<&'static str, &'static str>,
}

/// GET /api/v1/i18n/{lang}
///
/// Unknown language codes get the English catalog.
pub async fn catalog(Path(lang): Path<String>) -> Json<DataResponse<Catalog>> {
    let lang = Language::from_code(&lang);
    Json(DataResponse {
        data: Catalog {
            lang,
            labels: labels(lang).into_iter().collect(),
        },
    })
}
