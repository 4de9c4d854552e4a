//! Shared query parameter types for API handlers.

use std::collections::HashMap;
use std::str::FromStr;

use harsia_core::error::CoreError;
use harsia_core::filter::{parse_filters, FilterMap};
use harsia_core::locale::Language;
use serde::Deserialize;

use crate::error::AppResult;

/// Language selection (`?lang=en|gr`). Anything else reads as English.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    pub fn language(&self) -> Language {
        self.lang.as_deref().map(Language::from_code).unwrap_or_default()
    }
}

/// List endpoint parameters: `?q=&lang=` plus any field filters.
///
/// Filter keys are collected as-is and validated per collection by
/// [`ListParams::filter_map`], so an unknown key is a 400 rather than being
/// silently ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub q: String,
    pub lang: Option<String>,
    #[serde(flatten)]
    pub filters: HashMap<String, String>,
}

impl ListParams {
    pub fn language(&self) -> Language {
        self.lang.as_deref().map(Language::from_code).unwrap_or_default()
    }

    pub fn filter_map<K>(&self) -> AppResult<FilterMap<K>>
    where
        K: FromStr<Err = CoreError> + Ord,
    {
        let pairs = self
            .filters
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));
        Ok(parse_filters(pairs)?)
    }
}
