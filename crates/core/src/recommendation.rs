//! Safety recommendation enumerations, defaults, and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Implementation state of a recommendation as tracked with its recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationStatus {
    #[default]
    Open,
    #[serde(rename = "Under Review")]
    UnderReview,
    Implemented,
    Closed,
}

impl RecommendationStatus {
    pub const ALL: [RecommendationStatus; 4] = [
        RecommendationStatus::Open,
        RecommendationStatus::UnderReview,
        RecommendationStatus::Implemented,
        RecommendationStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationStatus::Open => "Open",
            RecommendationStatus::UnderReview => "Under Review",
            RecommendationStatus::Implemented => "Implemented",
            RecommendationStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid recommendation status '{s}'. Must be one of: {:?}",
                    Self::ALL.map(Self::as_str)
                ))
            })
    }
}

/// Subject area a recommendation addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCategory {
    #[default]
    Operational,
    Training,
    Technical,
    Regulatory,
}

impl RecommendationCategory {
    pub const ALL: [RecommendationCategory; 4] = [
        RecommendationCategory::Operational,
        RecommendationCategory::Training,
        RecommendationCategory::Technical,
        RecommendationCategory::Regulatory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationCategory::Operational => "Operational",
            RecommendationCategory::Training => "Training",
            RecommendationCategory::Technical => "Technical",
            RecommendationCategory::Regulatory => "Regulatory",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid recommendation category '{s}'. Must be one of: {:?}",
                    Self::ALL.map(Self::as_str)
                ))
            })
    }
}

/// Field filters offered on the public recommendations list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecommendationFilterKey {
    /// Calendar year of `issue_date`.
    Year,
    Status,
    /// Case-insensitive substring of either recipient variant.
    Recipient,
}

impl FromStr for RecommendationFilterKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(RecommendationFilterKey::Year),
            "status" => Ok(RecommendationFilterKey::Status),
            "recipient" => Ok(RecommendationFilterKey::Recipient),
            other => Err(CoreError::Validation(format!(
                "Unknown recommendation filter '{other}'. Must be one of: year, status, recipient"
            ))),
        }
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    status.parse::<RecommendationStatus>().map(|_| ())
}

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    category.parse::<RecommendationCategory>().map(|_| ())
}
