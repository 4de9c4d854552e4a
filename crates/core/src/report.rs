//! Investigation report enumerations, defaults, and validation.
//!
//! Category and status are closed sets. They are stored as their display
//! strings (`"Serious Incident"`, `"Under Review"`) so the stored value, the
//! filter value and the label shown on the public site are the same text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Severity classification of the investigated occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportCategory {
    #[default]
    Accident,
    #[serde(rename = "Serious Incident")]
    SeriousIncident,
    Incident,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 3] = [
        ReportCategory::Accident,
        ReportCategory::SeriousIncident,
        ReportCategory::Incident,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportCategory::Accident => "Accident",
            ReportCategory::SeriousIncident => "Serious Incident",
            ReportCategory::Incident => "Incident",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid report category '{s}'. Must be one of: {:?}",
                    Self::ALL.map(Self::as_str)
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Publication state of a report. New reports start as drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Draft,
    #[serde(rename = "Under Review")]
    UnderReview,
    Final,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Draft,
        ReportStatus::UnderReview,
        ReportStatus::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "Draft",
            ReportStatus::UnderReview => "Under Review",
            ReportStatus::Final => "Final",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid report status '{s}'. Must be one of: {:?}",
                    Self::ALL.map(Self::as_str)
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Filter keys
// ---------------------------------------------------------------------------

/// Field filters offered on the public reports list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportFilterKey {
    /// Calendar year of `publication_date`.
    Year,
    Status,
    Category,
}

impl FromStr for ReportFilterKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(ReportFilterKey::Year),
            "status" => Ok(ReportFilterKey::Status),
            "category" => Ok(ReportFilterKey::Category),
            other => Err(CoreError::Validation(format!(
                "Unknown report filter '{other}'. Must be one of: year, status, category"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category string against the closed set.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    category.parse::<ReportCategory>().map(|_| ())
}

/// Validate a status string against the closed set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    status.parse::<ReportStatus>().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_round_trip_through_display_text() {
        for c in ReportCategory::ALL {
            assert_eq!(c.as_str().parse::<ReportCategory>().unwrap(), c);
        }
        assert_eq!(
            "Serious Incident".parse::<ReportCategory>().unwrap(),
            ReportCategory::SeriousIncident
        );
    }

    #[test]
    fn unknown_category_is_invalid() {
        assert!(validate_category("Mishap").is_err());
        assert!(validate_category("accident").is_err());
        assert!(validate_category("").is_err());
    }

    #[test]
    fn statuses_validate() {
        assert!(validate_status("Draft").is_ok());
        assert!(validate_status("Under Review").is_ok());
        assert!(validate_status("Final").is_ok());
        assert!(validate_status("Preliminary").is_err());
    }

    #[test]
    fn defaults_match_new_record_form() {
        assert_eq!(ReportStatus::default(), ReportStatus::Draft);
        assert_eq!(ReportCategory::default(), ReportCategory::Accident);
    }

    #[test]
    fn serde_uses_display_text() {
        let json = serde_json::to_string(&ReportStatus::UnderReview).unwrap();
        assert_eq!(json, "\"Under Review\"");
    }

    #[test]
    fn filter_keys_parse() {
        assert_eq!("year".parse::<ReportFilterKey>().unwrap(), ReportFilterKey::Year);
        assert_eq!(
            "category".parse::<ReportFilterKey>().unwrap(),
            ReportFilterKey::Category
        );
        assert!("recipient".parse::<ReportFilterKey>().is_err());
    }
}
