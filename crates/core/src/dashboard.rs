//! Admin dashboard statistics derived from the cached collections.

use serde::Serialize;

use crate::recommendation::RecommendationStatus;

/// How many of the newest records the overview tab shows per collection.
pub const RECENT_LIMIT: usize = 3;

/// Headline counts shown on the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_reports: usize,
    pub total_recommendations: usize,
    pub implemented_recommendations: usize,
}

impl DashboardStats {
    /// Compute the counts from the report total and each recommendation's status.
    pub fn compute<'a, I>(total_reports: usize, recommendation_statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (total, implemented) = recommendation_statuses.into_iter().fold(
            (0, 0),
            |(total, implemented), status| {
                let done = status == RecommendationStatus::Implemented.as_str();
                (total + 1, implemented + usize::from(done))
            },
        );
        Self {
            total_reports,
            total_recommendations: total,
            implemented_recommendations: implemented,
        }
    }
}

/// The first [`RECENT_LIMIT`] records. Collections are cached newest-first,
/// so this is the most recent slice without re-sorting.
pub fn most_recent<T: Clone>(records: &[T]) -> Vec<T> {
    records.iter().take(RECENT_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_implemented_recommendations() {
        let stats = DashboardStats::compute(4, ["Open", "Implemented", "Closed", "Implemented"]);
        assert_eq!(
            stats,
            DashboardStats {
                total_reports: 4,
                total_recommendations: 4,
                implemented_recommendations: 2,
            }
        );
    }

    #[test]
    fn empty_collections_yield_zeroes() {
        assert_eq!(
            DashboardStats::compute(0, std::iter::empty()),
            DashboardStats::default()
        );
    }

    #[test]
    fn most_recent_takes_cache_head() {
        assert_eq!(most_recent(&[5, 4, 3, 2, 1]), vec![5, 4, 3]);
        assert_eq!(most_recent(&[1]), vec![1]);
    }
}
