use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::filters::{FilterState, RecencyWindow};

/// Results requested per search.
pub const PAGE_SIZE: u32 = 12;

/// Fully resolved parameters for one remote search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteQueryDescriptor {
    pub search_expression: String,
    pub sort_key: &'static str,
    pub order: &'static str,
    pub page_size: u32,
}

impl RemoteQueryDescriptor {
    /// Query-string pairs in the order the remote API documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("q", self.search_expression.clone()),
            ("sort", self.sort_key.to_string()),
            ("order", self.order.to_string()),
            ("per_page", self.page_size.to_string()),
        ]
    }
}

/// Build the remote query for a non-empty, trimmed `term`.
///
/// Every selected language contributes its own `language:` clause, which the
/// remote grammar treats as a conjunction. `now` is taken as a parameter so
/// the created-after cutoff is reproducible.
pub fn build_query(term: &str, filters: &FilterState, now: DateTime<Utc>) -> RemoteQueryDescriptor {
    let mut expression = term.to_string();

    for language in &filters.languages {
        expression.push_str(" language:");
        expression.push_str(language);
    }

    if filters.min_popularity > 0 {
        expression.push_str(&format!(" stars:>={}", filters.min_popularity));
    }

    if let Some(cutoff) = created_cutoff(filters.recency_window, now) {
        expression.push_str(&format!(" created:>={}", cutoff.format("%Y-%m-%d")));
    }

    RemoteQueryDescriptor {
        search_expression: expression,
        sort_key: filters.sort_key.as_remote_token(),
        order: "desc",
        page_size: PAGE_SIZE,
    }
}

/// Calendar date the recency window reaches back to, or `None` for `Any`.
///
/// Month and year offsets clamp to the last day of the target month, so
/// March 31 minus one month is the end of February.
pub fn created_cutoff(window: RecencyWindow, now: DateTime<Utc>) -> Option<NaiveDate> {
    let today = now.date_naive();
    match window {
        RecencyWindow::Any => None,
        RecencyWindow::Week => Some(today - Duration::days(7)),
        RecencyWindow::Month => today.checked_sub_months(Months::new(1)),
        RecencyWindow::Year => today.checked_sub_months(Months::new(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SortKey;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn frozen_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 22, 45, 0).unwrap()
    }

    #[test]
    fn test_full_filter_expression() {
        let filters = FilterState {
            languages: BTreeSet::from(["TypeScript".to_string()]),
            min_popularity: 100,
            recency_window: RecencyWindow::Month,
            sort_key: SortKey::Popularity,
        };
        let descriptor = build_query("react", &filters, frozen_now());

        assert!(descriptor.search_expression.starts_with("react"));
        assert!(descriptor.search_expression.contains("language:TypeScript"));
        assert!(descriptor.search_expression.contains("stars:>=100"));
        assert!(descriptor.search_expression.contains("created:>=2024-05-15"));
        assert_eq!(descriptor.sort_key, "stars");
        assert_eq!(descriptor.order, "desc");
        assert_eq!(descriptor.page_size, 12);
    }

    #[test]
    fn test_no_filters_is_bare_term() {
        let descriptor = build_query("tokio", &FilterState::default(), frozen_now());
        assert_eq!(descriptor.search_expression, "tokio");
        assert_eq!(descriptor.sort_key, "stars");
    }

    #[test]
    fn test_one_clause_per_language() {
        let filters = FilterState {
            languages: BTreeSet::from(["Go".to_string(), "Rust".to_string()]),
            ..FilterState::default()
        };
        let descriptor = build_query("cli", &filters, frozen_now());
        assert_eq!(descriptor.search_expression, "cli language:Go language:Rust");
    }

    #[test]
    fn test_zero_popularity_omits_clause() {
        let filters = FilterState {
            min_popularity: 0,
            ..FilterState::default()
        };
        let descriptor = build_query("x", &filters, frozen_now());
        assert!(!descriptor.search_expression.contains("stars:"));
    }

    #[test]
    fn test_week_and_year_cutoffs() {
        let now = frozen_now();
        assert_eq!(
            created_cutoff(RecencyWindow::Week, now),
            NaiveDate::from_ymd_opt(2024, 6, 8)
        );
        assert_eq!(
            created_cutoff(RecencyWindow::Year, now),
            NaiveDate::from_ymd_opt(2023, 6, 15)
        );
        assert_eq!(created_cutoff(RecencyWindow::Any, now), None);
    }

    #[test]
    fn test_month_cutoff_clamps_to_month_end() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 0, 0).unwrap();
        assert_eq!(
            created_cutoff(RecencyWindow::Month, now),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_leap_day_minus_year() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(
            created_cutoff(RecencyWindow::Year, now),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
    }

    #[test]
    fn test_sort_key_mapping() {
        for (key, token) in [
            (SortKey::Forks, "forks"),
            (SortKey::RecentlyUpdated, "updated"),
            (SortKey::RecentlyCreated, "created"),
        ] {
            let filters = FilterState {
                sort_key: key,
                ..FilterState::default()
            };
            assert_eq!(build_query("q", &filters, frozen_now()).sort_key, token);
        }
    }

    #[test]
    fn test_query_pairs() {
        let descriptor = build_query("serde json", &FilterState::default(), frozen_now());
        let pairs = descriptor.query_pairs();
        assert_eq!(pairs[0], ("q", "serde json".to_string()));
        assert_eq!(pairs[3], ("per_page", "12".to_string()));
    }
}
