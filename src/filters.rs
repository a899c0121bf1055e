use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How far back the "created" facet reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyWindow {
    #[default]
    Any,
    Week,
    Month,
    Year,
}

impl FromStr for RecencyWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown recency window: {other}")),
        }
    }
}

/// Server-side ordering requested from the remote search service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "stars")]
    Popularity,
    #[serde(rename = "forks")]
    Forks,
    #[serde(rename = "updated")]
    RecentlyUpdated,
    #[serde(rename = "created")]
    RecentlyCreated,
}

impl SortKey {
    /// Token the remote API expects in its `sort` parameter.
    pub fn as_remote_token(self) -> &'static str {
        match self {
            SortKey::Popularity => "stars",
            SortKey::Forks => "forks",
            SortKey::RecentlyUpdated => "updated",
            SortKey::RecentlyCreated => "created",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stars" | "popularity" => Ok(Self::Popularity),
            "forks" => Ok(Self::Forks),
            "updated" => Ok(Self::RecentlyUpdated),
            "created" => Ok(Self::RecentlyCreated),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Snapshot of every facet selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Exact, case-sensitive language facet names
    pub languages: BTreeSet<String>,
    /// Inclusive star-count floor; 0 disables the clause
    pub min_popularity: u64,
    pub recency_window: RecencyWindow,
    pub sort_key: SortKey,
}

/// Partial filter update. `None` fields leave the prior value in place.
///
/// Accepts the filter panel's historical key names (`minStars`, `sortBy`,
/// `dateRange`) as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub languages: Option<BTreeSet<String>>,
    #[serde(alias = "minStars", alias = "min_popularity")]
    pub min_popularity: Option<u64>,
    #[serde(alias = "dateRange", alias = "recency_window")]
    pub recency_window: Option<RecencyWindow>,
    #[serde(alias = "sortBy", alias = "sort_key")]
    pub sort_key: Option<SortKey>,
}

impl FilterUpdate {
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_popularity(mut self, min: u64) -> Self {
        self.min_popularity = Some(min);
        self
    }

    pub fn with_recency_window(mut self, window: RecencyWindow) -> Self {
        self.recency_window = Some(window);
        self
    }

    pub fn with_sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_none()
            && self.min_popularity.is_none()
            && self.recency_window.is_none()
            && self.sort_key.is_none()
    }
}

impl FilterState {
    /// Merge a partial update over this state, returning the new snapshot.
    pub fn merge(&self, update: &FilterUpdate) -> FilterState {
        FilterState {
            languages: update
                .languages
                .clone()
                .unwrap_or_else(|| self.languages.clone()),
            min_popularity: update.min_popularity.unwrap_or(self.min_popularity),
            recency_window: update.recency_window.unwrap_or(self.recency_window),
            sort_key: update.sort_key.unwrap_or(self.sort_key),
        }
    }

    /// "Clear all": back to no languages, no floor, any time, by stars.
    pub fn reset() -> FilterState {
        FilterState::default()
    }

    /// Add the language if absent, remove it if present.
    pub fn toggle_language(&self, language: &str) -> FilterState {
        let mut next = self.clone();
        if !next.languages.remove(language) {
            next.languages.insert(language.to_string());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_only() -> FilterState {
        FilterState {
            languages: BTreeSet::from(["Go".to_string()]),
            ..FilterState::default()
        }
    }

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let merged = go_only().merge(&FilterUpdate::default().with_min_popularity(50));
        assert_eq!(merged.languages, BTreeSet::from(["Go".to_string()]));
        assert_eq!(merged.min_popularity, 50);
        assert_eq!(merged.recency_window, RecencyWindow::Any);
        assert_eq!(merged.sort_key, SortKey::Popularity);
    }

    #[test]
    fn test_merge_window_and_sort_only() {
        let update = FilterUpdate::default()
            .with_recency_window(RecencyWindow::Week)
            .with_sort_key(SortKey::Forks);
        assert!(!update.is_empty());

        let merged = go_only().merge(&update);
        assert_eq!(merged.languages, BTreeSet::from(["Go".to_string()]));
        assert_eq!(merged.min_popularity, 0);
        assert_eq!(merged.recency_window, RecencyWindow::Week);
        assert_eq!(merged.sort_key, SortKey::Forks);
    }

    #[test]
    fn test_merge_replaces_language_set_wholesale() {
        let merged = go_only().merge(&FilterUpdate::default().with_languages(["Rust", "Zig"]));
        assert_eq!(merged.languages.len(), 2);
        assert!(!merged.languages.contains("Go"));
    }

    #[test]
    fn test_empty_update_is_identity() {
        let state = go_only();
        let update = FilterUpdate::default();
        assert!(update.is_empty());
        assert_eq!(state.merge(&update), state);
    }

    #[test]
    fn test_merge_can_clear_languages_explicitly() {
        let merged = go_only().merge(&FilterUpdate::default().with_languages(Vec::<String>::new()));
        assert!(merged.languages.is_empty());
    }

    #[test]
    fn test_update_deserializes_with_panel_aliases() {
        let update: FilterUpdate =
            serde_json::from_str(r#"{"minStars": 500, "sortBy": "forks", "dateRange": "week"}"#)
                .unwrap();
        assert_eq!(update.min_popularity, Some(500));
        assert_eq!(update.sort_key, Some(SortKey::Forks));
        assert_eq!(update.recency_window, Some(RecencyWindow::Week));
        assert!(update.languages.is_none());
    }

    #[test]
    fn test_update_deserializes_canonical_keys() {
        let update: FilterUpdate =
            serde_json::from_str(r#"{"languages": ["Go"], "minPopularity": 50}"#).unwrap();
        assert_eq!(update.min_popularity, Some(50));
        assert_eq!(update.languages, Some(BTreeSet::from(["Go".to_string()])));
    }

    #[test]
    fn test_toggle_language() {
        let state = FilterState::default().toggle_language("Rust");
        assert!(state.languages.contains("Rust"));
        let state = state.toggle_language("Rust");
        assert!(state.languages.is_empty());
    }

    #[test]
    fn test_languages_are_case_sensitive() {
        let state = FilterState::default()
            .toggle_language("rust")
            .toggle_language("Rust");
        assert_eq!(state.languages.len(), 2);
    }

    #[test]
    fn test_sort_key_remote_tokens() {
        assert_eq!(SortKey::Popularity.as_remote_token(), "stars");
        assert_eq!(SortKey::Forks.as_remote_token(), "forks");
        assert_eq!(SortKey::RecentlyUpdated.as_remote_token(), "updated");
        assert_eq!(SortKey::RecentlyCreated.as_remote_token(), "created");
        assert_eq!(SortKey::default(), SortKey::Popularity);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("Month".parse::<RecencyWindow>().unwrap(), RecencyWindow::Month);
        assert_eq!("updated".parse::<SortKey>().unwrap(), SortKey::RecentlyUpdated);
        assert!("decade".parse::<RecencyWindow>().is_err());
    }

    #[test]
    fn test_reset_returns_defaults() {
        assert_eq!(FilterState::reset(), FilterState::default());
    }
}
