use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::FilterState;
use crate::search::rank::{Direction, RankKey};

/// Shown in place of a missing repository description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Facet name for repositories that report no primary language.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// A repository as the rest of the pipeline sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    /// Star count
    pub popularity: u64,
    pub fork_count: u64,
    pub primary_language: String,
    pub url: String,
    pub topics: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub open_issue_count: Option<u64>,
}

/// A repository plus the display signals derived from its rank position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(flatten)]
    pub repository: Repository,
    /// Placeholder similarity, 70..=99
    pub match_percent: u8,
    pub is_trending: bool,
}

/// One entry of the language distribution summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

impl LanguageCount {
    pub fn new(language: impl Into<String>, count: usize) -> Self {
        Self {
            language: language.into(),
            count,
        }
    }
}

/// Everything a renderer needs from the current session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Last executed search term, empty before the first search
    pub query: String,
    pub loading: bool,
    pub results: Vec<RankedResult>,
    pub languages: Vec<LanguageCount>,
    pub filters: FilterState,
    pub rank_key: RankKey,
    pub direction: Direction,
}
