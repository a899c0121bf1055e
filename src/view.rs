//! Display-ready cards for the rendering layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::RankedResult;

/// Coarse band of a match percentage, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn for_percent(percent: u8) -> Self {
        if percent >= 80 {
            MatchTier::High
        } else if percent >= 60 {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub language: String,
    pub url: String,
    pub stars: String,
    pub forks: String,
    pub match_percent: u8,
    pub match_tier: MatchTier,
    pub trending: bool,
    pub open_issues: Option<u64>,
    /// Relative age of the last update, e.g. "3 weeks ago"
    pub updated: Option<String>,
    pub topics: Vec<String>,
}

pub fn compose_cards(results: &[RankedResult], now: DateTime<Utc>) -> Vec<ResultCard> {
    results
        .iter()
        .map(|ranked| {
            let repo = &ranked.repository;
            ResultCard {
                name: repo.name.clone(),
                full_name: repo.full_name.clone(),
                description: repo.description.clone(),
                language: repo.primary_language.clone(),
                url: repo.url.clone(),
                stars: compact_count(repo.popularity),
                forks: compact_count(repo.fork_count),
                match_percent: ranked.match_percent,
                match_tier: MatchTier::for_percent(ranked.match_percent),
                trending: ranked.is_trending,
                open_issues: repo.open_issue_count,
                updated: repo.updated_at.map(|at| relative_age(at, now)),
                topics: repo.topics.clone(),
            }
        })
        .collect()
}

/// `1234 -> "1.2k"`, `2_500_000 -> "2.5M"`, small counts verbatim.
pub fn compact_count(n: u64) -> String {
    // Anything that would print as "1000.0k" rolls over to millions
    if n >= 999_950 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Human age of `then` relative to `now`, rounding partial units up.
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const DAY_SECS: i64 = 86_400;
    let secs = (now - then).num_seconds().abs();
    let days = (secs + DAY_SECS - 1) / DAY_SECS;

    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural(div_ceil(days, 7), "week"),
        30..=364 => plural(div_ceil(days, 30), "month"),
        _ => plural(div_ceil(days, 365), "year"),
    }
}

fn div_ceil(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
