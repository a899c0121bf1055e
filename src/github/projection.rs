use chrono::{DateTime, NaiveDate, Utc};

use super::RawRepository;
use crate::models::{Repository, NO_DESCRIPTION, UNKNOWN_LANGUAGE};

/// Map one raw record to a [`Repository`], filling in defaults.
///
/// Returns `None` only when the record has no identifier. Missing names fall
/// back to each other; a missing URL projects to an empty string.
pub fn project(raw: &RawRepository) -> Option<Repository> {
    let id = raw.id?;

    let full_name = raw
        .full_name
        .clone()
        .or_else(|| raw.name.clone())
        .unwrap_or_default();
    let name = raw.name.clone().unwrap_or_else(|| {
        full_name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
    });

    Some(Repository {
        id,
        name,
        full_name,
        description: raw
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        popularity: raw.stargazers_count.unwrap_or(0),
        fork_count: raw.forks_count.unwrap_or(0),
        primary_language: raw
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        url: raw.html_url.clone().unwrap_or_default(),
        topics: raw.topics.clone().unwrap_or_default(),
        updated_at: raw.updated_at.as_deref().and_then(parse_timestamp),
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        open_issue_count: raw.open_issues_count,
    })
}

/// Project a whole result page, skipping records without an identifier.
pub fn project_all(raws: &[RawRepository]) -> Vec<Repository> {
    raws.iter()
        .filter_map(|raw| {
            let projected = project(raw);
            if projected.is_none() {
                tracing::debug!(
                    name = raw.full_name.as_deref().unwrap_or("<unnamed>"),
                    "Dropping search record without an id"
                );
            }
            projected
        })
        .collect()
}

/// Parse an ISO-8601 timestamp; a bare date is read as midnight UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
