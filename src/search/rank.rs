use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Repository;

/// Client-side ordering of a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankKey {
    #[default]
    #[serde(rename = "stars")]
    Popularity,
    Forks,
    Name,
    #[serde(rename = "updated")]
    RecentlyUpdated,
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stars" | "popularity" => Ok(Self::Popularity),
            "forks" => Ok(Self::Forks),
            "name" => Ok(Self::Name),
            "updated" => Ok(Self::RecentlyUpdated),
            other => Err(format!("unknown rank key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    pub fn toggle(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Sort `repos` by `key` into a new vector, leaving the input untouched.
///
/// The sort is stable in both directions: descending order reverses the
/// comparison rather than the output, so equal keys keep their input order.
pub fn rank(repos: &[Repository], key: RankKey, direction: Direction) -> Vec<Repository> {
    let mut ranked = repos.to_vec();
    ranked.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    ranked
}

fn compare(a: &Repository, b: &Repository, key: RankKey) -> Ordering {
    match key {
        RankKey::Popularity => a.popularity.cmp(&b.popularity),
        RankKey::Forks => a.fork_count.cmp(&b.fork_count),
        RankKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        RankKey::RecentlyUpdated => updated_or_epoch(a).cmp(&updated_or_epoch(b)),
    }
}

// Missing timestamps sort as the oldest possible update.
fn updated_or_epoch(repo: &Repository) -> DateTime<Utc> {
    repo.updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_repo(id: u64, name: &str, stars: u64, forks: u64) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            full_name: format!("owner/{name}"),
            description: String::new(),
            popularity: stars,
            fork_count: forks,
            primary_language: "Rust".to_string(),
            url: format!("https://github.com/owner/{name}"),
            topics: vec![],
            updated_at: None,
            created_at: None,
            open_issue_count: None,
        }
    }

    fn ids(repos: &[Repository]) -> Vec<u64> {
        repos.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_popularity_descending() {
        let repos = vec![
            make_repo(1, "a", 10, 0),
            make_repo(2, "b", 300, 0),
            make_repo(3, "c", 50, 0),
        ];
        let ranked = rank(&repos, RankKey::Popularity, Direction::Descending);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
        // input untouched
        assert_eq!(ids(&repos), vec![1, 2, 3]);
    }

    #[test]
    fn test_forks_ascending() {
        let repos = vec![make_repo(1, "a", 0, 9), make_repo(2, "b", 0, 1)];
        let ranked = rank(&repos, RankKey::Forks, Direction::Ascending);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_equal_keys_keep_input_order_both_directions() {
        let repos = vec![
            make_repo(1, "first", 100, 0),
            make_repo(2, "top", 500, 0),
            make_repo(3, "second", 100, 0),
        ];
        let desc = rank(&repos, RankKey::Popularity, Direction::Descending);
        assert_eq!(ids(&desc), vec![2, 1, 3]);
        let asc = rank(&repos, RankKey::Popularity, Direction::Ascending);
        assert_eq!(ids(&asc), vec![1, 3, 2]);
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let repos = vec![
            make_repo(1, "zebra", 0, 0),
            make_repo(2, "Apple", 0, 0),
            make_repo(3, "banana", 0, 0),
        ];
        let ranked = rank(&repos, RankKey::Name, Direction::Ascending);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
        let ranked = rank(&repos, RankKey::Name, Direction::Descending);
        assert_eq!(ids(&ranked), vec![1, 3, 2]);
    }

    #[test]
    fn test_missing_updated_sorts_oldest() {
        let mut fresh = make_repo(1, "fresh", 0, 0);
        fresh.updated_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let mut stale = make_repo(2, "stale", 0, 0);
        stale.updated_at = Some(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap());
        let never = make_repo(3, "never", 0, 0);

        let repos = vec![never, stale, fresh];
        let ranked = rank(&repos, RankKey::RecentlyUpdated, Direction::Descending);
        assert_eq!(ids(&ranked), vec![1, 2, 3]);
        let ranked = rank(&repos, RankKey::RecentlyUpdated, Direction::Ascending);
        assert_eq!(ids(&ranked), vec![3, 2, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(&[], RankKey::Name, Direction::Ascending).is_empty());
    }

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!("name".parse::<RankKey>().unwrap(), RankKey::Name);
        assert_eq!("updated".parse::<RankKey>().unwrap(), RankKey::RecentlyUpdated);
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
        assert_eq!(Direction::Ascending.toggle(), Direction::Descending);
        assert!("created".parse::<RankKey>().is_err());
    }
}
