//! Remote repository search: the HTTP gateway and the projection of its raw
//! records into [`crate::models::Repository`].

pub mod gateway;
pub mod projection;

use serde::Deserialize;

/// A repository record exactly as the search API returns it. Every field is
/// optional here; defaults are applied by [`projection::project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRepository {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub language: Option<String>,
    pub html_url: Option<String>,
    pub topics: Option<Vec<String>>,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    pub open_issues_count: Option<u64>,
}

/// Response envelope of the search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub items: Option<Vec<RawRepository>>,
}
