//! # repo-discovery
//!
//! Repository discovery over a remote code-hosting search API: a free-text
//! term plus facet filters becomes one remote query, and the unranked page it
//! returns is ranked, summarised and decorated on the client.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────┐     ┌─────────────┐
//!        │  Search term │     │ FilterState │
//!        └──────┬───────┘     └──────┬──────┘
//!               └─────────┬──────────┘
//!                         ▼
//!              ┌─────────────────────┐
//!              │    build_query      │  q / sort / order / per_page=12
//!              └──────────┬──────────┘
//!                         ▼
//!              ┌─────────────────────┐
//!              │   SearchGateway     │  one GET, no retries
//!              │  failure → empty    │
//!              └──────────┬──────────┘
//!                         ▼
//!              ┌─────────────────────┐
//!              │     projection      │  defaults, drop id-less records
//!              └──────────┬──────────┘
//!            ┌────────────┴─────────────┐
//!            ▼                          ▼
//!   ┌─────────────────┐       ┌───────────────────┐
//!   │      rank       │       │ language facets   │
//!   │ stable, client  │       │ top 5 by count    │
//!   └────────┬────────┘       └─────────┬─────────┘
//!            ▼                          │
//!   ┌─────────────────┐                 │
//!   │    signals      │                 │
//!   │ match% · top-3  │                 │
//!   └────────┬────────┘                 │
//!            └────────────┬─────────────┘
//!                         ▼
//!              ┌─────────────────────┐
//!              │  SessionSnapshot    │
//!              └─────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the remote endpoint and timeouts
//! - [`error`] - `DiscoveryError`: invalid input, failed search, bad config
//! - [`filters`] - `FilterState` facets and merge-style partial updates
//! - [`models`] - Shared data types: `Repository`, `RankedResult`, `SessionSnapshot`
//! - [`github::gateway`] - HTTP call to the search endpoint
//! - [`github::projection`] - Raw search records to `Repository`
//! - [`search::query`] - Filter state to remote query descriptor
//! - [`search::rank`] - Stable client-side sorting
//! - [`search::facets`] - Language distribution summary
//! - [`search::signal`] - Placeholder match percentage and trending flag
//! - [`state`] - `SearchSession`, the owned orchestrator with last-write-wins searches
//! - [`view`] - Display cards with compact counts and relative ages

pub mod config;
pub mod error;
pub mod filters;
pub mod github;
pub mod models;
pub mod search;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::DiscoveryError;
pub use filters::{FilterState, FilterUpdate, RecencyWindow, SortKey};
pub use state::{SearchOutcome, SearchSession};
