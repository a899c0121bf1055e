use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{DiscoveryError, Result};
use crate::filters::{FilterState, FilterUpdate};
use crate::github::gateway::SearchGateway;
use crate::github::projection::project_all;
use crate::models::{LanguageCount, RankedResult, Repository, SessionSnapshot};
use crate::search::facets::language_distribution;
use crate::search::query::build_query;
use crate::search::rank::{rank, Direction, RankKey};
use crate::search::signal::{apply_signals, RandomSource, ThreadRandom};

/// How a single search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The pipeline ran to completion; zero results is a valid end state.
    Completed { results: usize },
    /// The remote search failed and the session now shows no results.
    Degraded,
    /// A newer search started while this one was in flight; its response was
    /// discarded without touching the session.
    Superseded,
}

#[derive(Default)]
struct SessionState {
    query: String,
    loading: bool,
    filters: FilterState,
    /// Projected records in remote order, kept for client-side re-sorts
    repositories: Vec<Repository>,
    results: Vec<RankedResult>,
    languages: Vec<LanguageCount>,
    rank_key: RankKey,
    direction: Direction,
}

/// Clears `loading` when a search ends by any path, including being dropped
/// mid-flight. Only the latest search may clear it.
struct LoadingGuard<'a> {
    session: &'a SearchSession,
    token: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.session.state.write();
        if self.session.latest_request.load(Ordering::SeqCst) == self.token {
            state.loading = false;
        }
    }
}

/// Owns the current filters and result set and runs the search pipeline.
///
/// Cloning shares the same session. Every search takes a request token before
/// its only await point; when the gateway returns, the run commits only if its
/// token is still the latest one.
#[derive(Clone)]
pub struct SearchSession {
    gateway: SearchGateway,
    state: Arc<RwLock<SessionState>>,
    latest_request: Arc<AtomicU64>,
    random: Arc<Mutex<Box<dyn RandomSource>>>,
}

impl SearchSession {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_gateway(SearchGateway::new(config)?))
    }

    pub fn with_gateway(gateway: SearchGateway) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(SessionState::default())),
            latest_request: Arc::new(AtomicU64::new(0)),
            random: Arc::new(Mutex::new(Box::new(ThreadRandom))),
        }
    }

    /// Replace the randomness behind the match percentages.
    pub fn with_random_source(self, source: impl RandomSource + 'static) -> Self {
        *self.random.lock() = Box::new(source);
        self
    }

    /// Start from the given filters instead of the defaults.
    pub fn with_filters(self, filters: FilterState) -> Self {
        self.state.write().filters = filters;
        self
    }

    /// Run the full pipeline for `term` with the current filters.
    ///
    /// Blank terms are rejected before anything else happens. A failed remote
    /// search is logged and leaves the session with an empty result set.
    pub async fn search(&self, term: &str) -> Result<SearchOutcome> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DiscoveryError::InvalidInput);
        }

        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard {
            session: self,
            token,
        };
        let filters = {
            let mut state = self.state.write();
            state.loading = true;
            state.query = term.to_string();
            state.filters.clone()
        };

        let descriptor = build_query(term, &filters, Utc::now());
        tracing::info!(token, q = %descriptor.search_expression, "Searching repositories");

        let (raw, failed) = match self.gateway.search(&descriptor).await {
            Ok(items) => (items, false),
            Err(e) => {
                tracing::warn!(token, error = %e, "Showing no results");
                (Vec::new(), true)
            }
        };

        let repositories = project_all(&raw);
        let languages = language_distribution(&repositories);

        let count = {
            let mut state = self.state.write();
            if self.latest_request.load(Ordering::SeqCst) != token {
                tracing::debug!(token, "Discarding superseded search");
                return Ok(SearchOutcome::Superseded);
            }

            let ranked = rank(&repositories, state.rank_key, state.direction);
            let results = {
                let mut random = self.random.lock();
                apply_signals(ranked, random.as_mut())
            };
            let count = results.len();

            state.repositories = repositories;
            state.results = results;
            state.languages = languages;
            state.loading = false;
            count
        };

        if failed {
            return Ok(SearchOutcome::Degraded);
        }
        tracing::info!(token, results = count, "Search complete");
        Ok(SearchOutcome::Completed { results: count })
    }

    /// Merge a partial filter update and, if a term is active, search again.
    ///
    /// Returns `None` when no search has been run yet.
    pub async fn apply_filters(&self, update: &FilterUpdate) -> Result<Option<SearchOutcome>> {
        let active_query = {
            let mut state = self.state.write();
            state.filters = state.filters.merge(update);
            state.query.clone()
        };

        if active_query.is_empty() {
            return Ok(None);
        }
        self.search(&active_query).await.map(Some)
    }

    /// Clear every facet, re-running the active search if there is one.
    pub async fn reset_filters(&self) -> Result<Option<SearchOutcome>> {
        let active_query = {
            let mut state = self.state.write();
            state.filters = FilterState::reset();
            state.query.clone()
        };

        if active_query.is_empty() {
            return Ok(None);
        }
        self.search(&active_query).await.map(Some)
    }

    /// Re-order the current result set client-side. Signals are re-derived
    /// for the new ordering.
    pub fn resort(&self, key: RankKey, direction: Direction) {
        let mut state = self.state.write();
        state.rank_key = key;
        state.direction = direction;

        let ranked = rank(&state.repositories, key, direction);
        let mut random = self.random.lock();
        state.results = apply_signals(ranked, random.as_mut());
    }

    /// Flip the current sort direction and re-order.
    pub fn toggle_direction(&self) {
        let (key, direction) = {
            let state = self.state.read();
            (state.rank_key, state.direction.toggle())
        };
        self.resort(key, direction);
    }

    pub fn filters(&self) -> FilterState {
        self.state.read().filters.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Copy of everything a renderer needs.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            query: state.query.clone(),
            loading: state.loading,
            results: state.results.clone(),
            languages: state.languages.clone(),
            filters: state.filters.clone(),
            rank_key: state.rank_key,
            direction: state.direction,
        }
    }
}
