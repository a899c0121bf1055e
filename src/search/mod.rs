//! Client-side pipeline stages: query construction, ranking, facet
//! aggregation and display signals.

pub mod facets;
pub mod query;
pub mod rank;
pub mod signal;
