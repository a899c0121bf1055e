use thiserror::Error;

/// Failures the discovery pipeline can report.
///
/// An empty but well-formed response is not an error; it completes with zero
/// results.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("search term is empty")]
    InvalidInput,

    #[error("search failed: {0:#}")]
    SearchFailed(anyhow::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
