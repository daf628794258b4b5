//! Seed pipeline error types.

use thiserror::Error;

/// Errors that can occur while seeding the record store.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed asset was reachable but the response was not successful.
    #[error("failed to fetch seed asset {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// The seed document does not contain the expected table.
    #[error("table {table:?} not found in the seed document")]
    TableNotFound { table: &'static str },

    /// The table's rows are missing, not a sequence, or empty.
    #[error("empty or malformed seed data: {0}")]
    EmptyData(String),

    /// The seed document body could not be parsed as JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the record store.
    #[error("database error: {0}")]
    Database(#[from] cantoria_core::Error),

    /// An I/O error reading a local asset or cache file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeedError {
    /// Returns `true` when the error came from retrieving the asset
    /// rather than from its contents.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Request(_) | Self::Io(_))
    }
}

/// Convenience alias for seed pipeline results.
pub type SeedResult<T> = std::result::Result<T, SeedError>;
