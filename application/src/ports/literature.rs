//! Literature source port
//!
//! Optional enrichment input. The pipeline runs without one; when present,
//! Generation quotes search summaries in its prompt.

use async_trait::async_trait;
use coscientist_domain::{CitationStyle, FormattedCitation, SearchResult};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteratureError {
    #[error("Literature source unavailable: {0}")]
    Unavailable(String),

    #[error("Literature query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Search for publications related to `query`, best match first.
    async fn search(
        &self,
        query: &str,
        source: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, LiteratureError>;

    /// Find citations for `query`, formatted in `style`.
    async fn citations(
        &self,
        query: &str,
        style: CitationStyle,
        max_results: usize,
        min_year: Option<u32>,
    ) -> Result<Vec<FormattedCitation>, LiteratureError>;
}
