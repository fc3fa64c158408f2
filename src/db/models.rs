// Data models — Rust structs that map to database rows.
//
// Kept separate from the queries so the web layer and CLI can use them
// without depending on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::llm::result::Sentiment;

/// A persisted analysis.
///
/// The original text is stored but not serialized into API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: i64,
    #[serde(skip_serializing, default)]
    pub original_text: String,
    pub summary: String,
    pub title: Option<String>,
    /// Always three topics (JSON-encoded in the DB)
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    /// Always three keywords (JSON-encoded in the DB)
    pub keywords: Vec<String>,
    pub confidence_score: Option<u8>,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

impl StoredAnalysis {
    /// Case-insensitive substring match over topics, keywords, title and summary.
    ///
    /// `term_lower` must already be lowercased.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.topics
            .iter()
            .chain(self.keywords.iter())
            .chain(self.title.iter())
            .chain(std::iter::once(&self.summary))
            .any(|field| field.to_lowercase().contains(term_lower))
    }
}

/// Result of a search over stored analyses.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub analyses: Vec<StoredAnalysis>,
    pub total_count: usize,
    /// The term exactly as the caller supplied it
    pub search_term: String,
}
