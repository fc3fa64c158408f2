// Database trait — async interface for all DB operations.
//
// All methods are async so a blocking backend (rusqlite behind a Mutex) and
// a natively async one fit behind the same interface. Callers hold an
// `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{SearchResults, StoredAnalysis};
use crate::pipeline::analysis::AnalysisOutput;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Analyses ---

    /// Persist a finished analysis along with the text it was built from.
    async fn insert_analysis(
        &self,
        original_text: &str,
        output: &AnalysisOutput,
    ) -> Result<StoredAnalysis>;

    /// Look up one analysis by id.
    async fn get_analysis(&self, id: i64) -> Result<Option<StoredAnalysis>>;

    /// Page through analyses in insertion order.
    async fn list_analyses(&self, skip: u32, limit: u32) -> Result<Vec<StoredAnalysis>>;

    /// Case-insensitive substring search over topics, keywords, title and summary.
    async fn search_analyses(&self, term: &str) -> Result<SearchResults>;

    /// Total number of stored analyses.
    async fn count_analyses(&self) -> Result<i64>;
}
