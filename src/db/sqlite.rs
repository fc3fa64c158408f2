// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{SearchResults, StoredAnalysis};
use super::traits::Database;
use crate::pipeline::analysis::AnalysisOutput;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_analysis(
        &self,
        original_text: &str,
        output: &AnalysisOutput,
    ) -> Result<StoredAnalysis> {
        let conn = self.conn.lock().await;
        super::queries::insert_analysis(&conn, original_text, output)
    }

    async fn get_analysis(&self, id: i64) -> Result<Option<StoredAnalysis>> {
        let conn = self.conn.lock().await;
        super::queries::get_analysis(&conn, id)
    }

    async fn list_analyses(&self, skip: u32, limit: u32) -> Result<Vec<StoredAnalysis>> {
        let conn = self.conn.lock().await;
        super::queries::list_analyses(&conn, skip, limit)
    }

    async fn search_analyses(&self, term: &str) -> Result<SearchResults> {
        let conn = self.conn.lock().await;
        super::queries::search_analyses(&conn, term)
    }

    async fn count_analyses(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_analyses(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::llm::result::Sentiment;
    use crate::pipeline::analysis::AnalysisQuality;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    fn sample_output() -> AnalysisOutput {
        AnalysisOutput {
            summary: "Tides follow the moon.".to_string(),
            title: Some("Tides".to_string()),
            topics: vec!["ocean".into(), "moon".into(), "gravity".into()],
            sentiment: Sentiment::Neutral,
            keywords: vec!["tide".into(), "moon".into(), "water".into()],
            confidence_score: 65,
            quality: AnalysisQuality::Complete,
        }
    }

    #[tokio::test]
    async fn test_trait_insert_get_roundtrip() {
        let db = test_db().await;
        let stored = db.insert_analysis("the tides", &sample_output()).await.unwrap();
        let loaded = db.get_analysis(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded.title.as_deref(), Some("Tides"));
        assert_eq!(loaded.topics, vec!["ocean", "moon", "gravity"]);
        assert_eq!(db.count_analyses().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_trait_search_and_list() {
        let db = test_db().await;
        db.insert_analysis("one", &sample_output()).await.unwrap();
        db.insert_analysis("two", &sample_output()).await.unwrap();

        let results = db.search_analyses("GRAV").await.unwrap();
        assert_eq!(results.total_count, 2);

        let page = db.list_analyses(0, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].original_text, "one");
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 2);
    }
}
