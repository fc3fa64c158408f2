// Database queries — CRUD operations for analyses.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{SearchResults, StoredAnalysis};
use crate::llm::result::Sentiment;
use crate::pipeline::analysis::AnalysisOutput;

const SELECT_COLUMNS: &str = "SELECT id, original_text, summary, title, topics, sentiment,
        keywords, confidence_score, created_at
 FROM analyses";

/// Columns as they come out of SQLite, before JSON decoding.
type RawAnalysis = (
    i64,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    Option<i64>,
    String,
);

/// Persist an analysis and return the stored row (with its id and timestamp).
pub fn insert_analysis(
    conn: &Connection,
    original_text: &str,
    output: &AnalysisOutput,
) -> Result<StoredAnalysis> {
    let topics_json = serde_json::to_string(&output.topics)?;
    let keywords_json = serde_json::to_string(&output.keywords)?;
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO analyses (original_text, summary, title, topics, sentiment, keywords, confidence_score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            original_text,
            output.summary,
            output.title,
            topics_json,
            output.sentiment.as_str(),
            keywords_json,
            output.confidence_score,
            created_at,
        ],
    )
    .context("Failed to insert analysis")?;

    Ok(StoredAnalysis {
        id: conn.last_insert_rowid(),
        original_text: original_text.to_string(),
        summary: output.summary.clone(),
        title: output.title.clone(),
        topics: output.topics.clone(),
        sentiment: output.sentiment,
        keywords: output.keywords.clone(),
        confidence_score: Some(output.confidence_score),
        created_at,
    })
}

/// Look up a single analysis by id.
pub fn get_analysis(conn: &Connection, id: i64) -> Result<Option<StoredAnalysis>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    let raw = stmt.query_row(params![id], read_raw).optional()?;
    raw.map(decode).transpose()
}

/// Page through analyses in insertion order.
pub fn list_analyses(conn: &Connection, skip: u32, limit: u32) -> Result<Vec<StoredAnalysis>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id LIMIT ?1 OFFSET ?2"))?;
    let rows = stmt.query_map(params![limit, skip], read_raw)?;

    let mut analyses = Vec::new();
    for row in rows {
        analyses.push(decode(row?)?);
    }
    Ok(analyses)
}

/// Find analyses whose topics, keywords, title or summary contain `term`
/// (case-insensitive).
///
/// Topics and keywords are JSON columns, so the match runs in Rust over all
/// rows rather than in SQL.
pub fn search_analyses(conn: &Connection, term: &str) -> Result<SearchResults> {
    let term_lower = term.to_lowercase();

    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
    let rows = stmt.query_map([], read_raw)?;

    let mut analyses = Vec::new();
    for row in rows {
        let analysis = decode(row?)?;
        if analysis.matches(&term_lower) {
            analyses.push(analysis);
        }
    }

    Ok(SearchResults {
        total_count: analyses.len(),
        analyses,
        search_term: term.to_string(),
    })
}

/// Total number of stored analyses.
pub fn count_analyses(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
    Ok(count)
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawAnalysis> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn decode(raw: RawAnalysis) -> Result<StoredAnalysis> {
    let (id, original_text, summary, title, topics, sentiment, keywords, confidence_score, created_at) =
        raw;

    let topics: Vec<String> = serde_json::from_str(&topics)
        .with_context(|| format!("Analysis {id} has malformed topics JSON"))?;
    let keywords: Vec<String> = serde_json::from_str(&keywords)
        .with_context(|| format!("Analysis {id} has malformed keywords JSON"))?;
    let sentiment = Sentiment::parse(&sentiment)
        .with_context(|| format!("Analysis {id} has unknown sentiment {sentiment:?}"))?;

    Ok(StoredAnalysis {
        id,
        original_text,
        summary,
        title,
        topics,
        sentiment,
        keywords,
        confidence_score: confidence_score.map(|s| s.clamp(0, 100) as u8),
        created_at,
    })
}
