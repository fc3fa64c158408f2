// Colored terminal output for analyses and search results.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::db::models::{SearchResults, StoredAnalysis};
use crate::llm::result::Sentiment;
use crate::pipeline::analysis::{AnalysisQuality, DegradedReason};

/// Display one analysis in full.
pub fn display_analysis(analysis: &StoredAnalysis) {
    let heading = match &analysis.title {
        Some(title) => format!("=== #{} {} ===", analysis.id, title),
        None => format!("=== #{} (untitled) ===", analysis.id),
    };
    println!("\n{}", heading.bold());

    println!("  Summary:    {}", analysis.summary);
    println!("  Topics:     {}", analysis.topics.join(", "));
    println!("  Keywords:   {}", analysis.keywords.join(", ").dimmed());
    println!("  Sentiment:  {}", colorize_sentiment(analysis.sentiment));
    match analysis.confidence_score {
        Some(score) => println!("  Confidence: {}/100", colorize_confidence(score)),
        None => println!("  Confidence: {}", "n/a".dimmed()),
    }
    println!("  Created:    {}", analysis.created_at.dimmed());
}

/// Warn on the terminal when an analysis was built from a fallback result.
pub fn display_quality(quality: &AnalysisQuality) {
    match quality {
        AnalysisQuality::Complete => {}
        AnalysisQuality::Degraded(DegradedReason::MalformedResponse) => {
            println!(
                "  {} The LLM reply could not be parsed. Placeholder summary stored.",
                "Warning:".yellow()
            );
        }
        AnalysisQuality::Degraded(DegradedReason::LlmUnavailable(kind)) => {
            println!(
                "  {} {} Placeholder summary stored.",
                "Warning:".yellow(),
                kind.describe()
            );
        }
    }
}

/// Display a page of analyses as a compact table.
pub fn display_analysis_list(analyses: &[StoredAnalysis], total: i64) {
    if analyses.is_empty() {
        println!("No analyses found. Run `quarry analyze` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Analyses ({} of {}) ===", analyses.len(), total).bold()
    );
    println!();

    println!(
        "  {:>5}  {:<32} {:<9} {:>5}  {}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Sentiment".dimmed(),
        "Conf".dimmed(),
        "Topics".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for analysis in analyses {
        display_row(analysis);
    }
    println!();
}

/// Display the matches for a search term.
pub fn display_search_results(results: &SearchResults) {
    if results.analyses.is_empty() {
        println!("No analyses match \"{}\".", results.search_term);
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== {} match(es) for \"{}\" ===",
            results.total_count, results.search_term
        )
        .bold()
    );
    println!();

    for analysis in &results.analyses {
        display_row(analysis);
        println!(
            "         {}",
            super::truncate_chars(&analysis.summary, 100).dimmed()
        );
    }
    println!();
}

fn display_row(analysis: &StoredAnalysis) {
    let title = analysis.title.as_deref().unwrap_or("(untitled)");
    let confidence = analysis
        .confidence_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {:>5}  {:<32} {:<9} {:>5}  {}",
        analysis.id,
        super::truncate_chars(title, 29),
        colorize_sentiment(analysis.sentiment),
        confidence,
        analysis.topics.join(", "),
    );
}

/// Colorize a sentiment label.
fn colorize_sentiment(sentiment: Sentiment) -> colored::ColoredString {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green(),
        Sentiment::Neutral => sentiment.as_str().normal(),
        Sentiment::Negative => sentiment.as_str().red(),
    }
}

/// Colorize a confidence score: low scores stand out.
fn colorize_confidence(score: u8) -> colored::ColoredString {
    let s = score.to_string();
    match score {
        70..=100 => s.green().bold(),
        50..=69 => s.normal(),
        30..=49 => s.yellow(),
        _ => s.red(),
    }
}
