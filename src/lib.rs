// Quarry: keywords, summaries and topics for free text
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or a way of storing and serving its results.

pub mod config;
pub mod db;
pub mod keywords;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod scoring;

#[cfg(feature = "web")]
pub mod web;
