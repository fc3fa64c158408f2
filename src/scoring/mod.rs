// Scoring — heuristics that rate a finished analysis.

pub mod confidence;
