//! Structured code-analysis results.
//!
//! An [`AnalysisResult`] is the shape every analysis terminates in, whether
//! the hosted model answered or the deterministic fallback stood in for it.

use serde::{Deserialize, Serialize};

/// Which path produced an analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The hosted completion model produced a usable response.
    Model,
    /// The deterministic fallback synthesizer stood in for the model.
    Fallback,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A structured code analysis.
///
/// Invariant: all four content fields are always populated. A section with
/// no findings carries an explicit placeholder line ("No syntax issues
/// found"), never an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Syntax-level findings, in the order they were reported.
    pub syntax_errors: Vec<String>,

    /// Logic-level findings, in the order they were reported.
    pub logical_errors: Vec<String>,

    /// The rewritten code block.
    pub optimized_code: String,

    /// Prose explanation of the changes.
    pub explanation: String,

    /// Which path produced this result.
    pub source: AnalysisSource,
}

impl AnalysisResult {
    /// True when the fallback synthesizer produced this result.
    pub fn is_fallback(&self) -> bool {
        self.source == AnalysisSource::Fallback
    }
}
