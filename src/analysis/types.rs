use serde::{Deserialize, Serialize};

/// Number of entries kept in each ranked list.
pub const TOP_N: usize = 3;

/// Outcome label counted toward the death-risk percentage.
pub const DEATH_OUTCOME: &str = "Death";

/// A label with its occurrence count in a ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    pub label: String,
    pub count: u64,
}

impl RankedCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Aggregated risk signals for one case set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_cases: usize,
    /// Substance the interaction lookup was scoped to.
    pub primary_substance: String,
    pub top_reactions: Vec<RankedCount>,
    pub top_outcomes: Vec<RankedCount>,
    pub top_interactions: Vec<RankedCount>,
    /// Share of cases with a Death outcome, 0.0 for an empty case set.
    pub death_risk_pct: f64,
}

/// Outcome of analysing one drug: either nothing to report, or findings.
#[derive(Debug, Clone, PartialEq)]
pub enum DrugAnalysis {
    NoCases,
    Findings(AnalysisResult),
}
