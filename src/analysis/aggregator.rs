use indexmap::IndexMap;

use super::frequency::FrequencyTable;
use super::types::{AnalysisResult, RankedCount, DEATH_OUTCOME, TOP_N};
use crate::graph::{fetch_interacting_drugs, fetch_reactions_and_outcomes, GraphError, QueryExecutor};
use crate::models::{InteractingDrug, ReactionOutcomeRow};

/// Queries reactions, outcomes and interacting drugs for one case set and
/// ranks them.
///
/// Both queries are scoped to exactly `case_ids`. An empty set returns a
/// zeroed result without touching the store.
pub fn aggregate<E: QueryExecutor>(
    executor: &E,
    case_ids: &[String],
    primary_drug: &str,
) -> Result<AnalysisResult, GraphError> {
    if case_ids.is_empty() {
        return Ok(summarize(0, primary_drug, &[], &[]));
    }

    let rows = fetch_reactions_and_outcomes(executor, case_ids)?;
    tracing::debug!(rows = rows.len(), "Fetched reaction/outcome rows");

    let interactions = fetch_interacting_drugs(executor, case_ids, primary_drug)?;
    tracing::debug!(drugs = interactions.len(), "Fetched interacting drugs");

    Ok(summarize(case_ids.len(), primary_drug, &rows, &interactions))
}

/// Pure ranking step over already-fetched rows.
pub fn summarize(
    case_count: usize,
    primary_drug: &str,
    rows: &[ReactionOutcomeRow],
    interactions: &[InteractingDrug],
) -> AnalysisResult {
    let mut reactions = FrequencyTable::new();
    let mut outcomes = FrequencyTable::new();
    for row in rows {
        if let Some(reaction) = row.reaction.as_deref() {
            reactions.record(reaction);
        }
        if let Some(outcome) = row.outcome.as_deref() {
            outcomes.record(outcome);
        }
    }

    AnalysisResult {
        total_cases: case_count,
        primary_substance: primary_drug.to_string(),
        top_reactions: reactions.ranked(TOP_N),
        top_outcomes: outcomes.ranked(TOP_N),
        top_interactions: rank_interactions(interactions, primary_drug),
        death_risk_pct: death_risk_percentage(outcomes.count(DEATH_OUTCOME), case_count),
    }
}

/// Drops the primary drug and repeated names (first entry wins), then keeps
/// the top entries by count. The stable sort leaves store order intact for
/// an already-ranked list.
pub fn rank_interactions(interactions: &[InteractingDrug], primary_drug: &str) -> Vec<RankedCount> {
    let mut by_name: IndexMap<&str, u64> = IndexMap::new();
    for drug in interactions.iter().filter(|d| d.interacting_drug != primary_drug) {
        by_name
            .entry(drug.interacting_drug.as_str())
            .or_insert(drug.interaction_count.max(0) as u64);
    }

    let mut ranked: Vec<RankedCount> = by_name
        .into_iter()
        .map(|(name, count)| RankedCount::new(name, count))
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_N);
    ranked
}

/// Death rows per case, as a percentage. Zero cases yields exactly 0.0.
///
/// `death_count` comes from the reaction × outcome join, so a Death case
/// with several reactions counts once per reaction and the result can
/// exceed 100.
pub fn death_risk_percentage(death_count: u64, case_count: usize) -> f64 {
    if case_count == 0 {
        return 0.0;
    }
    death_count as f64 / case_count as f64 * 100.0
}
