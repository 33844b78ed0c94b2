use crate::analysis::{aggregate, DrugAnalysis};
use crate::graph::{find_elderly_cases, GraphError, QueryExecutor};
use crate::narrative::{build_insight_prompt, build_report, NarrativeError, TextCompleter};

/// Elderly drug-risk pipeline.
///
/// Coordinates: find cases → aggregate → report → narrative.
pub struct ElderlyRiskAdvisor<'a, E: QueryExecutor, T: TextCompleter> {
    executor: &'a E,
    completer: &'a T,
}

impl<'a, E: QueryExecutor, T: TextCompleter> ElderlyRiskAdvisor<'a, E, T> {
    pub fn new(executor: &'a E, completer: &'a T) -> Self {
        Self {
            executor,
            completer,
        }
    }

    /// Find the elderly cases for `drug_name` and aggregate them.
    pub fn analyze_drug(&self, drug_name: &str) -> Result<DrugAnalysis, GraphError> {
        let cases = find_elderly_cases(self.executor, drug_name)?;
        let Some(first) = cases.first() else {
            tracing::info!(drug = %drug_name, "No elderly cases found");
            return Ok(DrugAnalysis::NoCases);
        };

        // Interaction lookup is keyed on the substance, not the brand name.
        let primary_substance = first
            .primary_substance
            .clone()
            .unwrap_or_else(|| drug_name.to_string());
        let case_ids: Vec<String> = cases.iter().map(|c| c.case_id.clone()).collect();

        let result = aggregate(self.executor, &case_ids, &primary_substance)?;
        tracing::info!(
            drug = %drug_name,
            substance = %primary_substance,
            case_count = result.total_cases,
            death_risk_pct = result.death_risk_pct,
            "Aggregation complete"
        );
        Ok(DrugAnalysis::Findings(result))
    }

    /// Deterministic step-by-step report for `drug_name`.
    pub fn analysis_report(&self, drug_name: &str) -> Result<String, GraphError> {
        let analysis = self.analyze_drug(drug_name)?;
        Ok(build_report(drug_name, &analysis))
    }

    /// Expand a report into a free-form clinical narrative.
    pub fn generate_insight(&self, drug_name: &str, report: &str) -> Result<String, NarrativeError> {
        self.completer.complete(&build_insight_prompt(drug_name, report))
    }
}
