use crate::analysis::{AnalysisResult, DrugAnalysis, RankedCount};

/// Renders the step-by-step analysis report.
///
/// `NoCases` stops after step 1 with a single "no cases" line.
pub fn build_report(drug_name: &str, analysis: &DrugAnalysis) -> String {
    let mut steps: Vec<String> = Vec::new();

    steps.push(format!(
        "Step 1: Identifying cases involving elderly patients taking {drug_name}"
    ));

    let result = match analysis {
        DrugAnalysis::NoCases => {
            steps.push(format!(
                "No cases found for elderly patients taking {drug_name}."
            ));
            return steps.join("\n");
        }
        DrugAnalysis::Findings(result) => result,
    };

    steps.push(format!(
        "Found {} cases of elderly patients taking {drug_name} (Primary Substance: {})",
        result.total_cases, result.primary_substance
    ));

    steps.push(format!(
        "Step 2: Analyzing reactions and outcomes for {drug_name} in elderly patients"
    ));
    steps.push(format!("Top 3 reactions: {}", with_counts(&result.top_reactions)));
    steps.push(format!("Top 3 outcomes: {}", with_counts(&result.top_outcomes)));

    steps.push(format!(
        "Step 3: Identifying potential drug interactions with {drug_name}"
    ));
    if result.top_interactions.is_empty() {
        steps.push("No interacting drugs found.".to_string());
    } else {
        steps.push(format!(
            "Top 3 potentially interacting drugs: {}",
            with_counts(&result.top_interactions)
        ));
    }

    steps.push("Step 4: Calculating risk percentages".to_string());
    steps.push(format!("Risk of death: {:.2}%", result.death_risk_pct));

    steps.push("Step 5: Generating recommendation based on analysis".to_string());
    steps.push(format!(
        "Recommendation: {}",
        build_recommendation(drug_name, result)
    ));

    steps.join("\n")
}

/// Four-point recommendation. Point 3 (co-prescribing caution) only appears
/// when interacting drugs were found.
pub fn build_recommendation(drug_name: &str, result: &AnalysisResult) -> String {
    let mut text = format!("Based on the analysis of elderly patients taking {drug_name}:\n");
    text.push_str(&format!(
        "1. Common reactions include {}. Monitor patients for these symptoms.\n",
        labels(&result.top_reactions)
    ));
    text.push_str(&format!(
        "2. The risk of death is approximately {:.2}%.\n",
        result.death_risk_pct
    ));
    if !result.top_interactions.is_empty() {
        text.push_str(&format!(
            "3. Be cautious when co-prescribing with {}, as these drugs were frequently associated with adverse events.\n",
            labels(&result.top_interactions)
        ));
    }
    text.push_str(
        "4. Consider alternative therapies if the patient is at high risk, or ensure close monitoring during treatment.",
    );
    text
}

fn with_counts(items: &[RankedCount]) -> String {
    items
        .iter()
        .map(|r| format!("{} ({} cases)", r.label, r.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn labels(items: &[RankedCount]) -> String {
    items
        .iter()
        .map(|r| r.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(interactions: Vec<RankedCount>) -> AnalysisResult {
        AnalysisResult {
            total_cases: 4,
            primary_substance: "SECUKINUMAB".into(),
            top_reactions: vec![
                RankedCount::new("Fall", 3),
                RankedCount::new("Aortic occlusion", 2),
                RankedCount::new("Cerebrovascular accident", 1),
            ],
            top_outcomes: vec![
                RankedCount::new("Death", 2),
                RankedCount::new("Recovered", 1),
                RankedCount::new("Hospitalized", 1),
            ],
            top_interactions: interactions,
            death_risk_pct: 50.0,
        }
    }

    #[test]
    fn no_cases_report_is_exact() {
        let report = build_report("X", &DrugAnalysis::NoCases);
        assert_eq!(
            report,
            "Step 1: Identifying cases involving elderly patients taking X\nNo cases found for elderly patients taking X."
        );
    }

    #[test]
    fn no_cases_report_has_no_further_steps() {
        let report = build_report("COSENTYX", &DrugAnalysis::NoCases);
        assert!(!report.contains("Step 2"));
        assert_eq!(report.lines().count(), 2);
    }

    #[test]
    fn full_report_structure() {
        let result = sample(vec![RankedCount::new("METFORMIN", 2)]);
        let report = build_report("COSENTYX", &DrugAnalysis::Findings(result));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Step 1: Identifying cases involving elderly patients taking COSENTYX");
        assert_eq!(
            lines[1],
            "Found 4 cases of elderly patients taking COSENTYX (Primary Substance: SECUKINUMAB)"
        );
        assert_eq!(lines[2], "Step 2: Analyzing reactions and outcomes for COSENTYX in elderly patients");
        assert_eq!(
            lines[3],
            "Top 3 reactions: Fall (3 cases), Aortic occlusion (2 cases), Cerebrovascular accident (1 cases)"
        );
        assert_eq!(
            lines[4],
            "Top 3 outcomes: Death (2 cases), Recovered (1 cases), Hospitalized (1 cases)"
        );
        assert_eq!(lines[5], "Step 3: Identifying potential drug interactions with COSENTYX");
        assert_eq!(lines[6], "Top 3 potentially interacting drugs: METFORMIN (2 cases)");
        assert_eq!(lines[7], "Step 4: Calculating risk percentages");
        assert_eq!(lines[8], "Risk of death: 50.00%");
        assert_eq!(lines[9], "Step 5: Generating recommendation based on analysis");
        assert_eq!(
            lines[10],
            "Recommendation: Based on the analysis of elderly patients taking COSENTYX:"
        );
    }

    #[test]
    fn report_without_interactions_says_so() {
        let report = build_report("COSENTYX", &DrugAnalysis::Findings(sample(vec![])));
        assert!(report.contains("\nNo interacting drugs found.\n"));
    }

    #[test]
    fn risk_always_two_decimals() {
        let mut result = sample(vec![]);
        result.death_risk_pct = 12.5;
        let report = build_report("X", &DrugAnalysis::Findings(result.clone()));
        assert!(report.contains("Risk of death: 12.50%"));
        assert!(build_recommendation("X", &result).contains("approximately 12.50%."));
    }

    #[test]
    fn recommendation_with_interactions() {
        let result = sample(vec![RankedCount::new("A", 5), RankedCount::new("B", 5)]);
        let text = build_recommendation("COSENTYX", &result);
        assert_eq!(
            text,
            "Based on the analysis of elderly patients taking COSENTYX:\n\
             1. Common reactions include Fall, Aortic occlusion, Cerebrovascular accident. Monitor patients for these symptoms.\n\
             2. The risk of death is approximately 50.00%.\n\
             3. Be cautious when co-prescribing with A, B, as these drugs were frequently associated with adverse events.\n\
             4. Consider alternative therapies if the patient is at high risk, or ensure close monitoring during treatment."
        );
    }

    #[test]
    fn recommendation_omits_caution_without_interactions() {
        let text = build_recommendation("COSENTYX", &sample(vec![]));
        assert!(!text.contains("Be cautious"));
        assert!(!text.contains("3. "));
        assert!(text.contains("\n2. The risk of death is approximately 50.00%.\n4. Consider"));
    }
}
