//! Fixed read-only queries against the FAERS adverse event graph.
//!
//! Case identifiers travel as text: `primaryid` is rendered with
//! `toString` on the way out and compared the same way on the way in.

use super::{CypherQuery, GraphError, QueryExecutor};
use crate::models::{ElderlyCase, InteractingDrug, ReactionOutcomeRow};

pub const ELDERLY_CASES_QUERY: &str = "elderly_cases";
pub const REACTIONS_OUTCOMES_QUERY: &str = "reactions_outcomes";
pub const INTERACTING_DRUGS_QUERY: &str = "interacting_drugs";

const ELDERLY_CASES_CYPHER: &str = "
MATCH (d:Drug {name: $drug_name})<-[:IS_PRIMARY_SUSPECT]-(c:Case)-[:FALLS_UNDER]->(a:AgeGroup)
WHERE a.ageGroup = 'Elderly'
RETURN toString(c.primaryid) AS case_id,
       toFloat(c.age) AS patient_age,
       c.gender AS patient_gender,
       toString(c.reportDate) AS report_date,
       d.primarySubstance AS primary_substance
";

const REACTIONS_OUTCOMES_CYPHER: &str = "
MATCH (c:Case)-[:HAS_REACTION]->(r:Reaction), (c)-[:RESULTED_IN]->(o:Outcome)
WHERE toString(c.primaryid) IN $case_ids
RETURN toString(c.primaryid) AS case_id, r.description AS reaction, o.outcome AS outcome
";

const INTERACTING_DRUGS_CYPHER: &str = "
MATCH (c:Case)-[:IS_PRIMARY_SUSPECT]->(d:Drug {primarySubstance: $primary_drug})
WHERE toString(c.primaryid) IN $case_ids
MATCH (c)-[:IS_CONCOMITANT|IS_INTERACTING]->(other:Drug)
WHERE other.primarySubstance <> $primary_drug
RETURN DISTINCT other.primarySubstance AS interacting_drug,
       COUNT(c) AS interaction_count
ORDER BY interaction_count DESC
";

pub fn elderly_cases_query(drug_name: &str) -> CypherQuery {
    CypherQuery::new(ELDERLY_CASES_QUERY, ELDERLY_CASES_CYPHER).text("drug_name", drug_name)
}

pub fn reactions_outcomes_query(case_ids: &[String]) -> CypherQuery {
    CypherQuery::new(REACTIONS_OUTCOMES_QUERY, REACTIONS_OUTCOMES_CYPHER)
        .text_list("case_ids", case_ids)
}

pub fn interacting_drugs_query(case_ids: &[String], primary_drug: &str) -> CypherQuery {
    CypherQuery::new(INTERACTING_DRUGS_QUERY, INTERACTING_DRUGS_CYPHER)
        .text_list("case_ids", case_ids)
        .text("primary_drug", primary_drug)
}

/// Cases of elderly patients where `drug_name` (exact, case-sensitive) is
/// the primary suspect. An empty result is not an error.
pub fn find_elderly_cases<E: QueryExecutor>(
    executor: &E,
    drug_name: &str,
) -> Result<Vec<ElderlyCase>, GraphError> {
    let cases: Vec<ElderlyCase> = executor.fetch(&elderly_cases_query(drug_name))?;
    tracing::info!(drug = %drug_name, case_count = cases.len(), "Elderly case lookup complete");
    Ok(cases)
}

pub fn fetch_reactions_and_outcomes<E: QueryExecutor>(
    executor: &E,
    case_ids: &[String],
) -> Result<Vec<ReactionOutcomeRow>, GraphError> {
    executor.fetch(&reactions_outcomes_query(case_ids))
}

/// Drugs co-reported with `primary_drug` in the given cases, ranked by
/// case count (descending) by the store.
pub fn fetch_interacting_drugs<E: QueryExecutor>(
    executor: &E,
    case_ids: &[String],
    primary_drug: &str,
) -> Result<Vec<InteractingDrug>, GraphError> {
    executor.fetch(&interacting_drugs_query(case_ids, primary_drug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MockQueryExecutor, QueryParam};
    use serde_json::json;

    #[test]
    fn drug_name_is_bound_not_interpolated() {
        let q = elderly_cases_query("COSENTYX");
        assert!(!q.statement.contains("COSENTYX"));
        assert!(q.statement.contains("$drug_name"));
        assert_eq!(q.param("drug_name"), Some(&QueryParam::Text("COSENTYX".into())));
    }

    #[test]
    fn elderly_filter_present() {
        assert!(ELDERLY_CASES_CYPHER.contains("a.ageGroup = 'Elderly'"));
        assert!(ELDERLY_CASES_CYPHER.contains("IS_PRIMARY_SUSPECT"));
    }

    #[test]
    fn interaction_query_excludes_primary_drug() {
        let q = interacting_drugs_query(&["1".into()], "SECUKINUMAB");
        assert!(q.statement.contains("other.primarySubstance <> $primary_drug"));
        assert!(q.statement.contains("ORDER BY interaction_count DESC"));
        assert_eq!(
            q.param("primary_drug"),
            Some(&QueryParam::Text("SECUKINUMAB".into()))
        );
    }

    #[test]
    fn find_elderly_cases_parses_rows() {
        let exec = MockQueryExecutor::new().with_rows(
            ELDERLY_CASES_QUERY,
            vec![
                json!({
                    "case_id": "100234",
                    "patient_age": 78.0,
                    "patient_gender": "F",
                    "report_date": "2023-04-11",
                    "primary_substance": "SECUKINUMAB"
                }),
                json!({
                    "case_id": "100977",
                    "patient_age": null,
                    "patient_gender": null,
                    "report_date": null,
                    "primary_substance": "SECUKINUMAB"
                }),
            ],
        );

        let cases = find_elderly_cases(&exec, "COSENTYX").unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].case_id, "100234");
        assert_eq!(cases[0].patient_age, Some(78.0));
        assert_eq!(cases[1].patient_gender, None);
        assert_eq!(cases[1].primary_substance.as_deref(), Some("SECUKINUMAB"));
    }

    #[test]
    fn find_elderly_cases_empty_is_ok() {
        let exec = MockQueryExecutor::new().with_rows(ELDERLY_CASES_QUERY, vec![]);
        assert!(find_elderly_cases(&exec, "UNKNOWN").unwrap().is_empty());
    }

    #[test]
    fn reactions_query_scoped_to_case_ids() {
        let exec = MockQueryExecutor::new().with_rows(
            REACTIONS_OUTCOMES_QUERY,
            vec![json!({"case_id": "1", "reaction": "Fall", "outcome": "Hospitalized"})],
        );
        let ids = vec!["1".to_string(), "2".to_string()];
        let rows = fetch_reactions_and_outcomes(&exec, &ids).unwrap();
        assert_eq!(rows[0].reaction.as_deref(), Some("Fall"));

        let calls = exec.calls();
        assert_eq!(calls[0].param("case_ids"), Some(&QueryParam::TextList(ids)));
    }
}
