use serde::{Deserialize, Serialize};

/// One adverse event report for an elderly patient where the queried drug
/// is the primary suspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElderlyCase {
    pub case_id: String,
    #[serde(default)]
    pub patient_age: Option<f64>,
    #[serde(default)]
    pub patient_gender: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub primary_substance: Option<String>,
}

/// One reaction × outcome pair of a case. A case with two reactions and
/// one outcome yields two rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionOutcomeRow {
    pub case_id: String,
    #[serde(default)]
    pub reaction: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
}
