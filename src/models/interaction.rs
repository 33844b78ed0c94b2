use serde::{Deserialize, Serialize};

/// A drug co-administered with the primary substance, with the number of
/// cases in which the two appear together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractingDrug {
    pub interacting_drug: String,
    pub interaction_count: i64,
}
