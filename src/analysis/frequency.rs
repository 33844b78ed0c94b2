use indexmap::IndexMap;

use super::types::RankedCount;

/// Label → occurrence count, in the order labels were first seen.
///
/// Ranking sorts by count (descending) with a stable sort, so equal counts
/// keep first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str) {
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Top `limit` labels by count.
    pub fn ranked(&self, limit: usize) -> Vec<RankedCount> {
        let mut ranked: Vec<RankedCount> = self
            .counts
            .iter()
            .map(|(label, count)| RankedCount::new(label.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for label in labels {
            table.record(label);
        }
        table
    }

    #[test]
    fn counts_accumulate() {
        let table = table(&["Fall", "Nausea", "Fall"]);
        assert_eq!(table.count("Fall"), 2);
        assert_eq!(table.count("Nausea"), 1);
        assert_eq!(table.count("Rash"), 0);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let table = table(&["death", "Death"]);
        assert_eq!(table.count("Death"), 1);
        assert_eq!(table.ranked(3).len(), 2);
    }

    #[test]
    fn ranked_is_descending_and_truncated() {
        let table = table(&["a", "b", "b", "c", "c", "c", "d"]);
        assert_eq!(
            table.ranked(3),
            vec![
                RankedCount::new("c", 3),
                RankedCount::new("b", 2),
                RankedCount::new("a", 1),
            ]
        );
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let table = table(&["Rash", "Fall", "Fall", "Rash", "Cough"]);
        let labels: Vec<_> = table.ranked(3).into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Rash", "Fall", "Cough"]);
    }

    #[test]
    fn fewer_than_limit_returns_all() {
        let table = table(&["only"]);
        assert_eq!(table.ranked(3), vec![RankedCount::new("only", 1)]);
    }

    #[test]
    fn empty_table_ranks_nothing() {
        assert!(FrequencyTable::new().ranked(3).is_empty());
    }
}
