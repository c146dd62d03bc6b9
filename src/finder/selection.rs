//! Compare selection

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

use super::scoring::ScoredItem;

/// Ids of the items the user has marked for side by side comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSelection {
    ids: BTreeSet<String>,
}

impl CompareSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the id if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected items in ranked order. Selected ids absent from `ranked` are skipped.
    #[must_use]
    pub fn project<'a, T: CatalogItem>(&self, ranked: &'a [ScoredItem<T>]) -> Vec<&'a ScoredItem<T>> {
        ranked
            .iter()
            .filter(|scored| self.contains(scored.item.id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;
    use crate::finder::scoring::score_equipment;

    #[test]
    fn test_toggle_and_clear() {
        let mut selection = CompareSelection::new();
        assert!(selection.toggle("qst-98"));
        assert!(selection.toggle("griffon-13"));
        assert!(selection.contains("qst-98"));
        assert_eq!(selection.len(), 2);

        assert!(!selection.toggle("qst-98"));
        assert!(!selection.contains("qst-98"));
        assert_eq!(selection.len(), 1);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_project_keeps_ranked_order() {
        let ranked = score_equipment(seed::equipment());
        let mut selection = CompareSelection::new();
        selection.toggle("griffon-13");
        selection.toggle("qst-98");
        selection.toggle("not-in-results");

        let compared: Vec<_> = selection
            .project(&ranked)
            .into_iter()
            .map(|s| s.item.id.as_str())
            .collect();
        assert_eq!(compared, vec!["qst-98", "griffon-13"]);
    }
}
