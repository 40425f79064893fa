//! List filters chosen in the search bar.

use heroes_core::{Alignment, Universe};

/// Active list filters. Every field is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Free-text search; never blank when set
    pub search: Option<String>,
    /// Alignment filter
    pub alignment: Option<Alignment>,
    /// Universe filter
    pub universe: Option<Universe>,
}

impl Filters {
    /// Set the search text. Blank text clears the search.
    pub fn set_search(&mut self, text: &str) {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
    }

    /// Set or clear the alignment filter.
    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.alignment = alignment;
    }

    /// Set or clear the universe filter.
    pub fn set_universe(&mut self, universe: Option<Universe>) {
        self.universe = universe;
    }

    /// Drop every filter.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.alignment.is_some() || self.universe.is_some()
    }

    /// Query string pairs for the list endpoint, omitting unset filters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.as_str()));
        }
        if let Some(alignment) = self.alignment {
            pairs.push(("alignment", alignment.as_str()));
        }
        if let Some(universe) = self.universe {
            pairs.push(("universe", universe.as_str()));
        }
        pairs
    }
}
