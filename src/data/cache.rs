use std::collections::HashMap;
use std::sync::Arc;

use super::derive::{derive_chart_series_with, derive_summary, ChartSeries, Summary};
use super::filter::{apply_filters, FilterState};
use super::model::{FilteredView, MissionTable};

/// Everything the report needs for one filter selection.
#[derive(Debug, Clone)]
pub struct Derived {
    pub view: FilteredView,
    pub summary: Summary,
    pub charts: ChartSeries,
}

impl Derived {
    /// Run the full pipeline without caching.
    pub fn compute(table: &MissionTable, filters: &FilterState, top_n: usize) -> Self {
        let view = apply_filters(table, filters);
        let summary = derive_summary(&view);
        let charts = derive_chart_series_with(&view, top_n);
        Derived {
            view,
            summary,
            charts,
        }
    }
}

/// Memoizes pipeline output per [`FilterState`] for a single table.
///
/// The table never changes after load, so entries stay valid until the
/// cache is rebound to a different table.
pub struct DerivationCache {
    table: MissionTable,
    top_n: usize,
    entries: HashMap<FilterState, Arc<Derived>>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl DerivationCache {
    pub const DEFAULT_MAX_ENTRIES: usize = 64;

    pub fn new(table: MissionTable, top_n: usize) -> Self {
        Self {
            table,
            top_n,
            entries: HashMap::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
            hits: 0,
            misses: 0,
        }
    }

    /// Cap the number of remembered selections (at least one).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn table(&self) -> &MissionTable {
        &self.table
    }

    /// Point the cache at `table`, dropping entries if it is a different table.
    pub fn rebind(&mut self, table: &MissionTable) {
        if !self.table.same_table(table) {
            log::debug!(
                "Derivation cache rebound to new table ({} missions), dropping {} entries",
                table.len(),
                self.entries.len()
            );
            self.table = table.clone();
            self.entries.clear();
        }
    }

    /// Cached pipeline output for `filters`, computing it on first use.
    pub fn get(&mut self, filters: &FilterState) -> Arc<Derived> {
        if let Some(hit) = self.entries.get(filters) {
            self.hits += 1;
            log::debug!("Derivation cache hit ({} entries)", self.entries.len());
            return Arc::clone(hit);
        }

        self.misses += 1;
        if self.entries.len() >= self.max_entries {
            log::debug!("Derivation cache full ({} entries), clearing", self.entries.len());
            self.entries.clear();
        }

        let derived = Arc::new(Derived::compute(&self.table, filters, self.top_n));
        log::debug!(
            "Derived {} of {} missions for {:?}",
            derived.view.len(),
            self.table.len(),
            filters
        );
        self.entries.insert(filters.clone(), Arc::clone(&derived));
        derived
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
