//! Dashboard store - the single source of truth for table and chart data
//!
//! Owned by `App` and passed by reference to whatever needs it. Only the
//! control handlers in `App::update` write to it.

use super::customer::{CustomerRow, SortDirection, SortSpec};
use super::filter::{FilterSet, FilterUpdate};
use super::loan_data::{seed_customers, LoanData};

/// Filters, sort order, cross-filter flag and the session dataset
#[derive(Debug, Clone)]
pub struct DashboardStore {
    cross_filter_enabled: bool,
    filters: FilterSet,
    sort: SortSpec,
    loan_data: LoanData,
    customer_rows: Vec<CustomerRow>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Create a store holding the hardcoded session dataset
    pub fn new() -> Self {
        Self::with_data(LoanData::seed(), seed_customers())
    }

    pub fn with_data(loan_data: LoanData, customer_rows: Vec<CustomerRow>) -> Self {
        Self {
            cross_filter_enabled: true,
            filters: FilterSet::default(),
            sort: SortSpec::default(),
            loan_data,
            customer_rows,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────

    pub fn filters(&self) -> FilterSet {
        self.filters.clone()
    }

    /// Merge provided keys; unspecified keys keep their value
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cross-filter
    // ─────────────────────────────────────────────────────────────────────────

    pub fn cross_filter(&self) -> bool {
        self.cross_filter_enabled
    }

    pub fn set_cross_filter(&mut self, enabled: bool) {
        self.cross_filter_enabled = enabled;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sort
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Stored verbatim; the column index is not range-checked
    pub fn set_sort(&mut self, column: usize, direction: SortDirection) {
        self.sort = SortSpec { column, direction };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────

    pub fn loan_data(&self) -> &LoanData {
        &self.loan_data
    }

    pub fn customer_rows(&self) -> Vec<CustomerRow> {
        self.customer_rows.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::Selection;

    #[test]
    fn test_defaults() {
        let store = DashboardStore::new();
        assert!(store.cross_filter());
        assert_eq!(store.filters(), FilterSet::default());
        assert_eq!(store.sort(), SortSpec::default());
        assert_eq!(store.customer_rows().len(), 5);
    }

    #[test]
    fn test_partial_filter_update_keeps_other_keys() {
        let mut store = DashboardStore::new();
        store.set_filters(FilterUpdate {
            state: Some(Selection::Only("CA".to_string())),
            status: Some(Selection::Only("Current".to_string())),
            year: None,
        });
        store.set_filters(FilterUpdate::state("TX"));

        let filters = store.filters();
        assert_eq!(filters.state, Selection::Only("TX".to_string()));
        assert_eq!(filters.status, Selection::Only("Current".to_string()));
        assert_eq!(filters.year, Selection::All);
    }

    #[test]
    fn test_returned_rows_are_copies() {
        let store = DashboardStore::new();
        let mut rows = store.customer_rows();
        rows[0].income = 1;
        rows.clear();

        let fresh = store.customer_rows();
        assert_eq!(fresh.len(), 5);
        assert_eq!(fresh[0].income, 250000);
    }

    #[test]
    fn test_returned_filters_are_copies() {
        let store = DashboardStore::new();
        let mut filters = store.filters();
        filters.state = Selection::Only("NY".to_string());
        assert_eq!(store.filters().state, Selection::All);
    }

    #[test]
    fn test_set_sort_stores_verbatim() {
        let mut store = DashboardStore::new();
        store.set_sort(9, SortDirection::Descending);
        assert_eq!(store.sort().column, 9);
        assert_eq!(store.sort().direction, SortDirection::Descending);
    }

    #[test]
    fn test_cross_filter_toggle() {
        let mut store = DashboardStore::new();
        store.set_cross_filter(!store.cross_filter());
        assert!(!store.cross_filter());
    }
}
