//! Table pipeline: filter → sort → render
//!
//! Pure functions over customer rows. `render_rows` turns the final view
//! into display lines for the table component.

use crate::model::customer::{Column, CustomerRow, SortDirection};
use crate::model::filter::FilterSet;
use crate::model::kpi::format_thousands;
use std::cmp::Ordering;

/// Placeholder shown when no rows survive the filters
pub const EMPTY_TABLE_MESSAGE: &str = "No data match your filters.";

/// Keep rows matching the state filter.
///
/// Status and year selections are accepted but not applied: customer rows
/// carry no status or year field.
pub fn filter_rows(rows: &[CustomerRow], filters: &FilterSet) -> Vec<CustomerRow> {
    rows.iter()
        .filter(|row| filters.state.matches(&row.state))
        .cloned()
        .collect()
}

/// Sort rows by a column index (0 id, 1 income, 2 state, 3 rate).
///
/// Numeric columns compare as numbers, text columns lexicographically.
/// The sort is stable, so equal keys keep their input order.
pub fn sort_rows(rows: &[CustomerRow], column: usize, direction: SortDirection) -> Vec<CustomerRow> {
    let column = Column::from_index(column);
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare(a: &CustomerRow, b: &CustomerRow, column: Column) -> Ordering {
    match column {
        Column::Id => a.id.cmp(&b.id),
        Column::Income => a.income.cmp(&b.income),
        Column::State => a.state.cmp(&b.state),
        Column::Rate => a.rate.partial_cmp(&b.rate).unwrap_or(Ordering::Equal),
    }
}

/// A display-ready table line
#[derive(Debug, Clone, PartialEq)]
pub enum TableLine {
    Record { id: String, cells: [String; 4] },
    Placeholder(String),
}

impl TableLine {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TableLine::Placeholder(_))
    }
}

/// Render rows as display lines; an empty view yields a single placeholder
pub fn render_rows(rows: &[CustomerRow]) -> Vec<TableLine> {
    if rows.is_empty() {
        return vec![TableLine::Placeholder(EMPTY_TABLE_MESSAGE.to_string())];
    }

    rows.iter()
        .map(|row| TableLine::Record {
            id: row.id.clone(),
            cells: [
                row.id.clone(),
                format_income(row.income),
                row.state.clone(),
                format!("{}%", row.rate),
            ],
        })
        .collect()
}

pub fn format_income(income: u64) -> String {
    format!("${}", format_thousands(income))
}
