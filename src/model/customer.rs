//! Customer rows and sort specification for the high-value customer table

use std::fmt;

/// One row of the high-value customer table
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub id: String,
    pub income: u64,
    pub state: String,
    /// Interest rate in percent
    pub rate: f64,
}

impl CustomerRow {
    pub fn new(id: &str, income: u64, state: &str, rate: f64) -> Self {
        Self {
            id: id.to_string(),
            income,
            state: state.to_string(),
            rate,
        }
    }
}

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Income,
    State,
    Rate,
}

impl Column {
    pub fn all() -> [Column; 4] {
        [Column::Id, Column::Income, Column::State, Column::Rate]
    }

    /// Map a column index to its field.
    ///
    /// Indices outside 0..=3 fall back to the id field.
    pub fn from_index(index: usize) -> Column {
        match index {
            1 => Column::Income,
            2 => Column::State,
            3 => Column::Rate,
            _ => Column::Id,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Id => "Customer ID",
            Column::Income => "Income",
            Column::State => "State",
            Column::Rate => "Rate (%)",
        }
    }
}

/// Sort direction of the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator for the active sort column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort spec after activating the header of `column`.
    ///
    /// Re-activating the current column flips the direction, any other
    /// column starts ascending.
    pub fn toggled(&self, column: usize) -> SortSpec {
        let direction = if self.column == column {
            self.direction.reversed()
        } else {
            SortDirection::Ascending
        };
        SortSpec { column, direction }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            Column::from_index(self.column).title(),
            self.direction.arrow()
        )
    }
}
