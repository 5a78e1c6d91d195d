//! Action enum - All possible application actions
//!
//! Components translate key and mouse events into Actions; the App
//! processes them to update the store and re-render.

use crate::model::filter::FilterUpdate;
use crate::model::kpi::DrillTarget;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers and fades
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the table cursor down
    NextRow,
    /// Move the table cursor up
    PrevRow,
    /// Select the row under the cursor
    SelectRow,
    /// Select a specific visible row (mouse)
    SelectRowAt(usize),
    /// Activate a column header
    SortBy(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Controls
    // ─────────────────────────────────────────────────────────────────────────
    /// Merge filter values into the store
    ApplyFilters(FilterUpdate),
    /// Flip the cross-filter flag
    ToggleCrossFilter,
    /// Redraw charts and table
    Refresh,
    /// Write the current view to CSV
    Export,
    /// Drill-down from a KPI tile or chart
    DrillDown(DrillTarget),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the filter dialog
    OpenFilters,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::SelectRow => write!(f, "SelectRow"),
            Action::SelectRowAt(i) => write!(f, "SelectRowAt({})", i),
            Action::SortBy(col) => write!(f, "SortBy({})", col),
            Action::ApplyFilters(update) => write!(f, "ApplyFilters({:?})", update),
            Action::ToggleCrossFilter => write!(f, "ToggleCrossFilter"),
            Action::Refresh => write!(f, "Refresh"),
            Action::Export => write!(f, "Export"),
            Action::DrillDown(target) => write!(f, "DrillDown({:?})", target),
            Action::OpenFilters => write!(f, "OpenFilters"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
