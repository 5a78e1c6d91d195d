//! Filter set for the dashboard controls
//!
//! Each axis is either unrestricted (`All`) or pinned to a single value.

use std::fmt;

/// Selection on one filter axis
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a control value; empty and `"all"` mean no restriction
    pub fn parse(value: &str) -> Selection {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Active filters. Absent axes are `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub state: Selection,
    pub status: Selection,
    pub year: Selection,
}

impl FilterSet {
    /// Merge a partial update, leaving unspecified axes untouched
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
    }

    /// Short summary for the status line, e.g. `state:CA year:2017`
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            ("state", &self.state),
            ("status", &self.status),
            ("year", &self.year),
        ]
        .iter()
        .filter(|(_, sel)| !sel.is_all())
        .map(|(name, sel)| format!("{}:{}", name, sel))
        .collect();

        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Partial filter update; `None` keeps the current value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub state: Option<Selection>,
    pub status: Option<Selection>,
    pub year: Option<Selection>,
}

impl FilterUpdate {
    pub fn state(value: &str) -> Self {
        Self {
            state: Some(Selection::parse(value)),
            ..Default::default()
        }
    }
}
