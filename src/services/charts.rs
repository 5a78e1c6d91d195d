//! Chart adapter over an injectable chart library
//!
//! Each chart slot moves through `Absent -> Rendered -> Destroyed -> Rendered`.
//! Any existing instance is destroyed before a slot is redrawn. Failures
//! never propagate: the slot becomes `Failed` with an inline message.

use crate::model::loan_data::LoanData;
use ratatui::style::Color;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

pub const LIBRARY_MISSING_MESSAGE: &str = "Chart library not loaded.";
pub const NO_DATA_MESSAGE: &str = "No data.";
pub const CHART_ERROR_MESSAGE: &str = "Chart error.";

/// Primary accent used by single-series charts
pub const PRIMARY: Color = Color::Rgb(0x00, 0x7A, 0xFF);

/// Series palette; categories past the end cycle back to the start
pub const SERIES_PALETTE: [Color; 8] = [
    Color::Rgb(0x00, 0x7A, 0xFF),
    Color::Rgb(0x30, 0xD1, 0x58),
    Color::Rgb(0xFF, 0x9F, 0x0A),
    Color::Rgb(0xFF, 0x45, 0x3A),
    Color::Rgb(0xBF, 0x5A, 0xF2),
    Color::Rgb(0x5A, 0xC8, 0xFA),
    Color::Rgb(0xAF, 0x52, 0xDE),
    Color::Rgb(0xA2, 0x84, 0x5E),
];

pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("chart has no data points")]
    Empty,
    #[error("{labels} labels for {values} values")]
    LengthMismatch { labels: usize, values: usize },
    #[error("invalid value {value} for '{label}'")]
    InvalidValue { label: String, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
}

/// Labelled series handed to the library
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn from_pairs(pairs: &[(String, f64)]) -> Self {
        Self {
            labels: pairs.iter().map(|(k, _)| k.clone()).collect(),
            values: pairs.iter().map(|(_, v)| *v).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    /// Draw every bar/slice in this colour instead of the palette
    pub single_color: Option<Color>,
    pub show_legend: bool,
}

/// A drawn chart instance
#[derive(Debug)]
pub struct ChartHandle {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<Color>,
    pub options: ChartOptions,
    live: Rc<Cell<usize>>,
    destroyed: bool,
}

impl ChartHandle {
    /// Release the instance. Destroying twice is a no-op.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.live.set(self.live.get().saturating_sub(1));
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// The drawing capability the adapter depends on
pub trait ChartLibrary {
    fn draw(
        &mut self,
        kind: ChartKind,
        data: &ChartData,
        options: &ChartOptions,
    ) -> Result<ChartHandle, ChartError>;
}

/// Built-in library producing instances the terminal widgets can paint
#[derive(Debug, Default)]
pub struct TerminalCharts {
    live: Rc<Cell<usize>>,
}

impl TerminalCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of instances not yet destroyed
    pub fn live_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.live)
    }
}

impl ChartLibrary for TerminalCharts {
    fn draw(
        &mut self,
        kind: ChartKind,
        data: &ChartData,
        options: &ChartOptions,
    ) -> Result<ChartHandle, ChartError> {
        if data.labels.len() != data.values.len() {
            return Err(ChartError::LengthMismatch {
                labels: data.labels.len(),
                values: data.values.len(),
            });
        }
        if data.values.is_empty() {
            return Err(ChartError::Empty);
        }
        if let Some((label, value)) = data
            .labels
            .iter()
            .zip(&data.values)
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ChartError::InvalidValue {
                label: label.clone(),
                value: *value,
            });
        }

        let colors = (0..data.values.len())
            .map(|i| options.single_color.unwrap_or_else(|| series_color(i)))
            .collect();

        self.live.set(self.live.get() + 1);
        Ok(ChartHandle {
            kind,
            labels: data.labels.clone(),
            values: data.values.clone(),
            colors,
            options: options.clone(),
            live: Rc::clone(&self.live),
            destroyed: false,
        })
    }
}

/// State of one chart panel
#[derive(Debug, Default)]
pub enum ChartSlot {
    #[default]
    Absent,
    Rendered(ChartHandle),
    Destroyed,
    Failed(String),
}

impl ChartSlot {
    /// Destroy a rendered instance, leaving other states alone
    fn destroy(&mut self) {
        if let ChartSlot::Rendered(handle) = self {
            handle.destroy();
            *self = ChartSlot::Destroyed;
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ChartSlot::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Owns both chart slots and the optional library
pub struct ChartAdapter {
    library: Option<Box<dyn ChartLibrary>>,
    pub pie: ChartSlot,
    pub bar: ChartSlot,
}

impl ChartAdapter {
    pub fn new(library: Option<Box<dyn ChartLibrary>>) -> Self {
        Self {
            library,
            pie: ChartSlot::Absent,
            bar: ChartSlot::Absent,
        }
    }

    /// Draw the status distribution doughnut
    pub fn render_pie(&mut self, data: Option<&LoanData>) {
        let series = data
            .map(|d| ChartData::from_pairs(&d.status_distribution))
            .unwrap_or_default();
        let options = ChartOptions {
            title: "Loan Status".to_string(),
            single_color: None,
            show_legend: true,
        };
        Self::render_slot(
            &mut self.pie,
            self.library.as_deref_mut(),
            ChartKind::Doughnut,
            &series,
            &options,
        );
    }

    /// Draw the loans-per-state bar chart
    pub fn render_bar(&mut self, data: Option<&LoanData>) {
        let series = data
            .map(|d| ChartData::from_pairs(&d.state_counts))
            .unwrap_or_default();
        let options = ChartOptions {
            title: "Loans by State".to_string(),
            single_color: Some(PRIMARY),
            show_legend: false,
        };
        Self::render_slot(
            &mut self.bar,
            self.library.as_deref_mut(),
            ChartKind::Bar,
            &series,
            &options,
        );
    }

    pub fn destroy_all(&mut self) {
        self.pie.destroy();
        self.bar.destroy();
    }

    fn render_slot(
        slot: &mut ChartSlot,
        library: Option<&mut (dyn ChartLibrary + 'static)>,
        kind: ChartKind,
        data: &ChartData,
        options: &ChartOptions,
    ) {
        slot.destroy();

        let Some(library) = library else {
            log::warn!("{}: chart library unavailable", options.title);
            *slot = ChartSlot::Failed(LIBRARY_MISSING_MESSAGE.to_string());
            return;
        };

        if data.is_empty() {
            log::warn!("{}: no aggregate data", options.title);
            *slot = ChartSlot::Failed(NO_DATA_MESSAGE.to_string());
            return;
        }

        *slot = match library.draw(kind, data, options) {
            Ok(handle) => ChartSlot::Rendered(handle),
            Err(e) => {
                log::warn!("{}: {}", options.title, e);
                ChartSlot::Failed(CHART_ERROR_MESSAGE.to_string())
            }
        };
    }
}
