//! Dashboard services
//!
//! Pure data work and lifecycles that sit under the control handlers:
//! - Table pipeline (filter, sort, render)
//! - Chart adapter and the built-in terminal chart library
//! - CSV export
//! - Simulated periodic KPI updates

pub mod charts;
pub mod export;
pub mod table;
pub mod updates;

pub use charts::{ChartAdapter, ChartLibrary, TerminalCharts};
pub use export::export_to_dir;
pub use table::{filter_rows, render_rows, sort_rows, TableLine};
pub use updates::DataUpdates;
