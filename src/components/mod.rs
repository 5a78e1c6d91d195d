//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod charts;
pub mod dashboard;
pub mod filter_dialog;
pub mod help_dialog;
pub mod kpi;
pub mod layout;
pub mod quit_dialog;
pub mod table;
pub mod toast;

pub use dashboard::{draw_dashboard_screen, DashboardComponent, DashboardRenderContext};
pub use filter_dialog::FilterDialog;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
pub use quit_dialog::QuitDialog;
pub use toast::draw_toast;
