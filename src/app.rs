//! App - Root component that orchestrates the dashboard
//!
//! Owns the store, chart adapter, notifier and periodic update, routes
//! input to the top modal or the dashboard, and runs every control
//! handler. Each handler emits exactly one notification.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard_screen, draw_toast, DashboardComponent, DashboardRenderContext, FilterDialog,
    HelpDialog, QuitDialog,
};
use crate::config::Config;
use crate::model::customer::CustomerRow;
use crate::model::filter::FilterUpdate;
use crate::model::kpi::KpiBoard;
use crate::model::loan_data::filter_years;
use crate::model::modal::{Modal, ModalStack};
use crate::model::notification::Notifier;
use crate::model::store::DashboardStore;
use crate::services::{
    export_to_dir, filter_rows, render_rows, sort_rows, ChartAdapter, ChartLibrary, DataUpdates,
    TerminalCharts,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

/// Main application state
pub struct App {
    pub config: Config,
    pub store: DashboardStore,
    pub charts: ChartAdapter,
    pub kpis: KpiBoard,
    pub notifier: Notifier,
    /// Periodic KPI jitter; `None` until init
    updates: Option<DataUpdates>,
    pub modals: ModalStack,
    pub should_quit: bool,
    pub last_refreshed: DateTime<Local>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub filter_dialog: FilterDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app, loading the chart library unless disabled in config
    pub fn new(config: Config) -> App {
        let library: Option<Box<dyn ChartLibrary>> = if config.charts_enabled {
            Some(Box::new(TerminalCharts::new()))
        } else {
            log::info!("charts disabled in config");
            None
        };
        Self::with_library(config, library)
    }

    pub fn with_library(config: Config, library: Option<Box<dyn ChartLibrary>>) -> App {
        let store = DashboardStore::new();
        let kpis = KpiBoard::from_data(store.loan_data(), &store.customer_rows());
        let filter_dialog = FilterDialog::new(
            store.loan_data().states(),
            store.loan_data().statuses(),
            filter_years(),
        );

        App {
            notifier: Notifier::new(config.notification_duration(), config.fade_duration()),
            config,
            store,
            charts: ChartAdapter::new(library),
            kpis,
            updates: None,
            modals: ModalStack::new(),
            should_quit: false,
            last_refreshed: Local::now(),
            dashboard: DashboardComponent::new(),
            filter_dialog,
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    /// Cancel the periodic update; safe to call more than once
    pub fn shutdown(&mut self) {
        if let Some(updates) = self.updates.as_mut() {
            if !updates.is_cancelled() {
                log::info!("stopping periodic updates");
                updates.cancel();
            }
        }
    }

    pub fn updates_running(&self) -> bool {
        self.updates.as_ref().is_some_and(|u| !u.is_cancelled())
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifier.show(message, Instant::now());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering pipeline
    // ─────────────────────────────────────────────────────────────────────────

    /// Rows currently shown: filtered, then sorted
    pub fn visible_rows(&self) -> Vec<CustomerRow> {
        let filtered = filter_rows(&self.store.customer_rows(), &self.store.filters());
        let sort = self.store.sort();
        sort_rows(&filtered, sort.column, sort.direction)
    }

    fn render_table(&mut self) {
        let lines = render_rows(&self.visible_rows());
        self.dashboard.table.set_lines(lines, self.store.sort());
    }

    fn render_charts(&mut self) {
        self.charts.render_pie(Some(self.store.loan_data()));
        self.charts.render_bar(Some(self.store.loan_data()));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Control handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_filters(&mut self, update: FilterUpdate) {
        self.store.set_filters(update);
        log::info!("filters applied: {}", self.store.filters().summary());
        self.render_table();
        self.render_charts();
        self.notify("Filters applied.");
    }

    fn toggle_cross_filter(&mut self) {
        let enabled = !self.store.cross_filter();
        self.store.set_cross_filter(enabled);
        log::info!("cross-filter {}", if enabled { "enabled" } else { "disabled" });
        self.notify(if enabled {
            "Cross-filter on."
        } else {
            "Cross-filter off."
        });
    }

    fn refresh(&mut self) {
        log::info!("refreshing dashboard");
        self.charts.destroy_all();
        self.render_charts();
        self.render_table();
        self.last_refreshed = Local::now();
        self.notify("Dashboard refreshed.");
    }

    fn export(&mut self) {
        let rows = self.visible_rows();
        match export_to_dir(&rows, &self.config.export_dir()) {
            Ok(path) => {
                log::info!("exported {} rows to {}", rows.len(), path.display());
                self.notify("Export complete.");
            }
            Err(e) => {
                log::warn!("export failed: {}", e);
                self.notify("Export failed.");
            }
        }
    }

    fn sort_by(&mut self, column: usize) {
        let next = self.store.sort().toggled(column);
        self.store.set_sort(next.column, next.direction);
        log::info!("sort: {}", next);
        self.render_table();
        self.notify(format!("Sorted by column {}", column + 1));
    }

    /// Mark the row under the cursor; nothing happens without a real row
    fn select_cursor_row(&mut self) {
        let Some(id) = self.dashboard.table.cursor_id().map(str::to_string) else {
            return;
        };
        log::info!("row selected: {}", id);
        self.dashboard.table.mark_selected(&id);
        self.notify(format!("Selected: {}", id));
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Filters => self.filter_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Filters => self.filter_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    /// Render charts and table and (re)start the periodic update
    fn init(&mut self) -> Result<()> {
        self.render_charts();
        self.render_table();

        self.shutdown();
        self.updates = Some(DataUpdates::start(
            self.config.update_interval(),
            self.config.update_probability,
            self.config.update_jitter,
            Instant::now(),
        ));
        log::info!(
            "dashboard ready: {} customers, updates every {:?}",
            self.store.customer_rows().len(),
            self.config.update_interval()
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.dashboard.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.dashboard.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            log::debug!("action: {}", action);
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                let now = Instant::now();
                self.notifier.tick(now);
                if let Some(updates) = self.updates.as_mut() {
                    if updates.tick(now, &mut self.kpis) {
                        log::info!("funded amount updated");
                    }
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.shutdown();
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Table
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow | Action::PrevRow => {
                self.dashboard.update(action)?;
            }
            Action::SelectRow => self.select_cursor_row(),
            Action::SelectRowAt(_) => {
                self.dashboard.update(action)?;
                self.select_cursor_row();
            }
            Action::SortBy(column) => self.sort_by(column),

            // ─────────────────────────────────────────────────────────────────
            // Controls
            // ─────────────────────────────────────────────────────────────────
            Action::ApplyFilters(update) => {
                if self.modals.top() == Some(&Modal::Filters) {
                    self.modals.pop();
                }
                self.apply_filters(update);
            }
            Action::ToggleCrossFilter => self.toggle_cross_filter(),
            Action::Refresh => self.refresh(),
            Action::Export => self.export(),
            Action::DrillDown(target) => {
                log::info!("drill-down: {:?}", target);
                self.notify(target.message());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilters => {
                if !self.modals.contains(&Modal::Filters) {
                    self.filter_dialog.open(self.store.filters());
                    self.modals.push(Modal::Filters);
                }
            }
            Action::OpenHelp => {
                if !self.modals.contains(&Modal::Help) {
                    self.help_dialog.reset();
                    self.modals.push(Modal::Help);
                }
            }
            Action::OpenQuitDialog => {
                if !self.modals.contains(&Modal::QuitConfirm) {
                    self.modals.push(Modal::QuitConfirm);
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let filters = self.store.filters();
        let ctx = DashboardRenderContext {
            kpis: &self.kpis,
            charts: &self.charts,
            filters: &filters,
            cross_filter: self.store.cross_filter(),
            last_refreshed: self.last_refreshed,
        };
        draw_dashboard_screen(frame, area, &mut self.dashboard, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        draw_toast(frame, area, &self.notifier, Instant::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::customer::SortDirection;
    use crate::model::filter::Selection;
    use crate::model::kpi::DrillTarget;
    use crate::services::charts::{ChartSlot, LIBRARY_MISSING_MESSAGE};
    use crate::services::TableLine;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut app = App::with_library(Config::default(), Some(Box::new(TerminalCharts::new())));
        app.init().unwrap();
        app
    }

    fn message(app: &App) -> Option<&str> {
        app.notifier.current().map(|n| n.message.as_str())
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.dashboard
            .table
            .lines()
            .iter()
            .filter_map(|line| match line {
                TableLine::Record { id, .. } => Some(id.clone()),
                TableLine::Placeholder(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_init_renders_everything() {
        let app = app();
        assert!(matches!(app.charts.pie, ChartSlot::Rendered(_)));
        assert!(matches!(app.charts.bar, ChartSlot::Rendered(_)));
        assert_eq!(visible_ids(&app).len(), 5);
        assert!(app.updates_running());
        assert!(app.notifier.current().is_none());
    }

    #[test]
    fn test_apply_state_filter() {
        let mut app = app();
        app.update(Action::ApplyFilters(FilterUpdate::state("CA"))).unwrap();

        assert_eq!(visible_ids(&app), vec!["GAtPem...cmdgrz".to_string()]);
        assert_eq!(message(&app), Some("Filters applied."));
    }

    #[test]
    fn test_filter_without_matches_shows_placeholder() {
        let mut app = app();
        app.update(Action::ApplyFilters(FilterUpdate::state("WA"))).unwrap();

        assert!(visible_ids(&app).is_empty());
        assert!(app.dashboard.table.lines()[0].is_placeholder());
    }

    #[test]
    fn test_status_filter_is_ignored() {
        let mut app = app();
        app.update(Action::ApplyFilters(FilterUpdate {
            status: Some(Selection::parse("Charged Off")),
            ..FilterUpdate::default()
        }))
        .unwrap();
        assert_eq!(visible_ids(&app).len(), 5);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut app = app();
        app.update(Action::SortBy(1)).unwrap();
        assert_eq!(app.store.sort().direction, SortDirection::Ascending);
        assert_eq!(visible_ids(&app)[0], "J3xFJM...991BnP");
        assert_eq!(message(&app), Some("Sorted by column 2"));

        app.update(Action::SortBy(1)).unwrap();
        assert_eq!(app.store.sort().direction, SortDirection::Descending);
        assert_eq!(visible_ids(&app)[0], "GAtPem...cmdgrz");

        app.update(Action::SortBy(2)).unwrap();
        assert_eq!(app.store.sort().column, 2);
        assert_eq!(app.store.sort().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_select_row() {
        let mut app = app();
        app.update(Action::NextRow).unwrap();
        app.update(Action::SelectRow).unwrap();
        // Default sort is by id, so the second row is GAtPem
        assert_eq!(message(&app), Some("Selected: GAtPem...cmdgrz"));
        assert_eq!(app.dashboard.table.selected_id(), Some("GAtPem...cmdgrz"));
    }

    #[test]
    fn test_select_with_no_rows_is_silent() {
        let mut app = app();
        app.update(Action::ApplyFilters(FilterUpdate::state("WA"))).unwrap();
        app.update(Action::Refresh).unwrap();
        app.update(Action::SelectRow).unwrap();
        assert_eq!(message(&app), Some("Dashboard refreshed."));
    }

    #[test]
    fn test_toggle_cross_filter() {
        let mut app = app();
        app.update(Action::ToggleCrossFilter).unwrap();
        assert!(!app.store.cross_filter());
        assert_eq!(message(&app), Some("Cross-filter off."));

        app.update(Action::ToggleCrossFilter).unwrap();
        assert_eq!(message(&app), Some("Cross-filter on."));
    }

    #[test]
    fn test_refresh_keeps_one_live_instance_per_chart() {
        let library = TerminalCharts::new();
        let live = library.live_counter();
        let mut app = App::with_library(Config::default(), Some(Box::new(library)));
        app.init().unwrap();

        for _ in 0..3 {
            app.update(Action::Refresh).unwrap();
        }
        assert_eq!(live.get(), 2);
        assert_eq!(message(&app), Some("Dashboard refreshed."));
    }

    #[test]
    fn test_missing_library_shows_placeholder() {
        let mut app = App::with_library(Config::default(), None);
        app.init().unwrap();
        assert_eq!(app.charts.pie.error_message(), Some(LIBRARY_MISSING_MESSAGE));
        assert_eq!(app.charts.bar.error_message(), Some(LIBRARY_MISSING_MESSAGE));
    }

    #[test]
    fn test_export_writes_visible_rows() {
        let dir = std::env::temp_dir().join(format!("loan-dashboard-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = Config {
            export_dir: dir.to_string_lossy().to_string(),
            ..Config::default()
        };
        let mut app = App::with_library(config, None);
        app.init().unwrap();
        app.update(Action::ApplyFilters(FilterUpdate::state("TX"))).unwrap();
        app.update(Action::Export).unwrap();

        assert_eq!(message(&app), Some("Export complete."));
        let written = std::fs::read_to_string(dir.join("high-value-customers.csv")).unwrap();
        assert_eq!(
            written,
            "Customer ID,Income,State,Rate (%)\nIqOBd5...9452/cb,241120,TX,5.99\n"
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_failure_notifies() {
        let config = Config {
            export_dir: std::env::temp_dir()
                .join("loan-dashboard-no-such-dir")
                .join("nested")
                .to_string_lossy()
                .to_string(),
            ..Config::default()
        };
        let mut app = App::with_library(config, None);
        app.update(Action::Export).unwrap();
        assert_eq!(message(&app), Some("Export failed."));
    }

    #[test]
    fn test_drill_down_message() {
        let mut app = app();
        app.update(Action::DrillDown(DrillTarget::Status)).unwrap();
        assert_eq!(message(&app), Some("Analyzing status breakdown…"));
    }

    #[test]
    fn test_modal_routing() {
        let mut app = app();
        app.update(Action::OpenFilters).unwrap();
        app.update(Action::OpenFilters).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Filters));

        // Enter in the dialog applies and closes it
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(action, Some(Action::ApplyFilters(_))));
        app.update(action.unwrap()).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_quit_cancels_updates() {
        let mut app = app();
        app.update(Action::OpenQuitDialog).unwrap();
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
        assert!(!app.updates_running());
    }

    #[test]
    fn test_reinit_replaces_updates() {
        let mut app = app();
        app.init().unwrap();
        assert!(app.updates_running());
    }

    #[test]
    fn test_draw_full_screen() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| app.draw(frame, frame.area()).unwrap())
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Total Funded"));
        assert!(text.contains("High-Value Customers"));
        assert!(text.contains("cross-filter on"));
    }
}
