//! Dashboard component - Main application screen
//!
//! Maps dashboard-wide shortcuts to Actions, forwards table input to the
//! customer table, and draws KPI tiles, charts, table and the bottom bars.

use crate::action::Action;
use crate::component::Component;
use crate::components::charts::draw_chart_panel;
use crate::components::kpi::draw_kpi_row;
use crate::components::layout::calculate_dashboard_layout;
use crate::components::table::CustomerTable;
use crate::model::filter::FilterSet;
use crate::model::kpi::{DrillTarget, KpiBoard};
use crate::services::ChartAdapter;
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Main dashboard view. Owns the table and remembers clickable areas.
#[derive(Default)]
pub struct DashboardComponent {
    pub table: CustomerTable,
    /// KPI tiles and charts that drill down when clicked
    drill_areas: Vec<(Rect, DrillTarget)>,
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('f') => Some(Action::OpenFilters),
            KeyCode::Char('x') => Some(Action::ToggleCrossFilter),
            KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('e') => Some(Action::Export),

            // Drill-downs
            KeyCode::Char('L') => Some(Action::DrillDown(DrillTarget::LoanAmount)),
            KeyCode::Char('S') => Some(Action::DrillDown(DrillTarget::Status)),
            KeyCode::Char('G') => Some(Action::DrillDown(DrillTarget::States)),

            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => return self.table.handle_key_event(key),
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if let Some((_, target)) = self
                .drill_areas
                .iter()
                .find(|(area, _)| contains(*area, mouse.column, mouse.row))
            {
                return Ok(Some(Action::DrillDown(*target)));
            }
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.table.update(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the store; see draw_dashboard_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardRenderContext<'a> {
    pub kpis: &'a KpiBoard,
    pub charts: &'a ChartAdapter,
    pub filters: &'a FilterSet,
    pub cross_filter: bool,
    pub last_refreshed: DateTime<Local>,
}

/// Draw the dashboard screen
pub fn draw_dashboard_screen(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let layout = calculate_dashboard_layout(area);

    let tiles = draw_kpi_row(frame, layout.kpis, ctx.kpis);
    draw_chart_panel(frame, layout.pie, &ctx.charts.pie, "Loan Status");
    draw_chart_panel(frame, layout.bar, &ctx.charts.bar, "Loans by State");
    dashboard.table.draw(frame, layout.table)?;

    dashboard.drill_areas = tiles
        .into_iter()
        .filter_map(|(rect, target)| target.map(|t| (rect, t)))
        .chain([
            (layout.pie, DrillTarget::Status),
            (layout.bar, DrillTarget::States),
        ])
        .collect();

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help);
    Ok(())
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let (cross_label, cross_color) = if ctx.cross_filter {
        (" cross-filter on ", Color::Green)
    } else {
        (" cross-filter off ", Color::DarkGray)
    };

    let spans = vec![
        Span::styled(
            " Loan Dashboard ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            cross_label,
            Style::default()
                .fg(Color::Black)
                .bg(cross_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(ctx.filters.summary(), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  refreshed {}", ctx.last_refreshed.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" f ", Color::Green),
        Span::raw("Filters "),
        key(" x ", Color::Green),
        Span::raw("Cross-filter "),
        key(" R ", Color::Cyan),
        Span::raw("Refresh "),
        key(" e ", Color::Cyan),
        Span::raw("Export "),
        key(" 1-4 ", Color::Cyan),
        Span::raw("Sort "),
        key(" L/S/G ", Color::Magenta),
        Span::raw("Drill "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dashboard: &mut DashboardComponent, code: KeyCode) -> Option<Action> {
        dashboard
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_global_shortcuts() {
        let mut d = DashboardComponent::new();
        assert_eq!(press(&mut d, KeyCode::Char('f')), Some(Action::OpenFilters));
        assert_eq!(press(&mut d, KeyCode::Char('R')), Some(Action::Refresh));
        assert_eq!(
            press(&mut d, KeyCode::Char('G')),
            Some(Action::DrillDown(DrillTarget::States))
        );
        assert_eq!(press(&mut d, KeyCode::Char('q')), Some(Action::OpenQuitDialog));
    }

    #[test]
    fn test_table_keys_are_forwarded() {
        let mut d = DashboardComponent::new();
        assert_eq!(press(&mut d, KeyCode::Char('j')), Some(Action::NextRow));
        assert_eq!(press(&mut d, KeyCode::Char('1')), Some(Action::SortBy(0)));
        assert_eq!(press(&mut d, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_click_on_drill_area() {
        let mut d = DashboardComponent::new();
        d.drill_areas = vec![(Rect::new(0, 0, 10, 4), DrillTarget::LoanAmount)];

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            d.handle_mouse_event(click).unwrap(),
            Some(Action::DrillDown(DrillTarget::LoanAmount))
        );
    }
}
