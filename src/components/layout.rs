//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen areas
pub struct DashboardLayout {
    pub kpis: Rect,
    pub pie: Rect,
    pub bar: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Split the screen into KPI row, charts row, table, status and help lines
pub fn calculate_dashboard_layout(area: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Charts: doughnut (40%) | bar (60%)
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    DashboardLayout {
        kpis: rows[0],
        pie: charts[0],
        bar: charts[1],
        table: rows[2],
        status: rows[3],
        help: rows[4],
    }
}

/// Split a row into `count` equal tiles
pub fn split_tiles(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_layout_covers_screen() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = calculate_dashboard_layout(area);

        assert_eq!(layout.kpis.y, 0);
        assert_eq!(layout.kpis.height, 4);
        assert_eq!(layout.pie.y, layout.bar.y);
        assert_eq!(layout.pie.width + layout.bar.width, 120);
        assert_eq!(layout.help.y, 39);
        assert_eq!(layout.status.y, 38);
        assert!(layout.table.height >= 5);
    }

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_popup(area, 40, 7);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.y, 1);
    }

    #[test]
    fn test_split_tiles() {
        let tiles = split_tiles(Rect::new(0, 0, 100, 4), 4);
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles.iter().map(|t| t.width).sum::<u16>(), 100);
        assert!(split_tiles(Rect::new(0, 0, 100, 4), 0).is_empty());
    }
}
