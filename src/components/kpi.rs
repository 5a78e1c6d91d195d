//! KPI tile row

use crate::components::layout::split_tiles;
use crate::model::kpi::{DrillTarget, KpiBoard};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the tiles and return each tile's area with its drill-down target
pub fn draw_kpi_row(
    frame: &mut Frame,
    area: Rect,
    board: &KpiBoard,
) -> Vec<(Rect, Option<DrillTarget>)> {
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let tiles = split_tiles(area, board.tiles.len());
    for (tile, tile_area) in board.tiles.iter().zip(&tiles) {
        let border_color = if tile.drill.is_some() {
            Color::Blue
        } else {
            Color::DarkGray
        };
        let content = vec![
            Line::from(Span::styled(
                tile.label.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                tile.value.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(paragraph, *tile_area);
    }

    board
        .tiles
        .iter()
        .zip(tiles)
        .map(|(tile, rect)| (rect, tile.drill))
        .collect()
}
