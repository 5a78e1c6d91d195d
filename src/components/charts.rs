//! Chart panels
//!
//! Paints chart instances produced by the chart library: the status
//! doughnut on a braille canvas with a legend, and the state counts as a
//! bar chart. Slots without a live instance show their inline message.

use crate::services::charts::{ChartHandle, ChartKind, ChartSlot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};
use std::f64::consts::TAU;

/// Inner radius of the doughnut relative to the outer one
const HOLE_RATIO: f64 = 0.55;
const RADIAL_STEPS: usize = 14;
const ANGULAR_STEPS: usize = 360;

/// Draw one chart panel. Zero-sized areas are skipped.
pub fn draw_chart_panel(frame: &mut Frame, area: Rect, slot: &ChartSlot, fallback_title: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    match slot {
        ChartSlot::Rendered(handle) if !handle.is_destroyed() => match handle.kind {
            ChartKind::Doughnut => draw_doughnut(frame, area, handle),
            ChartKind::Bar => draw_bar(frame, area, handle),
        },
        _ => match slot.error_message() {
            Some(message) => draw_placeholder(frame, area, fallback_title, message),
            None => frame.render_widget(panel_block(fallback_title), area),
        },
    }
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::DarkGray))
}

fn draw_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let top_padding = area.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::from(""); top_padding as usize];
    lines.push(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel_block(title));
    frame.render_widget(paragraph, area);
}

/// Polar sample points of the doughnut, grouped by slice
pub fn doughnut_points(values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let total: f64 = values.iter().sum();
    let mut slices = vec![Vec::new(); values.len()];
    if total <= 0.0 {
        return slices;
    }

    // Cumulative end angle of every slice, starting at twelve o'clock
    let mut ends = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for v in values {
        acc += v / total * TAU;
        ends.push(acc);
    }

    for a in 0..ANGULAR_STEPS {
        let theta = a as f64 / ANGULAR_STEPS as f64 * TAU;
        let slice = ends
            .iter()
            .position(|end| theta < *end)
            .unwrap_or(values.len() - 1);
        for r in 0..=RADIAL_STEPS {
            let radius = HOLE_RATIO + (1.0 - HOLE_RATIO) * r as f64 / RADIAL_STEPS as f64;
            // Clockwise from the top
            slices[slice].push((radius * theta.sin(), radius * theta.cos()));
        }
    }
    slices
}

fn draw_doughnut(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let block = panel_block(&handle.options.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let chunks = if handle.options.show_legend {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner)
            .to_vec()
    } else {
        vec![inner]
    };
    let canvas_area = chunks[0];

    // Terminal cells are about twice as tall as wide
    let x_extent = canvas_area.width as f64 / (canvas_area.height.max(1) as f64 * 2.0);
    let slices = doughnut_points(&handle.values);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_extent.max(1.0), x_extent.max(1.0)])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (points, color) in slices.iter().zip(&handle.colors) {
                ctx.draw(&Points {
                    coords: points,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, canvas_area);

    if let Some(legend_area) = chunks.get(1) {
        let total = handle.total();
        let lines: Vec<Line> = handle
            .labels
            .iter()
            .zip(&handle.values)
            .zip(&handle.colors)
            .map(|((label, value), color)| {
                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(*color)),
                    Span::styled(label.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!(" {:.1}%", share),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), *legend_area);
    }
}

fn draw_bar(frame: &mut Frame, area: Rect, handle: &ChartHandle) {
    let block = panel_block(&handle.options.title);
    let inner_width = block.inner(area).width;

    let count = handle.values.len().max(1) as u16;
    let bar_gap = 1;
    let bar_width = (inner_width / count).saturating_sub(bar_gap).max(1);

    let bars: Vec<Bar> = handle
        .labels
        .iter()
        .zip(&handle.values)
        .zip(&handle.colors)
        .map(|((label, value), color)| {
            Bar::default()
                .value(value.round() as u64)
                .label(Line::from(label.clone()))
                .style(Style::default().fg(*color))
                .value_style(Style::default().fg(Color::Black).bg(*color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap);
    frame.render_widget(chart, area);
}
