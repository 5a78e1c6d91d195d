//! Toast overlay for the active notification

use crate::model::notification::{NotificationPhase, Notifier};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const TOAST_HEIGHT: u16 = 3;
const MAX_TOAST_WIDTH: u16 = 60;

/// Where the toast sits for a message, sliding right as the fade advances
pub fn toast_area(area: Rect, message: &str, fade_progress: f64) -> Rect {
    let width = (message.width() as u16 + 4)
        .min(MAX_TOAST_WIDTH)
        .min(area.width);
    let slide = (width as f64 * fade_progress.clamp(0.0, 1.0)).round() as u16;

    let right = area.x + area.width;
    let x = (area.x + area.width.saturating_sub(width + 1))
        .saturating_add(slide)
        .min(right);
    let y = area.y + area.height.min(1);
    let height = TOAST_HEIGHT.min(area.y + area.height - y);
    Rect::new(x, y, width.min(right - x), height)
}

/// Draw the active notification in the top-right corner
pub fn draw_toast(frame: &mut Frame, area: Rect, notifier: &Notifier, now: Instant) {
    let Some(notification) = notifier.current() else {
        return;
    };

    let progress = notifier.fade_progress(now);
    let rect = toast_area(area, &notification.message, progress);
    if rect.width < 3 || rect.height == 0 {
        return;
    }

    let style = match notification.phase {
        NotificationPhase::Visible => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        NotificationPhase::Fading => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    };
    let border = match notification.phase {
        NotificationPhase::Visible => Style::default().fg(Color::Green),
        NotificationPhase::Fading => Style::default().fg(Color::DarkGray),
    };

    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", notification.message),
        style,
    )))
    .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(paragraph, rect);
}
