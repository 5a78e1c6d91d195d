//! Customer table component
//!
//! Displays the rendered table lines with a sortable header, a cursor and a
//! selected-row marker. Clicking a header cell sorts, clicking a row selects.

use crate::action::Action;
use crate::component::Component;
use crate::model::customer::{Column, SortSpec};
use crate::services::TableLine;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
    Frame,
};

const COLUMN_WIDTHS: [Constraint; 4] = [
    Constraint::Percentage(40),
    Constraint::Percentage(20),
    Constraint::Percentage(15),
    Constraint::Percentage(25),
];
const HIGHLIGHT_SYMBOL: &str = "▶ ";
const HIGHLIGHT_WIDTH: u16 = 2;

/// High-value customer table
pub struct CustomerTable {
    lines: Vec<TableLine>,
    sort: SortSpec,
    state: TableState,
    /// Id of the row the user selected, if still visible it gets a marker
    selected_id: Option<String>,
    /// Area of the last draw, for mouse hit-testing
    last_area: Rect,
}

impl Default for CustomerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerTable {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            sort: SortSpec::default(),
            state: TableState::default(),
            selected_id: None,
            last_area: Rect::default(),
        }
    }

    /// Replace the displayed lines, keeping the cursor in range
    pub fn set_lines(&mut self, lines: Vec<TableLine>, sort: SortSpec) {
        self.lines = lines;
        self.sort = sort;

        let records = self.record_count();
        let cursor = match self.state.selected() {
            _ if records == 0 => None,
            Some(i) => Some(i.min(records - 1)),
            None => Some(0),
        };
        self.state.select(cursor);
    }

    pub fn lines(&self) -> &[TableLine] {
        &self.lines
    }

    fn record_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_placeholder()).count()
    }

    /// Id of the record at a visible index
    pub fn id_at(&self, index: usize) -> Option<&str> {
        match self.lines.get(index)? {
            TableLine::Record { id, .. } => Some(id.as_str()),
            TableLine::Placeholder(_) => None,
        }
    }

    /// Id of the record under the cursor
    pub fn cursor_id(&self) -> Option<&str> {
        self.id_at(self.state.selected()?)
    }

    pub fn move_cursor_to(&mut self, index: usize) {
        if self.id_at(index).is_some() {
            self.state.select(Some(index));
        }
    }

    pub fn mark_selected(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    fn next(&mut self) {
        let count = self.record_count();
        if count == 0 {
            return;
        }
        let i = self.state.selected().map(|i| (i + 1) % count).unwrap_or(0);
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let count = self.record_count();
        if count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Column rectangles inside the last drawn table
    fn column_areas(&self) -> Vec<Rect> {
        let inner = self.last_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        let cells = Rect {
            x: inner.x + HIGHLIGHT_WIDTH,
            width: inner.width.saturating_sub(HIGHLIGHT_WIDTH),
            ..inner
        };
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(COLUMN_WIDTHS)
            .spacing(1)
            .split(cells)
            .to_vec()
    }

    fn header_cells(&self) -> Row<'static> {
        let cells = Column::all().into_iter().enumerate().map(|(i, column)| {
            let title = if i == self.sort.column {
                format!("{} {}", column.title(), self.sort.direction.arrow())
            } else {
                column.title().to_string()
            };
            Cell::from(title)
        });
        Row::new(cells).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }
}

impl Component for CustomerTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectRow),
            KeyCode::Char(c @ '1'..='4') => Some(Action::SortBy(c as usize - '1' as usize)),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let inner = self.last_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if inner.width == 0
            || mouse.column < inner.x
            || mouse.column >= inner.x + inner.width
            || mouse.row < inner.y
            || mouse.row >= inner.y + inner.height
        {
            return Ok(None);
        }

        if mouse.row == inner.y {
            let column = self
                .column_areas()
                .iter()
                .position(|r| mouse.column >= r.x && mouse.column < r.x + r.width);
            return Ok(column.map(Action::SortBy));
        }

        let index = (mouse.row - inner.y - 1) as usize + self.state.offset();
        Ok(self.id_at(index).map(|_| Action::SelectRowAt(index)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextRow => self.next(),
            Action::PrevRow => self.previous(),
            Action::SelectRowAt(index) => self.move_cursor_to(index),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.last_area = area;
        if area.width == 0 || area.height == 0 {
            return Ok(());
        }

        let selected_id = self.selected_id.clone();
        let rows: Vec<Row> = self
            .lines
            .iter()
            .map(|line| match line {
                TableLine::Record { id, cells } => {
                    let is_selected = selected_id.as_deref() == Some(id.as_str());
                    let style = if is_selected {
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let mut row_cells: Vec<Cell> = cells.iter().cloned().map(Cell::from).collect();
                    if is_selected {
                        row_cells[0] = Cell::from(format!("● {}", cells[0]));
                    }
                    Row::new(row_cells).style(style)
                }
                TableLine::Placeholder(message) => Row::new(vec![Cell::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))]),
            })
            .collect();

        let title = format!(" High-Value Customers ({}) ", self.record_count());
        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(self.header_cells())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::customer::{CustomerRow, SortDirection};
    use crate::services::table::{render_rows, EMPTY_TABLE_MESSAGE};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_table() -> CustomerTable {
        let rows = vec![
            CustomerRow::new("a", 100, "CA", 5.0),
            CustomerRow::new("b", 200, "TX", 6.0),
        ];
        let mut table = CustomerTable::new();
        table.set_lines(render_rows(&rows), SortSpec::default());
        table
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<Vec<_>>()
            .join("")
    }

    #[test]
    fn test_cursor_wraps() {
        let mut table = sample_table();
        assert_eq!(table.cursor_id(), Some("a"));

        table.update(Action::NextRow).unwrap();
        assert_eq!(table.cursor_id(), Some("b"));
        table.update(Action::NextRow).unwrap();
        assert_eq!(table.cursor_id(), Some("a"));
        table.update(Action::PrevRow).unwrap();
        assert_eq!(table.cursor_id(), Some("b"));
    }

    #[test]
    fn test_placeholder_has_no_cursor() {
        let mut table = CustomerTable::new();
        table.set_lines(render_rows(&[]), SortSpec::default());
        assert_eq!(table.cursor_id(), None);
        table.update(Action::NextRow).unwrap();
        assert_eq!(table.cursor_id(), None);
    }

    #[test]
    fn test_cursor_clamped_when_lines_shrink() {
        let mut table = sample_table();
        table.update(Action::NextRow).unwrap();
        let rows = vec![CustomerRow::new("z", 1, "NY", 1.0)];
        table.set_lines(render_rows(&rows), SortSpec::default());
        assert_eq!(table.cursor_id(), Some("z"));
    }

    #[test]
    fn test_digit_keys_sort_columns() {
        let mut table = sample_table();
        let key = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(table.handle_key_event(key).unwrap(), Some(Action::SortBy(2)));

        let key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(table.handle_key_event(key).unwrap(), None);
    }

    #[test]
    fn test_draw_shows_sort_arrow_and_rows() {
        let mut table = sample_table();
        table.set_lines(
            table.lines().to_vec(),
            SortSpec {
                column: 1,
                direction: SortDirection::Descending,
            },
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Income ▼"));
        assert!(text.contains("$100"));
        assert!(text.contains("$200"));
    }

    #[test]
    fn test_draw_placeholder() {
        let mut table = CustomerTable::new();
        table.set_lines(render_rows(&[]), SortSpec::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains(EMPTY_TABLE_MESSAGE));
    }

    #[test]
    fn test_mouse_click_on_header_and_row() {
        let mut table = sample_table();
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // Header row sits right under the top border
        assert_eq!(
            table.handle_mouse_event(click(4, 1)).unwrap(),
            Some(Action::SortBy(0))
        );
        assert_eq!(
            table.handle_mouse_event(click(76, 1)).unwrap(),
            Some(Action::SortBy(3))
        );
        assert_eq!(
            table.handle_mouse_event(click(10, 3)).unwrap(),
            Some(Action::SelectRowAt(1))
        );
        // Below the last record
        assert_eq!(table.handle_mouse_event(click(10, 5)).unwrap(), None);
    }
}
