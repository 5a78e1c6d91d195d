//! Filter dialog component
//!
//! Three option lists (state, status, year). Enter applies all three
//! choices at once; the store merges them.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::filter::{FilterSet, FilterUpdate, Selection};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const ALL_OPTION: &str = "all";

/// One labelled option list
struct FilterSection {
    title: &'static str,
    /// Concrete values; index 0 of the list is always "all"
    values: Vec<String>,
    list_state: ListState,
}

impl FilterSection {
    fn new(title: &'static str, values: Vec<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            title,
            values,
            list_state,
        }
    }

    fn option_count(&self) -> usize {
        self.values.len() + 1
    }

    fn select_current(&mut self, current: &Selection) {
        let index = match current {
            Selection::All => 0,
            Selection::Only(value) => self
                .values
                .iter()
                .position(|v| v == value)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        self.list_state.select(Some(index));
    }

    fn chosen(&self) -> Selection {
        match self.list_state.selected() {
            Some(i) if i > 0 => self
                .values
                .get(i - 1)
                .map(|v| Selection::Only(v.clone()))
                .unwrap_or_default(),
            _ => Selection::All,
        }
    }

    fn select_next(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        if i + 1 < self.option_count() {
            self.list_state.select(Some(i + 1));
        }
    }

    fn select_prev(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }
}

/// Filter dialog
pub struct FilterDialog {
    sections: [FilterSection; 3],
    /// Section receiving j/k
    focus: usize,
    /// Filters in the store when the dialog opened
    current: FilterSet,
}

impl FilterDialog {
    pub fn new(states: Vec<String>, statuses: Vec<String>, years: Vec<String>) -> Self {
        Self {
            sections: [
                FilterSection::new("State", states),
                FilterSection::new("Status", statuses),
                FilterSection::new("Year", years),
            ],
            focus: 0,
            current: FilterSet::default(),
        }
    }

    /// Preselect the active filters before the dialog is shown
    pub fn open(&mut self, current: FilterSet) {
        self.sections[0].select_current(&current.state);
        self.sections[1].select_current(&current.status);
        self.sections[2].select_current(&current.year);
        self.focus = 0;
        self.current = current;
    }

    /// Full update built from the three choices
    pub fn update_value(&self) -> FilterUpdate {
        FilterUpdate {
            state: Some(self.sections[0].chosen()),
            status: Some(self.sections[1].chosen()),
            year: Some(self.sections[2].chosen()),
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.sections.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.sections.len() - 1) % self.sections.len();
    }

    fn current_for(&self, index: usize) -> &Selection {
        match index {
            0 => &self.current.state,
            1 => &self.current.status,
            _ => &self.current.year,
        }
    }
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ApplyFilters(self.update_value())),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.sections[self.focus].select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.sections[self.focus].select_prev();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let longest = self
            .sections
            .iter()
            .map(|s| s.option_count())
            .max()
            .unwrap_or(1) as u16;
        let popup_area = centered_popup(area, 72, longest + 8);
        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Option lists
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!("Current: {}", self.current.summary()),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filters ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(main_chunks[1]);

        for index in 0..self.sections.len() {
            let focused = index == self.focus;
            let current = self.current_for(index).clone();
            let section = &mut self.sections[index];

            let options = std::iter::once(ALL_OPTION.to_string()).chain(section.values.iter().cloned());
            let items: Vec<ListItem> = options
                .enumerate()
                .map(|(i, label)| {
                    let is_current = match &current {
                        Selection::All => i == 0,
                        Selection::Only(v) => i > 0 && *v == label,
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            if is_current { "● " } else { "  " },
                            Style::default().fg(Color::Green),
                        ),
                        Span::styled(
                            label,
                            if is_current {
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                    ]))
                })
                .collect();

            let border = if focused { Color::Yellow } else { Color::DarkGray };
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", section.title))
                        .border_style(Style::default().fg(border)),
                )
                .highlight_style(
                    Style::default()
                        .bg(if focused { Color::Blue } else { Color::DarkGray })
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, columns[index], &mut section.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Tab/h/l ", Style::default().fg(Color::Cyan)),
            Span::raw("Section  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Choose  "),
            Span::styled(" Esc/f ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn dialog() -> FilterDialog {
        FilterDialog::new(
            vec!["CA".into(), "TX".into()],
            vec!["Current".into(), "Charged Off".into()],
            vec!["2018".into(), "2017".into()],
        )
    }

    fn press(dialog: &mut FilterDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_enter_with_defaults_applies_all() {
        let mut d = dialog();
        let action = press(&mut d, KeyCode::Enter);
        assert_eq!(
            action,
            Some(Action::ApplyFilters(FilterUpdate {
                state: Some(Selection::All),
                status: Some(Selection::All),
                year: Some(Selection::All),
            }))
        );
    }

    #[test]
    fn test_choose_state_and_year() {
        let mut d = dialog();
        press(&mut d, KeyCode::Char('j'));
        press(&mut d, KeyCode::Char('j'));
        press(&mut d, KeyCode::Tab);
        press(&mut d, KeyCode::Tab);
        press(&mut d, KeyCode::Char('j'));

        let update = d.update_value();
        assert_eq!(update.state, Some(Selection::Only("TX".into())));
        assert_eq!(update.status, Some(Selection::All));
        assert_eq!(update.year, Some(Selection::Only("2018".into())));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut d = dialog();
        press(&mut d, KeyCode::Char('k'));
        for _ in 0..10 {
            press(&mut d, KeyCode::Char('j'));
        }
        assert_eq!(d.update_value().state, Some(Selection::Only("TX".into())));
    }

    #[test]
    fn test_open_preselects_current_filters() {
        let mut d = dialog();
        let mut current = FilterSet::default();
        current.merge(FilterUpdate::state("CA"));
        d.open(current);
        assert_eq!(d.update_value().state, Some(Selection::Only("CA".into())));
    }

    #[test]
    fn test_escape_closes() {
        let mut d = dialog();
        assert_eq!(press(&mut d, KeyCode::Esc), Some(Action::CloseModal));
    }
}
