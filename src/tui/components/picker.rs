//! # Picker Component
//!
//! Searchable selection overlay used by the lend flow: first to choose an
//! available tool, then to choose a borrower.
//!
//! Typing filters the list by case-insensitive substring. Enter picks the
//! highlighted entry. When nothing matches, Enter submits the typed text
//! as-is and leaves it to the store to report an unknown name.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState` while the overlay is open
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::dialog::centered_rect;
use crate::tui::event::TuiEvent;

/// Persistent state for the picker overlay.
pub struct PickerState {
    pub title: String,
    pub items: Vec<String>,
    pub query: String,
    pub selected: usize,
    pub list_state: ListState,
    max_query_chars: usize,
}

/// Events emitted by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Pick(String),
    Cancel,
}

impl PickerState {
    pub fn new(title: impl Into<String>, items: Vec<String>, max_query_chars: usize) -> Self {
        let mut state = Self {
            title: title.into(),
            items,
            query: String::new(),
            selected: 0,
            list_state: ListState::default(),
            max_query_chars,
        };
        state.reset_selection();
        state
    }

    /// Items matching the current query, in original order.
    pub fn filtered(&self) -> Vec<&str> {
        let needle = self.query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        let any = !self.filtered().is_empty();
        self.list_state.select(any.then_some(0));
    }
}

impl EventHandler for PickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Cancel),
            TuiEvent::CursorUp => {
                if !self.filtered().is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                let count = self.filtered().len();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::InputChar(c) => {
                if !c.is_control() && self.query.chars().count() < self.max_query_chars {
                    self.query.push(*c);
                    self.reset_selection();
                }
                None
            }
            TuiEvent::Paste(text) => {
                let room = self.max_query_chars.saturating_sub(self.query.chars().count());
                let line = text.lines().next().unwrap_or("");
                self.query
                    .extend(line.chars().filter(|c| !c.is_control()).take(room));
                self.reset_selection();
                None
            }
            TuiEvent::Backspace => {
                self.query.pop();
                self.reset_selection();
                None
            }
            TuiEvent::Submit => {
                if let Some(item) = self.filtered().get(self.selected) {
                    return Some(PickerEvent::Pick(item.to_string()));
                }
                let typed = self.query.trim();
                (!typed.is_empty()).then(|| PickerEvent::Pick(typed.to_string()))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the picker overlay.
pub struct Picker<'a> {
    state: &'a mut PickerState,
    empty_hint: &'a str,
}

impl<'a> Picker<'a> {
    pub fn new(state: &'a mut PickerState, empty_hint: &'a str) -> Self {
        Self { state, empty_hint }
    }
}

impl Component for Picker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Type to filter  Enter Select  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [search_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let search = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.state.query.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]);
        let query_width = UnicodeWidthStr::width(self.state.query.as_str()) as u16;
        let cursor_x = (search_area.x + 8 + query_width).min(search_area.right().saturating_sub(1));
        frame.render_widget(Paragraph::new(search), search_area);
        frame.set_cursor_position((cursor_x, search_area.y));

        let filtered = self.state.filtered();
        if filtered.is_empty() {
            let hint = if self.state.items.is_empty() {
                self.empty_hint.to_string()
            } else {
                format!("No match. Enter uses \"{}\" as typed.", self.state.query.trim())
            };
            let empty = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = filtered
            .iter()
            .map(|item| ListItem::new(Line::from(item.to_string())))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn picker() -> PickerState {
        PickerState::new(
            "Select tool",
            vec![
                "Hammer".to_string(),
                "Claw Hammer".to_string(),
                "Saw".to_string(),
            ],
            30,
        )
    }

    fn type_str(state: &mut PickerState, s: &str) {
        for c in s.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut state = picker();
        type_str(&mut state, "HAM");
        assert_eq!(state.filtered(), vec!["Hammer", "Claw Hammer"]);
    }

    #[test]
    fn test_submit_picks_highlighted() {
        let mut state = picker();
        type_str(&mut state, "ham");
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(PickerEvent::Pick("Claw Hammer".to_string()))
        );
    }

    #[test]
    fn test_typing_resets_selection() {
        let mut state = picker();
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        type_str(&mut state, "s");
        assert_eq!(state.selected, 0);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_no_match_submits_typed_text() {
        let mut state = picker();
        type_str(&mut state, " Drill ");
        assert!(state.filtered().is_empty());
        assert_eq!(state.list_state.selected(), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(PickerEvent::Pick("Drill".to_string()))
        );
    }

    #[test]
    fn test_empty_picker_without_query_does_nothing() {
        let mut state = PickerState::new("Select borrower", Vec::new(), 30);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(PickerEvent::Cancel));
    }

    #[test]
    fn test_backspace_widens_filter() {
        let mut state = picker();
        type_str(&mut state, "sawx");
        assert!(state.filtered().is_empty());
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.filtered(), vec!["Saw"]);
    }

    #[test]
    fn test_render_lists_items_and_query() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = picker();
        type_str(&mut state, "ham");
        terminal
            .draw(|f| Picker::new(&mut state, "No tools").render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Select tool"));
        assert!(text.contains("Search: ham"));
        assert!(text.contains("> Hammer"));
        assert!(text.contains("Claw Hammer"));
        assert!(!text.contains("Saw"));
    }

    #[test]
    fn test_render_empty_hint() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PickerState::new("Select tool", Vec::new(), 30);
        terminal
            .draw(|f| Picker::new(&mut state, "All tools are on loan").render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("All tools are on loan"));
    }
}
