//! # List Pane Component
//!
//! A bordered, selectable list used for the Tools and Borrowers panes.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListPaneState` lives in `TuiState` and survives between frames
//! - `ListPane` is created each frame with borrowed state and fresh rows
//!
//! The rows are re-read from the store every frame, so the state only
//! tracks which index is selected and clamps it when the list shrinks.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::Component;

/// Selection state shared by every list pane.
#[derive(Debug, Default)]
pub struct ListPaneState {
    pub list_state: ListState,
}

impl ListPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Clamp the selection to a list of `len` rows.
    pub fn sync(&mut self, len: usize) {
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i + 1);
        self.list_state.select(Some(i.min(len - 1)));
    }
}

/// One row: the name plus an optional dimmed note (e.g. "on loan").
pub struct PaneRow {
    pub label: String,
    pub note: Option<String>,
}

/// Transient render wrapper for a list pane.
pub struct ListPane<'a> {
    pub title: &'a str,
    pub rows: Vec<PaneRow>,
    pub empty_text: &'a str,
    pub focused: bool,
    pub state: &'a mut ListPaneState,
}

/// Border style for a pane, highlighted when focused.
pub fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let (border, title_style) = if focused {
        (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        let dim = Style::default().fg(Color::DarkGray);
        (dim, dim)
    };
    Block::bordered()
        .title(Line::styled(format!(" {title} "), title_style))
        .border_style(border)
}

/// Style for the highlighted row; only loud when the pane has focus.
pub fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

/// Truncate a string to fit within `max_width` terminal columns, adding "…" if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for ListPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = pane_block(self.title, self.focused);
        self.state.sync(self.rows.len());

        if self.rows.is_empty() {
            let empty = Paragraph::new(Line::styled(
                self.empty_text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .centered()
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // borders + highlight symbol
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let note = row.note.as_deref().map(|n| format!("  {n}")).unwrap_or_default();
                let label_width = inner_width.saturating_sub(note.chars().count());
                let mut spans = vec![Span::raw(truncate_to_width(&row.label, label_width))];
                if !note.is_empty() {
                    spans.push(Span::styled(note, Style::default().fg(Color::DarkGray)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focused))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
