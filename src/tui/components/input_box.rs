//! # InputBox Component
//!
//! Single-line name prompt shown when adding a tool or borrower.
//!
//! ## Responsibilities
//!
//! - Capture text input, capped at the configured name length
//! - Handle editing (backspace, paste)
//! - Emit `Submit` on Enter and `Cancel` on Esc
//!
//! The buffer is internal state. The character cap is a prop taken from the
//! store so the prompt never accepts a name the store would reject for length.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::dialog::centered_band;
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// User backed out (Esc pressed)
    Cancel,
}

pub struct InputBox {
    /// Prompt title, e.g. "New tool"
    pub title: String,
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Maximum characters accepted (Prop)
    pub max_chars: usize,
}

impl InputBox {
    pub fn new(title: impl Into<String>, max_chars: usize) -> Self {
        Self {
            title: title.into(),
            buffer: String::new(),
            max_chars,
        }
    }

    fn remaining(&self) -> usize {
        self.max_chars.saturating_sub(self.buffer.chars().count())
    }

    fn insert(&mut self, text: &str) {
        let room = self.remaining();
        self.buffer
            .extend(text.chars().filter(|c| !c.is_control()).take(room));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                None
            }
            TuiEvent::Paste(text) => {
                // Names are single-line; keep the first line only
                self.insert(text.lines().next().unwrap_or(""));
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit(std::mem::take(&mut self.buffer))),
            TuiEvent::Escape => Some(InputEvent::Cancel),
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_band(50, 3, area);
        frame.render_widget(Clear, overlay);

        let counter = format!(
            " {}/{} ",
            self.buffer.chars().count(),
            self.max_chars
        );
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", self.title))
            .title_bottom(Line::from(counter).right_aligned())
            .title_bottom(Line::from(" Enter Add  Esc Cancel ").left_aligned());

        // Keep the tail visible when the name is wider than the box
        let inner_width = overlay.width.saturating_sub(2) as usize;
        let text_width = self.buffer.width();
        let visible: String = if text_width >= inner_width {
            let mut tail: Vec<char> = Vec::new();
            let mut used = 0;
            for c in self.buffer.chars().rev() {
                let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                if used + w >= inner_width {
                    break;
                }
                tail.push(c);
                used += w;
            }
            tail.into_iter().rev().collect()
        } else {
            self.buffer.clone()
        };

        let cursor_x = overlay.x + 1 + visible.width() as u16;
        frame.render_widget(Paragraph::new(visible).block(block), overlay);
        frame.set_cursor_position((cursor_x, overlay.y + 1));
    }
}
