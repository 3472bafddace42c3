//! # TitleBar Component
//!
//! Top status bar showing the app name, inventory counts, and the latest
//! status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     status_message: app.status_message.clone(),
//!     tools: 4,
//!     borrowers: 2,
//!     on_loan: 1,
//! };
//! title_bar.render(frame, title_area);
//! ```
//!
//! The title text changes based on state:
//!
//! 1. **Status message**: `"TOOL LENDING TRACKER | 4 tools · 2 borrowers · 1 on loan | Lent 'Saw' to Ana"`
//! 2. **Default**: `"TOOL LENDING TRACKER | 4 tools · 2 borrowers · 1 on loan"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Status message (e.g., "Added tool 'Hammer'")
    pub status_message: String,
    pub tools: usize,
    pub borrowers: usize,
    pub on_loan: usize,
}

impl TitleBar {
    pub fn new(status_message: String, tools: usize, borrowers: usize, on_loan: usize) -> Self {
        Self {
            status_message,
            tools,
            borrowers,
            on_loan,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let counts = format!(
            "{} tools · {} borrowers · {} on loan",
            self.tools, self.borrowers, self.on_loan
        );
        let mut spans = vec![
            Span::styled(
                "TOOL LENDING TRACKER",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(counts, Style::default().fg(Color::DarkGray)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(self.status_message.as_str()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
