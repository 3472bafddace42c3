//! # Confirm Dialog
//!
//! Yes/no overlay shown before deleting a tool or borrower or returning a
//! loan. Holds the pending core `Action` and hands it back on confirmation.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::action::Action;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::dialog::centered_band;
use crate::tui::event::TuiEvent;

pub struct ConfirmState {
    pub prompt: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm(Action),
    Cancel,
}

impl ConfirmState {
    pub fn new(prompt: impl Into<String>, action: Action) -> Self {
        Self {
            prompt: prompt.into(),
            action,
        }
    }
}

impl EventHandler for ConfirmState {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::Submit | TuiEvent::InputChar('y' | 'Y') => {
                Some(ConfirmEvent::Confirm(self.action.clone()))
            }
            TuiEvent::Escape | TuiEvent::InputChar('n' | 'N') => Some(ConfirmEvent::Cancel),
            _ => None,
        }
    }
}

impl Component for ConfirmState {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_band(50, 5, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Line::styled(
                " Confirm ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" y Yes  n No ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.prompt.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}
