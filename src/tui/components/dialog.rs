//! # Dialogs
//!
//! Shared overlay geometry plus the error dialog. Any key dismisses an
//! error; the event loop handles that, this module only draws.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// A rect of fixed `height` rows, `percent_x` wide, centered in `outer`.
pub fn centered_band(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let height = height.min(outer.height);
    let [_, band, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(band);
    center
}

/// Modal error message.
pub struct ErrorDialog<'a> {
    pub message: &'a str,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for ErrorDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let danger = Style::default().fg(Color::Red);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(danger)
            .title(Line::styled(" Error ", danger.add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(" Press any key ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        // Size the box to the wrapped message: borders + content
        let widest = centered_rect(60, 100, area);
        let inner_width = widest.width.saturating_sub(4);
        let lines = paragraph.line_count(inner_width) as u16;
        let overlay = centered_band(60, lines + 2, area);

        frame.render_widget(Clear, overlay);
        frame.render_widget(paragraph.block(block), overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert!(inner.x >= 20 && inner.y >= 10);
    }

    #[test]
    fn test_centered_band_clamps_height() {
        let outer = Rect::new(0, 0, 80, 5);
        assert_eq!(centered_band(50, 12, outer).height, 5);
    }

    #[test]
    fn test_error_dialog_shows_message() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ErrorDialog::new("Tool 'Hammer' already exists").render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Error"));
        assert!(text.contains("Tool 'Hammer' already exists"));
        assert!(text.contains("Press any key"));
    }
}
