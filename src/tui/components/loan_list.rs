//! # Loan List Component
//!
//! The "Currently Borrowed" pane: one row per active loan showing
//! tool → borrower and the date it was lent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};

use crate::core::inventory::Loan;
use crate::tui::component::Component;
use crate::tui::components::list_pane::{
    ListPaneState, highlight_style, pane_block, truncate_to_width,
};

pub const EMPTY_TEXT: &str = "No items currently borrowed";

/// Transient render wrapper for the loans pane.
pub struct LoanList<'a> {
    pub loans: &'a [&'a Loan],
    pub focused: bool,
    pub state: &'a mut ListPaneState,
}

impl Component for LoanList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("Currently Borrowed ({})", self.loans.len());
        let block = pane_block(&title, self.focused);
        self.state.sync(self.loans.len());

        if self.loans.is_empty() {
            let empty = Paragraph::new(Line::styled(
                EMPTY_TEXT,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .centered()
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // borders, highlight symbol, " → ", two spaces and a 10-char date
        let name_budget = (area.width.saturating_sub(4 + 3 + 2 + 10) as usize) / 2;
        let items: Vec<ListItem> = self
            .loans
            .iter()
            .map(|loan| {
                let tool = truncate_to_width(&loan.tool, name_budget);
                let borrower = truncate_to_width(&loan.borrower, name_budget);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{tool:<name_budget$}"),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(" → ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{borrower:<name_budget$}"),
                        Style::default().fg(Color::LightGreen),
                    ),
                    Span::styled(
                        format!("  {}", loan.lent_on.format("%Y-%m-%d")),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focused))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(loans: &[&Loan], width: u16) -> String {
        let backend = TestBackend::new(width, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ListPaneState::new();
        terminal
            .draw(|f| {
                LoanList {
                    loans,
                    focused: true,
                    state: &mut state,
                }
                .render(f, f.area());
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_empty_loans_message() {
        let text = draw(&[], 60);
        assert!(text.contains(EMPTY_TEXT));
        assert!(text.contains("Currently Borrowed (0)"));
    }

    #[test]
    fn test_loan_row_shows_borrower_and_date() {
        let loan = Loan {
            tool: "Hammer".to_string(),
            borrower: "John Smith".to_string(),
            lent_on: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        let text = draw(&[&loan], 70);
        assert!(text.contains("Hammer"));
        assert!(text.contains("→"));
        assert!(text.contains("John Smith"));
        assert!(text.contains("2024-03-09"));
        assert!(text.contains("Currently Borrowed (1)"));
    }
}
