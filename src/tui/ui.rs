use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ErrorDialog, ListPane, LoanList, PaneRow, Picker, TitleBar};
use crate::tui::{LendStep, Overlay, Pane, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Percentage(45), Min(5), Length(1)]);
    let [title_area, lists_area, loans_area, help_area] = layout.areas(frame.area());
    let [tools_area, borrowers_area] =
        Layout::horizontal([Percentage(50), Percentage(50)]).areas(lists_area);

    let store = &app.store;
    let loans = store.loans();

    TitleBar::new(
        app.status_message.clone(),
        store.tools().len(),
        store.borrowers().len(),
        loans.len(),
    )
    .render(frame, title_area);

    let tool_rows = store
        .tools()
        .iter()
        .map(|tool| PaneRow {
            label: tool.clone(),
            note: store.loan_for(tool).map(|loan| format!("→ {}", loan.borrower)),
        })
        .collect();
    ListPane {
        title: "Tools",
        rows: tool_rows,
        empty_text: "No tools yet. Press a to add one",
        focused: tui.focus == Pane::Tools,
        state: &mut tui.tools,
    }
    .render(frame, tools_area);

    let borrower_rows = store
        .borrowers()
        .iter()
        .map(|borrower| {
            let held = store.inventory().loans_held_by(borrower);
            PaneRow {
                label: borrower.clone(),
                note: (held > 0).then(|| format!("{held} on loan")),
            }
        })
        .collect();
    ListPane {
        title: "Borrowers",
        rows: borrower_rows,
        empty_text: "No borrowers yet. Press a to add one",
        focused: tui.focus == Pane::Borrowers,
        state: &mut tui.borrowers,
    }
    .render(frame, borrowers_area);

    LoanList {
        loans: &loans,
        focused: tui.focus == Pane::Loans,
        state: &mut tui.loans,
    }
    .render(frame, loans_area);

    frame.render_widget(help_line(app, tui), help_area);

    // Overlays draw last, error on top of everything
    let area = frame.area();
    match &mut tui.overlay {
        Some(Overlay::Prompt { input, .. }) => input.render(frame, area),
        Some(Overlay::Confirm(confirm)) => confirm.render(frame, area),
        Some(Overlay::Lend(LendStep::ChooseTool(picker))) => {
            Picker::new(picker, "No tools available. Every tool is on loan").render(frame, area)
        }
        Some(Overlay::Lend(LendStep::ChooseBorrower { picker, .. })) => {
            Picker::new(picker, "No borrowers yet. Add one first").render(frame, area)
        }
        None => {}
    }
    if let Some(error_msg) = &app.error {
        ErrorDialog::new(error_msg).render(frame, area);
    }
}

/// Key hints for the current mode.
fn help_line(app: &App, tui: &TuiState) -> Line<'static> {
    let hints: &[(&str, &str)] = if app.error.is_some() {
        &[("any key", "Dismiss")]
    } else if tui.overlay.is_some() {
        &[("Enter", "Confirm"), ("Esc", "Cancel")]
    } else {
        match tui.focus {
            Pane::Tools => &[
                ("a", "Add"),
                ("d", "Delete"),
                ("l", "Lend"),
                ("Tab", "Next pane"),
                ("q", "Quit"),
            ],
            Pane::Borrowers => &[
                ("a", "Add"),
                ("d", "Delete"),
                ("l", "Lend"),
                ("Tab", "Next pane"),
                ("q", "Quit"),
            ],
            Pane::Loans => &[
                ("r", "Return"),
                ("l", "Lend"),
                ("Tab", "Next pane"),
                ("q", "Quit"),
            ],
        }
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key} "), Style::default().fg(Color::Green)));
        spans.push(Span::styled(format!("{label} "), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
