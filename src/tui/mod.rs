//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Interaction
//!
//! Three panes (Tools, Borrowers, Loans) with `Tab` to move focus. Commands
//! open at most one overlay at a time:
//!
//! ```text
//! idle ──a──▶ Prompt ──Enter──▶ AddTool / AddBorrower
//!      ──d──▶ Confirm ──y────▶ RemoveTool / RemoveBorrower
//!      ──r──▶ Confirm ──y────▶ Return
//!      ──l──▶ Picker(tool) ──Enter──▶ Picker(borrower) ──Enter──▶ Lend
//! ```
//!
//! An error from the store is shown as a dialog; the next key dismisses it.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after events or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::error::EntityKind;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmEvent, ConfirmState, InputBox, InputEvent, ListPaneState, PickerEvent, PickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which list has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Tools,
    Borrowers,
    Loans,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Tools => Pane::Borrowers,
            Pane::Borrowers => Pane::Loans,
            Pane::Loans => Pane::Tools,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Pane::Tools => Pane::Loans,
            Pane::Borrowers => Pane::Tools,
            Pane::Loans => Pane::Borrowers,
        }
    }
}

/// Where the lend flow currently is.
pub enum LendStep {
    ChooseTool(PickerState),
    ChooseBorrower { tool: String, picker: PickerState },
}

/// Modal overlay on top of the panes (at most one).
pub enum Overlay {
    Prompt { kind: EntityKind, input: InputBox },
    Lend(LendStep),
    Confirm(ConfirmState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Pane,
    pub tools: ListPaneState,
    pub borrowers: ListPaneState,
    pub loans: ListPaneState,
    pub overlay: Option<Overlay>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Pane::Tools,
            tools: ListPaneState::new(),
            borrowers: ListPaneState::new(),
            loans: ListPaneState::new(),
            overlay: None,
        }
    }

    /// Clamp every selection to the current store contents.
    pub fn sync(&mut self, app: &App) {
        self.tools.sync(app.store.tools().len());
        self.borrowers.sync(app.store.borrowers().len());
        self.loans.sync(app.store.inventory().loan_count());
    }

    fn pane_state(&mut self, pane: Pane) -> &mut ListPaneState {
        match pane {
            Pane::Tools => &mut self.tools,
            Pane::Borrowers => &mut self.borrowers,
            Pane::Loans => &mut self.loans,
        }
    }

    pub fn selected_tool<'a>(&self, app: &'a App) -> Option<&'a str> {
        self.tools
            .selected()
            .and_then(|i| app.store.tools().get(i))
            .map(String::as_str)
    }

    pub fn selected_borrower<'a>(&self, app: &'a App) -> Option<&'a str> {
        self.borrowers
            .selected()
            .and_then(|i| app.store.borrowers().get(i))
            .map(String::as_str)
    }

    pub fn selected_loan_tool(&self, app: &App) -> Option<String> {
        self.loans
            .selected()
            .and_then(|i| app.store.loans().get(i).map(|loan| loan.tool.clone()))
    }
}

/// Number of rows in a pane.
fn pane_len(app: &App, pane: Pane) -> usize {
    match pane {
        Pane::Tools => app.store.tools().len(),
        Pane::Borrowers => app.store.borrowers().len(),
        Pane::Loans => app.store.inventory().loan_count(),
    }
}

/// Run a core action and re-sync list selections with the store.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let effect = update(app, action);
    tui.sync(app);
    effect
}

/// Run `action` now, or ask first when confirmation is enabled.
fn request(app: &mut App, tui: &mut TuiState, prompt: String, action: Action) -> Effect {
    if app.confirm_destructive {
        tui.overlay = Some(Overlay::Confirm(ConfirmState::new(prompt, action)));
        Effect::None
    } else {
        dispatch(app, tui, action)
    }
}

fn borrower_picker(app: &App, tool: &str) -> PickerState {
    PickerState::new(
        format!("Lend '{tool}' to"),
        app.store.borrowers().to_vec(),
        app.store.max_name_len(),
    )
}

/// Open the lend flow, skipping the tool step when the focused tool is available.
fn start_lend(app: &App, tui: &mut TuiState) {
    let preselected = (tui.focus == Pane::Tools)
        .then(|| tui.selected_tool(app))
        .flatten()
        .filter(|tool| !app.store.is_on_loan(tool))
        .map(str::to_string);

    let step = match preselected {
        Some(tool) => LendStep::ChooseBorrower {
            picker: borrower_picker(app, &tool),
            tool,
        },
        None => LendStep::ChooseTool(PickerState::new(
            "Select tool to lend",
            app.store
                .available_tools()
                .into_iter()
                .map(str::to_string)
                .collect(),
            app.store.max_name_len(),
        )),
    };
    tui.overlay = Some(Overlay::Lend(step));
}

/// Route one event to the open overlay. Returns the overlay if it stays open.
fn handle_overlay(
    app: &mut App,
    tui: &mut TuiState,
    overlay: Overlay,
    event: &TuiEvent,
) -> (Option<Overlay>, Effect) {
    match overlay {
        Overlay::Prompt { kind, mut input } => match input.handle_event(event) {
            Some(InputEvent::Submit(name)) => {
                let action = match kind {
                    EntityKind::Tool => Action::AddTool(name),
                    EntityKind::Borrower => Action::AddBorrower(name),
                };
                (None, dispatch(app, tui, action))
            }
            Some(InputEvent::Cancel) => (None, Effect::None),
            None => (Some(Overlay::Prompt { kind, input }), Effect::None),
        },
        Overlay::Confirm(mut confirm) => match confirm.handle_event(event) {
            Some(ConfirmEvent::Confirm(action)) => (None, dispatch(app, tui, action)),
            Some(ConfirmEvent::Cancel) => (None, Effect::None),
            None => (Some(Overlay::Confirm(confirm)), Effect::None),
        },
        Overlay::Lend(LendStep::ChooseTool(mut picker)) => match picker.handle_event(event) {
            Some(PickerEvent::Pick(tool)) => {
                let next = LendStep::ChooseBorrower {
                    picker: borrower_picker(app, &tool),
                    tool,
                };
                (Some(Overlay::Lend(next)), Effect::None)
            }
            Some(PickerEvent::Cancel) => (None, Effect::None),
            None => (Some(Overlay::Lend(LendStep::ChooseTool(picker))), Effect::None),
        },
        Overlay::Lend(LendStep::ChooseBorrower { tool, mut picker }) => {
            match picker.handle_event(event) {
                Some(PickerEvent::Pick(borrower)) => {
                    let effect = dispatch(app, tui, Action::Lend { tool, borrower });
                    (None, effect)
                }
                Some(PickerEvent::Cancel) => (None, Effect::None),
                None => (
                    Some(Overlay::Lend(LendStep::ChooseBorrower { tool, picker })),
                    Effect::None,
                ),
            }
        }
    }
}

/// Apply one input event to the app and presentation state.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    // ForceQuit (Ctrl+C) always quits regardless of mode
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }
    // Resize just needs a redraw
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }

    // An error dialog swallows the next key
    if app.error.is_some() {
        return update(app, Action::DismissError);
    }

    if let Some(overlay) = tui.overlay.take() {
        let (overlay, effect) = handle_overlay(app, tui, overlay, &event);
        tui.overlay = overlay;
        return effect;
    }

    let focus = tui.focus;
    match event {
        TuiEvent::InputChar('q') => update(app, Action::Quit),
        TuiEvent::FocusNext => {
            tui.focus = focus.next();
            Effect::None
        }
        TuiEvent::FocusPrev => {
            tui.focus = focus.prev();
            Effect::None
        }
        TuiEvent::CursorUp => {
            let len = pane_len(app, focus);
            tui.pane_state(focus).select_prev(len);
            Effect::None
        }
        TuiEvent::CursorDown => {
            let len = pane_len(app, focus);
            tui.pane_state(focus).select_next(len);
            Effect::None
        }
        TuiEvent::InputChar('a') => {
            let kind = match focus {
                Pane::Tools | Pane::Loans => EntityKind::Tool,
                Pane::Borrowers => EntityKind::Borrower,
            };
            let title = match kind {
                EntityKind::Tool => "New tool",
                EntityKind::Borrower => "New borrower",
            };
            tui.overlay = Some(Overlay::Prompt {
                kind,
                input: InputBox::new(title, app.store.max_name_len()),
            });
            Effect::None
        }
        TuiEvent::InputChar('d') => match focus {
            Pane::Tools => match tui.selected_tool(app).map(str::to_string) {
                Some(tool) => request(
                    app,
                    tui,
                    format!("Delete tool '{tool}'?"),
                    Action::RemoveTool(tool),
                ),
                None => Effect::None,
            },
            Pane::Borrowers => match tui.selected_borrower(app).map(str::to_string) {
                Some(borrower) => request(
                    app,
                    tui,
                    format!("Delete borrower '{borrower}'?"),
                    Action::RemoveBorrower(borrower),
                ),
                None => Effect::None,
            },
            Pane::Loans => Effect::None,
        },
        TuiEvent::InputChar('r') | TuiEvent::Submit if focus == Pane::Loans => {
            let Some(tool) = tui.selected_loan_tool(app) else {
                return Effect::None;
            };
            let borrower = app
                .store
                .loan_for(&tool)
                .map(|loan| loan.borrower.clone())
                .unwrap_or_default();
            request(
                app,
                tui,
                format!("Return '{tool}' from {borrower}?"),
                Action::Return(tool),
            )
        }
        TuiEvent::InputChar('l') => {
            start_lend(app, tui);
            Effect::None
        }
        _ => Effect::None,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock, // Only visible inside prompts
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(mut app: App) -> io::Result<()> {
    let mut tui = TuiState::new();
    tui.sync(&app);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut needs_redraw = true; // Force first frame

        loop {
            if needs_redraw {
                terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
                needs_redraw = false;
            }

            let first_event = poll_event_timeout(Duration::from_millis(500))?;
            if first_event.is_some() {
                needs_redraw = true;
            }

            // Process first event + drain ALL pending events before next draw
            let mut pending = first_event;
            while let Some(event) = pending {
                debug!("Event: {:?}", event);
                if handle_event(&mut app, &mut tui, event) == Effect::Quit {
                    info!("Quit requested");
                    return Ok(());
                }
                pending = poll_event_immediate()?;
            }
        }
    });

    ratatui::restore();
    result
}
