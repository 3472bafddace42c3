//! # Actions
//!
//! Everything the user can ask of the tracker becomes an `Action`.
//! Pressing Enter in the "add tool" prompt? That's `Action::AddTool(name)`.
//! Confirming a return? That's `Action::Return(tool)`.
//!
//! The `update()` function applies an action to the `App`: it calls the
//! store, which validates and persists, then records the outcome as a
//! status message or an error for the UI to show.
//!
//! ```text
//! App + Action  →  update()  →  App' + Effect
//! ```

use log::{info, warn};

use crate::core::error::StoreError;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTool(String),
    RemoveTool(String),
    AddBorrower(String),
    RemoveBorrower(String),
    Lend { tool: String, borrower: String },
    Return(String),
    DismissError,
    Quit,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    info!("Action: {:?}", action);
    let outcome: Result<String, StoreError> = match action {
        Action::Quit => return Effect::Quit,
        Action::DismissError => {
            app.error = None;
            return Effect::None;
        }
        Action::AddTool(name) => app
            .store
            .add_tool(&name)
            .map(|name| format!("Added tool '{name}'")),
        Action::RemoveTool(name) => app
            .store
            .remove_tool(&name)
            .map(|name| format!("Deleted tool '{name}'")),
        Action::AddBorrower(name) => app
            .store
            .add_borrower(&name)
            .map(|name| format!("Added borrower '{name}'")),
        Action::RemoveBorrower(name) => app
            .store
            .remove_borrower(&name)
            .map(|name| format!("Deleted borrower '{name}'")),
        Action::Lend { tool, borrower } => app
            .store
            .lend(&tool, &borrower)
            .map(|loan| format!("Lent '{}' to {}", loan.tool, loan.borrower)),
        Action::Return(tool) => app
            .store
            .return_tool(&tool)
            .map(|loan| format!("'{}' returned by {}", loan.tool, loan.borrower)),
    };

    match outcome {
        Ok(status) => {
            app.status_message = status;
            app.error = None;
        }
        Err(e) => {
            warn!("Rejected: {}", e);
            app.status_message = if e.is_rejection() {
                String::from("Operation rejected")
            } else {
                String::from("File error")
            };
            app.error = Some(e.to_string());
        }
    }
    Effect::None
}
