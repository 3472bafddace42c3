//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status bar with counts and the latest status message
//! - `ErrorDialog`: modal error message
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: name prompt for adding a tool or borrower
//! - `PickerState`: searchable selection for the lend flow
//! - `ConfirmState`: yes/no before destructive actions
//! - `ListPane` / `LoanList`: selectable lists backed by `ListPaneState`
//!
//! Components receive external data as "props" rather than reading global
//! state, so each one can be rendered against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status bar)
//! ├── list_pane.rs     (tools / borrowers panes)
//! ├── loan_list.rs     (currently borrowed pane)
//! ├── input_box.rs     (name prompt)
//! ├── picker.rs        (searchable selection)
//! ├── confirm.rs       (yes/no overlay)
//! └── dialog.rs        (overlay geometry + error dialog)
//! ```

pub mod confirm;
pub mod dialog;
pub mod input_box;
pub mod list_pane;
pub mod loan_list;
pub mod picker;
mod title_bar;

pub use confirm::{ConfirmEvent, ConfirmState};
pub use dialog::ErrorDialog;
pub use input_box::{InputBox, InputEvent};
pub use list_pane::{ListPane, ListPaneState, PaneRow};
pub use loan_list::LoanList;
pub use picker::{Picker, PickerEvent, PickerState};
pub use title_bar::TitleBar;
