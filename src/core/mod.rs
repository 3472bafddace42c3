//! # Core Application Logic
//!
//! This module contains the tracker's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Store (data + disk)  │
//!                    │  • Action (requests)    │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`inventory`]: tools, borrowers, loans and their invariants (no I/O)
//! - [`store`]: the inventory mirrored to the JSON data file
//! - [`history`]: the append-only lend/return log
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum, everything that can happen in the app

pub mod action;
pub mod config;
pub mod error;
pub mod history;
pub mod inventory;
pub mod state;
pub mod store;

pub use error::{EntityKind, StoreError};
pub use store::Store;
