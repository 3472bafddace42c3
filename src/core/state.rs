//! # Application State
//!
//! Core business state for the tracker. This module contains domain state
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Store                  // tools, borrowers, loans + persistence
//! ├── status_message: String        // status bar text
//! ├── error: Option<String>         // error awaiting acknowledgement
//! └── confirm_destructive: bool     // ask before delete/return
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::error::StoreError;
use crate::core::store::Store;

pub struct App {
    pub store: Store,
    pub status_message: String,
    pub error: Option<String>,
    pub confirm_destructive: bool,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            status_message: String::from("Welcome to Tool Lending Tracker!"),
            error: None,
            confirm_destructive: true,
        }
    }

    /// Open the store described by `config` and build the app around it.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, StoreError> {
        let store = Store::open(&config.data_path, &config.history_path)?
            .with_max_name_len(config.max_name_length);
        let mut app = Self::new(store);
        app.confirm_destructive = config.confirm_destructive;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let (_dir, app) = test_app();
        assert_eq!(app.status_message, "Welcome to Tool Lending Tracker!");
        assert!(app.error.is_none());
        assert!(app.confirm_destructive);
        assert!(app.store.tools().is_empty());
    }
}
