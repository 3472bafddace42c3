//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use tempfile::TempDir;

use crate::core::state::App;
use crate::core::store::Store;

/// Opens an empty store in a fresh temp directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn temp_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = Store::open(
        dir.path().join("tool_lending_data.json"),
        dir.path().join("tool_lending_history.log"),
    )
    .expect("open empty store");
    (dir, store)
}

/// Creates a test App over an empty temp store.
pub fn test_app() -> (TempDir, App) {
    let (dir, store) = temp_store();
    (dir, App::new(store))
}

/// Creates a test App with a few tools and borrowers already added.
pub fn stocked_app() -> (TempDir, App) {
    let (dir, mut app) = test_app();
    for tool in ["Hammer", "Saw", "Cordless Drill"] {
        app.store.add_tool(tool).expect("add tool");
    }
    for borrower in ["John Smith", "Ana"] {
        app.store.add_borrower(borrower).expect("add borrower");
    }
    (dir, app)
}

/// All cell symbols of the last drawn frame, row by row.
pub fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
