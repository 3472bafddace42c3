//! # State Store
//!
//! Owns the [`Inventory`] and mirrors it to a JSON data file, appending a
//! history line for every lend and return.
//!
//! Every mutator follows the same sequence:
//!
//! ```text
//! normalize names → apply to a copy → persist copy → commit → append history
//! ```
//!
//! so the file on disk and the in-memory inventory agree after every
//! successful call. A failed persist leaves memory untouched.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{debug, info, warn};

use crate::core::error::{EntityKind, StoreError};
use crate::core::history::{HistoryEntry, HistoryLog, LoanAction};
use crate::core::inventory::{DEFAULT_MAX_NAME_LENGTH, Document, Inventory, Loan, normalize_name};

pub struct Store {
    data_path: PathBuf,
    history: HistoryLog,
    max_name_len: usize,
    inventory: Inventory,
}

impl Store {
    /// Open the store backed by `data_path`, loading it if present.
    pub fn open(
        data_path: impl Into<PathBuf>,
        history_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let mut store = Self {
            data_path: data_path.into(),
            history: HistoryLog::new(history_path),
            max_name_len: DEFAULT_MAX_NAME_LENGTH,
            inventory: Inventory::new(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn with_max_name_len(mut self, max: usize) -> Self {
        self.max_name_len = max;
        self
    }

    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn tools(&self) -> &[String] {
        self.inventory.tools()
    }

    pub fn borrowers(&self) -> &[String] {
        self.inventory.borrowers()
    }

    pub fn loans(&self) -> Vec<&Loan> {
        self.inventory.loans().collect()
    }

    pub fn loan_for(&self, tool: &str) -> Option<&Loan> {
        self.inventory.loan_for(tool.trim())
    }

    pub fn is_on_loan(&self, tool: &str) -> bool {
        self.inventory.is_on_loan(tool.trim())
    }

    pub fn available_tools(&self) -> Vec<&str> {
        self.inventory.available_tools()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace in-memory state with the data file. A missing file means
    /// an empty inventory; a malformed one is an error.
    pub fn load(&mut self) -> Result<(), StoreError> {
        if !self.data_path.exists() {
            info!(
                "No data file at {}, starting empty",
                self.data_path.display()
            );
            self.inventory = Inventory::new();
            return Ok(());
        }

        let json = fs::read_to_string(&self.data_path).map_err(|source| StoreError::Io {
            path: self.data_path.clone(),
            source,
        })?;
        let doc: Document = serde_json::from_str(&json).map_err(|source| StoreError::Parse {
            path: self.data_path.clone(),
            source,
        })?;
        self.inventory = doc.into_inventory(Local::now().date_naive());
        info!(
            "Loaded {} tools, {} borrowers, {} loans from {}",
            self.inventory.tools().len(),
            self.inventory.borrowers().len(),
            self.inventory.loan_count(),
            self.data_path.display()
        );
        Ok(())
    }

    /// Write the current state to the data file.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.write_document(&self.inventory)
    }

    fn write_document(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.data_path.clone(),
            source,
        };

        if let Some(parent) = self.data_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&Document::from(inventory))
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        let tmp_path = self.data_path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp_path, &self.data_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }
        debug!("Persisted state to {}", self.data_path.display());
        Ok(())
    }

    /// Apply `change` to a copy of the inventory, persist the copy, then commit it.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Inventory) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.inventory.clone();
        let out = change(&mut next)?;
        self.write_document(&next)?;
        self.inventory = next;
        Ok(out)
    }

    fn record(&self, at: NaiveDateTime, action: LoanAction, loan: &Loan) -> Result<(), StoreError> {
        let entry = HistoryEntry::new(at, action, &loan.tool, &loan.borrower);
        self.history.append(&entry).map_err(|source| {
            warn!("Failed to append history: {}", source);
            StoreError::History {
                path: self.history.path().to_path_buf(),
                source,
            }
        })
    }

    fn name(&self, raw: &str, kind: EntityKind) -> Result<String, StoreError> {
        normalize_name(raw, kind, self.max_name_len)
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    pub fn add_tool(&mut self, name: &str) -> Result<String, StoreError> {
        let name = self.name(name, EntityKind::Tool)?;
        self.commit(|inv| inv.add_tool(name.clone()))?;
        info!("Added tool '{}'", name);
        Ok(name)
    }

    pub fn remove_tool(&mut self, name: &str) -> Result<String, StoreError> {
        let name = name.trim().to_string();
        self.commit(|inv| inv.remove_tool(&name))?;
        info!("Removed tool '{}'", name);
        Ok(name)
    }

    pub fn add_borrower(&mut self, name: &str) -> Result<String, StoreError> {
        let name = self.name(name, EntityKind::Borrower)?;
        self.commit(|inv| inv.add_borrower(name.clone()))?;
        info!("Added borrower '{}'", name);
        Ok(name)
    }

    pub fn remove_borrower(&mut self, name: &str) -> Result<String, StoreError> {
        let name = name.trim().to_string();
        self.commit(|inv| inv.remove_borrower(&name))?;
        info!("Removed borrower '{}'", name);
        Ok(name)
    }

    pub fn lend(&mut self, tool: &str, borrower: &str) -> Result<Loan, StoreError> {
        self.lend_at(tool, borrower, Local::now().naive_local())
    }

    /// `lend` with an explicit clock reading.
    pub fn lend_at(
        &mut self,
        tool: &str,
        borrower: &str,
        at: NaiveDateTime,
    ) -> Result<Loan, StoreError> {
        let tool = tool.trim();
        let borrower = borrower.trim();
        let loan = self.commit(|inv| {
            inv.lend(tool, borrower, at.date())?;
            inv.loan_for(tool)
                .cloned()
                .ok_or_else(|| StoreError::NotOnLoan(tool.to_string()))
        })?;
        info!("Lent '{}' to '{}'", loan.tool, loan.borrower);
        self.record(at, LoanAction::Lend, &loan)?;
        Ok(loan)
    }

    pub fn return_tool(&mut self, tool: &str) -> Result<Loan, StoreError> {
        self.return_tool_at(tool, Local::now().naive_local())
    }

    /// `return_tool` with an explicit clock reading.
    pub fn return_tool_at(&mut self, tool: &str, at: NaiveDateTime) -> Result<Loan, StoreError> {
        let tool = tool.trim();
        let loan = self.commit(|inv| inv.return_tool(tool))?;
        info!("'{}' returned by '{}'", loan.tool, loan.borrower);
        self.record(at, LoanAction::Return, &loan)?;
        Ok(loan)
    }
}
