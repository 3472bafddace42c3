//! # Lending History
//!
//! Append-only text log of lend/return events, one line per event:
//!
//! ```text
//! [2026-10-19 14:03:11] LEND: Hammer -> John Smith
//! [2026-10-19 17:45:02] RETURN: Hammer -> John Smith
//! ```
//!
//! Lines are never rewritten. Reading the log back is only used for display
//! and tests; malformed lines are skipped.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use log::{debug, warn};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    Lend,
    Return,
}

impl LoanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanAction::Lend => "LEND",
            LoanAction::Return => "RETURN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub at: NaiveDateTime,
    pub action: LoanAction,
    pub tool: String,
    pub borrower: String,
}

impl HistoryEntry {
    pub fn new(at: NaiveDateTime, action: LoanAction, tool: &str, borrower: &str) -> Self {
        Self {
            at,
            action,
            tool: tool.to_string(),
            borrower: borrower.to_string(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} -> {}",
            self.at.format(TIMESTAMP_FORMAT),
            self.action.as_str(),
            self.tool,
            self.borrower
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntryError(String);

impl fmt::Display for ParseEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed history line: {}", self.0)
    }
}

impl std::error::Error for ParseEntryError {}

impl FromStr for HistoryEntry {
    type Err = ParseEntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseEntryError(line.to_string());

        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (stamp, rest) = rest.split_once("] ").ok_or_else(malformed)?;
        let at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|_| malformed())?;

        let (action, rest) = rest.split_once(": ").ok_or_else(malformed)?;
        let action = match action {
            "LEND" => LoanAction::Lend,
            "RETURN" => LoanAction::Return,
            _ => return Err(malformed()),
        };

        // Names are trimmed on entry and cannot start or end with spaces,
        // so the first " -> " is the separator unless a tool name contains it.
        let (tool, borrower) = rest.split_once(" -> ").ok_or_else(malformed)?;

        Ok(HistoryEntry::new(at, action, tool, borrower))
    }
}

/// Handle to the history log file. Cheap to clone; opens the file per append.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single line, creating the file if needed.
    pub fn append(&self, entry: &HistoryEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{entry}")?;
        debug!("History appended: {}", entry);
        Ok(())
    }

    /// Read every well-formed entry in file order. A missing file is an empty history.
    pub fn read_all(&self) -> io::Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse::<HistoryEntry>() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping {}", e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}
