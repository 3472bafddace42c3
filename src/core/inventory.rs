//! # Inventory
//!
//! The in-memory lending model: tools, borrowers, and active loans.
//! Pure data and validation. No I/O happens here; `Store` wraps an
//! `Inventory` and takes care of persistence and history.
//!
//! ```text
//! Inventory
//! ├── tools: Vec<String>               // insertion order
//! ├── borrowers: Vec<String>           // insertion order
//! └── loans: BTreeMap<tool, Loan>      // at most one loan per tool
//! ```
//!
//! Names passed in here are expected to be normalized already
//! (see [`normalize_name`]).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{EntityKind, StoreError};

/// Default cap on tool and borrower name length, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub tool: String,
    pub borrower: String,
    pub lent_on: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    tools: Vec<String>,
    borrowers: Vec<String>,
    loans: BTreeMap<String, Loan>,
}

/// Trim and validate a user-supplied name.
pub fn normalize_name(raw: &str, kind: EntityKind, max_len: usize) -> Result<String, StoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName(kind));
    }
    if name.chars().count() > max_len {
        return Err(StoreError::NameTooLong { kind, max: max_len });
    }
    Ok(name.to_string())
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn borrowers(&self) -> &[String] {
        &self.borrowers
    }

    /// Active loans ordered by tool name.
    pub fn loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn loan_for(&self, tool: &str) -> Option<&Loan> {
        self.loans.get(tool)
    }

    pub fn is_on_loan(&self, tool: &str) -> bool {
        self.loans.contains_key(tool)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t == name)
    }

    pub fn has_borrower(&self, name: &str) -> bool {
        self.borrowers.iter().any(|b| b == name)
    }

    /// Tools that can be lent right now, in insertion order.
    pub fn available_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|t| !self.loans.contains_key(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn loans_held_by(&self, borrower: &str) -> usize {
        self.loans.values().filter(|l| l.borrower == borrower).count()
    }

    pub fn add_tool(&mut self, name: String) -> Result<(), StoreError> {
        if self.has_tool(&name) {
            return Err(StoreError::Duplicate {
                kind: EntityKind::Tool,
                name,
            });
        }
        self.tools.push(name);
        Ok(())
    }

    pub fn remove_tool(&mut self, name: &str) -> Result<(), StoreError> {
        let idx = self
            .tools
            .iter()
            .position(|t| t == name)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Tool,
                name: name.to_string(),
            })?;
        if let Some(loan) = self.loans.get(name) {
            return Err(StoreError::ToolOnLoan {
                tool: name.to_string(),
                borrower: loan.borrower.clone(),
            });
        }
        self.tools.remove(idx);
        Ok(())
    }

    pub fn add_borrower(&mut self, name: String) -> Result<(), StoreError> {
        if self.has_borrower(&name) {
            return Err(StoreError::Duplicate {
                kind: EntityKind::Borrower,
                name,
            });
        }
        self.borrowers.push(name);
        Ok(())
    }

    pub fn remove_borrower(&mut self, name: &str) -> Result<(), StoreError> {
        let idx = self
            .borrowers
            .iter()
            .position(|b| b == name)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Borrower,
                name: name.to_string(),
            })?;
        let count = self.loans_held_by(name);
        if count > 0 {
            return Err(StoreError::BorrowerHasLoans {
                borrower: name.to_string(),
                count,
            });
        }
        self.borrowers.remove(idx);
        Ok(())
    }

    pub fn lend(
        &mut self,
        tool: &str,
        borrower: &str,
        lent_on: NaiveDate,
    ) -> Result<(), StoreError> {
        if !self.has_tool(tool) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Tool,
                name: tool.to_string(),
            });
        }
        if !self.has_borrower(borrower) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Borrower,
                name: borrower.to_string(),
            });
        }
        if let Some(existing) = self.loans.get(tool) {
            return Err(StoreError::AlreadyOnLoan {
                tool: tool.to_string(),
                borrower: existing.borrower.clone(),
            });
        }
        self.loans.insert(
            tool.to_string(),
            Loan {
                tool: tool.to_string(),
                borrower: borrower.to_string(),
                lent_on,
            },
        );
        Ok(())
    }

    /// Remove the loan on `tool`, returning it.
    pub fn return_tool(&mut self, tool: &str) -> Result<Loan, StoreError> {
        if !self.has_tool(tool) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Tool,
                name: tool.to_string(),
            });
        }
        self.loans
            .remove(tool)
            .ok_or_else(|| StoreError::NotOnLoan(tool.to_string()))
    }
}

// ============================================================================
// On-disk document
// ============================================================================

/// JSON shape of the data file.
///
/// ```json
/// {
///   "tools": ["Hammer", "Saw"],
///   "borrowers": ["John Smith"],
///   "loans": { "Hammer": "John Smith" },
///   "lent_on": { "Hammer": "2024-03-09" }
/// }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub borrowers: Vec<String>,
    #[serde(default)]
    pub loans: LoanTable,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lent_on: BTreeMap<String, NaiveDate>,
}

/// `loans` is written as a tool → borrower map. Older data files stored a
/// list of `{tool, borrower, date}` records, which is still accepted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoanTable {
    Map(BTreeMap<String, String>),
    Records(Vec<LoanRecord>),
}

impl Default for LoanTable {
    fn default() -> Self {
        LoanTable::Map(BTreeMap::new())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanRecord {
    pub tool: String,
    pub borrower: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl From<&Inventory> for Document {
    fn from(inv: &Inventory) -> Self {
        let loans = inv
            .loans
            .iter()
            .map(|(tool, loan)| (tool.clone(), loan.borrower.clone()))
            .collect();
        let lent_on = inv
            .loans
            .iter()
            .map(|(tool, loan)| (tool.clone(), loan.lent_on))
            .collect();
        Document {
            tools: inv.tools.clone(),
            borrowers: inv.borrowers.clone(),
            loans: LoanTable::Map(loans),
            lent_on,
        }
    }
}

impl Document {
    /// Rebuild an inventory. Blank and repeated names are dropped and a
    /// missing loan date falls back to `today`, so a hand-edited file still
    /// yields a consistent inventory.
    pub fn into_inventory(self, today: NaiveDate) -> Inventory {
        let mut inv = Inventory::new();
        for tool in self.tools {
            let tool = tool.trim().to_string();
            if !tool.is_empty() && !inv.has_tool(&tool) {
                inv.tools.push(tool);
            }
        }
        for borrower in self.borrowers {
            let borrower = borrower.trim().to_string();
            if !borrower.is_empty() && !inv.has_borrower(&borrower) {
                inv.borrowers.push(borrower);
            }
        }

        let records: Vec<(String, String, Option<NaiveDate>)> = match self.loans {
            LoanTable::Map(map) => map
                .into_iter()
                .map(|(tool, borrower)| {
                    let date = self.lent_on.get(&tool).copied();
                    (tool, borrower, date)
                })
                .collect(),
            LoanTable::Records(list) => list
                .into_iter()
                .map(|r| (r.tool, r.borrower, r.date))
                .collect(),
        };

        for (tool, borrower, date) in records {
            let (tool, borrower) = (tool.trim(), borrower.trim());
            if let Err(e) = inv.lend(tool, borrower, date.unwrap_or(today)) {
                log::warn!("Dropping inconsistent loan {} -> {}: {}", tool, borrower, e);
            }
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn stocked() -> Inventory {
        let mut inv = Inventory::new();
        inv.add_tool("Hammer".to_string()).unwrap();
        inv.add_tool("Saw".to_string()).unwrap();
        inv.add_borrower("John Smith".to_string()).unwrap();
        inv
    }

    #[test]
    fn test_add_tool_once() {
        let mut inv = stocked();
        assert_eq!(inv.tools().iter().filter(|t| *t == "Hammer").count(), 1);
        let err = inv.add_tool("Hammer".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { kind: EntityKind::Tool, .. }));
        assert_eq!(inv.tools().len(), 2);
    }

    #[test]
    fn test_lend_then_return() {
        let mut inv = stocked();
        inv.lend("Hammer", "John Smith", day()).unwrap();
        assert_eq!(inv.loan_count(), 1);
        assert_eq!(inv.loan_for("Hammer").unwrap().borrower, "John Smith");
        assert_eq!(inv.available_tools(), vec!["Saw"]);

        let loan = inv.return_tool("Hammer").unwrap();
        assert_eq!(loan.borrower, "John Smith");
        assert_eq!(inv.loan_count(), 0);
    }

    #[test]
    fn test_cannot_lend_twice() {
        let mut inv = stocked();
        inv.add_borrower("Ana".to_string()).unwrap();
        inv.lend("Hammer", "John Smith", day()).unwrap();
        let err = inv.lend("Hammer", "Ana", day()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::AlreadyOnLoan { ref borrower, .. } if borrower == "John Smith"
        ));
        assert_eq!(inv.loan_count(), 1);
    }

    #[test]
    fn test_lend_unknown_names() {
        let mut inv = stocked();
        assert!(matches!(
            inv.lend("Drill", "John Smith", day()),
            Err(StoreError::NotFound { kind: EntityKind::Tool, .. })
        ));
        assert!(matches!(
            inv.lend("Hammer", "Nobody", day()),
            Err(StoreError::NotFound { kind: EntityKind::Borrower, .. })
        ));
    }

    #[test]
    fn test_return_requires_loan() {
        let mut inv = stocked();
        assert!(matches!(inv.return_tool("Saw"), Err(StoreError::NotOnLoan(_))));
        assert!(matches!(inv.return_tool("Drill"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_remove_blocked_while_on_loan() {
        let mut inv = stocked();
        inv.lend("Hammer", "John Smith", day()).unwrap();
        assert!(matches!(inv.remove_tool("Hammer"), Err(StoreError::ToolOnLoan { .. })));
        assert!(matches!(
            inv.remove_borrower("John Smith"),
            Err(StoreError::BorrowerHasLoans { count: 1, .. })
        ));

        inv.return_tool("Hammer").unwrap();
        inv.remove_tool("Hammer").unwrap();
        inv.remove_borrower("John Smith").unwrap();
        assert_eq!(inv.tools(), ["Saw".to_string()]);
        assert!(inv.borrowers().is_empty());
    }

    #[test]
    fn test_remove_unknown() {
        let mut inv = stocked();
        assert!(matches!(
            inv.remove_borrower("Ana"),
            Err(StoreError::NotFound { kind: EntityKind::Borrower, .. })
        ));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Hammer ", EntityKind::Tool, 30).unwrap(), "Hammer");
        assert!(matches!(
            normalize_name("   ", EntityKind::Tool, 30),
            Err(StoreError::EmptyName(EntityKind::Tool))
        ));
        assert!(matches!(
            normalize_name(&"x".repeat(31), EntityKind::Borrower, 30),
            Err(StoreError::NameTooLong { max: 30, .. })
        ));
        // Limit counts characters, not bytes
        assert!(normalize_name(&"ł".repeat(30), EntityKind::Borrower, 30).is_ok());
    }

    #[test]
    fn test_document_uses_tool_to_borrower_map() {
        let mut inv = stocked();
        inv.lend("Hammer", "John Smith", day()).unwrap();
        let json = serde_json::to_value(Document::from(&inv)).unwrap();
        assert_eq!(json["loans"]["Hammer"], "John Smith");
        assert_eq!(json["lent_on"]["Hammer"], "2024-03-09");
        assert_eq!(json["tools"][1], "Saw");
    }

    #[test]
    fn test_legacy_loan_records_are_accepted() {
        let legacy = r#"{
            "tools": ["Hammer", "Saw", ""],
            "borrowers": ["John Smith"],
            "loans": [{"tool": "Hammer", "borrower": "John Smith", "date": "2023-11-02"}]
        }"#;
        let doc: Document = serde_json::from_str(legacy).unwrap();
        let inv = doc.into_inventory(day());
        assert_eq!(inv.tools().len(), 2);
        let loan = inv.loan_for("Hammer").unwrap();
        assert_eq!(loan.lent_on, NaiveDate::from_ymd_opt(2023, 11, 2).unwrap());
    }

    #[test]
    fn test_inconsistent_loans_are_dropped() {
        let json = r#"{
            "tools": ["Hammer"],
            "borrowers": ["Ana"],
            "loans": {"Hammer": "Ghost", "Drill": "Ana"}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let inv = doc.into_inventory(day());
        assert_eq!(inv.loan_count(), 0);
    }

    #[test]
    fn test_padded_loan_names_match_trimmed_entries() {
        let json = r#"{
            "tools": [" Hammer"],
            "borrowers": ["Ana "],
            "loans": {" Hammer": "Ana "}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let inv = doc.into_inventory(day());
        assert_eq!(inv.tools(), ["Hammer".to_string()]);
        assert_eq!(inv.loan_for("Hammer").unwrap().borrower, "Ana");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        let inv = doc.into_inventory(day());
        assert_eq!(inv, Inventory::new());
    }
}
