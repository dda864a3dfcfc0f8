//! Calculation tape: successful `=` results, newest last
//!
//! Bounded so a long session cannot grow memory without limit.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::expression::Completed;
use super::format::{format_number, stringify};

/// A single entry on the tape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The equation that was evaluated, e.g. `"12 + 8"`
    pub equation: String,
    /// The result of the calculation
    pub result: f64,
    /// When the calculation was performed (Unix epoch millis, 0 if unknown)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    #[must_use]
    pub fn new(equation: String, result: f64) -> Self {
        Self::with_timestamp(equation, result, current_timestamp())
    }

    /// Creates an entry with a specific timestamp
    #[must_use]
    pub fn with_timestamp(equation: String, result: f64, timestamp: u64) -> Self {
        Self {
            equation,
            result,
            timestamp,
        }
    }

    /// Renders `"12 + 8 = 20"` with thousands grouping
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} = {}",
            self.equation,
            format_number(&stringify(self.result))
        )
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

// No system clock on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
const fn current_timestamp() -> u64 {
    0
}

/// Bounded calculation tape
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum tape length
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a tape with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a tape holding at most `max_entries` (minimum 1)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(Self::DEFAULT_MAX_ENTRIES)),
            max_entries,
        }
    }

    /// Appends an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, equation: &Completed, result: f64) {
        self.push(HistoryEntry::new(equation.equation(), result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tape is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the last `n` entries, newest first
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Serializes the tape to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// One `display()` line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::BinaryOp;

    fn entry(equation: &str, result: f64) -> HistoryEntry {
        HistoryEntry::with_timestamp(equation.into(), result, 1000)
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new_has_timestamp() {
        let entry = HistoryEntry::new("2 + 2".into(), 4.0);
        assert_eq!(entry.equation, "2 + 2");
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_history_entry_display_groups_result() {
        assert_eq!(entry("500 × 3", 1500.0).display(), "500 × 3 = 1,500");
        assert_eq!(entry("1 ÷ 4", 0.25).display(), "1 ÷ 4 = 0.25");
    }

    #[test]
    fn test_history_entry_deserialize() {
        let json = r#"{"equation":"10 ÷ 2","result":5.0,"timestamp":2000}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.equation, "10 ÷ 2");
        assert_eq!(entry.result, 5.0);
        assert_eq!(entry.timestamp, 2000);
    }

    // ===== History tests =====

    #[test]
    fn test_history_new_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), History::DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_history_zero_capacity_clamped() {
        let mut history = History::with_capacity(0);
        history.push(entry("1 + 1", 2.0));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_record_completed() {
        let mut history = History::new();
        let completed = Completed {
            lhs: "1200".into(),
            operator: BinaryOp::Add,
            rhs: "34".into(),
        };
        history.record(&completed, 1234.0);
        assert_eq!(history.last().unwrap().display(), "1,200 + 34 = 1,234");
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::with_capacity(2);
        history.push(entry("a", 1.0));
        history.push(entry("b", 2.0));
        history.push(entry("c", 3.0));
        let equations: Vec<_> = history.iter().map(|e| e.equation.as_str()).collect();
        assert_eq!(equations, vec!["b", "c"]);
    }

    #[test]
    fn test_history_last_n_newest_first() {
        let mut history = History::new();
        for i in 0..5 {
            history.push(entry(&i.to_string(), f64::from(i)));
        }
        let last: Vec<_> = history.last_n(2).iter().map(|e| e.result).collect();
        assert_eq!(last, vec![4.0, 3.0]);
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.push(entry("1 + 1", 2.0));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_export_formatted() {
        let mut history = History::new();
        history.push(entry("1 + 1", 2.0));
        history.push(entry("2 × 3", 6.0));
        assert_eq!(history.export_formatted(), "1 + 1 = 2\n2 × 3 = 6");
    }
}
