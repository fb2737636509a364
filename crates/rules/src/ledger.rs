//! Verdict Ledger - Append-only JSONL storage
//!
//! Audit trail of every transfer check and refused hook call. Writes are
//! append-only; the file is never rewritten.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::RuleResult;
use crate::event::RuleEvent;

/// Append-only JSONL ledger for rule events
///
/// Each line is a JSON-serialized RuleEvent.
pub struct VerdictLedger {
    path: PathBuf,
    file: Option<File>,
    /// Events kept in memory when running without a file (opt-in)
    recorded: Option<Vec<RuleEvent>>,
}

impl VerdictLedger {
    /// Create a new ledger at the given path
    pub fn new(path: impl AsRef<Path>) -> RuleResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Some(file),
            recorded: None,
        })
    }

    /// Create an in-memory ledger
    ///
    /// Events are serialized but not kept.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            file: None,
            recorded: None,
        }
    }

    /// Create an in-memory ledger that keeps every event (for testing)
    pub fn in_memory_recording() -> Self {
        Self {
            recorded: Some(Vec::new()),
            ..Self::in_memory()
        }
    }

    /// Append an event to the ledger
    pub fn append(&mut self, event: &RuleEvent) -> RuleResult<()> {
        let json = serde_json::to_string(event)?;
        if let Some(ref mut file) = self.file {
            writeln!(file, "{}", json)?;
            file.flush()?;
        } else if let Some(ref mut recorded) = self.recorded {
            recorded.push(event.clone());
        }
        Ok(())
    }

    /// Read all events from the ledger
    ///
    /// Empty for an in-memory ledger that does not record.
    pub fn read_all(&self) -> RuleResult<Vec<RuleEvent>> {
        if self.file.is_none() {
            return Ok(self.recorded.clone().unwrap_or_default());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: RuleEvent = serde_json::from_str(&line)?;
            events.push(event);
        }

        Ok(events)
    }

    /// Get the ledger path (empty for in-memory)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if this is an in-memory ledger
    pub fn is_in_memory(&self) -> bool {
        self.file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineVerdict;
    use crate::request::TransferRequest;
    use freezeguard_core::Address;
    use tempfile::TempDir;

    fn event(valid: bool) -> RuleEvent {
        let request =
            TransferRequest::new(Address::new("alice").unwrap(), Address::new("bob").unwrap());
        let verdict = if valid {
            EngineVerdict::approved()
        } else {
            EngineVerdict::rejected(0, 3)
        };
        RuleEvent::transfer_checked(&request, &verdict)
    }

    #[test]
    fn test_in_memory_ledger_keeps_nothing() {
        let mut ledger = VerdictLedger::in_memory();
        assert!(ledger.is_in_memory());

        for _ in 0..100 {
            ledger.append(&event(true)).unwrap();
        }

        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_recording_ledger() {
        let mut ledger = VerdictLedger::in_memory_recording();
        assert!(ledger.is_in_memory());

        ledger.append(&event(true)).unwrap();
        ledger.append(&event(false)).unwrap();

        assert_eq!(ledger.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_file_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audit").join("verdicts.jsonl");

        let first = event(true);
        let second = event(false);
        {
            let mut ledger = VerdictLedger::new(&path).unwrap();
            assert!(!ledger.is_in_memory());
            ledger.append(&first).unwrap();
            ledger.append(&second).unwrap();
        }

        // Reopen appends instead of truncating
        let mut ledger = VerdictLedger::new(&path).unwrap();
        ledger.append(&event(true)).unwrap();

        let events = ledger.read_all().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], first);
        assert_eq!(events[1].id(), second.id());
        assert_eq!(ledger.path(), path.as_path());
    }
}
