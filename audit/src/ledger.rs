//! Append-only transaction ledger.
//!
//! Records are only ever appended or status-transitioned; undo marks a
//! record undone and leaves it queryable. The file ledger persists one
//! JSON event per line and folds the event stream back into records on
//! open, so a committed-then-undone transaction replays to `undone`.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gridcap_core::{TeamCode, TransactionId, TransactionStatus};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::record::{TransactionDraft, TransactionRecord};

/// One durable ledger event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum LedgerEvent {
    /// A transaction was committed.
    Committed { record: TransactionRecord },
    /// A previously committed transaction was undone.
    Undone { id: TransactionId },
}

/// In-memory transaction ledger.
#[derive(Debug, Default)]
pub struct TransactionLedger {
    records: Vec<TransactionRecord>,
    index: HashMap<TransactionId, usize>,
    next_id: u64,
}

impl TransactionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Append a committed transaction and return its id. Fails if the
    /// draft carries no legs: every committed transaction has at least
    /// one leg and exactly one audit entry.
    pub fn append(&mut self, draft: TransactionDraft) -> LedgerResult<TransactionId> {
        if draft.legs.is_empty() {
            return Err(LedgerError::NoLegs);
        }
        let id = TransactionId::new(self.next_id);
        self.next_id += 1;

        let record = TransactionRecord {
            id,
            team: draft.team,
            kind: draft.kind,
            status: TransactionStatus::Committed,
            cap_delta: draft.cap_delta,
            cap_space_after: draft.cap_space_after,
            notes: draft.notes,
            created_by: draft.created_by,
            created_at: draft.executed_at,
            executed_at: draft.executed_at,
            legs: draft.legs,
            audit: draft.audit,
        };
        self.index.insert(id, self.records.len());
        self.records.push(record);
        Ok(id)
    }

    /// Look up a transaction by id.
    pub fn get(&self, id: TransactionId) -> Option<&TransactionRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// All transactions, oldest first.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Transactions whose proposing team matches, oldest first.
    pub fn for_team(&self, team: &TeamCode) -> Vec<&TransactionRecord> {
        self.records.iter().filter(|r| &r.team == team).collect()
    }

    /// Transition a committed transaction to undone. The record stays in
    /// place; only its status changes.
    pub fn mark_undone(&mut self, id: TransactionId) -> LedgerResult<&TransactionRecord> {
        let index = *self.index.get(&id).ok_or(LedgerError::NotFound(id))?;
        let record = &mut self.records[index];
        if record.status == TransactionStatus::Undone {
            return Err(LedgerError::AlreadyUndone(id));
        }
        record.status = TransactionStatus::Undone;
        Ok(&self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// File-backed ledger: JSON lines, append-only, folded on open.
pub struct FileLedger {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    inner: TransactionLedger,
}

impl FileLedger {
    /// Open or create a ledger file and replay its events.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            Self::scan_file(&path)?
        } else {
            TransactionLedger::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            inner,
        })
    }

    fn scan_file(path: &Path) -> LedgerResult<TransactionLedger> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut ledger = TransactionLedger::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let event: LedgerEvent = serde_json::from_str(&line)?;
            match event {
                LedgerEvent::Committed { record } => {
                    ledger.next_id = ledger.next_id.max(record.id.raw() + 1);
                    ledger.index.insert(record.id, ledger.records.len());
                    ledger.records.push(record);
                }
                LedgerEvent::Undone { id } => {
                    // A well-formed file never has an undo before its
                    // commit; tolerate it on replay rather than fail.
                    let _ = ledger.mark_undone(id);
                }
            }
        }
        Ok(ledger)
    }

    fn write_event(&mut self, event: &LedgerEvent) -> LedgerResult<()> {
        let line = serde_json::to_string(event)?;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// Append a committed transaction, durably.
    pub fn append(&mut self, draft: TransactionDraft) -> LedgerResult<TransactionId> {
        let id = self.inner.append(draft)?;
        let record = self.inner.get(id).expect("just appended").clone();
        self.write_event(&LedgerEvent::Committed { record })?;
        Ok(id)
    }

    /// Mark a transaction undone, durably.
    pub fn mark_undone(&mut self, id: TransactionId) -> LedgerResult<&TransactionRecord> {
        self.inner.mark_undone(id)?;
        self.write_event(&LedgerEvent::Undone { id })?;
        Ok(self.inner.get(id).expect("just transitioned"))
    }

    /// Flush buffered events to disk.
    pub fn sync(&mut self) -> LedgerResult<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    /// The replayed in-memory view.
    pub fn ledger(&self) -> &TransactionLedger {
        &self.inner
    }

    /// The ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
