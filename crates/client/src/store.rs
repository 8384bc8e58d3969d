//! # Record Store (Snapshot Cache)
//!
//! Holds the last consistent snapshot of the full record set pulled
//! from the ledger. The ledger copy is the sole source of truth; this
//! cache is a disposable projection rebuilt on demand.
//!
//! ## Refresh Protocol
//!
//! `refresh()` is the only network-triggering operation:
//!
//! 1. take a monotonic ticket;
//! 2. list all ids, then fetch every record **concurrently** (records
//!    are independent and read-only at fetch time);
//! 3. decode each raw tuple; any single fetch or decode failure fails
//!    the whole refresh and the previous snapshot is retained;
//! 4. publish the new snapshot wholesale — but only if its ticket is
//!    newer than the published sequence, so a slow, superseded refresh
//!    can never overwrite a newer snapshot (last-write-wins register).
//!
//! The snapshot is an immutable value behind a single lock, replaced
//! wholesale and never mutated field-by-field; readers always see a
//! single consistent ledger read, never partial results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use parking_lot::RwLock;
use tracing::{debug, warn};

use empchain_common::record::{EmployeeRecord, RecordStats};

use crate::error::RefreshError;
use crate::ledger::LedgerReader;

/// One consistent view of the full record set, in fetch order.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Monotonic publish sequence; 0 for the initial empty snapshot.
    pub seq: u64,
    /// Records in the order the ledger listed them.
    pub records: Arc<Vec<EmployeeRecord>>,
}

impl Snapshot {
    fn empty() -> Self {
        Snapshot {
            seq: 0,
            records: Arc::new(Vec::new()),
        }
    }
}

/// Snapshot cache over a [`LedgerReader`].
pub struct RecordStore<L> {
    ledger: Arc<L>,
    published: RwLock<Snapshot>,
    tickets: AtomicU64,
}

impl<L: LedgerReader> RecordStore<L> {
    /// Builds a store with an empty snapshot; call
    /// [`refresh`](Self::refresh) to load.
    pub fn new(ledger: Arc<L>) -> Self {
        RecordStore {
            ledger,
            published: RwLock::new(Snapshot::empty()),
            tickets: AtomicU64::new(0),
        }
    }

    /// Rebuilds the snapshot from a full ledger read.
    ///
    /// All-or-nothing: on any error the previous snapshot is retained
    /// unchanged and the error is returned. Safe to call concurrently;
    /// whichever refresh started last wins the register.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        let ids = self.ledger.list_record_ids().await?;
        let raws = try_join_all(ids.iter().map(|id| self.ledger.get_record(*id))).await?;

        let mut records = Vec::with_capacity(raws.len());
        for raw in &raws {
            records.push(raw.decode()?);
        }

        let mut published = self.published.write();
        if ticket > published.seq {
            debug!(ticket, count = records.len(), "snapshot published");
            *published = Snapshot {
                seq: ticket,
                records: Arc::new(records),
            };
        } else {
            // A newer refresh finished while this one was in flight.
            warn!(ticket, published = published.seq, "stale refresh discarded");
        }
        Ok(())
    }

    /// Current snapshot. No network access.
    pub fn snapshot(&self) -> Snapshot {
        self.published.read().clone()
    }

    /// Records of the current snapshot, in fetch order.
    pub fn records(&self) -> Arc<Vec<EmployeeRecord>> {
        self.published.read().records.clone()
    }

    /// One record by id, if present in the snapshot.
    pub fn get(&self, id: u64) -> Option<EmployeeRecord> {
        self.published
            .read()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Per-status counts over the current snapshot.
    pub fn stats(&self) -> RecordStats {
        RecordStats::of(&self.published.read().records)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
