//! # In-Memory Ledger and File Store for Testing
//!
//! Fully in-memory collaborators with no network calls, used by unit
//! and integration tests. [`MockLedger`] enforces the same rules the
//! real ledger does — id assignment, initial `Pending` status, unset
//! reviewer sentinel, designated-reviewer and pending preconditions on
//! review — so workflow tests exercise real rejection paths.
//!
//! Both mocks support failure injection and count their calls, which
//! lets tests assert that a rejected draft never reaches the network.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use empchain_common::cid::sha256_hex;
use empchain_common::record::{AccountId, RecordStatus, UNSET_ADDRESS};

use crate::error::{FileStoreError, LedgerError};
use crate::file_store::FileStore;
use crate::ledger::{LedgerReader, LedgerWriter, RawEmployeeRecord, SubmitRecordRequest};

// ════════════════════════════════════════════════════════════════════════════
// MOCK LEDGER
// ════════════════════════════════════════════════════════════════════════════

/// In-memory ledger with a designated reviewer.
///
/// Records live in a `BTreeMap` so `list_record_ids` returns ids in
/// ascending (creation) order, matching the stable default display
/// order of the real ledger.
pub struct MockLedger {
    records: RwLock<BTreeMap<u64, RawEmployeeRecord>>,
    next_id: AtomicU64,
    reviewer: AccountId,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_delay_ms: AtomicU64,
    read_calls: AtomicU64,
    write_calls: AtomicU64,
}

impl MockLedger {
    /// Builds an empty ledger whose designated reviewer is `reviewer`.
    pub fn new(reviewer: AccountId) -> Self {
        MockLedger {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            reviewer,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            read_delay_ms: AtomicU64::new(0),
            read_calls: AtomicU64::new(0),
            write_calls: AtomicU64::new(0),
        }
    }

    /// Makes every read fail with a transport error until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every write fail with a transport error until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delays every read by `ms`, for staleness/interleaving tests.
    pub fn set_read_delay_ms(&self, ms: u64) {
        self.read_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Number of read calls served (including failed ones).
    pub fn read_calls(&self) -> u64 {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Number of write calls served (including failed ones).
    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Injects a raw tuple verbatim, bypassing the write rules. Lets
    /// tests plant malformed wire data (bad status ordinal, zero id)
    /// that a well-behaved writer could never produce.
    pub fn inject_raw(&self, raw: RawEmployeeRecord) {
        self.records.write().insert(raw.employee_id, raw);
    }

    async fn simulate_read(&self) -> Result<(), LedgerError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("simulated read outage".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), LedgerError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("simulated write outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerReader for MockLedger {
    async fn list_record_ids(&self) -> Result<Vec<u64>, LedgerError> {
        self.simulate_read().await?;
        Ok(self.records.read().keys().copied().collect())
    }

    async fn get_record(&self, id: u64) -> Result<RawEmployeeRecord, LedgerError> {
        self.simulate_read().await?;
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(LedgerError::NotFound(id))
    }

    async fn reviewer_address(&self) -> Result<AccountId, LedgerError> {
        self.simulate_read().await?;
        Ok(self.reviewer.clone())
    }
}

#[async_trait]
impl LedgerWriter for MockLedger {
    async fn submit_record(&self, request: &SubmitRecordRequest) -> Result<u64, LedgerError> {
        self.check_write()?;
        if request.submitter.is_unset() {
            return Err(LedgerError::Rejected(
                "submitter must not be the unset sentinel".to_string(),
            ));
        }
        // Ids ascend and are never reused, even across the process.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let raw = RawEmployeeRecord {
            employee_id: id,
            full_name: request.full_name.clone(),
            age: u64::from(request.age),
            position: request.position.clone(),
            department: request.department.clone(),
            document_ref: request.document_ref.clone(),
            status: RecordStatus::Pending.wire(),
            submitter: request.submitter.as_str().to_string(),
            reviewer: UNSET_ADDRESS.to_string(),
        };
        self.records.write().insert(id, raw);
        Ok(id)
    }

    async fn review_record(
        &self,
        id: u64,
        target: RecordStatus,
        reviewer: &AccountId,
    ) -> Result<(), LedgerError> {
        self.check_write()?;
        if *reviewer != self.reviewer {
            return Err(LedgerError::Rejected(
                "caller is not the designated reviewer".to_string(),
            ));
        }
        if !target.is_terminal() {
            return Err(LedgerError::Rejected(
                "review target must be a terminal status".to_string(),
            ));
        }
        let mut records = self.records.write();
        let raw = records.get_mut(&id).ok_or(LedgerError::NotFound(id))?;
        let current = RecordStatus::from_wire(raw.status)
            .map_err(|e| LedgerError::Rejected(e.to_string()))?;
        if !current.can_transition_to(target) {
            return Err(LedgerError::Rejected(format!(
                "record {id} is {current}, not pending"
            )));
        }
        raw.status = target.wire();
        raw.reviewer = reviewer.as_str().to_string();
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MOCK FILE STORE
// ════════════════════════════════════════════════════════════════════════════

/// In-memory content-addressed file store.
///
/// References are the SHA-256 hex of the bytes, so storing identical
/// bytes twice yields the same reference — the same idempotence the
/// real store guarantees.
pub struct MockFileStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    fail_uploads: AtomicBool,
    store_calls: AtomicU64,
}

impl MockFileStore {
    pub fn new() -> Self {
        MockFileStore {
            blobs: RwLock::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
            store_calls: AtomicU64::new(0),
        }
    }

    /// Makes every upload fail until reset.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Number of upload calls served (including failed ones).
    pub fn store_calls(&self) -> u64 {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// Bytes stored under `reference`, if any.
    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(reference).cloned()
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl Default for MockFileStore {
    fn default() -> Self {
        MockFileStore::new()
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn store(&self, bytes: &[u8]) -> Result<String, FileStoreError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(FileStoreError::Rejected(
                "simulated upload failure".to_string(),
            ));
        }
        let reference = sha256_hex(bytes);
        self.blobs.write().insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
