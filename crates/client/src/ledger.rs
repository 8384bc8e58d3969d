//! # Ledger Contracts and Record Mapper
//!
//! Abstract read/write contracts for the authoritative ledger, plus the
//! wire record shape and its single decode point.
//!
//! The ledger is consulted, never reimplemented: [`LedgerReader`] is
//! read-only and safe to call concurrently; [`LedgerWriter`] operations
//! are finalize-then-confirm — the returned future resolves only after
//! the write is durably confirmed, so a caller that awaits a write and
//! then refreshes always observes its own write.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use empchain_common::record::{AccountId, DecodeError, EmployeeRecord, RecordStatus};

use crate::error::LedgerError;

// ════════════════════════════════════════════════════════════════════════════
// WIRE RECORD + MAPPER
// ════════════════════════════════════════════════════════════════════════════

/// One raw record tuple as returned by the ledger read interface.
///
/// Numeric fields carry the wire-native widths; `status` is the raw
/// ordinal. Decoding happens exactly once, in [`decode`](Self::decode).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmployeeRecord {
    pub employee_id: u64,
    pub full_name: String,
    pub age: u64,
    pub position: String,
    pub department: String,
    pub document_ref: String,
    pub status: u8,
    pub submitter: String,
    pub reviewer: String,
}

impl RawEmployeeRecord {
    /// Maps the wire tuple into an [`EmployeeRecord`].
    ///
    /// Pure: no side effects. Fails on a status ordinal outside
    /// {0, 1, 2}, a zero id, or an age that does not fit.
    pub fn decode(&self) -> Result<EmployeeRecord, DecodeError> {
        if self.employee_id == 0 {
            return Err(DecodeError::ZeroId);
        }
        let age = u8::try_from(self.age).map_err(|_| DecodeError::AgeOverflow(self.age))?;
        let status = RecordStatus::from_wire(self.status)?;
        Ok(EmployeeRecord {
            id: self.employee_id,
            full_name: self.full_name.clone(),
            age,
            position: self.position.clone(),
            department: self.department.clone(),
            document_ref: self.document_ref.clone(),
            status,
            submitter: AccountId::new(&self.submitter),
            reviewer: AccountId::new(&self.reviewer),
        })
    }
}

/// Fields of a create-record write. The caller identity travels with
/// the request and becomes the record's immutable submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRecordRequest {
    pub full_name: String,
    pub age: u8,
    pub position: String,
    pub department: String,
    pub document_ref: String,
    pub submitter: AccountId,
}

// ════════════════════════════════════════════════════════════════════════════
// CONTRACTS
// ════════════════════════════════════════════════════════════════════════════

/// Read-only ledger interface. No side effects; calls for independent
/// ids may run concurrently.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// All record ids currently on the ledger.
    async fn list_record_ids(&self) -> Result<Vec<u64>, LedgerError>;

    /// The raw tuple for one record.
    async fn get_record(&self, id: u64) -> Result<RawEmployeeRecord, LedgerError>;

    /// The single identity authorized to review records.
    async fn reviewer_address(&self) -> Result<AccountId, LedgerError>;
}

/// Write interface. Both operations resolve only after durable
/// confirmation; the ledger itself serializes writes and rejects
/// invalid transitions, so no local coordination is needed.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// Creates a new record in `Pending` state; returns its id.
    async fn submit_record(&self, request: &SubmitRecordRequest) -> Result<u64, LedgerError>;

    /// Moves a `Pending` record to a terminal status. Fails with
    /// [`LedgerError::Rejected`] unless `reviewer` is the designated
    /// reviewer and the record is still pending.
    async fn review_record(
        &self,
        id: u64,
        target: RecordStatus,
        reviewer: &AccountId,
    ) -> Result<(), LedgerError>;
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use empchain_common::record::UNSET_ADDRESS;

    fn raw(status: u8) -> RawEmployeeRecord {
        RawEmployeeRecord {
            employee_id: 7,
            full_name: "Le Van C".to_string(),
            age: 30,
            position: "Designer".to_string(),
            department: "Product".to_string(),
            document_ref: "QmRef".to_string(),
            status,
            submitter: "0xAB12".to_string(),
            reviewer: UNSET_ADDRESS.to_string(),
        }
    }

    #[test]
    fn test_decode_pending_record() {
        let record = raw(0).decode().expect("decodes");
        assert_eq!(record.id, 7);
        assert_eq!(record.age, 30);
        assert_eq!(record.status, RecordStatus::Pending);
        // Account ids come out normalized.
        assert_eq!(record.submitter, AccountId::new("0xab12"));
        assert!(record.reviewer.is_unset());
    }

    #[test]
    fn test_decode_each_ordinal() {
        assert_eq!(raw(1).decode().map(|r| r.status), Ok(RecordStatus::Approved));
        assert_eq!(raw(2).decode().map(|r| r.status), Ok(RecordStatus::Rejected));
    }

    #[test]
    fn test_decode_rejects_unknown_ordinal() {
        assert_eq!(raw(3).decode(), Err(DecodeError::UnknownStatus(3)));
        assert_eq!(raw(255).decode(), Err(DecodeError::UnknownStatus(255)));
    }

    #[test]
    fn test_decode_rejects_zero_id() {
        let mut bad = raw(0);
        bad.employee_id = 0;
        assert_eq!(bad.decode(), Err(DecodeError::ZeroId));
    }

    #[test]
    fn test_decode_rejects_oversized_age() {
        let mut bad = raw(0);
        bad.age = 300;
        assert_eq!(bad.decode(), Err(DecodeError::AgeOverflow(300)));
    }
}
