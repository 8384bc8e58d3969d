//! # Client Error Taxonomy
//!
//! One error enum per concern, with workflow-facing errors carrying the
//! data the caller needs to recover:
//!
//! | Error | Scope | Recovery |
//! |-------|-------|----------|
//! | [`LedgerError`] | one ledger call | retry by the caller, never automatic |
//! | [`FileStoreError`] | one upload | retry by resubmission |
//! | [`RefreshError`] | one whole refresh | previous snapshot keeps serving |
//! | [`SubmitError`] | one submission | field errors are data, not faults |
//! | [`ReviewError`] | one review attempt | cache refreshed to reflect reality |
//!
//! Nothing here is fatal to the process. Writes are never retried
//! automatically — a duplicated retry could create a duplicate record —
//! and no local state is touched before the ledger confirms a write.

use thiserror::Error;

use empchain_common::record::{DecodeError, RecordStatus};
use empchain_common::validation::ValidationReport;

/// Failure of a single ledger read or write call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Network or protocol failure before any answer from the ledger.
    #[error("ledger transport error: {0}")]
    Transport(String),
    /// The ledger has no record with this id.
    #[error("record {0} not found on the ledger")]
    NotFound(u64),
    /// The ledger refused the write (wrong caller, bad precondition).
    #[error("ledger rejected the write: {0}")]
    Rejected(String),
}

/// Failure of a single file-store upload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FileStoreError {
    #[error("file store transport error: {0}")]
    Transport(String),
    #[error("file store rejected the upload: {0}")]
    Rejected(String),
}

/// Failure of one whole-snapshot refresh.
///
/// All-or-nothing: any single fetch or decode failure discards the
/// entire refresh and the previous snapshot is retained unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("ledger read failed: {0}")]
    Ledger(#[from] LedgerError),
    #[error("malformed ledger record: {0}")]
    Decode(#[from] DecodeError),
}

/// Failure of the submission workflow.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed validation; no network action was performed.
    /// The report carries every per-field error for display.
    #[error("submission failed validation")]
    ValidationFailed(ValidationReport),
    /// Document upload failed; aborted before any ledger write, so no
    /// orphan ledger record exists.
    #[error("document upload failed: {0}")]
    StorageUploadFailed(#[source] FileStoreError),
    /// The create-record write failed. The document may already be
    /// stored; content-addressed storage makes that harmless.
    #[error("ledger write failed: {0}")]
    LedgerWriteFailed(#[source] LedgerError),
}

/// Failure of the review workflow.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// The session identity is not the designated reviewer; the doomed
    /// write was not attempted.
    #[error("caller is not the designated reviewer")]
    NotReviewer,
    /// The record is not present in the local snapshot.
    #[error("record {0} is not in the current snapshot")]
    UnknownRecord(u64),
    /// The record is already in a terminal state locally.
    #[error("record {id} is already {status}, no re-review")]
    NotPending { id: u64, status: RecordStatus },
    /// The ledger refused the transition (state changed concurrently,
    /// e.g. already reviewed elsewhere). The cache is refreshed to
    /// reflect reality.
    #[error("ledger rejected the review: {0}")]
    Rejected(String),
    /// Network failure before the ledger answered.
    #[error("ledger transport error: {0}")]
    Transport(String),
}
