//! # Record Service Facade
//!
//! The surface exposed to presentation: queries over the cached
//! snapshot, the submission workflow, the review workflow, and
//! identity switching. One service instance is one session.
//!
//! ## Write Discipline
//!
//! Workflows never assume success before the ledger confirms: no
//! optimistic local mutation, no automatic write retries (a retried
//! write could duplicate a record). Every workflow triggers its cache
//! refresh only after its own write is finalized, so a caller that
//! awaits `submit` or `review` and then reads the cache sees its write
//! reflected (read-your-writes within one session). A failed
//! post-write refresh only leaves the snapshot stale — the last good
//! snapshot keeps serving and the write itself already succeeded.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use empchain_common::query::{run_query, RecordPage, RecordQuery};
use empchain_common::record::{AccountId, EmployeeRecord, RecordStats, RecordStatus};
use empchain_common::validation::{parse_age, validate_submission, DraftSubmission, ValidationReport};

use crate::error::{LedgerError, RefreshError, ReviewError, SubmitError};
use crate::file_store::FileStore;
use crate::identity::SessionIdentity;
use crate::ledger::{LedgerReader, LedgerWriter, SubmitRecordRequest};
use crate::store::RecordStore;

/// Session-scoped record service over a ledger and a file store.
pub struct RecordService<L, F> {
    ledger: Arc<L>,
    files: Arc<F>,
    store: RecordStore<L>,
    session: RwLock<SessionIdentity>,
}

impl<L, F> RecordService<L, F>
where
    L: LedgerReader + LedgerWriter,
    F: FileStore,
{
    /// Opens a session for `account`: reads the designated reviewer
    /// identity from the ledger and performs the initial refresh.
    pub async fn connect(
        ledger: Arc<L>,
        files: Arc<F>,
        account: AccountId,
    ) -> Result<Self, RefreshError> {
        let designated_reviewer = ledger.reviewer_address().await?;
        let service = RecordService {
            store: RecordStore::new(ledger.clone()),
            ledger,
            files,
            session: RwLock::new(SessionIdentity::new(account, designated_reviewer)),
        };
        service.store.refresh().await?;
        Ok(service)
    }

    // ────────────────────────────────────────────────────────────────
    // QUERIES (no network)
    // ────────────────────────────────────────────────────────────────

    /// One page of the snapshot under `query`.
    pub fn get_page(&self, query: &RecordQuery) -> RecordPage {
        run_query(&self.store.records(), query)
    }

    /// Per-status counts over the snapshot.
    pub fn get_stats(&self) -> RecordStats {
        self.store.stats()
    }

    /// The session account's own submissions (identity-dependent view;
    /// reflects the account set by the latest identity switch).
    pub fn my_records(&self) -> Vec<EmployeeRecord> {
        let account = self.session.read().account.clone();
        self.store
            .records()
            .iter()
            .filter(|r| r.submitter == account)
            .cloned()
            .collect()
    }

    /// All records still awaiting review.
    pub fn pending_records(&self) -> Vec<EmployeeRecord> {
        self.store
            .records()
            .iter()
            .filter(|r| r.status == RecordStatus::Pending)
            .cloned()
            .collect()
    }

    /// One record by id, from the snapshot.
    pub fn record(&self, id: u64) -> Option<EmployeeRecord> {
        self.store.get(id)
    }

    /// The current session identity.
    pub fn session(&self) -> SessionIdentity {
        self.session.read().clone()
    }

    /// `true` iff the session account is the designated reviewer.
    pub fn is_reviewer(&self) -> bool {
        self.session.read().is_reviewer()
    }

    // ────────────────────────────────────────────────────────────────
    // SYNCHRONIZATION
    // ────────────────────────────────────────────────────────────────

    /// Rebuilds the snapshot from the ledger. On failure the previous
    /// snapshot keeps serving.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        self.store.refresh().await
    }

    /// Replaces the session account (e.g. the user switched wallets),
    /// invalidating identity-dependent views, and refreshes. The
    /// designated reviewer is re-read in case the session is long-lived.
    pub async fn switch_identity(&self, account: AccountId) -> Result<(), RefreshError> {
        let designated_reviewer = self.ledger.reviewer_address().await?;
        {
            let mut session = self.session.write();
            *session = SessionIdentity::new(account.clone(), designated_reviewer);
        }
        info!(account = %account, "session identity switched");
        self.store.refresh().await
    }

    // ────────────────────────────────────────────────────────────────
    // SUBMISSION WORKFLOW
    // ────────────────────────────────────────────────────────────────

    /// Submits a draft: exhaustive validation, document upload, then
    /// the create-record write. Returns the ledger-assigned id and
    /// clears the draft on success.
    ///
    /// Failure order matters: validation failures never reach the
    /// network; an upload failure aborts before any ledger write (no
    /// orphan record); a ledger write failure may leave the document
    /// stored, which content addressing makes harmless.
    pub async fn submit(&self, draft: &mut DraftSubmission) -> Result<u64, SubmitError> {
        let report = validate_submission(draft);
        if !report.is_valid() {
            return Err(SubmitError::ValidationFailed(report));
        }

        // The report is valid here, so the parse and the document read
        // cannot fail; the fallbacks only keep the error path honest.
        let age = parse_age(draft.age()).map_err(|e| {
            SubmitError::ValidationFailed(ValidationReport {
                age: Some(e),
                ..ValidationReport::default()
            })
        })?;
        let Some(bytes) = draft.document() else {
            return Err(SubmitError::ValidationFailed(report));
        };

        let document_ref = self
            .files
            .store(bytes)
            .await
            .map_err(SubmitError::StorageUploadFailed)?;

        let request = SubmitRecordRequest {
            full_name: draft.full_name().trim().to_string(),
            age,
            position: draft.position().trim().to_string(),
            department: draft.department().trim().to_string(),
            document_ref,
            submitter: self.session.read().account.clone(),
        };
        let id = self
            .ledger
            .submit_record(&request)
            .await
            .map_err(SubmitError::LedgerWriteFailed)?;
        info!(id, "record submitted, awaiting review");

        if let Err(e) = self.store.refresh().await {
            warn!(error = %e, "post-submit refresh failed, snapshot is stale");
        }
        draft.clear();
        Ok(id)
    }

    // ────────────────────────────────────────────────────────────────
    // REVIEW WORKFLOW
    // ────────────────────────────────────────────────────────────────

    /// Moves a pending record to `Approved` (if `approve`) or
    /// `Rejected`, as the designated reviewer.
    ///
    /// Guards run before the write so a doomed transaction is never
    /// issued: the session must be the designated reviewer and the
    /// record must be pending in the local snapshot. The ledger remains
    /// the final arbiter — if it rejects anyway (the record changed
    /// concurrently), the cache is refreshed to reflect reality and
    /// [`ReviewError::Rejected`] is returned. No state is applied
    /// locally ahead of ledger confirmation.
    pub async fn review(&self, id: u64, approve: bool) -> Result<(), ReviewError> {
        let session = self.session.read().clone();
        if !session.is_reviewer() {
            return Err(ReviewError::NotReviewer);
        }

        let target = if approve {
            RecordStatus::Approved
        } else {
            RecordStatus::Rejected
        };
        match self.store.get(id) {
            None => return Err(ReviewError::UnknownRecord(id)),
            Some(record) if !record.status.can_transition_to(target) => {
                return Err(ReviewError::NotPending {
                    id,
                    status: record.status,
                });
            }
            Some(_) => {}
        }

        match self.ledger.review_record(id, target, &session.account).await {
            Ok(()) => {
                info!(id, target = %target, "record reviewed");
                if let Err(e) = self.store.refresh().await {
                    warn!(error = %e, "post-review refresh failed, snapshot is stale");
                }
                Ok(())
            }
            Err(LedgerError::Rejected(reason)) => {
                // Precondition changed under us; resync before surfacing.
                if let Err(e) = self.store.refresh().await {
                    warn!(error = %e, "refresh after rejected review failed");
                }
                Err(ReviewError::Rejected(reason))
            }
            Err(LedgerError::NotFound(id)) => {
                if let Err(e) = self.store.refresh().await {
                    warn!(error = %e, "refresh after rejected review failed");
                }
                Err(ReviewError::Rejected(format!("record {id} absent")))
            }
            Err(LedgerError::Transport(reason)) => Err(ReviewError::Transport(reason)),
        }
    }
}
