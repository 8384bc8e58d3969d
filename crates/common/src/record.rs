//! # Employee Record Domain Model
//!
//! Defines the central `EmployeeRecord` entity, its review lifecycle
//! status, and the identity newtype used for submitter/reviewer fields.
//!
//! ## Review Lifecycle
//!
//! Every record is in exactly one of three states. The set of allowed
//! transitions is a **closed set** — transitions not explicitly listed
//! are forbidden:
//!
//! ```text
//! From       → To          Trigger
//! ─────────── ──────────── ─────────────────────────────
//! Pending    → Approved    Designated reviewer approves
//! Pending    → Rejected    Designated reviewer rejects
//! ```
//!
//! `Approved` and `Rejected` are terminal: there is no re-review, no
//! self-transition, and no path back to `Pending`.
//!
//! ## Wire Encoding
//!
//! The ledger stores status as an ordinal (`0 = Pending`, `1 = Approved`,
//! `2 = Rejected`). [`RecordStatus::from_wire`] is the single place this
//! mapping is decoded; any other ordinal is a [`DecodeError`].
//!
//! ## Invariants
//!
//! - `id` is positive, unique across the record set, never reused.
//! - `reviewer` is the unset sentinel iff `status == Pending`.
//! - `submitter` is never the unset sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel address meaning "no identity assigned yet".
///
/// Matches the ledger's zero-address convention for a record that has
/// not been reviewed.
pub const UNSET_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ════════════════════════════════════════════════════════════════════════════
// DECODE ERROR
// ════════════════════════════════════════════════════════════════════════════

/// Error decoding a raw ledger tuple into an [`EmployeeRecord`].
///
/// Fatal to the enclosing refresh, never to the process: a failed decode
/// discards the whole refresh and the previous snapshot keeps serving.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Status ordinal outside the closed set {0, 1, 2}.
    #[error("unknown status ordinal {0}")]
    UnknownStatus(u8),
    /// Record ids are assigned by the ledger starting at 1; zero is
    /// never a valid id.
    #[error("record id must be positive")]
    ZeroId,
    /// Wire age does not fit the internal representation.
    #[error("age {0} out of representable range")]
    AgeOverflow(u64),
}

// ════════════════════════════════════════════════════════════════════════════
// RECORD STATUS
// ════════════════════════════════════════════════════════════════════════════

/// Review status of an employee record.
///
/// A record is always in exactly one of these three states. `Pending` is
/// the only non-terminal state; the allowed transitions form a closed
/// set checked by [`RecordStatus::can_transition_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Submitted, awaiting the designated reviewer.
    Pending,
    /// Accepted by the designated reviewer. Terminal.
    Approved,
    /// Declined by the designated reviewer. Terminal.
    Rejected,
}

impl RecordStatus {
    /// Decodes the ledger's ordinal wire value.
    ///
    /// This is the only place the ordinal mapping lives; callers never
    /// duplicate it.
    pub fn from_wire(ordinal: u8) -> Result<Self, DecodeError> {
        match ordinal {
            0 => Ok(RecordStatus::Pending),
            1 => Ok(RecordStatus::Approved),
            2 => Ok(RecordStatus::Rejected),
            other => Err(DecodeError::UnknownStatus(other)),
        }
    }

    /// Inverse of [`from_wire`](Self::from_wire).
    #[must_use]
    pub const fn wire(&self) -> u8 {
        match self {
            RecordStatus::Pending => 0,
            RecordStatus::Approved => 1,
            RecordStatus::Rejected => 2,
        }
    }

    /// Returns whether a transition from `self` to `target` is allowed.
    ///
    /// Pure function over the closed transition set: only
    /// `Pending → Approved` and `Pending → Rejected` return `true`.
    /// Self-transitions and any move out of a terminal state are
    /// forbidden.
    #[must_use]
    #[inline]
    pub const fn can_transition_to(&self, target: RecordStatus) -> bool {
        matches!(
            (self, &target),
            (RecordStatus::Pending, RecordStatus::Approved)
                | (RecordStatus::Pending, RecordStatus::Rejected)
        )
    }

    /// `true` for `Approved` and `Rejected`.
    #[must_use]
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, RecordStatus::Pending)
    }

    /// Human label, also used by keyword search.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ACCOUNT ID
// ════════════════════════════════════════════════════════════════════════════

/// Caller identity as known to the ledger.
///
/// Stored lowercase so equality checks (e.g. "is this caller the
/// designated reviewer?") are case-insensitive, matching the ledger's
/// address semantics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Builds an id, normalizing to lowercase.
    pub fn new(raw: impl Into<String>) -> Self {
        AccountId(raw.into().to_lowercase())
    }

    /// The unset sentinel (zero address).
    #[must_use]
    pub fn unset() -> Self {
        AccountId(UNSET_ADDRESS.to_string())
    }

    /// `true` if this is the unset sentinel or empty.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty() || self.0 == UNSET_ADDRESS
    }

    /// Normalized string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EMPLOYEE RECORD
// ════════════════════════════════════════════════════════════════════════════

/// One employee record as projected from the ledger.
///
/// The ledger copy is the sole source of truth; instances of this struct
/// live only inside a disposable snapshot and are never mutated in
/// place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Ledger-assigned positive id, immutable, unique.
    pub id: u64,
    /// 3–50 chars after trimming.
    pub full_name: String,
    /// 18–65 inclusive.
    pub age: u8,
    /// 2–100 chars after trimming.
    pub position: String,
    /// 2–100 chars after trimming.
    pub department: String,
    /// Opaque content-store reference, immutable once set.
    pub document_ref: String,
    /// Review lifecycle state.
    pub status: RecordStatus,
    /// Set once at creation, never the unset sentinel.
    pub submitter: AccountId,
    /// Unset iff `status == Pending`; set exactly once on review.
    pub reviewer: AccountId,
}

// ════════════════════════════════════════════════════════════════════════════
// RECORD STATS
// ════════════════════════════════════════════════════════════════════════════

/// Per-status counts over one snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl RecordStats {
    /// Simple counts over a record set.
    #[must_use]
    pub fn of(records: &[EmployeeRecord]) -> Self {
        let mut stats = RecordStats {
            total: records.len(),
            ..RecordStats::default()
        };
        for record in records {
            match record.status {
                RecordStatus::Pending => stats.pending += 1,
                RecordStatus::Approved => stats.approved += 1,
                RecordStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, status: RecordStatus) -> EmployeeRecord {
        EmployeeRecord {
            id,
            full_name: "Tran Thi Mai".to_string(),
            age: 31,
            position: "Accountant".to_string(),
            department: "Finance".to_string(),
            document_ref: "QmTestRef".to_string(),
            status,
            submitter: AccountId::new("0xAB"),
            reviewer: if status.is_terminal() {
                AccountId::new("0xCD")
            } else {
                AccountId::unset()
            },
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // WIRE DECODE
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_wire_closed_set() {
        assert_eq!(RecordStatus::from_wire(0), Ok(RecordStatus::Pending));
        assert_eq!(RecordStatus::from_wire(1), Ok(RecordStatus::Approved));
        assert_eq!(RecordStatus::from_wire(2), Ok(RecordStatus::Rejected));
        for ordinal in 3u8..=255 {
            assert_eq!(
                RecordStatus::from_wire(ordinal),
                Err(DecodeError::UnknownStatus(ordinal))
            );
        }
    }

    #[test]
    fn test_wire_roundtrip() {
        for status in [
            RecordStatus::Pending,
            RecordStatus::Approved,
            RecordStatus::Rejected,
        ] {
            assert_eq!(RecordStatus::from_wire(status.wire()), Ok(status));
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // TRANSITIONS
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_pending_transitions_to_both_terminals() {
        assert!(RecordStatus::Pending.can_transition_to(RecordStatus::Approved));
        assert!(RecordStatus::Pending.can_transition_to(RecordStatus::Rejected));
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        for from in [RecordStatus::Approved, RecordStatus::Rejected] {
            for to in [
                RecordStatus::Pending,
                RecordStatus::Approved,
                RecordStatus::Rejected,
            ] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be rejected");
            }
        }
    }

    #[test]
    fn test_no_self_transition() {
        assert!(!RecordStatus::Pending.can_transition_to(RecordStatus::Pending));
    }

    #[test]
    fn test_terminal_flag() {
        assert!(!RecordStatus::Pending.is_terminal());
        assert!(RecordStatus::Approved.is_terminal());
        assert!(RecordStatus::Rejected.is_terminal());
    }

    // ──────────────────────────────────────────────────────────────────
    // ACCOUNT ID
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_account_id_case_insensitive() {
        assert_eq!(AccountId::new("0xAbCd"), AccountId::new("0xabcd"));
    }

    #[test]
    fn test_unset_sentinel() {
        assert!(AccountId::unset().is_unset());
        assert!(AccountId::new("").is_unset());
        assert!(AccountId::new(UNSET_ADDRESS.to_uppercase()).is_unset());
        assert!(!AccountId::new("0x01").is_unset());
    }

    // ──────────────────────────────────────────────────────────────────
    // STATS
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_counts() {
        let records = vec![
            record(1, RecordStatus::Pending),
            record(2, RecordStatus::Pending),
            record(3, RecordStatus::Approved),
            record(4, RecordStatus::Rejected),
        ];
        let stats = RecordStats::of(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(RecordStats::of(&[]), RecordStats::default());
    }
}
