//! # Session Identity Context
//!
//! The caller's current identity and its relation to the designated
//! reviewer, as known at session start. Switching identity mid-session
//! replaces the whole session value; identity-dependent views (the
//! submitter's own history, reviewer capabilities) are derived from it
//! and therefore invalidate together.

use empchain_common::record::AccountId;

/// Current caller identity plus the ledger's designated reviewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionIdentity {
    /// The account acting in this session.
    pub account: AccountId,
    /// The single identity authorized to review records, as read from
    /// the ledger at connect time.
    pub designated_reviewer: AccountId,
}

impl SessionIdentity {
    pub fn new(account: AccountId, designated_reviewer: AccountId) -> Self {
        SessionIdentity {
            account,
            designated_reviewer,
        }
    }

    /// `true` iff the session account is the designated reviewer.
    /// Comparison is over normalized forms, so address casing does not
    /// matter.
    #[must_use]
    pub fn is_reviewer(&self) -> bool {
        !self.account.is_unset() && self.account == self.designated_reviewer
    }

    /// Replaces the acting account, keeping the reviewer binding.
    #[must_use]
    pub fn with_account(&self, account: AccountId) -> Self {
        SessionIdentity {
            account,
            designated_reviewer: self.designated_reviewer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_match_is_case_insensitive() {
        let session = SessionIdentity::new(AccountId::new("0xABCD"), AccountId::new("0xabcd"));
        assert!(session.is_reviewer());
    }

    #[test]
    fn test_non_reviewer() {
        let session = SessionIdentity::new(AccountId::new("0x01"), AccountId::new("0x02"));
        assert!(!session.is_reviewer());
    }

    #[test]
    fn test_unset_account_is_never_reviewer() {
        let session = SessionIdentity::new(AccountId::unset(), AccountId::unset());
        assert!(!session.is_reviewer());
    }

    #[test]
    fn test_with_account_swaps_only_account() {
        let session = SessionIdentity::new(AccountId::new("0x01"), AccountId::new("0x02"));
        let switched = session.with_account(AccountId::new("0x02"));
        assert!(switched.is_reviewer());
        assert_eq!(switched.designated_reviewer, session.designated_reviewer);
    }
}
