//! # EmployeeChain Client Engine
//!
//! Async client for the EmployeeChain record ledger: synchronizes the
//! on-ledger record set into a queryable local snapshot, validates
//! drafts before submission, and drives the pending → approved/rejected
//! review workflow.
//!
//! ## Architecture
//!
//! ```text
//! LedgerReader ──▶ RawEmployeeRecord ──▶ RecordStore (snapshot)
//!                      (decode)              │
//!                                            ▼
//!                                      query / stats / views
//!
//! DraftSubmission ──▶ validation ──▶ FileStore ──▶ LedgerWriter ──▶ refresh
//! review(id) ──▶ guards ──▶ LedgerWriter ──▶ refresh
//! ```
//!
//! The ledger and file store are abstract contracts ([`ledger`],
//! [`file_store`]); [`http`] provides reqwest transports and [`mock`]
//! in-memory versions for tests.

pub mod error;
pub mod file_store;
pub mod http;
pub mod identity;
pub mod ledger;
pub mod mock;
pub mod service;
pub mod store;

pub use error::{FileStoreError, LedgerError, RefreshError, ReviewError, SubmitError};
pub use file_store::FileStore;
pub use http::{HttpFileStore, HttpLedgerClient};
pub use identity::SessionIdentity;
pub use ledger::{LedgerReader, LedgerWriter, RawEmployeeRecord, SubmitRecordRequest};
pub use mock::{MockFileStore, MockLedger};
pub use service::RecordService;
pub use store::{RecordStore, Snapshot};
