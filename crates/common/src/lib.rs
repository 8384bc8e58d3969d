//! # EmployeeChain Common Crate
//!
//! Pure domain types and logic for the EmployeeChain record client:
//! no IO, no async, no network.
//!
//! ## Modules
//! - `record`: employee record entity, review status, identities
//! - `validation`: field and whole-form submission validation
//! - `query`: search, status filtering, and pagination
//! - `config`: environment-variable client configuration
//! - `cid`: content reference helpers (SHA-256)

pub mod cid;
pub mod config;
pub mod query;
pub mod record;
pub mod validation;

pub use config::{ClientConfig, ConfigError};
pub use query::{QueryState, RecordPage, RecordQuery, StatusFilter, PAGE_SIZE};
pub use record::{AccountId, DecodeError, EmployeeRecord, RecordStats, RecordStatus, UNSET_ADDRESS};
pub use validation::{
    validate_age, validate_department, validate_full_name, validate_position, validate_submission,
    DraftSubmission, Field, FieldError, ValidationReport,
};
