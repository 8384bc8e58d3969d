//! # Submission Validation Engine
//!
//! Pure, stateless field validators plus the whole-form check used by
//! the submission workflow. Validation failures are **returned as data**
//! ([`FieldError`], [`ValidationReport`]) so the presentation layer can
//! render them per field; they never cross the workflow boundary as
//! panics or transport errors, and a draft with any error never reaches
//! the network.
//!
//! ## Field Rules
//!
//! | Field | Rule (after trimming) |
//! |-------|-----------------------|
//! | full name | non-empty, 3–50 chars |
//! | age | integer, 18–65 inclusive |
//! | position | non-empty, 2–100 chars |
//! | department | non-empty, 2–100 chars |
//! | document | a file must be attached |
//!
//! ## Two-Pass Validation
//!
//! Each [`DraftSubmission`] setter re-validates the touched field
//! incrementally (the per-keystroke pass). [`validate_submission`] then
//! re-runs every rule exhaustively at submit time — it must not trust
//! the incremental cache, because a field that was never touched has
//! never been validated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum accepted age.
pub const AGE_MIN: u8 = 18;
/// Maximum accepted age.
pub const AGE_MAX: u8 = 65;

// ════════════════════════════════════════════════════════════════════════════
// FIELD ERRORS
// ════════════════════════════════════════════════════════════════════════════

/// Draft fields a validation error can point at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    FullName,
    Age,
    Position,
    Department,
    Document,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::FullName => f.write_str("full name"),
            Field::Age => f.write_str("age"),
            Field::Position => f.write_str("position"),
            Field::Department => f.write_str("department"),
            Field::Document => f.write_str("document"),
        }
    }
}

/// One field-scoped validation failure.
///
/// User-correctable and recoverable locally. `Display` messages are
/// deterministic and suitable for direct rendering next to the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    /// Empty after trimming.
    Required,
    /// Shorter than the field minimum.
    TooShort { min: usize },
    /// Longer than the field maximum.
    TooLong { max: usize },
    /// Age input is not an integer.
    NotNumeric,
    /// Age below [`AGE_MIN`].
    BelowMinimum { min: u8 },
    /// Age above [`AGE_MAX`].
    AboveMaximum { max: u8 },
    /// No file attached to the draft.
    MissingDocument,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("must not be empty"),
            FieldError::TooShort { min } => write!(f, "must be at least {min} characters"),
            FieldError::TooLong { max } => write!(f, "must be at most {max} characters"),
            FieldError::NotNumeric => f.write_str("must be a whole number"),
            FieldError::BelowMinimum { min } => write!(f, "must be at least {min}"),
            FieldError::AboveMaximum { max } => write!(f, "must be at most {max}"),
            FieldError::MissingDocument => f.write_str("a document file must be attached"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FIELD VALIDATORS
// ════════════════════════════════════════════════════════════════════════════

fn validate_text(raw: &str, min: usize, max: usize) -> Option<FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if trimmed.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else if trimmed.chars().count() > max {
        Some(FieldError::TooLong { max })
    } else {
        None
    }
}

/// Full name: trimmed, 3–50 chars. `None` means valid.
#[must_use]
pub fn validate_full_name(raw: &str) -> Option<FieldError> {
    validate_text(raw, 3, 50)
}

/// Position: trimmed, 2–100 chars. `None` means valid.
#[must_use]
pub fn validate_position(raw: &str) -> Option<FieldError> {
    validate_text(raw, 2, 100)
}

/// Department: trimmed, 2–100 chars. `None` means valid.
#[must_use]
pub fn validate_department(raw: &str) -> Option<FieldError> {
    validate_text(raw, 2, 100)
}

/// Parses and range-checks the raw age input.
///
/// Single source of the age rule: both the validator view
/// ([`validate_age`]) and the submission workflow (which needs the
/// parsed value for the ledger write) go through here, so the parse can
/// never disagree with the validation.
pub fn parse_age(raw: &str) -> Result<u8, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    // i64 first so "-5" reads as a number below minimum, not garbage.
    let value: i64 = trimmed.parse().map_err(|_| FieldError::NotNumeric)?;
    if value < i64::from(AGE_MIN) {
        Err(FieldError::BelowMinimum { min: AGE_MIN })
    } else if value > i64::from(AGE_MAX) {
        Err(FieldError::AboveMaximum { max: AGE_MAX })
    } else {
        Ok(value as u8)
    }
}

/// Age: integer, 18–65 inclusive. `None` means valid.
#[must_use]
pub fn validate_age(raw: &str) -> Option<FieldError> {
    parse_age(raw).err()
}

// ════════════════════════════════════════════════════════════════════════════
// VALIDATION REPORT
// ════════════════════════════════════════════════════════════════════════════

/// Per-field validation outcome for one draft.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub full_name: Option<FieldError>,
    pub age: Option<FieldError>,
    pub position: Option<FieldError>,
    pub department: Option<FieldError>,
    pub document: Option<FieldError>,
}

impl ValidationReport {
    /// `true` iff every field passed and a document is attached.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.full_name.is_none()
            && self.age.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.document.is_none()
    }

    /// Flat `(field, error)` list for display, in form order.
    #[must_use]
    pub fn errors(&self) -> Vec<(Field, FieldError)> {
        let mut out = Vec::new();
        if let Some(e) = self.full_name {
            out.push((Field::FullName, e));
        }
        if let Some(e) = self.age {
            out.push((Field::Age, e));
        }
        if let Some(e) = self.position {
            out.push((Field::Position, e));
        }
        if let Some(e) = self.department {
            out.push((Field::Department, e));
        }
        if let Some(e) = self.document {
            out.push((Field::Document, e));
        }
        out
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DRAFT SUBMISSION
// ════════════════════════════════════════════════════════════════════════════

/// Ephemeral, client-local draft of a new record.
///
/// Holds the raw text fields exactly as typed, the pending document
/// bytes, and the incrementally maintained [`ValidationReport`]. Lives
/// only until submit succeeds or the user abandons it; never persisted.
#[derive(Clone, Debug, Default)]
pub struct DraftSubmission {
    full_name: String,
    age: String,
    position: String,
    department: String,
    document: Option<Vec<u8>>,
    file_name: Option<String>,
    errors: ValidationReport,
}

impl DraftSubmission {
    #[must_use]
    pub fn new() -> Self {
        DraftSubmission::default()
    }

    /// Sets the full name and re-validates that field.
    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.full_name = value.into();
        self.errors.full_name = validate_full_name(&self.full_name);
    }

    /// Sets the raw age text and re-validates that field.
    pub fn set_age(&mut self, value: impl Into<String>) {
        self.age = value.into();
        self.errors.age = validate_age(&self.age);
    }

    /// Sets the position and re-validates that field.
    pub fn set_position(&mut self, value: impl Into<String>) {
        self.position = value.into();
        self.errors.position = validate_position(&self.position);
    }

    /// Sets the department and re-validates that field.
    pub fn set_department(&mut self, value: impl Into<String>) {
        self.department = value.into();
        self.errors.department = validate_department(&self.department);
    }

    /// Attaches (or replaces) the document file.
    pub fn attach_document(&mut self, bytes: Vec<u8>, file_name: impl Into<String>) {
        self.document = Some(bytes);
        self.file_name = Some(file_name.into());
        self.errors.document = None;
    }

    /// Drops the attached file, if any.
    pub fn detach_document(&mut self) {
        self.document = None;
        self.file_name = None;
    }

    /// Resets the draft to its initial empty state.
    pub fn clear(&mut self) {
        *self = DraftSubmission::default();
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    #[must_use]
    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The incrementally maintained per-field report. Only reflects
    /// fields that have been touched; submit must use
    /// [`validate_submission`] instead.
    #[must_use]
    pub fn field_errors(&self) -> &ValidationReport {
        &self.errors
    }
}

/// Exhaustive whole-form check: all four field validators plus document
/// presence. A submission is valid iff the returned report
/// [`is_valid`](ValidationReport::is_valid).
#[must_use]
pub fn validate_submission(draft: &DraftSubmission) -> ValidationReport {
    ValidationReport {
        full_name: validate_full_name(&draft.full_name),
        age: validate_age(&draft.age),
        position: validate_position(&draft.position),
        department: validate_department(&draft.department),
        document: if draft.document.is_some() {
            None
        } else {
            Some(FieldError::MissingDocument)
        },
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ──────────────────────────────────────────────────────────────────
    // FULL NAME
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_full_name_required() {
        assert_eq!(validate_full_name(""), Some(FieldError::Required));
        assert_eq!(validate_full_name("   "), Some(FieldError::Required));
    }

    #[test]
    fn test_full_name_too_short() {
        assert_eq!(validate_full_name("Ng"), Some(FieldError::TooShort { min: 3 }));
        // Trimming happens before the length check.
        assert_eq!(
            validate_full_name("  Ng  "),
            Some(FieldError::TooShort { min: 3 })
        );
    }

    #[test]
    fn test_full_name_too_long() {
        let long = "a".repeat(51);
        assert_eq!(validate_full_name(&long), Some(FieldError::TooLong { max: 50 }));
    }

    #[test]
    fn test_full_name_boundaries_valid() {
        assert_eq!(validate_full_name("Ngo"), None);
        assert_eq!(validate_full_name(&"a".repeat(50)), None);
        assert_eq!(validate_full_name("Nguyen Van A"), None);
    }

    // ──────────────────────────────────────────────────────────────────
    // AGE
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_age_required() {
        assert_eq!(validate_age(""), Some(FieldError::Required));
        assert_eq!(validate_age("  "), Some(FieldError::Required));
    }

    #[test]
    fn test_age_not_numeric() {
        assert_eq!(validate_age("abc"), Some(FieldError::NotNumeric));
        assert_eq!(validate_age("2.5"), Some(FieldError::NotNumeric));
        assert_eq!(validate_age("18x"), Some(FieldError::NotNumeric));
    }

    #[test]
    fn test_age_range() {
        assert_eq!(validate_age("17"), Some(FieldError::BelowMinimum { min: 18 }));
        assert_eq!(validate_age("-5"), Some(FieldError::BelowMinimum { min: 18 }));
        assert_eq!(validate_age("66"), Some(FieldError::AboveMaximum { max: 65 }));
        assert_eq!(validate_age("70"), Some(FieldError::AboveMaximum { max: 65 }));
    }

    /// Valid iff 18 <= a <= 65 and a is an integer, over the whole range.
    #[test]
    fn test_age_accept_iff_in_range() {
        for a in 0..=130u32 {
            let valid = validate_age(&a.to_string()).is_none();
            assert_eq!(valid, (18..=65).contains(&a), "age {a}");
        }
    }

    #[test]
    fn test_parse_age_value() {
        assert_eq!(parse_age("42"), Ok(42));
        assert_eq!(parse_age(" 18 "), Ok(18));
        assert_eq!(parse_age("65"), Ok(65));
    }

    // ──────────────────────────────────────────────────────────────────
    // POSITION / DEPARTMENT
    // ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_position_rules() {
        assert_eq!(validate_position(""), Some(FieldError::Required));
        assert_eq!(validate_position("x"), Some(FieldError::TooShort { min: 2 }));
        assert_eq!(
            validate_position(&"p".repeat(101)),
            Some(FieldError::TooLong { max: 100 })
        );
        assert_eq!(validate_position("QA"), None);
    }

    #[test]
    fn test_department_rules() {
        assert_eq!(validate_department(" "), Some(FieldError::Required));
        assert_eq!(validate_department("D"), Some(FieldError::TooShort { min: 2 }));
        assert_eq!(validate_department("Finance"), None);
    }

    // ──────────────────────────────────────────────────────────────────
    // DRAFT + WHOLE-FORM CHECK
    // ──────────────────────────────────────────────────────────────────

    fn valid_draft() -> DraftSubmission {
        let mut draft = DraftSubmission::new();
        draft.set_full_name("Nguyen Van A");
        draft.set_age("28");
        draft.set_position("Marketing Specialist");
        draft.set_department("Sales");
        draft.attach_document(b"cv bytes".to_vec(), "cv.pdf");
        draft
    }

    #[test]
    fn test_valid_draft_passes() {
        let report = validate_submission(&valid_draft());
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_incremental_setters_track_errors() {
        let mut draft = DraftSubmission::new();
        draft.set_full_name("Ng");
        assert_eq!(
            draft.field_errors().full_name,
            Some(FieldError::TooShort { min: 3 })
        );
        draft.set_full_name("Ngo Thi B");
        assert_eq!(draft.field_errors().full_name, None);
    }

    /// Untouched fields are caught by the exhaustive pass even though
    /// the incremental report never saw them.
    #[test]
    fn test_submit_does_not_trust_incremental_report() {
        let mut draft = DraftSubmission::new();
        draft.set_full_name("Nguyen Van A");
        // age/position/department never touched; incremental cache is clean
        assert_eq!(draft.field_errors().age, None);

        let report = validate_submission(&draft);
        assert_eq!(report.age, Some(FieldError::Required));
        assert_eq!(report.position, Some(FieldError::Required));
        assert_eq!(report.department, Some(FieldError::Required));
        assert_eq!(report.document, Some(FieldError::MissingDocument));
    }

    /// Scenario: fully valid draft except age 70 — exactly one error.
    #[test]
    fn test_only_age_error_for_age_70() {
        let mut draft = valid_draft();
        draft.set_age("70");
        let report = validate_submission(&draft);
        assert_eq!(report.age, Some(FieldError::AboveMaximum { max: 65 }));
        assert_eq!(report.full_name, None);
        assert_eq!(report.position, None);
        assert_eq!(report.department, None);
        assert_eq!(report.document, None);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_missing_document_blocks_submission() {
        let mut draft = valid_draft();
        draft.detach_document();
        let report = validate_submission(&draft);
        assert_eq!(report.document, Some(FieldError::MissingDocument));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = valid_draft();
        draft.clear();
        assert_eq!(draft.full_name(), "");
        assert!(draft.document().is_none());
        assert_eq!(*draft.field_errors(), ValidationReport::default());
    }
}
