//! Core record types, path helpers and errors shared by every phase.

pub mod errors;
pub mod path;
pub mod types;

pub use errors::{Error, ErrorCode, PathViolation, Result, ResultExt};
pub use types::{
    language_bucket, Classification, ClassifiedFile, ExcludedFile, ExclusionReason,
    FileCategory, FileRecord, UNKNOWN_LANGUAGE,
};
