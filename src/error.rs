//! Error type shared by every operation of the crate.

use thiserror::Error;

use crate::Field;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validation failure raised by the codec, the generator or the range engine.
///
/// All variants are local and non-retryable: they describe input that can never succeed.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum Error {
    #[error("{input:?} is not a valid UUID")]
    InvalidFormat { input: String },

    #[error("UUID version {version} is not supported by this operation")]
    UnsupportedVersion { version: u8 },

    #[error("UUID version {version} has no {field} field")]
    UnsupportedField { version: u8, field: Field },

    #[error("{field} is not applicable to UUID version {version}")]
    FieldNotApplicable { version: u8, field: &'static str },

    #[error("{field} value {value} does not fit in {width} bits")]
    ValueOutOfRange {
        field: Field,
        value: i128,
        width: u32,
    },

    #[error("{argument} is required for UUID version {version}")]
    MissingArgument { version: u8, argument: &'static str },

    #[error("UUIDs have different versions ({first} and {second})")]
    VersionMismatch { first: u8, second: u8 },

    #[error("UUIDs have the same timestamp")]
    IdenticalTimestamps,

    #[error("count must be greater than 1, got {count}")]
    InvalidCount { count: u64 },

    #[error("{input:?} is neither an ISO 8601 date-time nor a numeric epoch value")]
    InvalidTimeFormat { input: String },

    #[error("{field} must be a number, got {input:?}")]
    InvalidNumber { field: &'static str, input: String },

    #[error("unknown sort order {input:?} (expected asc, desc or alt)")]
    InvalidOrder { input: String },

    #[error("{input:?} is neither a UUID nor one of @dns, @url, @oid, @x500")]
    UnknownNamespace { input: String },
}
