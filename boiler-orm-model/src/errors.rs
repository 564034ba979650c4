use thiserror::Error;

use crate::key::KeyKind;

/// Error type for every fallible Boiler ORM operation.
///
/// `NotFound` and `TypeMismatch` are distinguished conditions callers are
/// expected to branch on; everything coming from the driver is passed
/// through unchanged in `Database`. Nothing is retried, masked or logged
/// here.
#[derive(Debug, Error)]
pub enum BoilerOrmError {
    /// A get-by-id matched zero rows. Absence is an expected outcome, not a
    /// transport failure.
    #[error("entity not found")]
    NotFound,

    /// The supplied key variant does not match the entity's declared
    /// primary key kind. Raised before any query is issued.
    #[error("id kind ({got}) does not match entity primary key kind ({expected})")]
    TypeMismatch { expected: KeyKind, got: KeyKind },

    /// A key value cannot cross the wire boundary: a negative BIGINT
    /// scanned into an unsigned key, or an unsigned key above `i64::MAX`
    /// bound as BIGINT. On the scan side the row may exist in storage with
    /// a key this layer cannot hand back.
    #[error("primary key value ({0}) cannot be represented by the entity primary key field")]
    KeyOutOfRange(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
