//! Error types and result types for pagination operations.
//!
//! This module provides the error taxonomy for the pagination engine.
//! Use [`PaginateResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur while paginating.
///
/// Errors are classified, never recovered locally: invalid input surfaces
/// immediately, and source failures are relayed with the active
/// strategy/phase attached as context.
#[derive(Error, Debug)]
pub enum PaginationError {
    /// Caller-supplied parameters violate a precondition (zero limit,
    /// page number below one, conflicting after/before tokens).
    #[error("Invalid page request: {0}")]
    InvalidRequest(String),
    /// A pagination token is malformed, or was minted by a different
    /// strategy or sort field than the one presenting it.
    #[error("Invalid page token: {0}")]
    InvalidToken(String),
    /// A record returned by the source is not a document, or lacks the
    /// boundary field required to mint a continuation token.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    /// Serialization/deserialization error when converting between record
    /// formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An opaque failure from the underlying document source, relayed with
    /// the pagination phase that was active (e.g. "cursor find").
    #[error("Source error during {phase}: {message}")]
    Store {
        /// The pagination strategy and operation that was in flight.
        phase: String,
        /// The source's own error message, unmodified.
        message: String,
    },
}

impl PaginationError {
    /// Wraps a source failure with the pagination phase it occurred in.
    pub fn store(phase: impl Into<String>, err: SourceError) -> Self {
        PaginationError::Store { phase: phase.into(), message: err.to_string() }
    }
}

/// A specialized `Result` type for pagination operations.
pub type PaginateResult<T> = Result<T, PaginationError>;

/// Opaque error type returned by [`DocumentSource`](crate::source::DocumentSource)
/// implementations.
///
/// The engine never interprets these; they are wrapped into
/// [`PaginationError::Store`] with phase context and propagated.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SourceError(String);

impl SourceError {
    /// Creates a source error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        SourceError(message.into())
    }
}

impl From<BsonError> for PaginationError {
    fn from(err: BsonError) -> Self {
        PaginationError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for PaginationError {
    fn from(err: SerdeJsonError) -> Self {
        PaginationError::Serialization(err.to_string())
    }
}

impl From<BsonError> for SourceError {
    fn from(err: BsonError) -> Self {
        SourceError(err.to_string())
    }
}
