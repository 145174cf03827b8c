//! Error taxonomy for aggregate mutations.
//!
//! All of these are expected, recoverable business conditions. Mutation
//! methods return them instead of panicking so callers can give
//! immediate feedback; no partial mutation ever precedes a failure.

use thiserror::Error;

/// A resource a mutation can run short of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Gold,
    SkillPoints,
    Essence,
    InfernalCores,
    /// The stat is already at the tank's level cap.
    LevelCap,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// Malformed or out-of-range input, rejected with no mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Not enough of a resource, or a cap already reached.
    #[error("insufficient resource: {0:?}")]
    InsufficientResource(Resource),

    /// A referenced item or slot is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Corrupt or unparsable save data; the in-memory state is unchanged.
    #[error("save data error: {0}")]
    Serialization(String),
}

pub type StateResult<T> = Result<T, StateError>;
