//! Error types for the quiz pipeline and the equation store.
//!
//! Both enums travel inside `anyhow::Error` across the engine and store
//! boundaries, so callers classify failures with `downcast_ref` instead of
//! string matching.

use thiserror::Error;

use crate::model::{EquationId, SetId, UserId};

/// Failures of the generation / verification / scoring pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    /// Requested equation count is outside the allowed range.
    #[error("equation count {count} is out of range ({min}..={max})")]
    InvalidCount { count: usize, min: usize, max: usize },

    /// Scoring was attempted over a set with no equations.
    #[error("equation set has no equations to score")]
    EmptySet,

    /// An answer references an equation that is not part of the set.
    #[error("equation {0} is not part of this set")]
    UnknownEquation(EquationId),

    /// A submitted answer contains NaN or an infinite value.
    #[error("answer for equation {equation} is not a finite pair: ({root1}, {root2})")]
    InvalidAnswer {
        equation: EquationId,
        root1: f64,
        root2: f64,
    },

    /// The user has not generated any equation set yet.
    #[error("no equation sets found for user {0}")]
    NoSets(UserId),

    /// A required request field is empty or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures reported by an [`EquationStore`](crate::traits::EquationStore)
/// backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No set with this id exists.
    #[error("unknown equation set: {0}")]
    UnknownSet(SetId),

    /// No user with this id exists.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The login is already registered.
    #[error("login already exists: {0}")]
    LoginTaken(String),

    /// An equation with this id is already part of the set.
    #[error("equation {0} already exists in set {1}")]
    DuplicateEquation(EquationId, SetId),

    /// Persisted state could not be decoded.
    #[error("store data is corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_count_message() {
        let err = QuizError::InvalidCount {
            count: 101,
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "equation count 101 is out of range (1..=100)");
    }

    #[test]
    fn store_error_survives_anyhow_roundtrip() {
        let err: anyhow::Error = StoreError::LoginTaken("alice".into()).into();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::LoginTaken(login)) if login == "alice"
        ));
    }
}
