//! Aggregation error types

use std::time::Duration;

use cars_core::{FetchError, USER_FACING_FAILURE};
use thiserror::Error;

/// Result type for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Terminal failure of an aggregation.
///
/// An aggregation never yields partial results: the first failing task
/// decides the outcome and everything else is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A task reported a failure; `task` is its label (e.g. `models/2`)
    #[error("Task {task} failed: {source}")]
    Task { task: String, source: FetchError },

    /// The overall request deadline elapsed before all outcomes arrived
    #[error("Aggregation did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    /// Tasks ended without reporting (a task panicked)
    #[error("Aggregation ended after {received} of {expected} outcomes")]
    Incomplete { expected: usize, received: usize },
}

impl AggregateError {
    /// Label of the failing task, if a task failed
    pub fn task(&self) -> Option<&str> {
        match self {
            AggregateError::Task { task, .. } => Some(task),
            _ => None,
        }
    }

    /// Underlying fetch failure, if a task failed
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            AggregateError::Task { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Generic message for end users, identical for every failure
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}
