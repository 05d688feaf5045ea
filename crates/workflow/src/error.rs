//! Workflow errors

use claimflow_core::{Outcome, Step};
use claimflow_store::StoreError;
use thiserror::Error;

/// Transient failure of a single step attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("{step} attempt {attempt} failed: {message}")]
    Transient {
        step: Step,
        attempt: u32,
        message: String,
    },
}

impl StepError {
    pub fn transient(step: Step, attempt: u32, message: impl Into<String>) -> Self {
        StepError::Transient {
            step,
            attempt,
            message: message.into(),
        }
    }
}

/// Rejected manual decision
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Claim {id} is not reviewable (current outcome: {outcome})")]
    NotReviewable { id: String, outcome: Outcome },

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    #[error("Invalid reason: {0}")]
    InvalidReason(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from running workflows outside the pure pipeline
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Workflow task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
