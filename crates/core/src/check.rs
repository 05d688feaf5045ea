//! Rule checker output
//!
//! A [`CheckResult`] is produced once per checker per claim and never modified.
//! Violations carry a typed [`ViolationKind`] so the decision engine can tell a
//! hard spending limit from a request for extra scrutiny without inspecting text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of rule a violation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Malformed or missing input (validation)
    Input,
    /// Category spending ceiling; forces rejection
    HardLimit,
    /// Receipt required but not provided
    MissingEvidence,
    /// Amount needs a human look but is within limits
    Scrutiny,
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Input, message)
    }
}

/// Result of one rule checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub violations: Vec<Violation>,
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    /// Build a result from violations; passes iff there are none
    pub fn from_violations(violations: Vec<Violation>, checked_at: DateTime<Utc>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
            checked_at,
        }
    }

    /// Build a validation result from plain error strings
    pub fn from_errors(errors: Vec<String>, checked_at: DateTime<Utc>) -> Self {
        Self::from_violations(errors.into_iter().map(Violation::input).collect(), checked_at)
    }

    /// Violation messages in order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// Whether any violation has the given kind
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}
