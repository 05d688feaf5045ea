//! Claimflow Core - Domain types
//!
//! This crate contains the types shared by every stage of the claim pipeline:
//! - [`Claim`]: the in-flight unit of work with its attached step results
//! - [`ClaimId`]: deterministic, content-derived identity (same content, same day, same id)
//! - [`CheckResult`] / [`RiskAssessment`] / [`Decision`]: immutable step outputs
//! - [`StoredRecord`]: the durable projection handed to the store

pub mod category;
pub mod check;
pub mod claim;
pub mod decision;
pub mod identity;
pub mod record;
pub mod risk;

pub use category::{Category, CategoryError};
pub use check::{CheckResult, Violation, ViolationKind};
pub use claim::{Claim, ClaimAttributes, ClaimSubmission, FIELD_AMOUNT, FIELD_CATEGORY,
    FIELD_DESCRIPTION, FIELD_OWNER_ID, FIELD_RECEIPT_PROVIDED, REQUIRED_FIELDS};
pub use decision::{Decision, Outcome};
pub use identity::ClaimId;
pub use record::{FaultKind, Step, StoredRecord, WorkflowFault, WorkflowState};
pub use risk::{RiskAssessment, RiskFlag, RiskLevel};
