//! Claimflow Rule Checkers
//!
//! Two pure checkers run against every claim:
//!
//! - [`Validator`] - shape and range of the submitted fields. Missing fields are
//!   reported first and stop further checks, so a claim without an amount is not
//!   also told its amount is not a number.
//! - [`PolicyChecker`] - company spending policy. Every rule is evaluated so all
//!   simultaneous violations are reported. Violations are typed: a
//!   [`ViolationKind::HardLimit`](claimflow_core::ViolationKind::HardLimit) forces
//!   rejection downstream, the other kinds only force a human review.

pub mod config;
pub mod policy;
pub mod validation;

pub use config::{PolicyConfig, ValidationConfig};
pub use policy::PolicyChecker;
pub use validation::Validator;
