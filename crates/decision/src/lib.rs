//! Claimflow Decision Aggregator
//!
//! Turns a claim with its attached step results into exactly one [`Decision`].
//! Rules are evaluated in a fixed priority order and the first match wins:
//!
//! `fault > validation > hard limit > review (policy or risk) > approve`
//!
//! The parallel policy/risk branches hand their outputs back as typed
//! [`PartialResult`] values which [`merge`] folds into [`ParallelResults`].
//!
//! [`Decision`]: claimflow_core::Decision

pub mod engine;
pub mod merge;

pub use engine::{decide, REASON_ALL_PASSED, REASON_FAILED_VALIDATION, REASON_SPENDING_LIMIT};
pub use merge::{merge, ParallelResults, PartialResult};
