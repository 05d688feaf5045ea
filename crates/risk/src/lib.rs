//! Claimflow Risk Scorer
//!
//! Pure, deterministic scoring of a validated claim. Independent rules each add a
//! fixed number of points when they match; the sum is clamped to `0..=100` and
//! mapped to a [`RiskLevel`](claimflow_core::RiskLevel) through two thresholds.
//!
//! Every threshold, curated list and point value lives in [`RiskConfig`] so it can
//! be tuned from the config file without recompiling.

pub mod config;
pub mod scorer;

pub use config::{RiskConfig, RiskPoints};
pub use scorer::RiskScorer;
