//! Claimflow Workflow - Claim orchestration
//!
//! ```text
//! ClaimSubmission
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ Validation      │──► invalid? ──────────────┐
//! └────────┬────────┘                           │
//!          │ valid                              │
//!          ▼                                    │
//! ┌─────────────────┐   ┌─────────────────┐     │
//! │ Policy check    │ ∥ │ Risk scoring    │     │
//! │ (retried)       │   │ (retried)       │     │
//! └────────┬────────┘   └────────┬────────┘     │
//!          └──────── merge ──────┘              │
//!                      │   (or fault)           │
//!                      ▼                        │
//!             ┌─────────────────┐               │
//!             │ Decide          │◄──────────────┘
//!             └────────┬────────┘
//!                      ▼
//!             ┌─────────────────┐
//!             │ Persist         │──► idempotent insert
//!             └─────────────────┘
//! ```
//!
//! [`ClaimService`] is the entry point; it owns the orchestrator and the store
//! and also handles manual review of claims that need a human decision.

pub mod config;
pub mod error;
pub mod fault;
pub mod orchestrator;
pub mod service;

pub use config::{ChaosConfig, ClaimflowConfig, RetryConfig, ReviewConfig};
pub use error::{ConfigError, ReviewError, StepError, WorkflowError};
pub use fault::{FaultInjector, NoFaults, RandomFaults};
pub use orchestrator::{Persistence, WorkflowOrchestrator, WorkflowRun};
pub use service::{ClaimService, ManualDecision, SubmitReceipt};
