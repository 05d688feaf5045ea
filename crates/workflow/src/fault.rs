//! Fault injection
//!
//! The orchestrator consults a [`FaultInjector`] before every policy and risk
//! attempt. Production uses [`NoFaults`]; chaos mode uses [`RandomFaults`].

use async_trait::async_trait;
use claimflow_core::Step;
use rand::Rng;

use crate::error::StepError;

#[async_trait]
pub trait FaultInjector: Send + Sync {
    /// Return `Err` to make this attempt fail
    async fn before_attempt(&self, step: Step, attempt: u32) -> Result<(), StepError>;
}

/// Never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

#[async_trait]
impl FaultInjector for NoFaults {
    async fn before_attempt(&self, _step: Step, _attempt: u32) -> Result<(), StepError> {
        Ok(())
    }
}

/// Fails each attempt independently with a fixed probability
#[derive(Debug, Clone, Copy)]
pub struct RandomFaults {
    failure_rate: f64,
}

impl RandomFaults {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

#[async_trait]
impl FaultInjector for RandomFaults {
    async fn before_attempt(&self, step: Step, attempt: u32) -> Result<(), StepError> {
        if rand::thread_rng().gen_bool(self.failure_rate) {
            return Err(StepError::transient(step, attempt, "injected fault"));
        }
        Ok(())
    }
}
