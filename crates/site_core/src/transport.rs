use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::protocol::ContactMessage;
use tracing::debug;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Delivers a validated contact message. The form's state machine only sees
/// `Ok`/`Err`, so a real mail or HTTP transport can replace the simulation.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn deliver(&self, message: ContactMessage) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Succeed,
    Fail,
}

/// Waits a fixed delay, then reports the configured outcome.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Succeed,
        }
    }

    pub fn failing(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Fail,
        }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl ContactTransport for SimulatedTransport {
    async fn deliver(&self, message: ContactMessage) -> Result<()> {
        debug!(
            submission_id = %message.submission_id,
            delay_ms = self.delay.as_millis() as u64,
            "simulating contact delivery"
        );
        tokio::time::sleep(self.delay).await;
        match self.outcome {
            SimulatedOutcome::Succeed => Ok(()),
            SimulatedOutcome::Fail => Err(anyhow!(
                "simulated delivery failure for submission {}",
                message.submission_id
            )),
        }
    }
}
