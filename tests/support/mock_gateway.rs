//! Scripted delivery gateway for exercising dispatch scenarios
//!
//! Behavior is scripted per recipient (keyed on the first `to` address):
//! always accept, fail the first N attempts then accept, or fail every
//! attempt. Attempt counts are tracked for verification.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use courier::{DeliveryGateway, DeliveryReceipt, GatewayError, OutboundEmail};

/// Scripted behavior for one recipient.
#[derive(Debug, Clone, Copy, Default)]
enum Script {
    /// Accept every attempt.
    #[default]
    Succeed,
    /// Fail the first N attempts, then accept.
    FailTimes(u32),
    /// Fail every attempt.
    AlwaysFail,
}

/// In-memory gateway with per-recipient scripted outcomes.
#[derive(Default)]
pub struct MockGateway {
    scripts: HashMap<String, Script>,
    default_script: Script,
    attempts: Mutex<HashMap<String, u32>>,
    total_calls: AtomicUsize,
}

impl MockGateway {
    /// Gateway that accepts everything on the first attempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that fails every attempt for every recipient.
    pub fn always_failing() -> Self {
        Self {
            default_script: Script::AlwaysFail,
            ..Self::default()
        }
    }

    /// Fail the first `count` attempts for `recipient`, then accept.
    #[must_use]
    pub fn with_failures(mut self, recipient: &str, count: u32) -> Self {
        self.scripts
            .insert(recipient.to_string(), Script::FailTimes(count));
        self
    }

    /// Fail every attempt for `recipient`.
    #[must_use]
    pub fn with_always_failing(mut self, recipient: &str) -> Self {
        self.scripts
            .insert(recipient.to_string(), Script::AlwaysFail);
        self
    }

    /// Total send calls across all recipients.
    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::Relaxed)
    }

    /// Send attempts observed for one recipient.
    pub fn attempts_for(&self, recipient: &str) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(recipient)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DeliveryGateway for MockGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, GatewayError> {
        let key = email.to.first().cloned().unwrap_or_default();

        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let entry = attempts.entry(key.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        self.total_calls.fetch_add(1, Ordering::Relaxed);

        let script = self
            .scripts
            .get(&key)
            .copied()
            .unwrap_or(self.default_script);

        match script {
            Script::Succeed => Ok(receipt(&key, attempt)),
            Script::FailTimes(count) if attempt > count => Ok(receipt(&key, attempt)),
            Script::FailTimes(_) | Script::AlwaysFail => Err(GatewayError::Unavailable(format!(
                "scripted failure for {key} (attempt {attempt})"
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn receipt(key: &str, attempt: u32) -> DeliveryReceipt {
    DeliveryReceipt {
        message_id: format!("mock-{key}-{attempt}"),
        provider: "mock",
    }
}
