//! Development gateway that logs messages instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::{
    error::GatewayError,
    gateway::DeliveryGateway,
    types::{DeliveryReceipt, OutboundEmail},
};

/// Gateway for development and dry runs: performs no network I/O, logs
/// each message, and fabricates a receipt so callers exercise the full
/// dispatch path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleGateway;

#[async_trait]
impl DeliveryGateway for ConsoleGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, GatewayError> {
        let message_id = format!("console-{}", ulid::Ulid::new());

        info!(
            to = ?email.to,
            subject = %email.subject,
            category = %email.category,
            message_id = %message_id,
            "Email logged instead of sent"
        );

        Ok(DeliveryReceipt {
            message_id,
            provider: self.provider_name(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "console"
    }
}
