//! Failover across two delivery gateways.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::{
    error::GatewayError,
    gateway::DeliveryGateway,
    types::{DeliveryReceipt, OutboundEmail},
};

/// Gateway that tries a primary provider and falls over to a secondary.
///
/// Every failure of the primary triggers the fallback; the receipt's
/// `provider` field records which provider actually accepted the message.
/// When both fail, the secondary's error is returned (the primary's is
/// logged).
pub struct FallbackGateway {
    primary: Arc<dyn DeliveryGateway>,
    secondary: Arc<dyn DeliveryGateway>,
}

impl FallbackGateway {
    #[must_use]
    pub fn new(primary: Arc<dyn DeliveryGateway>, secondary: Arc<dyn DeliveryGateway>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl DeliveryGateway for FallbackGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, GatewayError> {
        match self.primary.send(email).await {
            Ok(receipt) => Ok(receipt),
            Err(error) => {
                warn!(
                    primary = self.primary.provider_name(),
                    secondary = self.secondary.provider_name(),
                    error = %error,
                    "Primary gateway failed, trying fallback"
                );
                self.secondary.send(email).await
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "fallback"
    }
}
