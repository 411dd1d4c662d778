//! Per-message send wrapper and retry loop.

use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    config::DispatchConfig,
    error::GatewayError,
    gateway::DeliveryGateway,
    types::{DeliveryReceipt, OutboundEmail, SendOutcome, SendStatus},
};

/// Run the retry loop for one message until it is accepted or its
/// attempts are exhausted.
///
/// Always resolves to an outcome, never an error: gateway failures are
/// captured and either retried or folded into the terminal result. Every
/// failure takes the same retry path regardless of whether
/// [`GatewayError`] classifies it as permanent.
pub(crate) async fn send_with_retry(
    gateway: &dyn DeliveryGateway,
    item: OutboundEmail,
    config: &DispatchConfig,
) -> SendOutcome {
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match send_once(gateway, &item).await {
            Ok(receipt) => {
                debug!(
                    to = ?item.to,
                    attempts,
                    message_id = %receipt.message_id,
                    provider = receipt.provider,
                    "Message accepted"
                );
                return finalize(
                    item,
                    SendStatus::Delivered {
                        message_id: receipt.message_id,
                    },
                    attempts,
                );
            }
            Err(error) => {
                if attempts > config.max_retries {
                    warn!(
                        to = ?item.to,
                        attempts,
                        error = %error,
                        "Message failed, attempts exhausted"
                    );
                    return finalize(
                        item,
                        SendStatus::Failed {
                            error: error.to_string(),
                        },
                        attempts,
                    );
                }

                warn!(
                    to = ?item.to,
                    attempt = attempts,
                    error = %error,
                    retry_delay_ms = config.retry_delay_ms,
                    "Send attempt failed, will retry"
                );
                tokio::time::sleep(config.retry_delay()).await;
            }
        }
    }
}

/// Send one message through the gateway.
///
/// A message with no recipients fails without a network call; everything
/// else is one outbound provider request.
async fn send_once(
    gateway: &dyn DeliveryGateway,
    item: &OutboundEmail,
) -> Result<DeliveryReceipt, GatewayError> {
    if item.to.is_empty() {
        return Err(GatewayError::InvalidRecipient(
            "message has no recipients".to_string(),
        ));
    }

    gateway.send(item).await
}

fn finalize(item: OutboundEmail, status: SendStatus, attempts: u32) -> SendOutcome {
    SendOutcome {
        to: item.to,
        item_id: item.item_id,
        status,
        attempts,
        completed_at: Utc::now(),
    }
}
