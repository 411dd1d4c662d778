//! Delivery gateway abstraction and implementations
//!
//! The gateway is the seam between the dispatcher and the outside world:
//! it accepts one message at a time and either returns a provider receipt
//! or a structured failure. Implementations are injected into the
//! dispatcher as `Arc<dyn DeliveryGateway>`, so tests and callers can
//! substitute their own transport.

mod console;
mod fallback;
mod http;

use async_trait::async_trait;

pub use console::ConsoleGateway;
pub use fallback::FallbackGateway;
pub use http::HttpGateway;

use crate::{
    error::GatewayError,
    types::{DeliveryReceipt, OutboundEmail},
};

/// A delivery provider that accepts one message at a time.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    /// Send a single message, returning the provider's receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] describing why the message was not
    /// accepted. Implementations must not panic; any internal failure is
    /// converted into an error variant.
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, GatewayError>;

    /// Short provider name for logging.
    fn provider_name(&self) -> &'static str;
}
