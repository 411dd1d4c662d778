//! Bulk transactional email dispatch
//!
//! This crate provides functionality to:
//! - Send ordered lists of messages through a delivery provider
//! - Bound instantaneous concurrency with fixed-size groups
//! - Pace sustained throughput with inter-group delays
//! - Retry failed sends a bounded number of times per message
//! - Aggregate per-message outcomes into a dispatch summary
//!
//! The delivery provider sits behind the [`DeliveryGateway`] trait and is
//! injected into [`BulkDispatcher`], so tests and callers can substitute
//! their own transport for the bundled HTTP implementation.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use courier::{BulkDispatcher, DispatchConfig, HttpGateway, OutboundEmail};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new("re_123", "Acme <notifications@acme.example>")?;
//! let dispatcher = BulkDispatcher::new(Arc::new(gateway), DispatchConfig::default());
//!
//! let invoices = vec![
//!     OutboundEmail::new("a@example.com", "Invoice ready", "<p>...</p>", "invoice")
//!         .with_item_id("inv-1001"),
//!     OutboundEmail::new("b@example.com", "Invoice ready", "<p>...</p>", "invoice")
//!         .with_item_id("inv-1002"),
//! ];
//!
//! let summary = dispatcher.dispatch(invoices).await?;
//! if !summary.all_successful() {
//!     eprintln!("{} of {} sends failed", summary.failed, summary.total);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod dispatcher;
mod error;
mod estimate;
pub mod gateway;
mod types;

pub use config::DispatchConfig;
pub use dispatcher::BulkDispatcher;
pub use error::{DispatchError, GatewayError};
pub use estimate::{estimate_dispatch_duration, format_duration};
pub use gateway::{ConsoleGateway, DeliveryGateway, FallbackGateway, HttpGateway};
pub use types::{
    DeliveryReceipt, DispatchId, DispatchSummary, OutboundEmail, SendOutcome, SendStatus, Tag,
};
