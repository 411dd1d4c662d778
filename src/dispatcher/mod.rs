//! Batch dispatch orchestration
//!
//! The dispatcher partitions the input list into fixed-size groups, sends
//! each group's messages concurrently, waits a configured delay between
//! groups, and retries failed sends per message. Groups are strictly
//! sequential: a group's sends and retries all settle before the next
//! group starts.

mod send;

use std::sync::Arc;

use futures_util::{StreamExt, stream::FuturesUnordered};
use tracing::{debug, info};

use crate::{
    config::DispatchConfig,
    error::DispatchError,
    gateway::DeliveryGateway,
    types::{DispatchId, DispatchSummary, OutboundEmail},
};

/// Sends ordered lists of messages through a delivery gateway under
/// configured concurrency and retry limits.
///
/// The gateway is injected at construction so callers own client setup
/// and tests can substitute a scripted implementation.
pub struct BulkDispatcher {
    gateway: Arc<dyn DeliveryGateway>,
    config: DispatchConfig,
}

impl BulkDispatcher {
    #[must_use]
    pub fn new(gateway: Arc<dyn DeliveryGateway>, config: DispatchConfig) -> Self {
        Self { gateway, config }
    }

    /// Dispatch every item, returning a summary covering all of them.
    ///
    /// Resolves only after every item's retry loop has settled; per-item
    /// failures are reported in the summary, never as an error. There is
    /// no cancellation: once started, the call runs to completion.
    ///
    /// Within a group, outcomes are recorded in completion order, so the
    /// summary's result list does not necessarily follow input order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Configuration`] if the configuration is
    /// invalid; no sends are attempted in that case.
    pub async fn dispatch(
        &self,
        items: Vec<OutboundEmail>,
    ) -> Result<DispatchSummary, DispatchError> {
        self.config.validate()?;

        let dispatch_id = DispatchId::generate();
        let total = items.len();
        info!(
            dispatch_id = %dispatch_id,
            provider = self.gateway.provider_name(),
            total,
            groups = total.div_ceil(self.config.batch_size),
            batch_size = self.config.batch_size,
            "Starting bulk dispatch"
        );

        let mut results = Vec::with_capacity(total);
        let mut remaining = items;
        let mut group_index = 0usize;

        while !remaining.is_empty() {
            if group_index > 0 {
                tokio::time::sleep(self.config.batch_delay()).await;
            }

            let split = self.config.batch_size.min(remaining.len());
            let rest = remaining.split_off(split);
            let group = std::mem::replace(&mut remaining, rest);

            debug!(
                dispatch_id = %dispatch_id,
                group = group_index,
                size = group.len(),
                "Dispatching group"
            );

            let mut in_flight: FuturesUnordered<_> = group
                .into_iter()
                .map(|item| send::send_with_retry(self.gateway.as_ref(), item, &self.config))
                .collect();

            while let Some(outcome) = in_flight.next().await {
                results.push(outcome);
            }

            group_index += 1;
        }

        let summary = DispatchSummary::from_outcomes(dispatch_id, results);
        info!(
            dispatch_id = %dispatch_id,
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Bulk dispatch complete"
        );

        Ok(summary)
    }

    /// The configuration this dispatcher was built with.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }
}
