//! Duration estimation helpers for UI feedback.
//!
//! These are rough, optimistic bounds for progress display ahead of a
//! dispatch call; correctness never depends on them.

use std::time::Duration;

use crate::config::DispatchConfig;

/// Assumed cost of one send, used by the optimistic estimate.
const PER_ITEM_COST_MS: u64 = 500;

/// Estimate how long dispatching `item_count` messages will take.
///
/// The estimate is `item_count * assumed-per-item-cost` plus one
/// inter-group delay per group boundary, and deliberately ignores
/// retries. Zero items means zero time.
#[must_use]
pub fn estimate_dispatch_duration(item_count: usize, config: &DispatchConfig) -> Duration {
    if item_count == 0 {
        return Duration::ZERO;
    }

    // Pure helper: clamp instead of erroring on a zero batch size, which
    // dispatch() itself rejects.
    let batch_size = config.batch_size.max(1);
    let groups = u64::try_from(item_count.div_ceil(batch_size)).unwrap_or(u64::MAX);
    let items = u64::try_from(item_count).unwrap_or(u64::MAX);

    let send_cost = items.saturating_mul(PER_ITEM_COST_MS);
    let pauses = (groups - 1).saturating_mul(config.batch_delay_ms);

    Duration::from_millis(send_cost.saturating_add(pauses))
}

/// Format a duration as a human-readable string.
///
/// Durations under a minute are rendered in seconds, anything longer in
/// whole minutes rounded up: `45s` becomes `"45 seconds"`, `90s` becomes
/// `"2 minutes"`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();

    if ms < 60_000 {
        let seconds = ms.div_ceil(1000);
        if seconds == 1 {
            "1 second".to_string()
        } else {
            format!("{seconds} seconds")
        }
    } else {
        let minutes = ms.div_ceil(60_000);
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    }
}
