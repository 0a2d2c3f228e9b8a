//! Latency-driven weight policy.
//!
//! A hysteresis controller: fast responses restore full weight at once,
//! slow responses halve it, and the band in between changes nothing so
//! the weight does not oscillate at a single threshold.

use crate::registry::node::{INITIAL_WEIGHT, WEIGHT_FLOOR};

/// Round trips faster than this restore the node to full weight.
pub const RECOVER_BELOW_MS: u64 = 2_000;

/// Round trips slower than this halve the node's weight.
pub const DEGRADE_ABOVE_MS: u64 = 3_000;

/// New weight for a node after a successful round trip of `elapsed_ms`.
pub fn adjusted_weight(current: f64, elapsed_ms: u64) -> f64 {
    if elapsed_ms < RECOVER_BELOW_MS {
        INITIAL_WEIGHT
    } else if elapsed_ms > DEGRADE_ABOVE_MS {
        let halved = current / 2.0;
        if halved < WEIGHT_FLOOR {
            0.0
        } else {
            halved
        }
    } else {
        current
    }
}
