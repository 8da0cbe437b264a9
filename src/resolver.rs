//! Date-to-height resolution.
//!
//! Finds the greatest height whose block timestamp is at or before the
//! target, using binary search over `[0, current_height()]`. This costs
//! O(log2 height) round trips and needs nothing beyond standard JSON-RPC.
//! Some nodes offer a native block-by-timestamp lookup; at exact-timestamp
//! ties that lookup and this search may pick different blocks among equals,
//! so it is deliberately not used as a fast path.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::reader::ChainReader;

/// Resolves `target` (Unix seconds) to the greatest block height whose
/// timestamp is `<= target`.
///
/// Targets before the genesis timestamp resolve to height 0. Targets at or
/// after the tip's timestamp resolve to the current tip. When a probed
/// block's timestamp equals the target the search returns that block
/// immediately; among blocks sharing a timestamp the pick is deterministic
/// but not necessarily the leftmost.
pub async fn resolve<R>(reader: &R, target: u64) -> crate::Result<u64>
where
    R: ChainReader + ?Sized,
{
    let tip = reader.current_height().await?;

    let mut low = 0u64;
    let mut high = tip;
    let mut best: Option<u64> = None;

    while low <= high {
        let mid = low + (high - low) / 2;

        // A pruned height makes any answer unreliable, so the whole
        // resolution fails rather than narrowing around the gap.
        let block = reader
            .block_at(mid)
            .await?
            .ok_or(crate::Error::BlockUnavailable(mid))?;

        debug!(
            height = mid,
            timestamp = block.timestamp,
            target,
            "probed block"
        );

        match block.timestamp.cmp(&target) {
            Ordering::Equal => {
                info!(height = mid, target, "resolved timestamp to block");
                return Ok(mid);
            }
            Ordering::Less => {
                best = Some(mid);
                low = mid + 1;
            }
            Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
        }
    }

    // No sampled block at or before the target means the target predates
    // genesis; that is height 0, not an error.
    let height = best.unwrap_or(0);
    info!(height, target, "resolved timestamp to block");
    Ok(height)
}
