//! Limit push-down capability.
//!
//! The optimizer side holds sources as `&mut dyn SupportsLimitPushDown` and
//! pushes a row ceiling into them before execution. Acceptance and rejection
//! are explicit results; nothing is inferred from side effects.

use crate::error::LateLimitPushError;
use tracing::{debug, warn};

/// Capability of a source to accept an external row-count ceiling.
pub trait SupportsLimitPushDown {
    /// Whether this source honors pushed limits.
    fn supports_limit_push_down(&self) -> bool;

    /// Propose a ceiling of `limit` rows.
    ///
    /// Before execution the effective ceiling becomes the minimum of every
    /// accepted limit and the configured total. Once execution has started
    /// the push is refused and the prior ceiling stands.
    fn apply_limit(&mut self, limit: u64) -> Result<(), LateLimitPushError>;

    /// Ceiling currently in force, as enforced during execution.
    fn current_limit(&self) -> Option<u64>;
}

/// Push `limit` into `source` if it supports it.
///
/// A refused push is logged and swallowed: the query still returns the right
/// rows because the runtime keeps its own limit above the scan. Returns
/// whether the source accepted the ceiling.
pub fn push_down_limit(source: &mut dyn SupportsLimitPushDown, limit: u64) -> bool {
    if !source.supports_limit_push_down() {
        debug!(limit, "Source does not support limit push-down");
        return false;
    }

    match source.apply_limit(limit) {
        Ok(()) => {
            debug!(
                limit,
                current_limit = ?source.current_limit(),
                "Pushed limit into source"
            );
            true
        }
        Err(e) => {
            warn!(error = %e, "Limit push-down rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that never honors limits.
    struct Opaque;

    impl SupportsLimitPushDown for Opaque {
        fn supports_limit_push_down(&self) -> bool {
            false
        }

        fn apply_limit(&mut self, _limit: u64) -> Result<(), LateLimitPushError> {
            panic!("apply_limit must not be called on a source without the capability");
        }

        fn current_limit(&self) -> Option<u64> {
            None
        }
    }

    /// Source that refuses every push.
    struct Started;

    impl SupportsLimitPushDown for Started {
        fn supports_limit_push_down(&self) -> bool {
            true
        }

        fn apply_limit(&mut self, limit: u64) -> Result<(), LateLimitPushError> {
            Err(LateLimitPushError {
                requested: limit,
                current_limit: None,
                rows_emitted: 1,
            })
        }

        fn current_limit(&self) -> Option<u64> {
            None
        }
    }

    #[test]
    fn test_skips_sources_without_capability() {
        assert!(!push_down_limit(&mut Opaque, 5));
    }

    #[test]
    fn test_swallows_rejection() {
        assert!(!push_down_limit(&mut Started, 5));
    }
}
