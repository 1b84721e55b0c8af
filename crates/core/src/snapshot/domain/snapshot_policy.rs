/// Which conditions mark a cached snapshot stale.
///
/// The triggers are independent so hosts can decide what is authoritative:
/// a scroll-driven UI may rely on timer invalidation alone, a static layout
/// on bounds changes alone. Disabling a trigger suppresses recapture but the
/// underlying bookkeeping (the stale flag, recorded bounds) still happens,
/// so flipping policy at runtime behaves predictably.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotPolicy {
    /// Recapture when the target's bounds differ from those at last capture.
    pub recapture_on_bounds_change: bool,
    /// Recapture after an explicit `invalidate` signal for the target.
    pub recapture_on_invalidate: bool,
}

impl Default for SnapshotPolicy {
    fn default() -> Self {
        Self {
            recapture_on_bounds_change: true,
            recapture_on_invalidate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_both_triggers() {
        let policy = SnapshotPolicy::default();
        assert!(policy.recapture_on_bounds_change);
        assert!(policy.recapture_on_invalidate);
    }
}
