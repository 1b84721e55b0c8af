use std::sync::Arc;
use std::time::Instant;

use crate::shared::bitmap::Bitmap;
use crate::shared::bounds::Bounds;
use crate::snapshot::domain::snapshot_policy::SnapshotPolicy;

/// One cached capture of a target.
///
/// Lifecycle per target: absent ("empty") until the first capture, then
/// valid until an invalidation trigger fires, then stale until recaptured.
/// The bitmap always matches `bounds` as recorded at the most recent
/// capture; the entry never holds a half-written bitmap because a capture
/// is swapped in whole.
#[derive(Clone, Debug)]
pub struct SnapshotEntry {
    bitmap: Arc<Bitmap>,
    bounds: Bounds,
    generation: u64,
    captured_at: Instant,
    stale: bool,
}

impl SnapshotEntry {
    pub(crate) fn new(bitmap: Arc<Bitmap>, bounds: Bounds) -> Self {
        Self {
            bitmap,
            bounds,
            generation: 1,
            captured_at: Instant::now(),
            stale: false,
        }
    }

    /// Swap in a fresh capture. Clears staleness, records the new bounds,
    /// bumps the generation. A single recapture satisfies every trigger that
    /// fired since the last one.
    pub(crate) fn recapture(&mut self, bitmap: Arc<Bitmap>, bounds: Bounds) {
        self.bitmap = bitmap;
        self.bounds = bounds;
        self.generation += 1;
        self.captured_at = Instant::now();
        self.stale = false;
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Whether this entry needs recapture given the target's current bounds.
    pub(crate) fn is_stale(&self, current_bounds: Bounds, policy: &SnapshotPolicy) -> bool {
        if policy.recapture_on_invalidate && self.stale {
            return true;
        }
        policy.recapture_on_bounds_change && self.bounds != current_bounds
    }

    pub fn bitmap(&self) -> &Arc<Bitmap> {
        &self.bitmap
    }

    /// Bounds of the target at the time of the most recent capture.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// 1 after the first capture, incremented on every recapture.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    pub fn is_marked_stale(&self) -> bool {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(w: u32, h: u32) -> SnapshotEntry {
        SnapshotEntry::new(Arc::new(Bitmap::blank(w, h, 3)), Bounds::new(w, h))
    }

    #[test]
    fn test_fresh_entry_is_valid() {
        let e = entry(100, 100);
        assert_eq!(e.generation(), 1);
        assert!(!e.is_marked_stale());
        assert!(!e.is_stale(Bounds::new(100, 100), &SnapshotPolicy::default()));
    }

    #[test]
    fn test_mark_stale_triggers_recapture() {
        let mut e = entry(100, 100);
        e.mark_stale();
        assert!(e.is_stale(Bounds::new(100, 100), &SnapshotPolicy::default()));
    }

    #[test]
    fn test_bounds_change_triggers_recapture() {
        let e = entry(100, 100);
        assert!(e.is_stale(Bounds::new(120, 100), &SnapshotPolicy::default()));
    }

    #[test]
    fn test_recapture_clears_every_trigger_at_once() {
        // Invalidation signal and bounds change in the same tick: one
        // recapture satisfies both.
        let mut e = entry(100, 100);
        e.mark_stale();
        let new_bounds = Bounds::new(120, 100);
        assert!(e.is_stale(new_bounds, &SnapshotPolicy::default()));

        e.recapture(Arc::new(Bitmap::blank(120, 100, 3)), new_bounds);

        assert_eq!(e.generation(), 2);
        assert!(!e.is_stale(new_bounds, &SnapshotPolicy::default()));
    }

    #[test]
    fn test_policy_can_ignore_invalidation() {
        let mut e = entry(100, 100);
        e.mark_stale();
        let policy = SnapshotPolicy {
            recapture_on_invalidate: false,
            ..SnapshotPolicy::default()
        };
        assert!(!e.is_stale(Bounds::new(100, 100), &policy));
        // The flag itself is still recorded.
        assert!(e.is_marked_stale());
    }

    #[test]
    fn test_policy_can_ignore_bounds_change() {
        let e = entry(100, 100);
        let policy = SnapshotPolicy {
            recapture_on_bounds_change: false,
            ..SnapshotPolicy::default()
        };
        assert!(!e.is_stale(Bounds::new(120, 100), &policy));
    }

    #[test]
    fn test_generation_counts_recaptures() {
        let mut e = entry(10, 10);
        for expected in 2..5 {
            e.recapture(Arc::new(Bitmap::blank(10, 10, 3)), Bounds::new(10, 10));
            assert_eq!(e.generation(), expected);
        }
    }
}
