use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::scene::domain::scene_registry::{SceneRegistry, TargetId};
use crate::shared::bitmap::Bitmap;
use crate::snapshot::domain::rasterizer::{RasterizeError, Rasterizer};
use crate::snapshot::domain::snapshot_entry::SnapshotEntry;
use crate::snapshot::domain::snapshot_policy::SnapshotPolicy;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The target was destroyed, detached, or has zero area at call time.
    /// Caller error; the overlay should suppress its effect rather than
    /// show stale content.
    #[error("target {0:?} is not renderable")]
    InvalidTarget(TargetId),
    /// Backend failure, propagated unchanged. Not retried here: retrying a
    /// rendering failure on every tick would stall the UI thread in a loop.
    #[error(transparent)]
    Rasterization(#[from] RasterizeError),
}

/// Authoritative source of "the current snapshot" for any target.
///
/// Holds at most one entry per target and recaptures only when the entry is
/// absent or stale under the configured policy, so any number of overlays
/// observing the same target on one refresh tick cost a single
/// rasterization. Constructed once by the host and lent (`&mut`) to
/// consumers; exclusive access is what guarantees one capture per stale
/// entry without locks.
pub struct SnapshotManager {
    cache: HashMap<TargetId, SnapshotEntry>,
    rasterizer: Box<dyn Rasterizer>,
    policy: SnapshotPolicy,
}

impl SnapshotManager {
    pub fn new(rasterizer: Box<dyn Rasterizer>) -> Self {
        Self::with_policy(rasterizer, SnapshotPolicy::default())
    }

    pub fn with_policy(rasterizer: Box<dyn Rasterizer>, policy: SnapshotPolicy) -> Self {
        Self {
            cache: HashMap::new(),
            rasterizer,
            policy,
        }
    }

    /// Returns the current snapshot of `target`, rasterizing only if no
    /// valid cached capture exists.
    ///
    /// All callers between two invalidation boundaries receive the same
    /// `Arc<Bitmap>` instance. A capture failure leaves the previous entry
    /// as it was; the next tick retries naturally.
    pub fn snapshot(
        &mut self,
        scene: &SceneRegistry,
        target: TargetId,
    ) -> Result<Arc<Bitmap>, SnapshotError> {
        let Some(node) = scene.node(target) else {
            // Dead target: evict lazily. Silent cleanup, not an error path.
            if self.cache.remove(&target).is_some() {
                log::debug!("evicted snapshot entry for dead target {target:?}");
            }
            return Err(SnapshotError::InvalidTarget(target));
        };
        if !node.is_attached() || node.bounds().is_empty() {
            // The node may be reattached later; its entry stays.
            return Err(SnapshotError::InvalidTarget(target));
        }
        let bounds = node.bounds();

        if let Some(entry) = self.cache.get(&target) {
            if !entry.is_stale(bounds, &self.policy) {
                log::trace!(
                    "snapshot cache hit for {target:?} (generation {})",
                    entry.generation()
                );
                return Ok(Arc::clone(entry.bitmap()));
            }
        }

        let bitmap = Arc::new(self.rasterizer.rasterize(node)?);
        debug_assert_eq!(
            bitmap.bounds(),
            bounds,
            "rasterizer must produce a bitmap matching the node bounds"
        );
        let entry = self
            .cache
            .entry(target)
            .and_modify(|e| e.recapture(Arc::clone(&bitmap), bounds))
            .or_insert_with(|| SnapshotEntry::new(Arc::clone(&bitmap), bounds));
        log::debug!(
            "captured {target:?} generation {} ({}x{})",
            entry.generation(),
            bounds.width,
            bounds.height
        );
        Ok(bitmap)
    }

    /// Bypasses the cache for one call: always rasterizes, with the same
    /// liveness checks as `snapshot`. The cached entry is left untouched, so
    /// future staleness computation behaves as if this call never happened.
    pub fn force_snapshot(
        &mut self,
        scene: &SceneRegistry,
        target: TargetId,
    ) -> Result<Arc<Bitmap>, SnapshotError> {
        let Some(node) = scene.node(target) else {
            if self.cache.remove(&target).is_some() {
                log::debug!("evicted snapshot entry for dead target {target:?}");
            }
            return Err(SnapshotError::InvalidTarget(target));
        };
        if !node.is_attached() || node.bounds().is_empty() {
            return Err(SnapshotError::InvalidTarget(target));
        }
        let bitmap = Arc::new(self.rasterizer.rasterize(node)?);
        log::debug!("forced capture of {target:?}, cache entry untouched");
        Ok(bitmap)
    }

    /// External invalidation signal (typically one per refresh tick): marks
    /// exactly one entry stale. No-op for targets never captured.
    pub fn invalidate(&mut self, target: TargetId) {
        if let Some(entry) = self.cache.get_mut(&target) {
            entry.mark_stale();
        }
    }

    /// Marks every cached entry stale. Convenience for drivers that refresh
    /// the whole scene on one tick.
    pub fn invalidate_all(&mut self) {
        for entry in self.cache.values_mut() {
            entry.mark_stale();
        }
    }

    /// Sweep counterpart to the lazy per-lookup eviction: drops entries
    /// whose target no longer exists in the registry.
    pub fn evict_dead(&mut self, scene: &SceneRegistry) {
        let before = self.cache.len();
        self.cache.retain(|id, _| scene.is_live(*id));
        let evicted = before - self.cache.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} snapshot entries for dead targets");
        }
    }

    pub fn entry(&self, target: TargetId) -> Option<&SnapshotEntry> {
        self.cache.get(&target)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
