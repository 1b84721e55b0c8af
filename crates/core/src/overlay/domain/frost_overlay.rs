use thiserror::Error;

use crate::blurring::domain::blur_filter::BlurFilter;
use crate::scene::domain::scene_registry::{SceneRegistry, TargetId};
use crate::shared::bitmap::Bitmap;
use crate::shared::rect::Rect;
use crate::snapshot::domain::snapshot_manager::{SnapshotError, SnapshotManager};

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("overlay region {0:?} lies outside target {1:?}")]
    RegionOutsideTarget(Rect, TargetId),
}

/// One frosted pane over a region of a target.
///
/// On each refresh the overlay crops its region out of the shared snapshot
/// and blurs the crop. Any failure puts the overlay into the defined
/// "no effect rendered" state (`image()` is `None`) instead of showing
/// stale or corrupt content; the error is returned, never swallowed.
pub struct FrostOverlay {
    target: TargetId,
    region: Rect,
    blur: Box<dyn BlurFilter>,
    image: Option<Bitmap>,
}

impl FrostOverlay {
    pub fn new(target: TargetId, region: Rect, blur: Box<dyn BlurFilter>) -> Self {
        Self {
            target,
            region,
            blur,
            image: None,
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// Move or resize the pane. Takes effect at the next refresh; the shared
    /// snapshot cache is not touched.
    pub fn set_region(&mut self, region: Rect) {
        self.region = region;
    }

    /// The current blurred image, or `None` while the effect is suppressed.
    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// Re-derive the blurred image from the target's current snapshot.
    ///
    /// Several overlays refreshing against the same target on one tick share
    /// a single capture; each pays only for its own crop and blur.
    pub fn refresh(
        &mut self,
        manager: &mut SnapshotManager,
        scene: &SceneRegistry,
    ) -> Result<(), OverlayError> {
        let snapshot = match manager.snapshot(scene, self.target) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.image = None;
                return Err(e.into());
            }
        };
        match snapshot.crop(self.region) {
            Some(mut crop) => {
                self.blur.blur(&mut crop);
                self.image = Some(crop);
                Ok(())
            }
            None => {
                // Region entirely outside the target: nothing to frost.
                self.image = None;
                Err(OverlayError::RegionOutsideTarget(self.region, self.target))
            }
        }
    }
}
