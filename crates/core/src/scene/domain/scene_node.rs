use crate::shared::bounds::Bounds;

/// Visual content of a scene node.
///
/// The `offset` on `Checker` shifts the pattern horizontally so callers can
/// scroll the content between refresh ticks, the way live UI underneath a
/// frosted pane would move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid([u8; 3]),
    HorizontalGradient { from: [u8; 3], to: [u8; 3] },
    Checker { light: [u8; 3], dark: [u8; 3], cell: u32, offset: u32 },
}

/// One renderable node of the scene graph.
///
/// Nodes are owned by the `SceneRegistry`, never by the snapshot cache;
/// a detached node still exists but is not renderable.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    bounds: Bounds,
    paint: Paint,
    attached: bool,
}

impl SceneNode {
    pub fn new(bounds: Bounds, paint: Paint) -> Self {
        Self {
            bounds,
            paint,
            attached: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }
}
