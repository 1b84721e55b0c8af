use thiserror::Error;

use crate::scene::domain::scene_node::SceneNode;
use crate::shared::bitmap::Bitmap;

#[derive(Error, Debug)]
pub enum RasterizeError {
    #[error("backend failed to rasterize node: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("node has zero renderable area")]
    ZeroArea,
}

/// Domain interface for rendering a scene node's current subtree into a
/// bitmap.
///
/// Contract: deterministic pixel contents for a given node state, synchronous,
/// potentially expensive. A call either completes or fails; there is no
/// partial capture. Implementations may be stateful, hence `&mut self`.
pub trait Rasterizer: Send {
    fn rasterize(&mut self, node: &SceneNode) -> Result<Bitmap, RasterizeError>;
}
