use crate::scene::domain::scene_node::{Paint, SceneNode};
use crate::shared::bitmap::Bitmap;
use crate::snapshot::domain::rasterizer::{RasterizeError, Rasterizer};

/// CPU rasterizer for the built-in scene model.
///
/// Pixel contents are a pure function of the node's paint and bounds, so
/// repeated captures of an unchanged node are byte-identical.
pub struct SceneRasterizer;

impl SceneRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SceneRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SceneRasterizer {
    fn rasterize(&mut self, node: &SceneNode) -> Result<Bitmap, RasterizeError> {
        let bounds = node.bounds();
        if bounds.is_empty() {
            return Err(RasterizeError::ZeroArea);
        }
        let (w, h) = (bounds.width as usize, bounds.height as usize);
        let mut data = vec![0u8; w * h * 3];

        match node.paint() {
            Paint::Solid(rgb) => {
                for pixel in data.chunks_exact_mut(3) {
                    pixel.copy_from_slice(&rgb);
                }
            }
            Paint::HorizontalGradient { from, to } => {
                for y in 0..h {
                    for x in 0..w {
                        let t = if w > 1 {
                            x as f32 / (w - 1) as f32
                        } else {
                            0.0
                        };
                        let offset = (y * w + x) * 3;
                        for c in 0..3 {
                            let v = from[c] as f32 + (to[c] as f32 - from[c] as f32) * t;
                            data[offset + c] = v.round() as u8;
                        }
                    }
                }
            }
            Paint::Checker {
                light,
                dark,
                cell,
                offset,
            } => {
                let cell = cell.max(1) as usize;
                let shift = offset as usize;
                for y in 0..h {
                    for x in 0..w {
                        let parity = ((x + shift) / cell + y / cell) % 2;
                        let rgb = if parity == 0 { light } else { dark };
                        let idx = (y * w + x) * 3;
                        data[idx..idx + 3].copy_from_slice(&rgb);
                    }
                }
            }
        }

        Ok(Bitmap::new(data, bounds.width, bounds.height, 3))
    }
}
