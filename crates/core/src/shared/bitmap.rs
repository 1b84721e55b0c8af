use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::bounds::Bounds;
use crate::shared::rect::Rect;

/// A rendered pixel buffer: contiguous RGB bytes in row-major order.
///
/// Captures are immutable once published; anything that changes pixels
/// (blurring, compositing) works on its own copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Bitmap {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// All-zero bitmap of the given size.
    pub fn blank(width: u32, height: u32, channels: u8) -> Self {
        let len = (width as usize) * (height as usize) * (channels as usize);
        Self::new(vec![0u8; len], width, height, channels)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Copy of the part of `rect` that lies inside this bitmap.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn crop(&self, rect: Rect) -> Option<Bitmap> {
        let clipped = rect.intersect(self.bounds())?;
        let channels = self.channels as usize;
        let src_w = self.width as usize;
        let (rx, ry) = (clipped.x as usize, clipped.y as usize);
        let (rw, rh) = (clipped.width as usize, clipped.height as usize);

        let mut out = vec![0u8; rw * rh * channels];
        for row in 0..rh {
            let src_offset = ((ry + row) * src_w + rx) * channels;
            let dst_offset = row * rw * channels;
            out[dst_offset..dst_offset + rw * channels]
                .copy_from_slice(&self.data[src_offset..src_offset + rw * channels]);
        }
        Some(Bitmap::new(
            out,
            clipped.width,
            clipped.height,
            self.channels,
        ))
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Bitmap data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Bitmap data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let bitmap = Bitmap::new(data.clone(), 2, 2, 3);
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.channels(), 3);
        assert_eq!(bitmap.data(), &data[..]);
    }

    #[test]
    fn test_blank_is_zeroed() {
        let bitmap = Bitmap::blank(3, 2, 3);
        assert_eq!(bitmap.data().len(), 18);
        assert!(bitmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bounds_matches_dimensions() {
        let bitmap = Bitmap::blank(100, 50, 3);
        assert_eq!(bitmap.bounds(), Bounds::new(100, 50));
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Bitmap::new(data, 2, 2, 3);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let bitmap = Bitmap::blank(4, 2, 3);
        let arr = bitmap.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut bitmap = Bitmap::blank(2, 2, 3);
        {
            let mut arr = bitmap.as_ndarray_mut();
            arr[[0, 1, 2]] = 128; // row=0, col=1, B channel
        }
        assert_eq!(bitmap.as_ndarray()[[0, 1, 2]], 128);
    }

    #[test]
    fn test_crop_interior_region() {
        // 4x4 RGB with a unique value per pixel row
        let mut data = Vec::new();
        for y in 0..4u8 {
            for x in 0..4u8 {
                data.extend_from_slice(&[y * 4 + x, 0, 0]);
            }
        }
        let bitmap = Bitmap::new(data, 4, 4, 3);

        let crop = bitmap.crop(Rect::new(1, 1, 2, 2)).unwrap();

        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        let arr = crop.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 5); // (1,1) of the source
        assert_eq!(arr[[1, 1, 0]], 10); // (2,2) of the source
    }

    #[test]
    fn test_crop_clamps_to_bitmap_edge() {
        let bitmap = Bitmap::blank(4, 4, 3);
        let crop = bitmap.crop(Rect::new(2, 2, 10, 10)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
    }

    #[test]
    fn test_crop_outside_returns_none() {
        let bitmap = Bitmap::blank(4, 4, 3);
        assert!(bitmap.crop(Rect::new(4, 0, 2, 2)).is_none());
        assert!(bitmap.crop(Rect::new(0, 10, 2, 2)).is_none());
    }

    #[test]
    fn test_crop_full_bitmap_is_identical() {
        let data: Vec<u8> = (0..12).collect();
        let bitmap = Bitmap::new(data, 2, 2, 3);
        let crop = bitmap.crop(Rect::new(0, 0, 2, 2)).unwrap();
        assert_eq!(crop, bitmap);
    }
}
