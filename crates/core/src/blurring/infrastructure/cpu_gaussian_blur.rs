use std::cell::RefCell;

use crate::blurring::domain::blur_filter::BlurFilter;
use crate::shared::bitmap::Bitmap;

use super::gaussian;

/// CPU frosted-glass blur using a separable Gaussian kernel.
///
/// Large kernels use a downscale-blur-upscale path so per-tick cost stays
/// bounded; a frosted pane is refreshed continuously and cannot afford a
/// full-resolution convolution at radius 50.
pub struct CpuGaussianBlur {
    kernel: Vec<f32>,
    scale: usize,
    small_kernel: Vec<f32>,
    blur_temp: RefCell<Vec<f32>>,
}

impl CpuGaussianBlur {
    /// `kernel_size` is forced odd and to at least 3.
    pub fn new(kernel_size: usize) -> Self {
        let kernel_size = kernel_size.max(3) | 1;
        let scale = (kernel_size / 50).max(1);
        let small_k = (kernel_size / scale) | 1; // ensure odd
        Self {
            kernel: gaussian::kernel_weights(kernel_size),
            scale,
            small_kernel: gaussian::kernel_weights(small_k),
            blur_temp: RefCell::new(Vec::new()),
        }
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel.len()
    }
}

impl BlurFilter for CpuGaussianBlur {
    fn blur(&self, bitmap: &mut Bitmap) {
        let w = bitmap.width() as usize;
        let h = bitmap.height() as usize;
        let channels = bitmap.channels() as usize;
        if w == 0 || h == 0 {
            return;
        }

        let mut temp = self.blur_temp.borrow_mut();
        let data = bitmap.data_mut();

        if self.scale <= 1 || h < self.scale * 2 || w < self.scale * 2 {
            gaussian::blur_in_place(data, w, h, channels, &self.kernel, &mut temp);
        } else {
            let (mut small, sw, sh) = gaussian::downscale(data, w, h, channels, self.scale);
            gaussian::blur_in_place(&mut small, sw, sh, channels, &self.small_kernel, &mut temp);
            let upscaled = gaussian::upscale(&small, sw, sh, channels, w, h);
            data.copy_from_slice(&upscaled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_bitmap(w: u32, h: u32) -> Bitmap {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Bitmap::new(data, w, h, 3)
    }

    fn spread(bitmap: &Bitmap) -> (u8, u8) {
        let min = *bitmap.data().iter().min().unwrap();
        let max = *bitmap.data().iter().max().unwrap();
        (min, max)
    }

    #[test]
    fn test_dimensions_are_preserved() {
        let mut bitmap = checker_bitmap(16, 12);
        CpuGaussianBlur::new(5).blur(&mut bitmap);
        assert_eq!(bitmap.width(), 16);
        assert_eq!(bitmap.height(), 12);
        assert_eq!(bitmap.data().len(), 16 * 12 * 3);
    }

    #[test]
    fn test_constant_image_is_unchanged() {
        let mut bitmap = Bitmap::new(vec![77u8; 8 * 8 * 3], 8, 8, 3);
        CpuGaussianBlur::new(9).blur(&mut bitmap);
        assert!(bitmap.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_blur_narrows_value_spread() {
        let mut bitmap = checker_bitmap(16, 16);
        let (min_before, max_before) = spread(&bitmap);
        CpuGaussianBlur::new(7).blur(&mut bitmap);
        let (min_after, max_after) = spread(&bitmap);

        assert!(min_after > min_before);
        assert!(max_after < max_before);
    }

    #[test]
    fn test_even_kernel_size_is_rounded_up_to_odd() {
        assert_eq!(CpuGaussianBlur::new(10).kernel_size(), 11);
        assert_eq!(CpuGaussianBlur::new(0).kernel_size(), 3);
    }

    #[test]
    fn test_large_kernel_uses_downscale_path() {
        // kernel 101 -> scale 2; output still matches input dimensions and
        // the checker is flattened toward gray.
        let mut bitmap = checker_bitmap(64, 64);
        CpuGaussianBlur::new(101).blur(&mut bitmap);
        assert_eq!(bitmap.data().len(), 64 * 64 * 3);
        let (min_after, max_after) = spread(&bitmap);
        assert!(max_after - min_after < 64);
    }

    #[test]
    fn test_tiny_bitmap_with_large_kernel_does_not_panic() {
        // Too small for the downscale path; falls back to the direct blur.
        let mut bitmap = checker_bitmap(3, 3);
        CpuGaussianBlur::new(101).blur(&mut bitmap);
        assert_eq!(bitmap.data().len(), 3 * 3 * 3);
    }

    #[test]
    fn test_filter_is_reusable_across_bitmaps() {
        let filter = CpuGaussianBlur::new(5);
        let mut a = checker_bitmap(8, 8);
        let mut b = checker_bitmap(20, 4);
        filter.blur(&mut a);
        filter.blur(&mut b); // scratch buffer resizes between calls
        assert_eq!(a.data().len(), 8 * 8 * 3);
        assert_eq!(b.data().len(), 20 * 4 * 3);
    }
}
