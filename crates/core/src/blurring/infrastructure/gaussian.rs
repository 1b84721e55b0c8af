/// Precompute a normalized 1D Gaussian kernel of the given size.
///
/// `kernel_size` must be odd and >= 1. Sigma is derived as `kernel_size / 6.0`
/// so virtually the whole curve falls inside the window.
pub fn kernel_weights(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = kernel_size as f64 / 6.0;
    let half = (kernel_size / 2) as f64;
    let mut weights: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights.iter().map(|&w| w as f32).collect()
}

/// Separable two-pass Gaussian blur over a whole interleaved buffer.
///
/// Samples outside the image clamp to the nearest edge pixel. `temp` is a
/// scratch buffer reused across calls in hot paths.
pub fn blur_in_place(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel_size / 2) as isize;

    temp.resize(width * height * channels, 0.0);

    // Horizontal pass: data -> temp
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1) as usize;
                    acc += data[(row + sx) * channels + c] as f32 * w;
                }
                temp[(row + x) * channels + c] = acc;
            }
        }
    }

    // Vertical pass: temp -> data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy =
                        (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                    acc += temp[(sy * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Shrink an image by an integer factor using area averaging.
///
/// Returns the scaled buffer and its dimensions. Trailing rows/columns that
/// do not fill a whole block average whatever pixels they cover.
pub fn downscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    factor: usize,
) -> (Vec<u8>, usize, usize) {
    debug_assert!(factor >= 1);
    let out_w = width.div_ceil(factor);
    let out_h = height.div_ceil(factor);
    let mut out = vec![0u8; out_w * out_h * channels];

    for oy in 0..out_h {
        let y0 = oy * factor;
        let y1 = (y0 + factor).min(height);
        for ox in 0..out_w {
            let x0 = ox * factor;
            let x1 = (x0 + factor).min(width);
            let count = ((y1 - y0) * (x1 - x0)) as u32;
            for c in 0..channels {
                let mut sum = 0u32;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += data[(y * width + x) * channels + c] as u32;
                    }
                }
                out[(oy * out_w + ox) * channels + c] = (sum / count) as u8;
            }
        }
    }
    (out, out_w, out_h)
}

/// Stretch an image back to `target_w` x `target_h` with nearest-neighbor
/// sampling. Good enough after a blur: the content has no high frequencies
/// left to alias.
pub fn upscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];
    for y in 0..target_h {
        let sy = (y * height / target_h).min(height - 1);
        for x in 0..target_w {
            let sx = (x * width / target_w).min(width - 1);
            let src = (sy * width + sx) * channels;
            let dst = (y * target_w + x) * channels;
            out[dst..dst + channels].copy_from_slice(&data[src..src + channels]);
        }
    }
    out
}
