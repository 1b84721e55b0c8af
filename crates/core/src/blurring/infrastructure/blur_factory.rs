use crate::blurring::domain::blur_filter::BlurFilter;
use crate::blurring::infrastructure::cpu_gaussian_blur::CpuGaussianBlur;

/// Frosted-glass presets. Radii follow the classic visual-effect styles;
/// `Custom` takes an explicit blur radius in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurStyle {
    Light,
    Regular,
    Dark,
    Custom { radius: u32 },
}

impl BlurStyle {
    pub fn radius(&self) -> u32 {
        match self {
            BlurStyle::Light => 8,
            BlurStyle::Regular => 50,
            BlurStyle::Dark => 25,
            BlurStyle::Custom { radius } => *radius,
        }
    }
}

/// Build the blur filter for a style. Kernel size is `2 * radius + 1`.
pub fn create_blur(style: BlurStyle) -> Box<dyn BlurFilter> {
    let radius = style.radius().max(1) as usize;
    let kernel_size = radius * 2 + 1;
    log::info!("Using CPU Gaussian blur for {style:?} (kernel_size={kernel_size})");
    Box::new(CpuGaussianBlur::new(kernel_size))
}
