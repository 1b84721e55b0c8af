use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use frostglass_core::blurring::infrastructure::blur_factory::{create_blur, BlurStyle};
use frostglass_core::overlay::domain::frost_overlay::FrostOverlay;
use frostglass_core::overlay::infrastructure::interval_ticker::IntervalTicker;
use frostglass_core::scene::domain::scene_node::{Paint, SceneNode};
use frostglass_core::scene::domain::scene_registry::SceneRegistry;
use frostglass_core::shared::bitmap::Bitmap;
use frostglass_core::shared::bounds::Bounds;
use frostglass_core::shared::rect::Rect;
use frostglass_core::snapshot::domain::snapshot_manager::SnapshotManager;
use frostglass_core::snapshot::infrastructure::scene_rasterizer::SceneRasterizer;

/// Live frosted-glass demo: scrolls a synthetic scene under two frosted
/// panes and writes one PNG per refresh tick.
#[derive(Parser)]
#[command(name = "frostglass")]
struct Cli {
    /// Output directory for rendered frames.
    out: PathBuf,

    /// Scene width in pixels.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Scene height in pixels.
    #[arg(long, default_value = "360")]
    height: u32,

    /// Number of refresh ticks to render.
    #[arg(long, default_value = "30")]
    frames: usize,

    /// Refresh interval in milliseconds.
    #[arg(long, default_value = "33")]
    interval_ms: u64,

    /// Blur style: light, regular, or dark.
    #[arg(long, default_value = "regular")]
    blur_style: String,

    /// Explicit blur radius, overriding the style preset.
    #[arg(long)]
    radius: Option<u32>,

    /// Pixels the background scrolls per tick.
    #[arg(long, default_value = "4")]
    scroll_step: u32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let style = match cli.radius {
        Some(radius) => BlurStyle::Custom { radius },
        None => parse_blur_style(&cli.blur_style)?,
    };

    let mut scene = SceneRegistry::new();
    let background = scene.insert(SceneNode::new(
        Bounds::new(cli.width, cli.height),
        checker(0),
    ));

    let mut manager = SnapshotManager::new(Box::new(SceneRasterizer::new()));

    let mut overlays = vec![
        FrostOverlay::new(
            background,
            Rect::new(0, 0, cli.width, cli.height / 6),
            create_blur(style),
        ),
        FrostOverlay::new(
            background,
            Rect::new(cli.width / 4, cli.height / 3, cli.width / 2, cli.height / 3),
            create_blur(style),
        ),
    ];

    std::fs::create_dir_all(&cli.out)?;
    let ticker = IntervalTicker::start(Duration::from_millis(cli.interval_ms));

    for frame in 0..cli.frames {
        ticker.ticks().recv()?;

        // Live content moves, then the shared capture is declared out of
        // date; the first overlay to refresh pays for the one recapture.
        scene.set_paint(background, checker(frame as u32 * cli.scroll_step));
        manager.invalidate(background);

        for overlay in &mut overlays {
            if let Err(e) = overlay.refresh(&mut manager, &scene) {
                log::warn!("overlay suppressed on frame {frame}: {e}");
            }
        }

        // Cache hit: the base image is the capture the overlays refreshed
        // against.
        let base = manager.snapshot(&scene, background)?;
        let mut composed = (*base).clone();
        for overlay in &overlays {
            if let Some(image) = overlay.image() {
                paste(&mut composed, image, overlay.region());
            }
        }
        write_frame(&cli.out, frame, &composed)?;

        if (frame + 1) % 10 == 0 || frame + 1 == cli.frames {
            log::info!("Rendered {}/{} frames", frame + 1, cli.frames);
        }
    }

    ticker.stop();
    scene.remove(background);
    manager.evict_dead(&scene);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.width == 0 || cli.height == 0 {
        return Err("scene dimensions must be non-zero".into());
    }
    if cli.frames == 0 {
        return Err("--frames must be at least 1".into());
    }
    if cli.interval_ms == 0 {
        return Err("--interval-ms must be at least 1".into());
    }
    Ok(())
}

fn parse_blur_style(name: &str) -> Result<BlurStyle, String> {
    match name {
        "light" => Ok(BlurStyle::Light),
        "regular" => Ok(BlurStyle::Regular),
        "dark" => Ok(BlurStyle::Dark),
        other => Err(format!(
            "unknown blur style '{other}' (expected light, regular, or dark)"
        )),
    }
}

fn checker(offset: u32) -> Paint {
    Paint::Checker {
        light: [225, 228, 232],
        dark: [96, 104, 118],
        cell: 24,
        offset,
    }
}

/// Copy an overlay's blurred image into the composed frame at its region
/// origin. The image is already clamped to the target, so rows fit.
fn paste(dst: &mut Bitmap, src: &Bitmap, region: Rect) {
    let channels = dst.channels() as usize;
    let dst_w = dst.width() as usize;
    let (ox, oy) = (region.x as usize, region.y as usize);
    let (sw, sh) = (src.width() as usize, src.height() as usize);

    let dst_data = dst.data_mut();
    for row in 0..sh {
        let src_offset = row * sw * channels;
        let dst_offset = ((oy + row) * dst_w + ox) * channels;
        dst_data[dst_offset..dst_offset + sw * channels]
            .copy_from_slice(&src.data()[src_offset..src_offset + sw * channels]);
    }
}

fn write_frame(dir: &Path, frame: usize, bitmap: &Bitmap) -> Result<(), Box<dyn std::error::Error>> {
    let img = image::RgbImage::from_raw(bitmap.width(), bitmap.height(), bitmap.data().to_vec())
        .ok_or("Failed to create image from bitmap data")?;
    img.save(dir.join(format!("frame_{frame:04}.png")))?;
    Ok(())
}
