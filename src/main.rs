//! Camera Preview CLI
//!
//! Command-line demo for the camera preview binding library. Binds a
//! preview surface against a mock registry (or real hardware with the
//! `camera` feature) and reports frame arrival, standing in for the
//! renderer that would normally consume the surface.

use camera_preview::{
    AttachMode, CameraBinder, DeviceRegistry, FileConfig, MockRegistry, ResolutionPreset,
    SurfaceSize,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "camera-preview", version, about = "Live camera preview binding demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefer the front-facing camera.
    #[arg(long, conflicts_with = "back")]
    front: bool,

    /// Prefer the back-facing camera.
    #[arg(long)]
    back: bool,

    /// Bind a specific device by identifier instead of scanning by facing.
    #[arg(long)]
    device: Option<String>,

    /// Preview surface width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Preview surface height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// How the consumer would attach the surface (overlay or material).
    #[arg(long, value_parser = parse_attach)]
    attach: Option<AttachMode>,

    /// Capture resolution preset (qvga, vga, hd720).
    #[arg(long, value_parser = parse_preset)]
    preset: Option<ResolutionPreset>,

    /// Number of new frames to observe before exiting.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Run until interrupted instead of a fixed frame count.
    #[arg(long)]
    continuous: bool,

    /// Use real camera hardware instead of the mock registry.
    #[cfg(feature = "camera")]
    #[arg(long)]
    native: bool,
}

fn parse_attach(value: &str) -> Result<AttachMode, String> {
    match value {
        "overlay" => Ok(AttachMode::Overlay),
        "material" => Ok(AttachMode::Material),
        other => Err(format!("unknown attach mode: {other} (expected overlay or material)")),
    }
}

fn parse_preset(value: &str) -> Result<ResolutionPreset, String> {
    match value {
        "qvga" => Ok(ResolutionPreset::Qvga),
        "vga" => Ok(ResolutionPreset::Vga),
        "hd720" => Ok(ResolutionPreset::Hd720),
        other => Err(format!("unknown preset: {other} (expected qvga, vga, or hd720)")),
    }
}

#[cfg_attr(not(feature = "camera"), allow(unused_variables))]
fn build_registry(args: &Args) -> Box<dyn DeviceRegistry> {
    #[cfg(feature = "camera")]
    if args.native {
        info!("Using native camera registry");
        return Box::new(camera_preview::NativeRegistry::new());
    }
    info!("Using mock camera registry");
    Box::new(MockRegistry::with_default_cameras())
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Camera Preview v{}", camera_preview::VERSION);

    // Start from the config file (or defaults), then apply CLI overrides
    let mut config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    if args.front {
        config.preview.prefer_front = true;
    }
    if args.back {
        config.preview.prefer_front = false;
    }
    if let Some(width) = args.width {
        config.preview.surface_width = width;
    }
    if let Some(height) = args.height {
        config.preview.surface_height = height;
    }
    if let Some(attach) = args.attach {
        config.preview.attach = attach;
    }
    if let Some(preset) = args.preset {
        config.session.preset = preset;
    }

    let target_size =
        match SurfaceSize::new(config.preview.surface_width, config.preview.surface_height) {
            Ok(size) => size,
            Err(e) => {
                eprintln!("Invalid surface size: {}", e);
                std::process::exit(1);
            }
        };

    let binder =
        CameraBinder::new(build_registry(&args)).with_session_config(config.session.clone());

    let surface = match &args.device {
        Some(id) => binder.bind_device(id, target_size),
        None => binder.bind_preview_surface(config.preview.prefer_front, target_size),
    };
    let surface = match surface {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to bind preview surface: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        device = surface.device_id(),
        size = %surface.size(),
        attach = %config.preview.attach,
        "Preview surface bound"
    );
    match config.preview.attach {
        AttachMode::Material => info!("Renderer would feed this surface into a material slot"),
        AttachMode::Overlay => info!("Renderer would composite this surface over the view"),
    }

    let stop = Arc::new(AtomicBool::new(false));
    if args.continuous {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst)) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
        info!("Running until interrupted (Ctrl-C to stop)");
    }

    // Stand-in for the renderer: poll the surface and report new frames
    let mut seen = 0u32;
    let mut last_sequence = 0u64;
    while !stop.load(Ordering::SeqCst) {
        match surface.latest_frame() {
            Some(frame) if frame.sequence() != last_sequence => {
                last_sequence = frame.sequence();
                seen += 1;
                if seen == 1 {
                    info!(
                        "First frame arrived: {}x{} ({} channels)",
                        frame.width(),
                        frame.height(),
                        frame.channels()
                    );
                }
            }
            Some(_) => {}
            None => {
                let fill = surface.fill_color();
                info!(
                    "No frame yet; showing fill color #{:02x}{:02x}{:02x}",
                    fill.r, fill.g, fill.b
                );
            }
        }

        if !args.continuous && seen >= args.frames {
            break;
        }
        if !surface.is_live() {
            warn!("Capture session stopped unexpectedly");
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    surface.stop();
    info!(
        "Done. Observed {} frames (last sequence {})",
        seen, last_sequence
    );
}
