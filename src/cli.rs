// ============================================================================
// Command-line configuration (clap Derive)
// ============================================================================
//
// Usage examples:
//   mockup-warp --mockup shirt.jpg --design logo.png --displacement folds.png
//   mockup-warp -m shirt.jpg -d logo.png -x folds.png --scale 0.6 --rotation 3
//   mockup-warp -m shirt.jpg -d logo.png -x folds.png --pixel-ratio 2 --no-multiply

use std::path::PathBuf;

use clap::Parser;

use crate::loader::SourcePaths;
use crate::params::LiveParams;

/// Live preview of a design printed onto a mockup photo.
#[derive(Parser, Debug)]
#[command(
    name = "mockup-warp",
    about = "Composite a design onto a mockup with displacement warping",
    long_about = "Opens a preview window that composites a design image onto a mockup\n\
                  photo, warped by a displacement map. Controls:\n  \
                  Tab / Shift+Tab  select parameter      Left / Right  adjust\n  \
                  M  toggle multiply   D  toggle displacement   R  reset\n  \
                  Drag  move design    Wheel  scale    H  toggle HUD    Esc  quit"
)]
pub struct CliArgs {
    /// Mockup photograph (e.g. a t-shirt photo).
    #[arg(short, long, value_name = "FILE")]
    pub mockup: PathBuf,

    /// Design image; its alpha channel decides coverage.
    #[arg(short, long, value_name = "FILE")]
    pub design: PathBuf,

    /// Displacement map aligned with the mockup (red = x, green = y).
    #[arg(short = 'x', long, value_name = "FILE")]
    pub displacement: PathBuf,

    /// Physical pixels per logical canvas pixel.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub pixel_ratio: u32,

    /// Frames per second the preview is paced to.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=240))]
    pub target_fps: u64,

    /// Start with multiply blending off (straight alpha blend).
    #[arg(long)]
    pub no_multiply: bool,

    /// Start with displacement warping off.
    #[arg(long)]
    pub no_displacement: bool,

    /// Displacement strength, 0 to 0.02.
    #[arg(long, default_value_t = 0.012, allow_negative_numbers = true)]
    pub displacement_intensity: f32,

    /// Darkening applied under the design in multiply mode, -0.5 to 0.5.
    #[arg(long, default_value_t = -0.15, allow_negative_numbers = true)]
    pub multiply_intensity: f32,

    /// Multiply-mode opacity, 0 to 1.
    #[arg(long, default_value_t = 0.95)]
    pub blend_opacity: f32,

    /// Design rotation in degrees, -10 to 10.
    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    pub rotation: f32,

    /// Horizontal design offset in canvas pixels, -200 to 200.
    #[arg(long, default_value_t = 17.0, allow_negative_numbers = true)]
    pub offset_x: f32,

    /// Vertical design offset in canvas pixels, -200 to 200.
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    pub offset_y: f32,

    /// Design scale as a fraction of its available area, 0 to 1.
    #[arg(long, default_value_t = 0.45)]
    pub scale: f32,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            mockup: self.mockup.clone(),
            design: self.design.clone(),
            displacement: self.displacement.clone(),
        }
    }

    /// Starting parameters, clamped the same way the controls clamp edits.
    pub fn initial_params(&self) -> LiveParams {
        LiveParams {
            multiply_enabled: !self.no_multiply,
            displacement_enabled: !self.no_displacement,
            displacement_intensity: self.displacement_intensity,
            multiply_intensity: self.multiply_intensity,
            blend_opacity: self.blend_opacity,
            rotation_degrees: self.rotation,
            offset_x_pixels: self.offset_x,
            offset_y_pixels: self.offset_y,
            scale: self.scale,
        }
        .clamped()
    }
}
