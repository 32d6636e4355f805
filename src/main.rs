// What you SEE:
// • The mockup photo fills a 1000x1000 preview; the design is printed onto it,
//   warped by the displacement map and shaded with multiply blending.
// • Tab/Shift+Tab pick a parameter, Left/Right adjust it.
// • Drag with the left mouse button to move the design, scroll to scale it.
// • M toggles multiply, D toggles displacement, R resets, H hides the HUD. ESC quits.

mod cli;
mod controls;
mod draw;
mod error;
mod kernel;
mod layout;
mod loader;
mod params;
mod preview;
mod texture;
mod transform;
mod types;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::CliArgs;
use draw::Drawer;
use error::Error;
use preview::Scene;
use types::Canvas;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Error> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    /* --- Load all three images ---
       Visual: nothing yet; startup stops here if any image fails. */
    let sources = loader::load_sources(&args.source_paths())?;

    /* --- Fit the mockup into the canvas (once; images never change) --- */
    let canvas = Canvas::new(args.pixel_ratio)?;
    let fit = layout::solve(
        sources.mockup.dimensions(),
        sources.design.dimensions(),
        canvas.logical,
    );
    info!(
        case = ?fit.case,
        mockup_extent = ?fit.mockup_extent,
        mockup_size = ?fit.mockup_size,
        mockup_offset = ?fit.mockup_offset,
        design_area = ?fit.design_area,
        "solved layout"
    );
    let scene = Scene { sources, fit };

    /* --- Window at logical size; the backing buffer may be denser --- */
    let mut drawer = Drawer::new(
        "Mockup Warp",
        canvas.logical.width() as usize,
        canvas.logical.height() as usize,
        args.target_fps as usize,
    )?;

    preview::run(&mut drawer, &scene, canvas, args.initial_params())
}
