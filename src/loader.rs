// Loads the mockup, design and displacement images from disk.
// Visual expectation: nothing is drawn until all three have decoded; any
// failure aborts startup before the window opens.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;
use crate::kernel::Sources;
use crate::texture::Texture;
use crate::types::{Dimensions, ImageRole};

/// Where each source image lives.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub mockup: PathBuf,
    pub design: PathBuf,
    pub displacement: PathBuf,
}

/// Decode one image into an 8-bit RGBA texture.
pub fn load_texture(role: ImageRole, path: &Path) -> Result<Texture, Error> {
    // 1) Open + decode (format is inferred from the file contents/extension).
    let decoded = image::open(path).map_err(|source| Error::Load {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    // 2) Normalize to 8-bit RGBA regardless of the source layout.
    let rgba = decoded.to_rgba8();
    let (w, h) = rgba.dimensions();
    let dims = Dimensions::new(&format!("{role} image"), w, h)?;

    info!(%role, path = %path.display(), width = w, height = h, "loaded image");
    Ok(Texture::from_rgba(dims, rgba))
}

/// Decode all three images concurrently. The first failure wins; no partial set is returned.
pub fn load_sources(paths: &SourcePaths) -> Result<Sources, Error> {
    let (mockup, (design, displacement)) = rayon::join(
        || load_texture(ImageRole::Mockup, &paths.mockup),
        || {
            rayon::join(
                || load_texture(ImageRole::Design, &paths.design),
                || load_texture(ImageRole::Displacement, &paths.displacement),
            )
        },
    );

    Ok(Sources {
        mockup: mockup?,
        design: design?,
        displacement: displacement?,
    })
}
