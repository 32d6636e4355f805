// Core types shared by the loader, the layout solver and the raster pass.
use std::fmt;

use crate::error::Error;

/// Logical canvas edge in texels (reference configuration is 1000x1000).
pub const CANVAS_SIZE: u32 = 1000;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // physical width of the raster (pixels)
    pub height: usize,     // physical height of the raster (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Width/height pair that is known to have a non-zero area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Rejects zero-area sizes; the layout solver never sees them.
    pub fn new(what: &str, width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroArea { what: what.to_string(), width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Which of the three source images a texture plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Mockup,
    Design,
    Displacement,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageRole::Mockup => "mockup",
            ImageRole::Design => "design",
            ImageRole::Displacement => "displacement",
        };
        f.write_str(name)
    }
}

/// Output raster: fixed logical size, optionally backed by a denser physical buffer.
/// The pixel ratio never changes UV coordinates, only how many samples are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub logical: Dimensions,
    pub pixel_ratio: u32,
}

impl Canvas {
    pub fn new(pixel_ratio: u32) -> Result<Self, Error> {
        let logical = Dimensions::new("canvas", CANVAS_SIZE, CANVAS_SIZE)?;
        Ok(Self { logical, pixel_ratio: pixel_ratio.max(1) })
    }

    /// Size of the backing store the raster pass writes into.
    pub fn physical_size(&self) -> (usize, usize) {
        (
            (self.logical.width() * self.pixel_ratio) as usize,
            (self.logical.height() * self.pixel_ratio) as usize,
        )
    }

    pub fn frame_buffer(&self) -> FrameBuffer {
        let (w, h) = self.physical_size();
        FrameBuffer::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_is_rejected() {
        assert!(Dimensions::new("mockup image", 0, 10).is_err());
        assert!(Dimensions::new("mockup image", 10, 0).is_err());
        assert!(Dimensions::new("mockup image", 1, 1).is_ok());
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        let d = Dimensions::new("design image", 500, 1000).unwrap();
        assert_eq!(d.aspect_ratio(), 0.5);
    }

    #[test]
    fn pixel_ratio_scales_only_the_backing_store() {
        let canvas = Canvas::new(2).unwrap();
        assert_eq!(canvas.logical.width(), 1000);
        assert_eq!(canvas.physical_size(), (2000, 2000));
        let fb = canvas.frame_buffer();
        assert_eq!(fb.pixels.len(), 2000 * 2000);
    }

    #[test]
    fn pixel_ratio_zero_falls_back_to_one() {
        let canvas = Canvas::new(0).unwrap();
        assert_eq!(canvas.physical_size(), (1000, 1000));
    }
}
