// Immutable RGBA textures with bilinear, clamp-to-edge sampling.
//
// UV convention: (0,0) is the bottom-left of the image, (1,1) the top-right,
// and texel centers sit at half-integer positions. Coordinates outside [0,1]
// read the nearest edge texel; there is no wrapping or border color.

use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};

use crate::types::Dimensions;

pub struct Texture {
    dims: Dimensions,
    img: RgbaImage, // decoded 8-bit texels, row 0 = top of the image
}

impl Texture {
    /// Wrap a decoded image. Callers validate the size first.
    pub fn from_rgba(dims: Dimensions, img: RgbaImage) -> Self {
        debug_assert_eq!(img.dimensions(), (dims.width(), dims.height()));
        Self { dims, img }
    }

    /// Build from normalized texels (row 0 = top), quantized to 8 bits per channel.
    pub fn from_texels(dims: Dimensions, texels: Vec<Vec4>) -> Self {
        debug_assert_eq!(texels.len(), (dims.width() * dims.height()) as usize);
        let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let img = RgbaImage::from_fn(dims.width(), dims.height(), |x, y| {
            let t = texels[(y * dims.width() + x) as usize];
            Rgba([to8(t.x), to8(t.y), to8(t.z), to8(t.w)])
        });
        Self::from_rgba(dims, img)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Texel at integer coordinates, clamped to the edge and normalized to [0,1].
    #[inline]
    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.clamp(0, self.dims.width() as i64 - 1) as u32;
        let y = y.clamp(0, self.dims.height() as i64 - 1) as u32;
        let [r, g, b, a] = self.img.get_pixel(x, y).0;
        Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }

    /// Bilinear sample at `uv` with clamp-to-edge addressing.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let w = self.dims.width() as f32;
        let h = self.dims.height() as f32;

        // Continuous texel space, y flipped so v=1 is the first stored row.
        let tx = uv.x * w - 0.5;
        let ty = (1.0 - uv.y) * h - 0.5;
        if !tx.is_finite() || !ty.is_finite() {
            return self.texel(0, 0);
        }

        let x0 = tx.floor();
        let y0 = ty.floor();
        let fx = tx - x0;
        let fy = ty - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}
