// The compositing kernel: one pure evaluation per output pixel.
// Visual: the design is warped by the displacement map and printed onto the mockup.

use glam::{Vec2, Vec3, Vec4};
use rayon::prelude::*;

use crate::error::Error;
use crate::texture::Texture;
use crate::transform::Uniforms;
use crate::types::FrameBuffer;

/// The three immutable source images.
pub struct Sources {
    pub mockup: Texture,
    pub design: Texture,
    pub displacement: Texture,
}

/// Rotate `uv` clockwise about `(0.5, 0.5)` given `(sin, cos)` of the angle.
#[inline]
fn rotate_uv(uv: Vec2, (s, c): (f32, f32)) -> Vec2 {
    let d = uv - Vec2::splat(0.5);
    Vec2::new(c * d.x + s * d.y, c * d.y - s * d.x) + Vec2::splat(0.5)
}

/// Where the design is sampled for canvas coordinate `uv`, given the
/// displacement vector already read for that pixel.
#[inline]
pub fn design_uv(uv: Vec2, displacement: Vec2, u: &Uniforms) -> Vec2 {
    let translated = uv - u.offset;
    let scaled = (translated - Vec2::splat(0.5)) / u.design_scale + Vec2::splat(0.5);
    let rotated = rotate_uv(scaled, u.rotation_sin_cos);
    // Map channels are in [0,1], so the shift spans [-intensity, 0] per axis.
    rotated + displacement * u.displacement_intensity - Vec2::splat(u.displacement_intensity)
}

/// Blend one mockup/design pair. Output alpha is always 1.
#[inline]
pub fn blend(mockup: Vec4, design: Vec4, u: &Uniforms) -> Vec4 {
    let m = mockup.truncate();
    let d = design.truncate();
    let a = design.w;
    let rgb = if u.multiply {
        let blended = m * (1.0 - a) + (m - Vec3::splat(u.multiply_intensity)) * d * a;
        blended * u.blend_opacity + m * (1.0 - u.blend_opacity)
    } else {
        m * (1.0 - a) + d * a
    };
    rgb.extend(1.0)
}

/// Color at canvas coordinate `uv` (origin bottom-left).
#[inline]
pub fn shade(uv: Vec2, u: &Uniforms, src: &Sources) -> Vec4 {
    let mockup_uv = uv * u.mockup_size + u.mockup_offset;

    let displacement = if u.displacement {
        let tex = src.displacement.sample(mockup_uv);
        Vec2::new(tex.x, tex.y)
    } else {
        Vec2::ZERO
    };

    let mockup = src.mockup.sample(mockup_uv);
    let design = src.design.sample(design_uv(uv, displacement, u));
    blend(mockup, design, u)
}

/// Pack a linear [0,1] color into 0x00RRGGBB for minifb.
#[inline]
pub fn pack_rgb(c: Vec4) -> u32 {
    let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to8(c.x) << 16) | (to8(c.y) << 8) | to8(c.z)
}

/// UV of the center of physical pixel (`x`, `row`); row 0 is the top of the screen.
#[inline]
pub fn pixel_uv(x: usize, row: usize, width: usize, height: usize) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (row as f32 + 0.5) / height as f32,
    )
}

/// One full raster pass over `dst`. Rows are shaded in parallel; pixels share nothing.
pub fn rasterize(u: &Uniforms, src: &Sources, dst: &mut FrameBuffer) -> Result<(), Error> {
    let (w, h) = (dst.width, dst.height);
    if dst.pixels.len() != w * h {
        return Err(Error::BufferMismatch {
            want_w: w,
            want_h: h,
            got_w: dst.pixels.len() / h.max(1),
            got_h: h,
        });
    }
    if w == 0 || h == 0 {
        return Ok(());
    }

    dst.pixels
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(row, line)| {
            for (x, px) in line.iter_mut().enumerate() {
                *px = pack_rgb(shade(pixel_uv(x, row, w, h), u, src));
            }
        });
    Ok(())
}
