// Converts user-facing controls into the normalized values the kernel consumes.
// Pure functions; re-evaluated every frame from the live parameters.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::layout::FitGeometry;
use crate::params::LiveParams;

/// Offsets are given in logical canvas pixels of a 1000-unit canvas.
pub const OFFSET_UNIT: f32 = 1000.0;

/// Smallest per-axis design scale handed to the kernel (it divides by it).
pub const MIN_DESIGN_SCALE: f32 = 1e-4;

/// Per-axis design scale: the design's area fraction times the user scale.
pub fn design_scale(design_area: Vec2, scale: f32) -> Vec2 {
    design_area * scale
}

pub fn rotation_radians(degrees: f32) -> f32 {
    degrees / 360.0 * TAU
}

pub fn offset_fraction(pixels: f32) -> f32 {
    pixels / OFFSET_UNIT
}

/// Everything the compositing kernel reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    pub mockup_size: Vec2,
    pub mockup_offset: Vec2,
    pub multiply: bool,
    pub displacement: bool,
    pub displacement_intensity: f32,
    pub multiply_intensity: f32,
    pub blend_opacity: f32,
    /// Never below [`MIN_DESIGN_SCALE`] on either axis.
    pub design_scale: Vec2,
    /// `(sin, cos)` of the design rotation, computed once per frame.
    pub rotation_sin_cos: (f32, f32),
    pub offset: Vec2,
}

impl Uniforms {
    /// Snapshot `params` against the fit geometry. Neither input is modified.
    pub fn derive(params: &LiveParams, fit: &FitGeometry) -> Self {
        let rotation = rotation_radians(params.rotation_degrees);
        let scale = design_scale(fit.design_area.as_vec2(), params.scale)
            .max(Vec2::splat(MIN_DESIGN_SCALE));
        Self {
            mockup_size: fit.mockup_size.as_vec2(),
            mockup_offset: fit.mockup_offset.as_vec2(),
            multiply: params.multiply_enabled,
            displacement: params.displacement_enabled,
            displacement_intensity: params.displacement_intensity,
            multiply_intensity: params.multiply_intensity,
            blend_opacity: params.blend_opacity,
            design_scale: scale,
            rotation_sin_cos: rotation.sin_cos(),
            offset: Vec2::new(
                offset_fraction(params.offset_x_pixels),
                offset_fraction(params.offset_y_pixels),
            ),
        }
    }
}
