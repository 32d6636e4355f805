// Fits the mockup into the fixed canvas and works out how much room the design gets.
// Everything here depends only on image dimensions, never on live parameters.

use glam::DVec2;

use crate::types::Dimensions;

/// How the mockup's aspect ratio relates to the canvas'.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitCase {
    /// Same proportions: the mockup fills the canvas exactly.
    Equal,
    /// Mockup is relatively wider: height fits, width overflows.
    MockupWider,
    /// Mockup is relatively taller: width fits, height overflows.
    MockupTaller,
}

/// Derived placement of the mockup and the design's usable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitGeometry {
    pub case: FitCase,
    /// Mockup size in canvas pixels after fitting (`mW`, `mH`).
    pub mockup_extent: DVec2,
    /// Fraction of the mockup (in its own UV space) visible on the canvas.
    pub mockup_size: DVec2,
    /// Shift that centers the visible part of the mockup.
    pub mockup_offset: DVec2,
    /// Canvas fraction the design may occupy at scale 1 (`dW`, `dH`).
    pub design_area: DVec2,
}

/// Solve the fit for one mockup/design pair on a canvas.
///
/// Ties in aspect ratio resolve to [`FitCase::Equal`]. When the mockup is
/// taller than the canvas, the design height fraction exceeds 1 because part
/// of the mockup's height is off screen.
pub fn solve(mockup: Dimensions, design: Dimensions, canvas: Dimensions) -> FitGeometry {
    let canvas_w = canvas.width() as f64;
    let canvas_h = canvas.height() as f64;
    let mockup_ar = mockup.aspect_ratio();
    let render_ar = canvas.aspect_ratio();
    let design_ar = design.aspect_ratio();

    let (case, m_w, m_h, d_w, d_h) = if mockup_ar == render_ar {
        (FitCase::Equal, canvas_w, canvas_h, canvas_h * design_ar / canvas_w, 1.0)
    } else if mockup_ar > render_ar {
        let m_w = canvas_h * mockup_ar;
        (FitCase::MockupWider, m_w, canvas_h, canvas_h * design_ar / canvas_w, 1.0)
    } else {
        let m_h = canvas_w / mockup_ar;
        (FitCase::MockupTaller, canvas_w, m_h, m_h * design_ar / canvas_w, m_h / canvas_h)
    };

    let mockup_size = DVec2::new(canvas_w / m_w, canvas_h / m_h);
    let mockup_offset = (DVec2::ONE - mockup_size) / 2.0;

    FitGeometry {
        case,
        mockup_extent: DVec2::new(m_w, m_h),
        mockup_size,
        mockup_offset,
        design_area: DVec2::new(d_w, d_h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new("test image", w, h).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn equal_aspect_fills_canvas() {
        let fit = solve(dims(1000, 1000), dims(500, 1000), dims(1000, 1000));
        assert_eq!(fit.case, FitCase::Equal);
        assert_eq!(fit.mockup_extent, DVec2::new(1000.0, 1000.0));
        assert_eq!(fit.mockup_size, DVec2::ONE);
        assert_eq!(fit.mockup_offset, DVec2::ZERO);
        assert!(close(fit.design_area.x, 0.5));
        assert!(close(fit.design_area.y, 1.0));
    }

    #[test]
    fn equal_aspect_at_different_resolution() {
        let fit = solve(dims(2400, 2400), dims(300, 300), dims(1000, 1000));
        assert_eq!(fit.case, FitCase::Equal);
        assert_eq!(fit.mockup_size, DVec2::ONE);
        assert!(close(fit.design_area.x, 1.0));
    }

    #[test]
    fn wider_mockup_overflows_horizontally() {
        // 2:1 mockup on a square canvas: only half its width is visible.
        let fit = solve(dims(2000, 1000), dims(1000, 1000), dims(1000, 1000));
        assert_eq!(fit.case, FitCase::MockupWider);
        assert!(close(fit.mockup_extent.x, 2000.0));
        assert!(close(fit.mockup_extent.y, 1000.0));
        assert!(close(fit.mockup_size.x, 0.5));
        assert!(close(fit.mockup_size.y, 1.0));
        assert!(close(fit.mockup_offset.x, 0.25));
        assert!(close(fit.mockup_offset.y, 0.0));
        assert!(close(fit.design_area.x, 1.0));
        assert!(close(fit.design_area.y, 1.0));
    }

    #[test]
    fn taller_mockup_overflows_vertically() {
        // 1:2 mockup on a square canvas.
        let fit = solve(dims(500, 1000), dims(1000, 1000), dims(1000, 1000));
        assert_eq!(fit.case, FitCase::MockupTaller);
        assert!(close(fit.mockup_extent.x, 1000.0));
        assert!(close(fit.mockup_extent.y, 2000.0));
        assert!(close(fit.mockup_size.x, 1.0));
        assert!(close(fit.mockup_size.y, 0.5));
        assert!(close(fit.mockup_offset.y, 0.25));
        // Off-canvas height still counts toward the design area.
        assert!(close(fit.design_area.y, 2.0));
        assert!(fit.design_area.y > 1.0);
        assert!(close(fit.design_area.x, 2.0));
    }

    #[test]
    fn mockup_size_round_trips_to_canvas_for_every_case() {
        let canvas = dims(1000, 1000);
        for (mw, mh) in [(1000, 1000), (1600, 900), (900, 1600), (3, 7), (7, 3)] {
            let fit = solve(dims(mw, mh), dims(640, 480), canvas);
            assert!(close(fit.mockup_size.x * fit.mockup_extent.x, 1000.0), "{mw}x{mh}");
            assert!(close(fit.mockup_size.y * fit.mockup_extent.y, 1000.0), "{mw}x{mh}");
        }
    }

    #[test]
    fn non_square_canvas() {
        let canvas = dims(1600, 900);
        let fit = solve(dims(1600, 900), dims(900, 900), canvas);
        assert_eq!(fit.case, FitCase::Equal);
        assert!(close(fit.design_area.x, 900.0 / 1600.0));

        let fit = solve(dims(1000, 1000), dims(900, 900), canvas);
        assert_eq!(fit.case, FitCase::MockupTaller);
        assert!(close(fit.mockup_extent.y, 1600.0));
        assert!(close(fit.mockup_size.y * fit.mockup_extent.y, 900.0));
    }

    #[test]
    fn offsets_center_the_visible_window() {
        let fit = solve(dims(1600, 900), dims(10, 10), dims(1000, 1000));
        let right_edge = fit.mockup_offset.x + fit.mockup_size.x;
        assert!(close(fit.mockup_offset.x, 1.0 - right_edge));
    }
}
