// The parameter update loop: once per display tick, read the live parameters,
// derive uniforms, run one full raster pass, draw the HUD and present.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::controls::Controls;
use crate::draw::{dim_rect, draw_crosshair, draw_text_5x7, text_width_5x7, Drawer};
use crate::error::Error;
use crate::kernel::{self, Sources};
use crate::layout::FitGeometry;
use crate::params::{LiveParams, ParamId};
use crate::transform::Uniforms;
use crate::types::{Canvas, FrameBuffer};

/// Immutable inputs of every frame: the decoded images and their fit.
pub struct Scene {
    pub sources: Sources,
    pub fit: FitGeometry,
}

/// Body of one tick: snapshot `params` into uniforms and rasterize the whole canvas.
/// Same `params` in, same pixels out.
pub fn render_frame(scene: &Scene, params: &LiveParams, screen: &mut FrameBuffer) -> Result<(), Error> {
    let uniforms = Uniforms::derive(params, &scene.fit);
    kernel::rasterize(&uniforms, &scene.sources, screen)
}

fn on_off(b: bool) -> &'static str {
    if b { "ON" } else { "OFF" }
}

/// Text rows of the parameter HUD; the selected control is marked with `>`.
pub fn hud_lines(params: &LiveParams, selected: ParamId, fps_text: &str) -> Vec<String> {
    let mut lines = vec![
        format!("  MULTIPLY: {}  DISPLACEMENT: {}", on_off(params.multiply_enabled), on_off(params.displacement_enabled)),
    ];
    for id in ParamId::ALL {
        let spec = id.spec();
        let marker = if id == selected { '>' } else { ' ' };
        let decimals = match id {
            ParamId::DisplacementIntensity => 3,
            ParamId::OffsetX | ParamId::OffsetY => 0,
            ParamId::Rotation => 1,
            _ => 2,
        };
        lines.push(format!("{marker} {}: {:.*}", spec.label, decimals, params.get(id)));
    }
    lines.push(format!("  {fps_text}"));
    lines
}

/// Lay out the HUD in logical pixels; `scale` is the canvas pixel ratio.
fn draw_hud(screen: &mut FrameBuffer, lines: &[String], scale: i32) {
    let pitch = 10 * scale;
    let width = lines.iter().map(|l| text_width_5x7(l, scale)).max().unwrap_or(0);
    let height = lines.len() as i32 * pitch;
    dim_rect(screen, 4 * scale, 4 * scale, width + 8 * scale, height + 6 * scale);
    for (i, line) in lines.iter().enumerate() {
        draw_text_5x7(screen, 8 * scale, 8 * scale + i as i32 * pitch, line, scale, 0x00_FF_FF_FF);
    }
}

/// Run until the window closes or ESC is pressed.
pub fn run(drawer: &mut Drawer, scene: &Scene, canvas: Canvas, initial: LiveParams) -> Result<(), Error> {
    let mut params = initial;
    let mut controls = Controls::new(initial);
    let mut screen = canvas.frame_buffer();
    let ratio = canvas.pixel_ratio as f32;
    let scale = canvas.pixel_ratio as i32;

    let mut show_hud = true;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    info!(width = screen.width, height = screen.height, "preview running");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Inputs: apply every control event before this frame's snapshot. */
        for event in drawer.poll_events() {
            controls.apply(&mut params, event);
        }
        if drawer.hud_toggle_pressed() {
            show_hud = !show_hud;
        }

        /* 2) One full raster pass with the latest values. */
        render_frame(scene, &params, &mut screen)?;

        /* 3) Overlays go on top of the finished composite. */
        if drawer.dragging()
            && let Some((mx, my)) = drawer.mouse_pos()
        {
            draw_crosshair(&mut screen, (mx * ratio) as i32, (my * ratio) as i32, 12, scale, 0x00_FF_CC_33);
        }
        if show_hud {
            draw_hud(&mut screen, &hud_lines(&params, controls.selected(), &hud_fps_text), scale);
        }

        /* 4) Present; minifb paces this call to the target frame rate. */
        drawer.present(&screen)?;

        /* 5) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("preview window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::texture::Texture;
    use crate::types::Dimensions;
    use glam::Vec4;

    fn dims(w: u32, h: u32) -> Dimensions {
        Dimensions::new("test image", w, h).unwrap()
    }

    fn gradient(w: u32, h: u32) -> Texture {
        let texels = (0..w * h)
            .map(|i| {
                let t = i as f32 / (w * h) as f32;
                Vec4::new(t, 1.0 - t, (t * 3.0).fract(), (t * 5.0).fract())
            })
            .collect();
        Texture::from_texels(dims(w, h), texels)
    }

    fn scene() -> Scene {
        let sources = Sources {
            mockup: gradient(20, 30),
            design: gradient(10, 10),
            displacement: gradient(20, 30),
        };
        let fit = layout::solve(
            sources.mockup.dimensions(),
            sources.design.dimensions(),
            dims(1000, 1000),
        );
        Scene { sources, fit }
    }

    #[test]
    fn same_params_render_bit_identical_frames() {
        let scene = scene();
        let params = LiveParams::default();
        let mut a = FrameBuffer::new(64, 64);
        let mut b = FrameBuffer::new(64, 64);
        render_frame(&scene, &params, &mut a).unwrap();
        render_frame(&scene, &params, &mut b).unwrap();
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn parameter_changes_show_up_in_the_next_frame() {
        let scene = scene();
        let mut params = LiveParams::default();
        let mut a = FrameBuffer::new(64, 64);
        render_frame(&scene, &params, &mut a).unwrap();
        params.multiply_enabled = false;
        let mut b = FrameBuffer::new(64, 64);
        render_frame(&scene, &params, &mut b).unwrap();
        assert_ne!(a.pixels, b.pixels);
    }

    #[test]
    fn rendering_does_not_touch_the_fit() {
        let scene = scene();
        let before = scene.fit;
        let mut fb = FrameBuffer::new(16, 16);
        render_frame(&scene, &LiveParams { scale: 0.0, ..LiveParams::default() }, &mut fb).unwrap();
        assert_eq!(scene.fit, before);
    }

    #[test]
    fn hud_marks_the_selected_control() {
        let lines = hud_lines(&LiveParams::default(), ParamId::Rotation, "FPS: 60.0");
        assert_eq!(lines.len(), ParamId::ALL.len() + 2);
        assert!(lines[0].contains("MULTIPLY: ON"));
        assert!(lines.iter().any(|l| l == "> Rotation: -5.0"));
        assert!(lines.iter().any(|l| l == "  Offset X: 17"));
        assert!(lines.iter().any(|l| l == "  Disp intensity: 0.012"));
        assert_eq!(lines.last().map(String::as_str), Some("  FPS: 60.0"));
    }

    // Bounding box of pure-white HUD text pixels.
    fn lit_extent(fb: &FrameBuffer) -> (usize, usize) {
        let (mut max_x, mut max_y) = (0, 0);
        for (i, &p) in fb.pixels.iter().enumerate() {
            if p == 0x00_FF_FF_FF {
                max_x = max_x.max(i % fb.width);
                max_y = max_y.max(i / fb.width);
            }
        }
        (max_x + 1, max_y + 1)
    }

    #[test]
    fn hud_keeps_its_logical_size_at_higher_pixel_ratios() {
        let lines = hud_lines(&LiveParams::default(), ParamId::Scale, "FPS: 60.0");
        let mut one = Canvas::new(1).unwrap().frame_buffer();
        let mut two = Canvas::new(2).unwrap().frame_buffer();
        draw_hud(&mut one, &lines, 1);
        draw_hud(&mut two, &lines, 2);
        let (w1, h1) = lit_extent(&one);
        let (w2, h2) = lit_extent(&two);
        assert!(w1 > 8 && h1 > 8);
        assert_eq!((w2, h2), (w1 * 2, h1 * 2));
    }
}
