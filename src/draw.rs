// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the composited mockup.
// 2) Keyboard/mouse input decoded into control events.
// 3) A crosshair while dragging the design.
// 4) A tiny 5x7 bitmap font for the parameter HUD.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use crate::controls::ControlEvent;
use crate::error::Error;
use crate::types::FrameBuffer;

pub struct Drawer {
    window: Window,                  // the on-screen window you see
    drag_anchor: Option<(f32, f32)>, // mouse position where LMB went down
    last_drag: Option<(f32, f32)>,   // last position reported while LMB is held
}

impl Drawer {
    /// Create a window at the canvas' logical size; denser buffers are stretched into it.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let opts = WindowOptions { scale_mode: ScaleMode::Stretch, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // One update per display tick; `present` blocks until the next one.
        window.set_target_fps(target_fps);
        Ok(Self { window, drag_anchor: None, last_drag: None })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new composite.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn hud_toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::H, KeyRepeat::No)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    pub fn dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Decode this frame's input into control events.
    /// Visual: nothing yet; the events are applied before the next raster pass.
    pub fn poll_events(&mut self) -> Vec<ControlEvent> {
        let w = &self.window;
        let mut events = Vec::new();

        if w.is_key_pressed(Key::Tab, KeyRepeat::No) {
            let shift = w.is_key_down(Key::LeftShift) || w.is_key_down(Key::RightShift);
            events.push(if shift { ControlEvent::SelectPrev } else { ControlEvent::SelectNext });
        }
        if w.is_key_pressed(Key::Right, KeyRepeat::Yes) {
            events.push(ControlEvent::Step(1.0));
        }
        if w.is_key_pressed(Key::Left, KeyRepeat::Yes) {
            events.push(ControlEvent::Step(-1.0));
        }
        if w.is_key_pressed(Key::M, KeyRepeat::No) {
            events.push(ControlEvent::ToggleMultiply);
        }
        if w.is_key_pressed(Key::D, KeyRepeat::No) {
            events.push(ControlEvent::ToggleDisplacement);
        }
        if w.is_key_pressed(Key::R, KeyRepeat::No) {
            events.push(ControlEvent::Reset);
        }
        if let Some((_, dy)) = w.get_scroll_wheel()
            && dy != 0.0
        {
            events.push(ControlEvent::Scroll(dy.signum()));
        }

        // Drag: report the total movement since the button went down.
        let pos = self.mouse_pos();
        if w.get_mouse_down(MouseButton::Left) {
            match (self.drag_anchor, pos) {
                (None, Some(p)) => {
                    events.push(ControlEvent::DragStart);
                    self.drag_anchor = Some(p);
                    self.last_drag = Some(p);
                }
                (Some((ax, ay)), Some((x, y))) if Some((x, y)) != self.last_drag => {
                    events.push(ControlEvent::Drag { dx: x - ax, dy: y - ay });
                    self.last_drag = Some((x, y));
                }
                _ => {}
            }
        } else {
            self.drag_anchor = None;
            self.last_drag = None;
        }

        events
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy); `scale` multiplies arm length, gap and thickness.
/// Visual: a "+" shape (with a tiny gap at the center) marks the drag point.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, scale: i32, color: u32) {
    let (size, gap) = (size * scale, 2 * scale);
    for t in 0..scale {
        let (x, y) = (cx + t, cy + t);
        draw_line(fb, cx - size, y, cx - gap, y, color);
        draw_line(fb, cx + gap, y, cx + size, y, color);
        draw_line(fb, x, cy - size, x, cy - gap, color);
        draw_line(fb, x, cy + gap, x, cy + size, color);
    }
    fill_rect(fb, cx, cy, scale, scale, color);
}

fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/// Halve the brightness of a rectangle so HUD text stays readable on light mockups.
pub fn dim_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32) {
    let x0 = (x.max(0) as usize).min(fb.width);
    let y0 = (y.max(0) as usize).min(fb.height);
    let x1 = ((x + w).max(0) as usize).clamp(x0, fb.width);
    let y1 = ((y + h).max(0) as usize).min(fb.height);
    for row in y0..y1 {
        for px in &mut fb.pixels[row * fb.width + x0..row * fb.width + x1] {
            *px = (*px >> 1) & 0x007F_7F7F;
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase letters render as uppercase.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '>' => g!(0b01000,0b00100,0b00010,0b00001,0b00010,0b00100,0b01000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a shadow for contrast.
/// Every font pixel becomes a `scale`x`scale` block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (pass_color, shift) in [(0x0000_0000, scale), (color, 0)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        let px = x + rx * scale + shift;
                        let py = y + ry as i32 * scale + shift;
                        fill_rect(fb, px, py, scale, scale, pass_color);
                    }
                }
            }
        }
    }
}

/// Pixel width of `text` when drawn with [`draw_text_5x7`] at `scale`.
pub fn text_width_5x7(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 6 * scale
}

/// Draw a text string using 5x7 glyphs (5 pixels + 1 pixel spacing each, times `scale`).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hud_character_has_a_glyph() {
        let text = "> DISP INTENSITY: -0.012 | MULTIPLY ON OFF FPS 59.9 SCALE OFFSET X Y ROTATION OPACITY";
        for ch in text.chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
        assert!(glyph5x7('a').is_some());
        assert!(glyph5x7('~').is_none());
    }

    #[test]
    fn text_is_clipped_at_the_edges() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_text_5x7(&mut fb, -3, -3, "WW", 1, 0x00FF_FFFF);
        draw_text_5x7(&mut fb, 6, 6, "88", 1, 0x00FF_FFFF);
        assert!(fb.pixels.iter().any(|&p| p == 0x00FF_FFFF));
    }

    #[test]
    fn crosshair_center_is_drawn() {
        let mut fb = FrameBuffer::new(32, 32);
        draw_crosshair(&mut fb, 16, 16, 6, 1, 0x00FF_CC33);
        assert_eq!(fb.pixels[16 * 32 + 16], 0x00FF_CC33);
        assert_eq!(fb.pixels[16 * 32 + 10], 0x00FF_CC33);
        assert_eq!(fb.pixels[16 * 32 + 17], 0);
    }

    #[test]
    fn dim_rect_halves_channels_inside_only() {
        let mut fb = FrameBuffer { width: 4, height: 1, pixels: vec![0x00FF_FFFF; 4] };
        dim_rect(&mut fb, 1, 0, 2, 1);
        assert_eq!(fb.pixels, vec![0x00FF_FFFF, 0x007F_7F7F, 0x007F_7F7F, 0x00FF_FFFF]);
    }

    #[test]
    fn text_width_counts_glyph_advance() {
        assert_eq!(text_width_5x7("ABC", 1), 18);
        assert_eq!(text_width_5x7("ABC", 2), 36);
    }

    #[test]
    fn scaled_crosshair_keeps_its_logical_size() {
        let mut fb = FrameBuffer::new(64, 64);
        draw_crosshair(&mut fb, 32, 32, 6, 2, 0x00FF_CC33);
        // Arm reaches 12 physical px left, two rows thick; gap is 4 px.
        assert_eq!(fb.pixels[32 * 64 + 20], 0x00FF_CC33);
        assert_eq!(fb.pixels[33 * 64 + 20], 0x00FF_CC33);
        assert_eq!(fb.pixels[32 * 64 + 19], 0);
        assert_eq!(fb.pixels[32 * 64 + 35], 0);
        assert_eq!(fb.pixels[33 * 64 + 33], 0x00FF_CC33);
    }

    #[test]
    fn scaled_glyph_pixels_are_square_blocks() {
        let mut fb = FrameBuffer::new(16, 16);
        // '-' lights row 3 of the glyph.
        draw_text_5x7(&mut fb, 0, 0, "-", 2, 0x00FF_FFFF);
        for (x, y) in [(0, 6), (1, 6), (0, 7), (9, 7)] {
            assert_eq!(fb.pixels[y * 16 + x], 0x00FF_FFFF, "({x},{y})");
        }
        assert_ne!(fb.pixels[5 * 16], 0x00FF_FFFF);
    }
}
