use crate::platform::{FrameBuffer, Rgb};

/// Pixels of a DDA line, from the first endpoint to the second inclusive.
///
/// Steps along the longer axis `max(|dx|, |dy|)` times with fractional
/// increments on both axes, rounding the running position to the nearest pixel.
#[derive(Debug, Clone)]
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: u32,
}

impl DdaLine {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let steps = dx.unsigned_abs().max(dy.unsigned_abs());
        // A single point has nothing to divide by
        let (x_inc, y_inc) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx as f64 / steps as f64, dy as f64 / steps as f64)
        };
        Self {
            x: x1 as f64,
            y: y1 as f64,
            x_inc,
            y_inc,
            remaining: steps + 1,
        }
    }
}

impl Iterator for DdaLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let point = (self.x.round() as i32, self.y.round() as i32);
        self.x += self.x_inc;
        self.y += self.y_inc;
        self.remaining -= 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for DdaLine {}

pub fn draw_line(fb: &mut FrameBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
    for (x, y) in DdaLine::new(x1, y1, x2, y2) {
        fb.set_pixel(x, y, color);
    }
}

/// Outline of an axis-aligned rectangle as four DDA edges
pub fn draw_rect_outline(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x2, y2) = (x + w - 1, y + h - 1);
    draw_line(fb, x, y, x2, y, color);
    draw_line(fb, x2, y, x2, y2, color);
    draw_line(fb, x2, y2, x, y2, color);
    draw_line(fb, x, y2, x, y, color);
}
