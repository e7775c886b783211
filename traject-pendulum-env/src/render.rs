//! Software offscreen renderer.
//!
//! Draws the pendulum from a fixed third-person viewpoint onto an RGB
//! canvas: support block, rod, bob and a velocity indicator at the pivot.
use traject_core::Frame;

#[derive(Clone, Copy)]
struct Color(u8, u8, u8);

const BLACK: Color = Color(0, 0, 0);
const WHITE: Color = Color(255, 255, 255);
const RED: Color = Color(220, 20, 60);
const BLUE: Color = Color(0, 120, 255);
const GRAY: Color = Color(180, 180, 180);

/// A minimal RGB canvas for simple 2D rendering.
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 3],
        };
        canvas.clear(WHITE);
        canvas
    }

    fn clear(&mut self, color: Color) {
        for idx in (0..self.pixels.len()).step_by(3) {
            self.pixels[idx] = color.0;
            self.pixels[idx + 1] = color.1;
            self.pixels[idx + 2] = color.2;
        }
    }

    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) as usize) * 3;
        self.pixels[idx] = color.0;
        self.pixels[idx + 1] = color.1;
        self.pixels[idx + 2] = color.2;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put_pixel(xx, yy, color);
            }
        }
    }

    /// Integer Bresenham line.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (mut x0, mut y0) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn into_frame(self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            data: self.pixels,
        }
    }
}

pub(crate) fn draw(theta: f32, theta_dot: f32, width: u32, height: u32) -> Frame {
    let mut canvas = Canvas::new(width, height);
    let w = canvas.width as i32;
    let h = canvas.height as i32;
    let cx = w / 2;
    let cy = (h as f32 * 0.3) as i32;
    let rod_len = (h as f32 * 0.45) as i32;

    let bx = cx + (theta.sin() * rod_len as f32) as i32;
    let by = cy + (theta.cos() * rod_len as f32) as i32;

    canvas.fill_rect(cx - 30, cy - 6, 60, 12, GRAY);
    canvas.draw_line(cx, cy, bx, by, BLACK);

    let bob_r = 8;
    canvas.fill_rect(bx - bob_r, by - bob_r, bob_r * 2, bob_r * 2, BLUE);

    let vel_len = (theta_dot * 5.0).clamp(-40.0, 40.0) as i32;
    canvas.draw_line(cx, cy, cx + vel_len, cy, RED);

    canvas.into_frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_matches_requested_dimensions() {
        let frame = draw(0.5, -1.0, 32, 16);
        assert_eq!(frame.width, 32);
        assert_eq!(frame.height, 16);
        assert_eq!(frame.data.len(), 32 * 16 * 3);
    }

    #[test]
    fn background_is_white_and_something_is_drawn() {
        let frame = draw(1.2, 0.0, 64, 64);
        assert_eq!(&frame.data[..3], &[255, 255, 255]);
        assert!(frame.data.chunks_exact(3).any(|p| p != [255, 255, 255]));
    }
}
