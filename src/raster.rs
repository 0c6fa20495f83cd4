// Software RGBA surface. Particles and links are rasterized straight into a
// byte buffer that the browser layer hands to put_image_data in one call.

use crate::color::Color;
use crate::surface::Surface;
use vecmath::Vector2;

pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixel_data: vec![0x00; (width * height * 4) as usize],
        }
    }

    /// Reallocates for new dimensions; contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixel_data = vec![0x00; (width * height * 4) as usize];
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.get_pixel_index(x, y).map(|idx| {
            [
                self.pixel_data[idx],
                self.pixel_data[idx + 1],
                self.pixel_data[idx + 2],
                self.pixel_data[idx + 3],
            ]
        })
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(((y * self.width as i32 + x) * 4) as usize)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: &Color) {
        if let Some(idx) = self.get_pixel_index(x, y) {
            let dst = [
                self.pixel_data[idx],
                self.pixel_data[idx + 1],
                self.pixel_data[idx + 2],
                self.pixel_data[idx + 3],
            ];
            self.pixel_data[idx..idx + 4].copy_from_slice(&color.blend_over(dst));
        }
    }

    // Square brush centred on (x, y), at least one pixel wide
    fn stamp(&mut self, x: f64, y: f64, width: f64, color: &Color) {
        let half = (width.round().max(1.0) as i32 - 1) / 2;
        let (cx, cy) = (x.floor() as i32, y.floor() as i32);
        for pixel_y in cy - half..=cy + half {
            for pixel_x in cx - half..=cx + half {
                self.blend_pixel(pixel_x, pixel_y, color);
            }
        }
    }
}

impl Surface for PixelBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let x0 = x.floor().max(0.0) as u32;
        let y0 = y.floor().max(0.0) as u32;
        let x1 = ((x + width).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((y + height).ceil().max(0.0) as u32).min(self.height);
        if x0 >= x1 {
            return;
        }
        for pixel_y in y0..y1 {
            let start = ((pixel_y * self.width + x0) * 4) as usize;
            let end = ((pixel_y * self.width + x1) * 4) as usize;
            for byte in &mut self.pixel_data[start..end] {
                *byte = 0x00;
            }
        }
    }

    // Fills every pixel whose centre lies within the radius
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: &Color) {
        let radius_sq = radius * radius;
        let min_x = (center[0] - radius).floor() as i32;
        let max_x = (center[0] + radius).ceil() as i32;
        let min_y = (center[1] - radius).floor() as i32;
        let max_y = (center[1] + radius).ceil() as i32;
        for pixel_y in min_y..=max_y {
            for pixel_x in min_x..=max_x {
                let offset = [pixel_x as f64 + 0.5, pixel_y as f64 + 0.5];
                let distance = vecmath::vec2_square_len(vecmath::vec2_sub(offset, center));
                if distance <= radius_sq {
                    self.blend_pixel(pixel_x, pixel_y, color);
                }
            }
        }
    }

    // DDA walk along the major axis. A pixel is stamped at most once so
    // translucent lines don't darken where steps land on the same pixel.
    fn line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: &Color, width: f64) {
        let delta = vecmath::vec2_sub(to, from);
        let steps = delta[0].abs().max(delta[1].abs()).ceil() as u32;
        let increment = if steps == 0 {
            [0.0, 0.0]
        } else {
            vecmath::vec2_scale(delta, 1.0 / steps as f64)
        };
        let mut point = from;
        let mut last: Option<(i32, i32)> = None;
        for _ in 0..=steps {
            let pixel = (point[0].floor() as i32, point[1].floor() as i32);
            if last != Some(pixel) {
                self.stamp(point[0], point[1], width, color);
                last = Some(pixel);
            }
            point = vecmath::vec2_add(point, increment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_RED: Color = Color::rgba(255, 0, 0, 1.0);

    #[test]
    fn new_buffer_is_transparent() {
        let buffer = PixelBuffer::new(4, 3);
        assert_eq!(buffer.pixel_data().len(), 4 * 3 * 4);
        assert!(buffer.pixel_data().iter().all(|&b| b == 0));
        assert_eq!(buffer.pixel(4, 0), None);
        assert_eq!(buffer.pixel(-1, 0), None);
    }

    #[test]
    fn circle_covers_its_centre_only() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.fill_circle([5.0, 5.0], 1.0, &OPAQUE_RED);
        assert_eq!(buffer.pixel(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(buffer.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(buffer.pixel(7, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn circles_off_the_edge_are_clipped() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.fill_circle([0.0, 0.0], 2.0, &OPAQUE_RED);
        buffer.fill_circle([-50.0, 80.0], 2.0, &OPAQUE_RED);
        assert_eq!(buffer.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.line([1.0, 1.0], [8.0, 8.0], &OPAQUE_RED, 0.7);
        for i in 1..=8 {
            assert_eq!(buffer.pixel(i, i), Some([255, 0, 0, 255]));
        }
        assert_eq!(buffer.pixel(8, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn translucent_line_blends() {
        let mut buffer = PixelBuffer::new(4, 1);
        buffer.line([0.0, 0.0], [0.0, 0.0], &Color::rgba(255, 255, 255, 0.5), 1.0);
        assert_eq!(buffer.pixel(0, 0), Some([255, 255, 255, 128]));
    }

    #[test]
    fn clear_only_touches_its_region() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.clear(0.0, 0.0, 4.0, 4.0);
        for y in 0..4 {
            for x in 0..4 {
                buffer.fill_circle([x as f64 + 0.5, y as f64 + 0.5], 0.5, &OPAQUE_RED);
            }
        }
        buffer.clear(0.0, 0.0, 2.0, 4.0);
        assert_eq!(buffer.pixel(1, 3), Some([0, 0, 0, 0]));
        assert_eq!(buffer.pixel(2, 3), Some([255, 0, 0, 255]));

        buffer.clear(-10.0, -10.0, 100.0, 100.0);
        assert!(buffer.pixel_data().iter().all(|&b| b == 0));
    }

    #[test]
    fn resize_reallocates() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.resize(3, 5);
        assert_eq!(buffer.dimensions(), (3, 5));
        assert_eq!(buffer.pixel_data().len(), 60);
    }
}
