// The 2D drawing surface the particle field renders onto. The browser
// canvas and the software pixel buffer both implement it.

use crate::color::Color;
use vecmath::Vector2;

pub trait Surface {
    /// Current pixel dimensions as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: &Color);

    fn line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: &Color, width: f64);
}
