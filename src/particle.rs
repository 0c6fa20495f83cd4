// Simple particle struct to keep track of individual position, velocity, and size.
// Color is not stored per particle: the field owns one ambient color for all of them.

use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

/// Drawable extent of the surface, in surface units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Bounds {
        Bounds {
            width: width as f64,
            height: height as f64,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
        }
    }

    /// Uniform position inside `bounds`, radius and per-axis speed drawn from `config`.
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * bounds.width;
        let pos_y = rng.gen::<f64>() * bounds.height;
        let size = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        Particle::new(pos_x, pos_y, vel_x, vel_y, size)
    }

    /// Advances one frame: move, bounce off any wall the edge crossed, then
    /// clamp back inside. The clamp runs every frame, bounce or not.
    pub fn step(&mut self, bounds: Bounds) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);

        let limits = [bounds.width, bounds.height];
        for axis in 0..2 {
            let (lo, hi) = (self.pos[axis] - self.size, self.pos[axis] + self.size);
            if hi > limits[axis] || lo < 0.0 {
                self.vel[axis] *= -1.0;
            }

            if self.pos[axis] + self.size > limits[axis] {
                self.pos[axis] = limits[axis] - self.size;
            }
            if self.pos[axis] - self.size < 0.0 {
                self.pos[axis] = self.size;
            }
        }
    }

    pub fn distance_squared(&self, point: Vector2<f64>) -> f64 {
        vecmath::vec2_square_len(vecmath::vec2_sub(self.pos, point))
    }
}
