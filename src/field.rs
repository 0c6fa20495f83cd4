// The particle field: owns the particles, the surface bounds, the pointer and
// the shared ambient color. Advanced and drawn once per animation frame.

use crate::color::{self, Color};
use crate::config::FieldConfig;
use crate::particle::{Bounds, Particle};
use crate::surface::Surface;
use rand::Rng;
use vecmath::Vector2;

pub struct ParticleField {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    ambient: Color,
    pointer: Option<Vector2<f64>>,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new(width: u32, height: u32, config: FieldConfig) -> ParticleField {
        let floor = config.min_dimension.max(1);
        ParticleField {
            width: width.max(floor),
            height: height.max(floor),
            particles: Vec::new(),
            ambient: Color::INITIAL.with_alpha(config.fill_alpha),
            pointer: None,
            config,
        }
    }

    /// Replaces every particle with `count` freshly randomized ones.
    pub fn initialize<R: Rng>(&mut self, count: u32, rng: &mut R) {
        let bounds = self.bounds();
        self.particles.clear();
        self.particles.reserve(count as usize);
        for _ in 0..count {
            self.particles
                .push(Particle::random(rng, bounds, &self.config));
        }
    }

    /// Replaces every particle with the given ones.
    pub fn with_particles(mut self, particles: Vec<Particle>) -> ParticleField {
        self.particles = particles;
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Only the bounds change. Particles outside the new bounds are pulled
    /// back by the clamp in the next `step`.
    pub fn resize(&mut self, width: u32, height: u32) {
        let floor = self.config.min_dimension.max(1);
        self.width = width.max(floor);
        self.height = height.max(floor);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn ambient_color(&self) -> Color {
        self.ambient
    }

    /// Recomputes the ambient color from a theme accent. Unparseable accents
    /// fall back to the default color.
    pub fn set_accent_color(&mut self, accent: &str) {
        self.ambient = color::derive_with_alpha(accent, self.config.fill_alpha);
    }

    /// Squared distance below which two particles are linked.
    pub fn connection_threshold(&self) -> f64 {
        let divisor = self.config.connection_divisor;
        (self.width as f64 / divisor) * (self.height as f64 / divisor)
    }

    pub fn step(&mut self) {
        let bounds = self.bounds();
        for particle in &mut self.particles {
            particle.step(bounds);
        }
    }

    /// Clears the surface, fills every particle, then draws particle links and
    /// pointer links on top, in that order.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(0.0, 0.0, self.width as f64, self.height as f64);

        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.size, &self.ambient);
        }

        connect(
            surface,
            &self.particles,
            &self.ambient,
            self.connection_threshold(),
            self.config.connection_line_width,
        );
        self.draw_pointer_links(surface);
    }

    pub fn draw_pointer_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        let pointer = match self.pointer {
            Some(pointer) => pointer,
            None => return,
        };
        let range = self.config.pointer_radius * self.config.pointer_radius;
        for particle in &self.particles {
            let distance = particle.distance_squared(pointer);
            if distance < range {
                let color = self.ambient.with_alpha(opacity(distance, range));
                surface.line(particle.pos, pointer, &color, self.config.pointer_line_width);
            }
        }
    }

    /// One animation frame: advance every particle, then draw.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.draw(surface);
    }
}

/// Links every unordered pair of particles closer than `threshold` (squared
/// distance) with a line that fades linearly to nothing at the threshold.
pub fn connect<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    ambient: &Color,
    threshold: f64,
    line_width: f64,
) {
    for (a, first) in particles.iter().enumerate() {
        for second in &particles[a + 1..] {
            let distance = first.distance_squared(second.pos);
            if distance < threshold {
                let color = ambient.with_alpha(opacity(distance, threshold));
                surface.line(first.pos, second.pos, &color, line_width);
            }
        }
    }
}

/// Linear falloff: 1 at distance 0, 0 at `range_sq` and beyond.
pub fn opacity(distance_sq: f64, range_sq: f64) -> f64 {
    if range_sq <= 0.0 {
        return 0.0;
    }
    (1.0 - distance_sq / range_sq).max(0.0)
}
