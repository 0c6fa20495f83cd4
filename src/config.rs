// Tunable constants for the particle field, grouped so the browser layer
// and tests can build a field without reaching for magic numbers

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    /// Radius is drawn uniformly from `[min_radius, max_radius)`.
    pub min_radius: f64,
    pub max_radius: f64,
    /// Each velocity component is drawn uniformly from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub pointer_radius: f64,
    /// Connection threshold is `(width / divisor) * (height / divisor)`, squared units.
    pub connection_divisor: f64,
    pub connection_line_width: f64,
    pub pointer_line_width: f64,
    pub fill_alpha: f64,
    /// Surface dimensions never go below this, keeping falloff math finite.
    pub min_dimension: u32,
}

impl FieldConfig {
    pub const DEFAULT_PARTICLE_COUNT: u32 = 100;

    pub fn with_particle_count(mut self, particle_count: u32) -> Self {
        self.particle_count = particle_count;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::DEFAULT_PARTICLE_COUNT,
            min_radius: 0.8,
            max_radius: 2.8,
            max_speed: 0.25,
            pointer_radius: 100.0,
            connection_divisor: 14.0,
            connection_line_width: 0.7,
            pointer_line_width: 1.0,
            fill_alpha: 0.6,
            min_dimension: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_builder_only_touches_the_count() {
        let config = FieldConfig::default().with_particle_count(7);
        assert_eq!(config.particle_count, 7);
        assert_eq!(config.pointer_radius, 100.0);
        assert_eq!(config.connection_divisor, 14.0);
        assert_eq!(config.fill_alpha, 0.6);
    }
}
