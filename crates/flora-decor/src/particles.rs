use crate::rng::{XorShift32, DEFAULT_SEED};

/// Spawn volume and motion limits of the particle field.
#[derive(Debug, Clone)]
pub struct ParticleSettings {
    pub count: usize,
    /// Half extent of the spawn square in X and Z.
    pub half_extent: f32,
    /// Height at which respawned particles re-enter.
    pub floor: f32,
    /// Initial particles start in `[floor, floor + spawn_height)`.
    pub spawn_height: f32,
    /// Particles above this height are respawned at `floor`.
    pub ceiling: f32,
    /// Max horizontal speed per step (either direction).
    pub drift_speed: f32,
    /// Max upward speed per step.
    pub rise_speed: f32,
    pub seed: u32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 200,
            half_extent: 100.0,
            floor: -50.0,
            spawn_height: 100.0,
            ceiling: 100.0,
            drift_speed: 0.05,
            rise_speed: 0.05,
            seed: DEFAULT_SEED,
        }
    }
}

/// Warm-colored points that float upward and wrap back to the floor.
///
/// Stepped once per frame regardless of playback state.
pub struct ParticleField {
    settings: ParticleSettings,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    velocities: Vec<[f32; 3]>,
    rng: XorShift32,
    respawned: u64,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings) -> Self {
        let mut rng = XorShift32::new(settings.seed);
        let n = settings.count;
        let mut positions = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);

        let h = settings.half_extent;
        for _ in 0..n {
            positions.push([
                rng.range(-h, h),
                rng.range(settings.floor, settings.floor + settings.spawn_height),
                rng.range(-h, h),
            ]);
            colors.push([rng.range(0.5, 1.0), rng.range(0.5, 1.0), 0.0]);
            velocities.push([
                rng.range(-settings.drift_speed, settings.drift_speed),
                rng.range(0.0, settings.rise_speed),
                rng.range(-settings.drift_speed, settings.drift_speed),
            ]);
        }

        log::debug!("particle field: {} particles, seed {:#x}", n, settings.seed);

        Self { settings, positions, colors, velocities, rng, respawned: 0 }
    }

    /// Advance every particle by its velocity, respawning those above the ceiling.
    pub fn step(&mut self) {
        let h = self.settings.half_extent;
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            pos[0] += vel[0];
            pos[1] += vel[1];
            pos[2] += vel[2];

            if pos[1] > self.settings.ceiling {
                pos[0] = self.rng.range(-h, h);
                pos[1] = self.settings.floor;
                pos[2] = self.rng.range(-h, h);
                self.respawned += 1;
            }
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total number of respawns since creation.
    pub fn respawned(&self) -> u64 {
        self.respawned
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(ParticleSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_volume() {
        let field = ParticleField::default();
        assert_eq!(field.len(), 200);
        for p in field.positions() {
            assert!(p[0] >= -100.0 && p[0] <= 100.0);
            assert!(p[1] >= -50.0 && p[1] <= 50.0);
            assert!(p[2] >= -100.0 && p[2] <= 100.0);
        }
    }

    #[test]
    fn test_colors_are_warm() {
        let field = ParticleField::default();
        for c in field.colors() {
            assert!(c[0] >= 0.5 && c[0] <= 1.0);
            assert!(c[1] >= 0.5 && c[1] <= 1.0);
            assert_eq!(c[2], 0.0);
        }
    }

    #[test]
    fn test_particles_rise() {
        let mut field = ParticleField::default();
        let before: f32 = field.positions().iter().map(|p| p[1]).sum();
        field.step();
        let after: f32 = field.positions().iter().map(|p| p[1]).sum();
        assert!(after >= before);
    }
}
