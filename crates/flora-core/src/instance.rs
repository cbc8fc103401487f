use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Static configuration of one flower in the bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceConfig {
    /// Added to the animation time before the surface is evaluated.
    pub phase_offset: f64,
    /// Uniform scale.
    pub scale: f32,
    pub position: [f32; 3],
    /// Rotation about the vertical (Y) axis in degrees.
    pub rotation_degrees: f32,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            phase_offset: 0.0,
            scale: 1.0,
            position: [0.0; 3],
            rotation_degrees: 0.0,
        }
    }
}

impl InstanceConfig {
    pub fn new(phase_offset: f64, scale: f32, position: [f32; 3], rotation_degrees: f32) -> Self {
        Self { phase_offset, scale, position, rotation_degrees }
    }

    /// The placement this configuration starts from.
    pub fn placement(&self) -> Placement {
        Placement {
            translation: Vec3::from(self.position),
            rotation_y: self.rotation_degrees.to_radians(),
            scale: self.scale,
        }
    }
}

/// The six-flower arrangement shown by default.
pub fn default_bouquet() -> Vec<InstanceConfig> {
    vec![
        InstanceConfig::new(0.0, 1.0, [0.0, 0.0, 0.0], 0.0),
        InstanceConfig::new(0.3, 0.9, [40.0, -20.0, 15.0], 60.0),
        InstanceConfig::new(0.6, 0.85, [-35.0, -25.0, -10.0], 120.0),
        InstanceConfig::new(0.9, 0.95, [25.0, -45.0, 20.0], 180.0),
        InstanceConfig::new(1.2, 0.8, [-45.0, -40.0, 5.0], 240.0),
        InstanceConfig::new(1.5, 0.75, [15.0, -60.0, -15.0], 300.0),
    ]
}

/// Object-to-world transform of one flower, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    /// Radians about +Y.
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation_y: 0.0, scale: 1.0 }
    }
}

impl Placement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.translation,
        )
    }

    /// Transform a mesh-space point into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bouquet() {
        let bouquet = default_bouquet();
        assert_eq!(bouquet.len(), 6);
        assert_eq!(bouquet[3].position, [25.0, -45.0, 20.0]);
        assert!((bouquet[5].phase_offset - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_placement_from_config() {
        let p = InstanceConfig::new(0.0, 0.5, [1.0, 2.0, 3.0], 90.0).placement();
        assert!((p.rotation_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let world = p.transform_point(Vec3::new(2.0, 0.0, 0.0));
        // Scale to 1, rotate +X onto -Z, then translate.
        assert!((world - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);
    }
}
