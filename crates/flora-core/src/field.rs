//! The closed-form flower surface.
//!
//! A point of the surface is addressed by a shape coordinate `x` in [0, 1]
//! (center to petal tip) and a sweep angle `t`. The angle both rotates the
//! profile around the vertical axis and drives the petal modulation, so a
//! long sweep winds the profile many times to form the petals.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use crate::gradient::ColorGradient;
use crate::params::ParameterSet;

/// Fixed world-space scale of the surface.
pub const SHAPE_SCALE: f64 = 15.0;

/// Height compression applied on top of [`SHAPE_SCALE`].
const HEIGHT_SCALE: f64 = 0.5;

/// One evaluated surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub position: DVec3,
    /// RGB in 0..1.
    pub color: DVec3,
    /// Cheap analytic normal, unit length. Superseded by the mesh smoothing pass.
    pub normal: DVec3,
}

impl FieldSample {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.color.is_finite() && self.normal.is_finite()
    }
}

/// Sweep angle for column `j` of a grid with `t_count` columns.
pub fn sweep_angle(j: usize, t_count: usize, params: &ParameterSet, phase_offset: f64) -> f64 {
    let span = (t_count.max(2) - 1) as f64;
    (j as f64 / span) * params.time_multiplier * PI + params.time_offset * PI + phase_offset
}

/// Evaluate the surface at shape coordinate `x` and sweep angle `t`.
pub fn evaluate(x: f64, t: f64, params: &ParameterSet, gradient: &ColorGradient) -> FieldSample {
    let p = params.deformation_factor * PI * (-t / (params.exponential_decay * PI)).exp();
    let change = (params.temporal_frequency * t).sin() / params.sinusoidal_intensity;
    let modulation = ((params.velocity_modulator * t) % TAU) / PI;
    let u = 1.0 - (1.0 - modulation).powf(params.velocity_power) / 2.0 + change;

    let (sin_p, cos_p) = p.sin_cos();
    let y = params.coordinate_multiplier * (x * x - x).powi(2) * sin_p;
    let r = u * (x * sin_p + y * cos_p) * params.radial_scale;
    let h = u * (x * cos_p - y * sin_p);

    let (sin_t, cos_t) = t.sin_cos();
    let position = DVec3::new(
        r * cos_t * SHAPE_SCALE,
        r * sin_t * SHAPE_SCALE,
        h * SHAPE_SCALE * HEIGHT_SCALE,
    );

    let distance = (position.x * position.x + position.y * position.y).sqrt() / SHAPE_SCALE;
    let ratio = ColorGradient::ratio_for_distance(distance, params.radial_scale);
    let color = DVec3::from_array(gradient.sample(ratio));

    let seed = DVec3::new(cos_t * u, sin_t * u, 1.0);
    let normal = seed / seed.length();

    FieldSample { position, color, normal }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_collapses_to_origin() {
        let params = ParameterSet::default();
        let s = evaluate(0.0, 3.0, &params, &ColorGradient::default());
        assert!(s.position.length() < 1e-12);
        // Center takes the inner color.
        assert!((s.color.x - 26.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_angle_endpoints() {
        let params = ParameterSet::default();
        let start = sweep_angle(0, 1200, &params, 0.0);
        let end = sweep_angle(1199, 1200, &params, 0.0);
        assert!((start - 4.0 * PI).abs() < 1e-12);
        assert!((end - 24.0 * PI).abs() < 1e-9);
        let shifted = sweep_angle(0, 1200, &params, 0.3);
        assert!((shifted - start - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_normal_is_unit() {
        let params = ParameterSet::default();
        let s = evaluate(0.37, 17.2, &params, &ColorGradient::default());
        assert!((s.normal.length() - 1.0).abs() < 1e-12);
        assert!(s.normal.z > 0.0);
    }

    #[test]
    fn test_deterministic() {
        let params = ParameterSet::default();
        let g = ColorGradient::default();
        assert_eq!(evaluate(0.6, 20.0, &params, &g), evaluate(0.6, 20.0, &params, &g));
    }
}
