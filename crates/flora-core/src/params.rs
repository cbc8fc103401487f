use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Allowed range for the shape-sweep grid axis (`xPoints`).
pub const X_POINTS_RANGE: (usize, usize) = (10, 50);
/// Allowed range for the time-sweep grid axis (`tPoints`).
pub const T_POINTS_RANGE: (usize, usize) = (200, 1200);

/// Errors raised when a named parameter update cannot be stored.
///
/// Out-of-range values are never an error: they are clamped to the nearest
/// bound of the parameter's range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("non-finite value {value} for parameter '{name}'")]
    NonFiniteValue { name: &'static str, value: f64 },
}

/// Identifier of one field of the [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum ParamId {
    XPoints = 0,
    TPoints = 1,
    TimeMultiplier = 2,
    TimeOffset = 3,
    DeformationFactor = 4,
    ExponentialDecay = 5,
    TemporalFrequency = 6,
    ChangeAmplitude = 7,
    VelocityModulator = 8,
    VelocityPower = 9,
    CoordinateMultiplier = 10,
    RadialScale = 11,
    AnimationSpeed = 12,
    SinusoidalIntensity = 13,
}

impl ParamId {
    pub const ALL: [ParamId; 14] = [
        ParamId::XPoints,
        ParamId::TPoints,
        ParamId::TimeMultiplier,
        ParamId::TimeOffset,
        ParamId::DeformationFactor,
        ParamId::ExponentialDecay,
        ParamId::TemporalFrequency,
        ParamId::ChangeAmplitude,
        ParamId::VelocityModulator,
        ParamId::VelocityPower,
        ParamId::CoordinateMultiplier,
        ParamId::RadialScale,
        ParamId::AnimationSpeed,
        ParamId::SinusoidalIntensity,
    ];

    /// Look up a parameter by its UI field name (e.g. `"deformationFactor"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    pub fn spec(&self) -> &'static ParamSpec {
        &PARAM_SPECS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Structural parameters change buffer sizes and require a full rebuild.
    pub fn is_structural(&self) -> bool {
        self.spec().structural
    }
}

/// Static description of one parameter: range, default and UI metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub default_value: f64,
    pub min: f64,
    pub max: f64,
    /// Quantization step. Zero means continuous.
    pub step: f64,
    pub structural: bool,
}

impl ParamSpec {
    /// Quantize to the step (if any) and clamp into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        let stepped = if self.step > 0.0 {
            (value / self.step).round() * self.step
        } else {
            value
        };
        stepped.clamp(self.min, self.max)
    }
}

pub static PARAM_SPECS: [ParamSpec; 14] = [
    ParamSpec {
        id: ParamId::XPoints,
        name: "xPoints",
        label: "Shape Resolution",
        description: "Number of samples along the shape axis.",
        default_value: 30.0,
        min: X_POINTS_RANGE.0 as f64,
        max: X_POINTS_RANGE.1 as f64,
        step: 1.0,
        structural: true,
    },
    ParamSpec {
        id: ParamId::TPoints,
        name: "tPoints",
        label: "Sweep Resolution",
        description: "Number of samples along the time/angle axis.",
        default_value: 1200.0,
        min: T_POINTS_RANGE.0 as f64,
        max: T_POINTS_RANGE.1 as f64,
        step: 1.0,
        structural: true,
    },
    ParamSpec {
        id: ParamId::TimeMultiplier,
        name: "timeMultiplier",
        label: "Sweep Length",
        description: "Number of half turns covered by the angle sweep.",
        default_value: 20.0,
        min: 1.0,
        max: 100.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::TimeOffset,
        name: "timeOffset",
        label: "Sweep Offset",
        description: "Start of the angle sweep in half turns.",
        default_value: 4.0,
        min: 0.0,
        max: 20.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::DeformationFactor,
        name: "deformationFactor",
        label: "Deformation",
        description: "Amplitude of the petal bending angle.",
        default_value: 0.5,
        min: 0.0,
        max: 2.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::ExponentialDecay,
        name: "exponentialDecay",
        label: "Decay",
        description: "How slowly the bending angle decays along the sweep.",
        default_value: 8.0,
        min: 0.5,
        max: 32.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::TemporalFrequency,
        name: "temporalFrequency",
        label: "Ripple Frequency",
        description: "Frequency of the sinusoidal petal ripple.",
        default_value: 15.0,
        min: 0.0,
        max: 60.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::ChangeAmplitude,
        name: "changeAmplitude",
        label: "Change Amplitude",
        description: "Kept for configuration compatibility; not used by the surface.",
        default_value: 150.0,
        min: 0.0,
        max: 500.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::VelocityModulator,
        name: "velocityModulator",
        label: "Petal Count",
        description: "Angular rate of the petal modulation.",
        default_value: 3.3,
        min: 0.0,
        max: 10.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::VelocityPower,
        name: "velocityPower",
        label: "Petal Sharpness",
        description: "Exponent of the petal modulation curve.",
        default_value: 4.0,
        min: 1.0,
        max: 8.0,
        step: 1.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::CoordinateMultiplier,
        name: "coordinateMultiplier",
        label: "Cup Depth",
        description: "Weight of the quartic cup term.",
        default_value: 2.0,
        min: 0.0,
        max: 10.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::RadialScale,
        name: "radialScale",
        label: "Radius",
        description: "Radial scale of the flower; also the full-color distance.",
        default_value: 1.5,
        min: 0.1,
        max: 5.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::AnimationSpeed,
        name: "animationSpeed",
        label: "Animation Speed",
        description: "Multiplier applied to the global time before it shifts the phase.",
        default_value: 1.0,
        min: 0.0,
        max: 5.0,
        step: 0.0,
        structural: false,
    },
    ParamSpec {
        id: ParamId::SinusoidalIntensity,
        name: "sinusoidalIntensity",
        label: "Ripple Damping",
        description: "Divisor of the sinusoidal ripple; larger is calmer.",
        default_value: 150.0,
        min: 1.0,
        max: 500.0,
        step: 0.0,
        structural: false,
    },
];

/// The full set of surface parameters.
///
/// Serialized with the camelCase field names used by the control panel so a
/// UI can address fields by name. Values stored through [`ParameterSet::set`]
/// are always inside their [`ParamSpec`] range; values deserialized from
/// configuration should go through [`ParameterSet::sanitized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSet {
    #[serde(deserialize_with = "deserialize_x_points")]
    pub x_points: usize,
    #[serde(deserialize_with = "deserialize_t_points")]
    pub t_points: usize,
    pub time_multiplier: f64,
    pub time_offset: f64,
    pub deformation_factor: f64,
    pub exponential_decay: f64,
    pub temporal_frequency: f64,
    pub change_amplitude: f64,
    pub velocity_modulator: f64,
    pub velocity_power: f64,
    pub coordinate_multiplier: f64,
    pub radial_scale: f64,
    pub animation_speed: f64,
    pub sinusoidal_intensity: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            x_points: 30,
            t_points: 1200,
            time_multiplier: 20.0,
            time_offset: 4.0,
            deformation_factor: 0.5,
            exponential_decay: 8.0,
            temporal_frequency: 15.0,
            change_amplitude: 150.0,
            velocity_modulator: 3.3,
            velocity_power: 4.0,
            coordinate_multiplier: 2.0,
            radial_scale: 1.5,
            animation_speed: 1.0,
            sinusoidal_intensity: 150.0,
        }
    }
}

impl ParameterSet {
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::XPoints => self.x_points as f64,
            ParamId::TPoints => self.t_points as f64,
            ParamId::TimeMultiplier => self.time_multiplier,
            ParamId::TimeOffset => self.time_offset,
            ParamId::DeformationFactor => self.deformation_factor,
            ParamId::ExponentialDecay => self.exponential_decay,
            ParamId::TemporalFrequency => self.temporal_frequency,
            ParamId::ChangeAmplitude => self.change_amplitude,
            ParamId::VelocityModulator => self.velocity_modulator,
            ParamId::VelocityPower => self.velocity_power,
            ParamId::CoordinateMultiplier => self.coordinate_multiplier,
            ParamId::RadialScale => self.radial_scale,
            ParamId::AnimationSpeed => self.animation_speed,
            ParamId::SinusoidalIntensity => self.sinusoidal_intensity,
        }
    }

    /// Clamp and store a value. Returns the value actually stored.
    pub fn set(&mut self, id: ParamId, value: f64) -> Result<f64, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteValue { name: id.name(), value });
        }
        let clamped = id.spec().clamp(value);
        self.store(id, clamped);
        Ok(clamped)
    }

    /// Clamp and store a value addressed by its UI field name.
    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<ParamId, ParamError> {
        let id = ParamId::from_name(name)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))?;
        self.set(id, value)?;
        Ok(id)
    }

    /// Return a copy with every field clamped into range. Non-finite fields
    /// fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for id in ParamId::ALL {
            let spec = id.spec();
            let value = self.get(id);
            let value = if value.is_finite() { value } else { spec.default_value };
            out.store(id, spec.clamp(value));
        }
        out
    }

    /// The clamped `(xPoints, tPoints)` grid size.
    pub fn grid(&self) -> (usize, usize) {
        (clamp_x_points(self.x_points), clamp_t_points(self.t_points))
    }

    pub fn reset_to_default(&mut self) {
        *self = Self::default();
    }

    fn store(&mut self, id: ParamId, value: f64) {
        match id {
            ParamId::XPoints => self.x_points = value as usize,
            ParamId::TPoints => self.t_points = value as usize,
            ParamId::TimeMultiplier => self.time_multiplier = value,
            ParamId::TimeOffset => self.time_offset = value,
            ParamId::DeformationFactor => self.deformation_factor = value,
            ParamId::ExponentialDecay => self.exponential_decay = value,
            ParamId::TemporalFrequency => self.temporal_frequency = value,
            ParamId::ChangeAmplitude => self.change_amplitude = value,
            ParamId::VelocityModulator => self.velocity_modulator = value,
            ParamId::VelocityPower => self.velocity_power = value,
            ParamId::CoordinateMultiplier => self.coordinate_multiplier = value,
            ParamId::RadialScale => self.radial_scale = value,
            ParamId::AnimationSpeed => self.animation_speed = value,
            ParamId::SinusoidalIntensity => self.sinusoidal_intensity = value,
        }
    }
}

/// Grid counts accept any JSON number and are rounded and clamped like
/// values set by name.
fn deserialize_x_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(ParamId::XPoints.spec().clamp(value) as usize)
}

fn deserialize_t_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(ParamId::TPoints.spec().clamp(value) as usize)
}

/// Clamp a requested shape-axis resolution into [`X_POINTS_RANGE`].
pub fn clamp_x_points(n: usize) -> usize {
    n.clamp(X_POINTS_RANGE.0, X_POINTS_RANGE.1)
}

/// Clamp a requested sweep-axis resolution into [`T_POINTS_RANGE`].
pub fn clamp_t_points(n: usize) -> usize {
    n.clamp(T_POINTS_RANGE.0, T_POINTS_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_table_matches_ids() {
        for (i, spec) in PARAM_SPECS.iter().enumerate() {
            assert_eq!(spec.id as usize, i);
            assert_eq!(ParamId::ALL[i], spec.id);
        }
    }

    #[test]
    fn test_defaults_match_spec_table() {
        let params = ParameterSet::default();
        for id in ParamId::ALL {
            assert!((params.get(id) - id.spec().default_value).abs() < 1e-12, "{}", id.name());
        }
    }

    #[test]
    fn test_grid_clamping() {
        assert_eq!(clamp_x_points(5), 10);
        assert_eq!(clamp_x_points(999), 50);
        assert_eq!(clamp_t_points(50), 200);
        assert_eq!(clamp_t_points(5000), 1200);
    }

    #[test]
    fn test_set_clamps_silently() {
        let mut params = ParameterSet::default();
        assert_eq!(params.set(ParamId::XPoints, 5.0).unwrap(), 10.0);
        assert_eq!(params.x_points, 10);
        assert_eq!(params.set(ParamId::SinusoidalIntensity, 0.0).unwrap(), 1.0);
        assert_eq!(params.set(ParamId::DeformationFactor, 7.5).unwrap(), 2.0);
    }

    #[test]
    fn test_set_rounds_stepped_fields() {
        let mut params = ParameterSet::default();
        params.set(ParamId::VelocityPower, 3.6).unwrap();
        assert_eq!(params.velocity_power, 4.0);
        params.set(ParamId::TPoints, 640.4).unwrap();
        assert_eq!(params.t_points, 640);
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let mut params = ParameterSet::default();
        let err = params.set(ParamId::RadialScale, f64::NAN).unwrap_err();
        assert!(matches!(err, ParamError::NonFiniteValue { name: "radialScale", .. }));
        assert_eq!(params.radial_scale, 1.5);
    }

    #[test]
    fn test_set_by_name() {
        let mut params = ParameterSet::default();
        let id = params.set_by_name("animationSpeed", 2.5).unwrap();
        assert_eq!(id, ParamId::AnimationSpeed);
        assert_eq!(params.animation_speed, 2.5);

        let err = params.set_by_name("petalCount", 1.0).unwrap_err();
        assert_eq!(err, ParamError::UnknownParameter("petalCount".to_string()));
    }

    #[test]
    fn test_structural_flags() {
        assert!(ParamId::XPoints.is_structural());
        assert!(ParamId::TPoints.is_structural());
        assert!(!ParamId::DeformationFactor.is_structural());
        assert!(!ParamId::AnimationSpeed.is_structural());
        assert!(!ParamId::SinusoidalIntensity.is_structural());
    }

    #[test]
    fn test_sanitized_clamps_everything() {
        let raw = ParameterSet {
            x_points: 2,
            t_points: 90_000,
            exponential_decay: 0.0,
            radial_scale: f64::INFINITY,
            ..Default::default()
        };
        let clean = raw.sanitized();
        assert_eq!(clean.x_points, 10);
        assert_eq!(clean.t_points, 1200);
        assert_eq!(clean.exponential_decay, 0.5);
        assert_eq!(clean.radial_scale, 1.5);
    }

    #[test]
    fn test_serde_uses_ui_names() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        for id in ParamId::ALL {
            assert!(json.get(id.name()).is_some(), "missing field {}", id.name());
        }

        let partial: ParameterSet = serde_json::from_str(r#"{"xPoints": 12}"#).unwrap();
        assert_eq!(partial.x_points, 12);
        assert_eq!(partial.t_points, 1200);
    }

    #[test]
    fn test_grid_counts_from_any_json_number() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"xPoints": 12.5, "tPoints": -3}"#).unwrap();
        assert_eq!(params.x_points, 13);
        assert_eq!(params.t_points, 200);

        let params: ParameterSet =
            serde_json::from_str(r#"{"xPoints": 1e9, "tPoints": 640.4}"#).unwrap();
        assert_eq!(params.x_points, 50);
        assert_eq!(params.t_points, 640);
    }
}
