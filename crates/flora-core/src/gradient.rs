use serde::{Deserialize, Serialize};

/// Two-endpoint color ramp used to tint the surface by radial distance.
///
/// `inner` is the color at the flower's center and `outer` the color at the
/// full radial scale. Channels are 0..=255. `steps` is carried for
/// configuration compatibility only; interpolation is continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorGradient {
    pub inner: [u8; 3],
    pub outer: [u8; 3],
    pub steps: u32,
}

impl Default for ColorGradient {
    fn default() -> Self {
        ColorScheme::BlueYellow.gradient()
    }
}

impl ColorGradient {
    pub fn new(inner: [u8; 3], outer: [u8; 3]) -> Self {
        Self { inner, outer, steps: 200 }
    }

    /// Linear blend between the endpoints, returned in 0..1 per channel.
    pub fn sample(&self, ratio: f64) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (c, channel) in out.iter_mut().enumerate() {
            let a = self.inner[c] as f64;
            let b = self.outer[c] as f64;
            *channel = (a * (1.0 - ratio) + b * ratio) / 255.0;
        }
        out
    }

    /// Weight of the outer endpoint for a radial distance (in shape units).
    pub fn ratio_for_distance(distance: f64, radial_scale: f64) -> f64 {
        (distance / radial_scale).clamp(0.0, 1.0)
    }
}

/// The built-in palette presets, cycled by the color button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    BlueYellow,
    RoseMagenta,
    GreenLime,
    PurpleViolet,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::BlueYellow,
        ColorScheme::RoseMagenta,
        ColorScheme::GreenLime,
        ColorScheme::PurpleViolet,
    ];

    pub fn gradient(&self) -> ColorGradient {
        match self {
            ColorScheme::BlueYellow => ColorGradient::new([26, 85, 144], [255, 199, 13]),
            ColorScheme::RoseMagenta => ColorGradient::new([144, 26, 85], [255, 13, 199]),
            ColorScheme::GreenLime => ColorGradient::new([85, 144, 26], [199, 255, 13]),
            ColorScheme::PurpleViolet => ColorGradient::new([85, 26, 144], [199, 13, 255]),
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::BlueYellow => "Blue-Yellow",
            ColorScheme::RoseMagenta => "Rose-Magenta",
            ColorScheme::GreenLime => "Green-Lime",
            ColorScheme::PurpleViolet => "Purple-Violet",
        }
    }

    /// Parse a scheme from its display name or a loose kebab/lowercase form.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let g = ColorScheme::BlueYellow.gradient();
        let start = g.sample(0.0);
        let end = g.sample(1.0);
        assert!((start[0] - 26.0 / 255.0).abs() < 1e-12);
        assert!((start[2] - 144.0 / 255.0).abs() < 1e-12);
        assert!((end[0] - 1.0).abs() < 1e-12);
        assert!((end[1] - 199.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_clamps() {
        assert_eq!(ColorGradient::ratio_for_distance(-1.0, 1.5), 0.0);
        assert_eq!(ColorGradient::ratio_for_distance(0.75, 1.5), 0.5);
        assert_eq!(ColorGradient::ratio_for_distance(9.0, 1.5), 1.0);
    }

    #[test]
    fn test_scheme_cycle() {
        let mut s = ColorScheme::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(s);
            s = s.next();
        }
        assert_eq!(s, ColorScheme::BlueYellow);
        assert_eq!(seen, ColorScheme::ALL.to_vec());
    }

    #[test]
    fn test_scheme_from_name() {
        assert_eq!(ColorScheme::from_name("green-lime"), Some(ColorScheme::GreenLime));
        assert_eq!(ColorScheme::from_name("Purple Violet"), Some(ColorScheme::PurpleViolet));
        assert_eq!(ColorScheme::from_name("sepia"), None);
    }

    #[test]
    fn test_steps_preserved() {
        assert_eq!(ColorGradient::default().steps, 200);
    }
}
