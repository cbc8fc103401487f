use flora_core::{default_bouquet, ColorGradient, ColorScheme, InstanceConfig, ParameterSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bouquet configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to start a bouquet. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BouquetConfig {
    pub params: ParameterSet,
    pub gradient: ColorGradient,
    pub instances: Vec<InstanceConfig>,
}

impl Default for BouquetConfig {
    fn default() -> Self {
        Self {
            params: ParameterSet::default(),
            gradient: ColorGradient::default(),
            instances: default_bouquet(),
        }
    }
}

impl BouquetConfig {
    /// Parse JSON text. Parameters are clamped into range on load.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A copy with parameters clamped and unusable instance scales replaced.
    pub fn sanitized(&self) -> Self {
        let instances = self
            .instances
            .iter()
            .map(|c| {
                let mut c = *c;
                if !c.scale.is_finite() || c.scale <= 0.0 {
                    log::warn!("instance scale {} replaced with 1.0", c.scale);
                    c.scale = 1.0;
                }
                if !c.phase_offset.is_finite() {
                    c.phase_offset = 0.0;
                }
                c
            })
            .collect();

        Self {
            params: self.params.sanitized(),
            gradient: self.gradient,
            instances,
        }
    }

    /// The preset matching this gradient, if any.
    pub fn scheme(&self) -> Option<ColorScheme> {
        ColorScheme::ALL.into_iter().find(|s| s.gradient() == self.gradient)
    }
}
