use super::colors::{party_parrot_ramp, Color};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter, EnumString};

/// Default duration of one full color cycle, in milliseconds
pub const DEFAULT_SPEED_MILLIS: u64 = 500;

/// Which paint attribute references the gradient
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum PaintMode {
    #[default]
    Fill,
    Stroke,
}

impl PaintMode {
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }
}

/// How the gradient colors are driven
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub enum AnimationKind {
    /// Nested `<animate>` elements, played by the renderer
    #[default]
    Declarative,

    /// Stops are updated by the host through [`FrameAnimator`](super::FrameAnimator)
    Frames,
}

/// Party configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct PartyConfig {
    /// Duration of one full color cycle in milliseconds
    pub speed: u64,

    /// The colors to cycle through
    pub gradient: Vec<Color>,

    /// The attribute set on targeted shapes
    pub mode: PaintMode,

    pub animation: AnimationKind,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_MILLIS,
            gradient: party_parrot_ramp(),
            mode: PaintMode::default(),
            animation: AnimationKind::default(),
        }
    }
}

impl PartyConfig {
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, choosing the format from its extension; anything but `.json` is read as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), json = is_json, "loading party config");
        if is_json { Self::from_json(&contents) } else { Self::from_yaml(&contents) }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed == 0 {
            return Err(ConfigError::Invalid("speed must be greater than zero".to_string()));
        }
        if self.gradient.is_empty() {
            return Err(ConfigError::Invalid("gradient must contain at least one color".to_string()));
        }
        Ok(())
    }

    /// The `dur` attribute value for one cycle
    pub fn duration_attribute(&self) -> String {
        duration_value(self.speed)
    }
}

pub(crate) fn duration_value(speed_millis: u64) -> String {
    format!("{}s", speed_millis as f64 / 1000.0)
}

/// Errors that can occur when loading a party configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use strum::IntoEnumIterator;

    #[test]
    fn defaults() {
        let config = PartyConfig::default();
        assert_eq!(config.speed, 500);
        assert_eq!(config.gradient.len(), 10);
        assert_eq!(config.mode, PaintMode::Fill);
        assert_eq!(config.animation, AnimationKind::Declarative);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = PartyConfig::from_yaml("speed: 1200\nmode: stroke").expect("parse failed");
        assert_eq!(config.speed, 1200);
        assert_eq!(config.mode, PaintMode::Stroke);
        assert_eq!(config.gradient, party_parrot_ramp());
    }

    #[test]
    fn json_colors() {
        let config = PartyConfig::from_json(r##"{"gradient": ["#fff", "#000000"], "animation": "frames"}"##)
            .expect("parse failed");
        assert_eq!(config.gradient, vec![Color::new(255, 255, 255), Color::new(0, 0, 0)]);
        assert_eq!(config.animation, AnimationKind::Frames);
    }

    #[rstest]
    #[case("speed: 0")]
    #[case("gradient: []")]
    #[case("gradient: ['blue']")]
    #[case("unknown: 1")]
    #[case("mode: outline")]
    fn invalid_yaml(#[case] contents: &str) {
        assert!(PartyConfig::from_yaml(contents).is_err());
    }

    #[test]
    fn load_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile failed");
        write!(json, r#"{{"speed": 250}}"#).unwrap();
        assert_eq!(PartyConfig::load(json.path()).expect("load failed").speed, 250);

        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().expect("tempfile failed");
        write!(yaml, "speed: 750").unwrap();
        assert_eq!(PartyConfig::load(yaml.path()).expect("load failed").speed, 750);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(PartyConfig::load("/nonexistent/party.yaml"), Err(ConfigError::Io(_))));
    }

    #[test]
    fn duration_attribute() {
        let config = PartyConfig { speed: 1500, ..Default::default() };
        assert_eq!(config.duration_attribute(), "1.5s");
        assert_eq!(PartyConfig::default().duration_attribute(), "0.5s");
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in PaintMode::iter() {
            assert_eq!(mode.to_string().parse::<PaintMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.attribute());
        }
    }
}
