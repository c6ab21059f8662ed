use crate::models::{
    ChoiceHighlight, ConfigValidationError, DimensionConfig, HardFilterConfig, MatchingConfig,
    ReasonConfig, ScaleHighlight, ScorerKind, ScoringItem, TagHighlight,
};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Optional TOML file overriding the built-in survey configuration
    pub config_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Failure to produce a usable matching configuration
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read matching configuration: {0}")]
    Read(#[from] ConfigError),
    #[error("invalid matching configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with KINDRED_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., KINDRED_LOGGING__LEVEL -> logging.level
            .add_source(
                Environment::with_prefix("KINDRED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the matching configuration for this deployment.
    ///
    /// Reads the configured TOML file when one is set, otherwise falls back
    /// to the built-in survey. Either way the result is validated before use.
    pub fn matching_config(&self) -> Result<MatchingConfig, ConfigLoadError> {
        let config = match &self.matching.config_file {
            Some(path) => Config::builder()
                .add_source(File::with_name(path))
                .build()?
                .try_deserialize::<MatchingConfig>()?,
            None => default_survey(),
        };

        config.validate()?;
        Ok(config)
    }
}

/// The authored static configuration for the current survey.
///
/// Configuration is data, not code: swapping this for an alternate survey
/// must not require touching the scoring logic. Dimension weights sum to
/// 1.0, as do item weights within each dimension.
pub fn default_survey() -> MatchingConfig {
    MatchingConfig {
        dimensions: vec![
            DimensionConfig {
                name: "attachment style".to_string(),
                weight: 0.25,
                items: vec![
                    scale_item("q_closeness", 0.4, 1.0, 7.0),
                    choice_item("q_safety", 0.35),
                    scale_item("q_reassurance", 0.25, 1.0, 7.0),
                ],
            },
            DimensionConfig {
                name: "conflict style".to_string(),
                weight: 0.20,
                items: vec![
                    choice_item("q_conflict", 0.6),
                    scale_item("q_cooldown", 0.4, 1.0, 7.0),
                ],
            },
            DimensionConfig {
                name: "core values".to_string(),
                weight: 0.25,
                items: vec![
                    ScoringItem {
                        question_id: "q_values".to_string(),
                        weight: 0.5,
                        kind: ScorerKind::TagSet,
                    },
                    ScoringItem {
                        question_id: "q_priorities".to_string(),
                        weight: 0.5,
                        kind: ScorerKind::Ranked,
                    },
                ],
            },
            DimensionConfig {
                name: "lifestyle".to_string(),
                weight: 0.15,
                items: vec![
                    scale_item("q_pace", 0.5, 1.0, 7.0),
                    scale_item("q_social_energy", 0.5, 1.0, 7.0),
                ],
            },
            DimensionConfig {
                name: "life vision".to_string(),
                weight: 0.15,
                items: vec![
                    choice_item("q_children", 0.5),
                    choice_item("q_faith_practice", 0.3),
                    scale_item("q_finances", 0.2, 1.0, 7.0),
                ],
            },
        ],
        hard_filters: vec![
            HardFilterConfig {
                question_id: "q_bride_price".to_string(),
                incompatible: vec![("required".to_string(), "refuses".to_string())],
            },
            HardFilterConfig {
                question_id: "q_children".to_string(),
                incompatible: vec![("definitely".to_string(), "never".to_string())],
            },
        ],
        reasons: ReasonConfig {
            choice_highlights: vec![
                ChoiceHighlight {
                    question_id: "q_safety".to_string(),
                    label: "where you feel safest".to_string(),
                },
                ChoiceHighlight {
                    question_id: "q_conflict".to_string(),
                    label: "how you handle conflict".to_string(),
                },
            ],
            tag_highlight: Some(TagHighlight {
                question_id: "q_values".to_string(),
                label: "core values".to_string(),
            }),
            scale_highlights: vec![
                ScaleHighlight {
                    question_id: "q_closeness".to_string(),
                    label: "your need for closeness".to_string(),
                    min: 1.0,
                    max: 7.0,
                },
                ScaleHighlight {
                    question_id: "q_pace".to_string(),
                    label: "your pace of life".to_string(),
                    min: 1.0,
                    max: 7.0,
                },
                ScaleHighlight {
                    question_id: "q_social_energy".to_string(),
                    label: "your social energy".to_string(),
                    min: 1.0,
                    max: 7.0,
                },
            ],
        },
    }
}

fn scale_item(question_id: &str, weight: f64, min: f64, max: f64) -> ScoringItem {
    ScoringItem {
        question_id: question_id.to_string(),
        weight,
        kind: ScorerKind::Scale { min, max },
    }
}

fn choice_item(question_id: &str, weight: f64) -> ScoringItem {
    ScoringItem {
        question_id: question_id.to_string(),
        weight,
        kind: ScorerKind::Choice,
    }
}
