use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pricing::monthly::{
    CaptioningPlan, ChatPlan, DocumentPlan, ImagePlan, MonthlyUsage, StoragePlan, VideoPlan,
};

pub const DEFAULT_CONFIG_FILE: &str = "assistant-cost.toml";
pub const ENV_PREFIX: &str = "ASSISTANT_COST";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub chat: ChatPlan,
    pub documents: DocumentPlan,
    pub captioning: CaptioningPlan,
    pub images: ImagePlan,
    pub videos: VideoPlan,
    pub storage: StoragePlan,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// The scenario this configuration describes
    pub fn usage(&self) -> MonthlyUsage {
        MonthlyUsage {
            chat: self.chat.clone(),
            documents: self.documents.clone(),
            captioning: self.captioning.clone(),
            images: self.images.clone(),
            videos: self.videos.clone(),
            storage: self.storage.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let usage = MonthlyUsage::default();
        Self {
            logging: LoggingConfig::default(),
            chat: usage.chat,
            documents: usage.documents,
            captioning: usage.captioning,
            images: usage.images,
            videos: usage.videos,
            storage: usage.storage,
        }
    }
}

/// Load configuration, lowest precedence first: built-in defaults, the TOML
/// file at `path` (optional), then `ASSISTANT_COST__SECTION__KEY` variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let defaults = config::Config::try_from(&Config::default())?;

    let settings = config::Config::builder()
        .add_source(defaults)
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = settings.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !LOG_LEVELS.contains(&cfg.logging.level.to_lowercase().as_str()) {
        anyhow::bail!(
            "Invalid log level '{}' (expected one of: {})",
            cfg.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    if !LOG_FORMATS.contains(&cfg.logging.format.as_str()) {
        anyhow::bail!(
            "Invalid log format '{}' (expected one of: {})",
            cfg.logging.format,
            LOG_FORMATS.join(", ")
        );
    }

    cfg.usage().validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_log_format() {
        let mut cfg = Config::default();
        cfg.logging.format = "yaml".to_string();

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_validate_config_rejects_negative_price() {
        let mut cfg = Config::default();
        cfg.chat.economy.output_per_1k = -1.0;

        let result = validate_config(&cfg);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("chat.economy.output_per_1k"));
    }

    #[test]
    fn test_usage_round_trips_sections() {
        let cfg = Config::default();
        assert_eq!(cfg.usage(), MonthlyUsage::default());
    }

    #[test]
    fn test_config_serializes_to_toml() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_string.contains("[chat.premium]"));
        assert!(toml_string.contains("hires_fraction = 0.5"));

        let parsed: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
