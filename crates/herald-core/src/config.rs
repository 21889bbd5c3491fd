use crate::error::{HeraldError, HeraldResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PRINT_EVENT: &str = "print";
pub const DEFAULT_PRINT_ERROR_EVENT: &str = "printError";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeraldConfig {
    pub logging: LoggingConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
        }
    }
}

/// Event names the notifier fires after writing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotifierConfig {
    pub print_event: String,
    pub print_error_event: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            print_event: DEFAULT_PRINT_EVENT.to_string(),
            print_error_event: DEFAULT_PRINT_ERROR_EVENT.to_string(),
        }
    }
}

impl NotifierConfig {
    pub fn validate(&self) -> HeraldResult<()> {
        if self.print_event.trim().is_empty() {
            return Err(HeraldError::Config("print_event must not be empty".to_string()));
        }
        if self.print_error_event.trim().is_empty() {
            return Err(HeraldError::Config(
                "print_error_event must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl HeraldConfig {
    pub fn from_json_str(data: &str) -> HeraldResult<Self> {
        let cfg: HeraldConfig = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> HeraldResult<Self> {
        let data = fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn validate(&self) -> HeraldResult<()> {
        self.notifier.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_print_event_names() {
        let cfg = HeraldConfig::default();
        assert_eq!(cfg.notifier.print_event, "print");
        assert_eq!(cfg.notifier.print_error_event, "printError");
        assert_eq!(cfg.logging.filter, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = HeraldConfig::from_json_str(r#"{ "notifier": { "print_event": "out" } }"#)
            .expect("config should parse");
        assert_eq!(cfg.notifier.print_event, "out");
        assert_eq!(cfg.notifier.print_error_event, "printError");
        assert!(cfg.logging.ansi);
    }

    #[test]
    fn empty_event_name_is_rejected() {
        let err = HeraldConfig::from_json_str(r#"{ "notifier": { "print_error_event": " " } }"#)
            .expect_err("blank event name should fail");
        assert!(matches!(err, HeraldError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = HeraldConfig::from_json_str("{ notifier").expect_err("should fail");
        assert!(matches!(err, HeraldError::Serde(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = HeraldConfig::load(Path::new("/nonexistent/herald.json"))
            .expect_err("should fail");
        assert!(matches!(err, HeraldError::Io(_)));
    }
}
