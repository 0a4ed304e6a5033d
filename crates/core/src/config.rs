//! Engine configuration.

use docsync_api::{DocsyncError, Result};
use docsync_php::InferenceOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything the engine can be told from outside.
///
/// Every field has a default, so `{}` is a valid configuration that
/// reproduces the built-in behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub inference: InferenceOptions,
    /// Prefix of the rolling log files.
    pub log_component: String,
    pub log_to_stderr: bool,
    /// Directory of the log files, `~/.docsync/logs` when unset.
    pub log_dir: Option<PathBuf>,
    /// Shorten namespaced doc comment names after fixing `@var` tags.
    pub import_names: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inference: InferenceOptions::default(),
            log_component: "docsync".to_string(),
            log_to_stderr: false,
            log_dir: None,
            import_names: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading engine config from {}", path.display());
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.inference.strategies.is_empty() {
            return Err(DocsyncError::InvalidConfig(
                "inference.strategies must enable at least one strategy".to_string(),
            ));
        }
        if let Some(empty) = self
            .inference
            .instantiating_methods
            .iter()
            .chain(&self.inference.instantiation_markers)
            .find(|name| name.trim().is_empty())
        {
            return Err(DocsyncError::InvalidConfig(format!(
                "empty method name or marker {:?} in inference options",
                empty
            )));
        }
        if self.log_component.trim().is_empty() {
            return Err(DocsyncError::InvalidConfig(
                "log_component must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_php::inference::StrategyKind;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_inference_options() {
        let config = EngineConfig::from_json_str(
            r#"{"inference": {"instantiating_methods": ["__construct", "boot"]}, "import_names": true}"#,
        )
        .unwrap();
        assert!(config.import_names);
        assert!(config.inference.is_instantiating_name("BOOT"));
        assert_eq!(
            config.inference.strategies,
            vec![StrategyKind::ConstructorParam, StrategyKind::AllAssign]
        );
    }

    #[test]
    fn test_rejects_empty_strategies() {
        let err = EngineConfig::from_json_str(r#"{"inference": {"strategies": []}}"#).unwrap_err();
        assert!(matches!(err, DocsyncError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_blank_method_name() {
        let err = EngineConfig::from_json_str(r#"{"inference": {"instantiating_methods": [" "]}}"#)
            .unwrap_err();
        assert!(matches!(err, DocsyncError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = EngineConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, DocsyncError::Json(_)));
    }
}
