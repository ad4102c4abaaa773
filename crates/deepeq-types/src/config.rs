//! TOML-loadable comparison settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::options::CompareOptions;
use crate::policy::MemberPolicy;

/// A member policy and comparison options loaded together.
///
/// ```toml
/// [policy]
/// include_non_public = true
///
/// [options]
/// max_depth = 8
/// on_max_depth = "log-and-continue"
/// ```
///
/// The custom terminal predicate is code, not data, and is never loaded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub policy: MemberPolicy,
    pub options: CompareOptions,
}

impl CompareConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DepthBehavior;

    #[test]
    fn empty_text_yields_defaults() {
        let c = CompareConfig::from_toml_str("").unwrap();
        assert_eq!(c.policy, MemberPolicy::default());
        assert_eq!(c.options.max_depth, Some(20));
        assert_eq!(c.options.on_max_depth, DepthBehavior::TreatAsDifferent);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let c = CompareConfig::from_toml_str(
            r#"
            [policy]
            include_non_public = true

            [options]
            max_depth = 8
            on_max_depth = "log-and-continue"
            "#,
        )
        .unwrap();
        assert!(c.policy.include_non_public);
        assert!(!c.policy.include_fields);
        assert!(c.policy.honor_ignore);
        assert_eq!(c.options.max_depth, Some(8));
        assert_eq!(c.options.on_max_depth, DepthBehavior::LogAndContinue);
        assert!(c.options.terminal_predicate.is_none());
    }

    #[test]
    fn invalid_behavior_is_parse_error() {
        let err = CompareConfig::from_toml_str("[options]\non_max_depth = \"explode\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deepeq.toml");
        std::fs::write(&path, "[policy]\ninclude_fields = true\n").unwrap();
        let c = CompareConfig::load(&path).unwrap();
        assert!(c.policy.include_fields);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CompareConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
