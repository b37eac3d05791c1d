//! Extraction configuration.
//!
//! Every option has a default matching plain extraction, so an empty file
//! (or no file at all) behaves like [`crate::extract`].
//!
//! # Configuration File Format
//!
//! ```toml
//! seed = 42
//! max_depth = 32
//! on_depth_limit = "truncate"
//! placeholder = "unknown"
//! preserve_id_case = false
//! ```

use std::{fs, path::Path};

use anyhow::{Context, bail};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::leaf::UNKNOWN;

/// Options controlling an [`Extractor`](crate::Extractor).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Seed for the array length generator. Unset means a fresh seed per extractor.
    pub seed: Option<u64>,
    /// Maximum number of nested extractions. Unset means unbounded.
    ///
    /// Cyclic schemas (for example a `rel: "self"` property under the root)
    /// never terminate without a limit.
    pub max_depth: Option<usize>,
    /// What happens when `max_depth` is reached.
    pub on_depth_limit: DepthLimitMode,
    /// Value used for leaves that are not schema mappings.
    pub placeholder: String,
    /// Keep a property named `ID` as-is instead of writing it as `id`.
    pub preserve_id_case: bool,
}

/// Behaviour at the depth limit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DepthLimitMode {
    /// Fail with [`ExtractError::DepthExceeded`](crate::ExtractError::DepthExceeded).
    #[default]
    Error,
    /// Write `null` in place of the node that crossed the limit.
    Truncate,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: None,
            on_depth_limit: DepthLimitMode::default(),
            placeholder: UNKNOWN.to_string(),
            preserve_id_case: false,
        }
    }
}

impl ExtractConfig {
    /// Load a configuration file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension or does not parse.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::parse(&content, ext).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse configuration content in the format named by `ext`.
    pub fn parse(content: &str, ext: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = match ext {
            "json" => serde_json::from_str(content)?,
            "toml" | "tml" => toml::from_str(content)?,
            _ => {
                bail!("Unsupported config file extension: {ext:?}");
            }
        };
        Ok(config)
    }

    /// Fix the array length generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound recursion depth.
    pub fn with_max_depth(mut self, limit: usize, mode: DepthLimitMode) -> Self {
        self.max_depth = Some(limit);
        self.on_depth_limit = mode;
        self
    }

    /// Replace the placeholder used for non-mapping leaves.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Keep `ID` property names unchanged.
    pub fn with_preserved_id_case(mut self) -> Self {
        self.preserve_id_case = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.placeholder, "unknown");
        assert_eq!(config.max_depth, None);
        assert_eq!(config.on_depth_limit, DepthLimitMode::Error);
        assert!(!config.preserve_id_case);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ExtractConfig::parse("seed = 7\non_depth_limit = \"truncate\"", "toml").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.on_depth_limit, DepthLimitMode::Truncate);
        assert_eq!(config.placeholder, "unknown");
    }

    #[test]
    fn test_parse_json() {
        let config =
            ExtractConfig::parse(r#"{"max_depth": 4, "preserve_id_case": true}"#, "json").unwrap();
        assert_eq!(config.max_depth, Some(4));
        assert!(config.preserve_id_case);
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(
            ExtractConfig::parse("  \n", "yaml").unwrap(),
            ExtractConfig::default()
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ExtractConfig::parse("seed: 1", "yaml").unwrap_err();
        assert!(err.to_string().contains("Unsupported config file extension"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "placeholder = \"n/a\"").unwrap();
        let config = ExtractConfig::load(file.path()).unwrap();
        assert_eq!(config, ExtractConfig::default().with_placeholder("n/a"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExtractConfig::load("/nonexistent/extract.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
