//! Configuration types deserialized from `hintc.toml`.

use crate::charset::Charset;
use serde::Deserialize;

/// Default artifact location, relative to the class output root.
pub const DEFAULT_OUTPUT_PATH: &str = "META-INF/hotspot_compiler";

/// The top-level configuration parsed from `hintc.toml`.
///
/// Every section is optional; an empty file yields the defaults
/// (UTF-8 artifact at [`DEFAULT_OUTPUT_PATH`], non-incremental).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HintConfig {
    /// Where and how the monolithic artifact is written.
    #[serde(default)]
    pub output: OutputConfig,
    /// Incremental fragment settings. Absent means non-incremental mode.
    #[serde(default)]
    pub incremental: Option<IncrementalConfig>,
}

impl HintConfig {
    /// Returns `true` if fragments are written instead of the artifact.
    pub fn is_incremental(&self) -> bool {
        self.incremental.is_some()
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Artifact path relative to the class output root.
    #[serde(default = "default_output_path")]
    pub path: String,
    /// Charset the artifact is encoded in.
    #[serde(default)]
    pub charset: Charset,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            charset: Charset::default(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

/// Incremental mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncrementalConfig {
    /// Directory receiving one fragment file per directive, relative to the
    /// class output root unless absolute.
    pub fragments_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: HintConfig = toml::from_str("").unwrap();
        assert_eq!(config, HintConfig::default());
        assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output.charset, Charset::Utf8);
        assert!(!config.is_incremental());
    }

    #[test]
    fn charset_by_name() {
        let config: HintConfig = toml::from_str(
            r#"
[output]
charset = "ISO-8859-1"
"#,
        )
        .unwrap();
        assert_eq!(config.output.charset, Charset::Iso8859_1);
        assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn incremental_section() {
        let config: HintConfig = toml::from_str(
            r#"
[incremental]
fragments_dir = "INCREMENTAL_FRAGMENTS"
"#,
        )
        .unwrap();
        assert!(config.is_incremental());
        assert_eq!(
            config.incremental.unwrap().fragments_dir,
            "INCREMENTAL_FRAGMENTS"
        );
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<HintConfig, _> = toml::from_str(
            r#"
[output]
pth = "typo"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn bad_charset_rejected() {
        let result: Result<HintConfig, _> = toml::from_str(
            r#"
[output]
charset = "klingon"
"#,
        );
        assert!(result.is_err());
    }
}
