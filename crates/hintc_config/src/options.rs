//! Processor options in the build tool's `key=value` form.
//!
//! Options override whatever `hintc.toml` said. Unknown keys belong to other
//! processors sharing the same option namespace and are skipped.

use crate::charset::Charset;
use crate::error::ConfigError;
use crate::loader::validate_config;
use crate::types::{HintConfig, IncrementalConfig};

/// Option naming the artifact path relative to the class output root.
pub const OPTION_OUTPUT_PATH: &str = "compile.command.file.output.path";

/// Option naming the artifact charset.
pub const OPTION_OUTPUT_CHARSET: &str = "compile.command.file.output.charset";

/// Option naming the fragments directory; its presence enables incremental mode.
pub const OPTION_INCREMENTAL_OUTPUT: &str = "compile.command.incremental.output";

/// Splits a `key=value` option. The value may itself contain `=`.
pub fn parse_option(raw: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::MalformedOption(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::MalformedOption(raw.to_string()));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Applies processor options on top of `config` and revalidates it.
pub fn apply_options<'a, I>(config: &mut HintConfig, options: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (key, value) in options {
        match key {
            OPTION_OUTPUT_PATH => config.output.path = value.to_string(),
            OPTION_OUTPUT_CHARSET => config.output.charset = value.parse::<Charset>()?,
            OPTION_INCREMENTAL_OUTPUT => {
                config.incremental = Some(IncrementalConfig {
                    fragments_dir: value.to_string(),
                })
            }
            other => tracing::warn!("ignoring unrecognized processor option '{other}'"),
        }
    }
    validate_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_OUTPUT_PATH;

    #[test]
    fn parse_key_value() {
        let (k, v) = parse_option("compile.command.file.output.path=hints").unwrap();
        assert_eq!(k, "compile.command.file.output.path");
        assert_eq!(v, "hints");
    }

    #[test]
    fn parse_value_with_equals() {
        let (_, v) = parse_option("k=a=b").unwrap();
        assert_eq!(v, "a=b");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(matches!(
            parse_option("novalue"),
            Err(ConfigError::MalformedOption(_))
        ));
        assert!(matches!(
            parse_option("=value"),
            Err(ConfigError::MalformedOption(_))
        ));
    }

    #[test]
    fn options_override_defaults() {
        let mut config = HintConfig::default();
        apply_options(
            &mut config,
            [
                (OPTION_OUTPUT_PATH, "META-INF/custom"),
                (OPTION_OUTPUT_CHARSET, "latin1"),
            ],
        )
        .unwrap();
        assert_eq!(config.output.path, "META-INF/custom");
        assert_eq!(config.output.charset, Charset::Iso8859_1);
        assert!(!config.is_incremental());
    }

    #[test]
    fn incremental_option_enables_fragments() {
        let mut config = HintConfig::default();
        apply_options(&mut config, [(OPTION_INCREMENTAL_OUTPUT, "FRAGMENTS")]).unwrap();
        assert_eq!(config.incremental.unwrap().fragments_dir, "FRAGMENTS");
        assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn unknown_options_are_ignored() {
        let mut config = HintConfig::default();
        apply_options(&mut config, [("some.other.processor", "x")]).unwrap();
        assert_eq!(config, HintConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = HintConfig::default();
        let err = apply_options(&mut config, [(OPTION_OUTPUT_CHARSET, "klingon")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedCharset(_)));

        let mut config = HintConfig::default();
        let err = apply_options(&mut config, [(OPTION_OUTPUT_PATH, "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }
}
