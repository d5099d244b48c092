//! Output resolution: turning configuration into concrete paths.

use crate::charset::Charset;
use crate::types::HintConfig;
use std::path::{Path, PathBuf};

/// Where a processing run sends its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write the sorted artifact once processing is over.
    Monolithic {
        /// Absolute or root-relative artifact path.
        artifact: PathBuf,
    },
    /// Write one fragment per directive; a later merge builds the artifact.
    Incremental {
        /// Directory receiving the fragment files.
        fragments_dir: PathBuf,
    },
}

/// A configuration resolved against a class output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Where results go.
    pub mode: OutputMode,
    /// Charset for the artifact.
    pub charset: Charset,
}

/// Resolves `config` against `output_root`, the directory compiled classes
/// and resources are written to.
///
/// The artifact path is always joined onto the root. A relative fragments
/// directory is joined onto the root as well; an absolute one is kept, so
/// several build units can share a directory outside their own roots.
pub fn resolve_output(config: &HintConfig, output_root: &Path) -> ResolvedOutput {
    let mode = match &config.incremental {
        Some(incremental) => OutputMode::Incremental {
            fragments_dir: output_root.join(&incremental.fragments_dir),
        },
        None => OutputMode::Monolithic {
            artifact: output_root.join(&config.output.path),
        },
    };
    ResolvedOutput {
        mode,
        charset: config.output.charset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IncrementalConfig;

    #[test]
    fn default_is_monolithic_under_meta_inf() {
        let resolved = resolve_output(&HintConfig::default(), Path::new("target/classes"));
        assert_eq!(
            resolved.mode,
            OutputMode::Monolithic {
                artifact: PathBuf::from("target/classes/META-INF/hotspot_compiler")
            }
        );
        assert_eq!(resolved.charset, Charset::Utf8);
    }

    #[test]
    fn incremental_relative_dir() {
        let config = HintConfig {
            incremental: Some(IncrementalConfig {
                fragments_dir: "INCREMENTAL_FRAGMENTS".to_string(),
            }),
            ..HintConfig::default()
        };
        let resolved = resolve_output(&config, Path::new("classes"));
        assert_eq!(
            resolved.mode,
            OutputMode::Incremental {
                fragments_dir: PathBuf::from("classes/INCREMENTAL_FRAGMENTS")
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn incremental_absolute_dir_is_kept() {
        let config = HintConfig {
            incremental: Some(IncrementalConfig {
                fragments_dir: "/shared/fragments".to_string(),
            }),
            ..HintConfig::default()
        };
        let resolved = resolve_output(&config, Path::new("classes"));
        assert_eq!(
            resolved.mode,
            OutputMode::Incremental {
                fragments_dir: PathBuf::from("/shared/fragments")
            }
        );
    }
}
