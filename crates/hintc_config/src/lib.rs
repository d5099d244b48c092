//! Loading and validation of hintc output configuration.
//!
//! Configuration comes from an optional `hintc.toml` file and from
//! `key=value` processor options supplied by the build tool, which override
//! the file. The result is a [`HintConfig`] that [`resolve_output`] turns into
//! concrete paths under a class output root.

#![warn(missing_docs)]

pub mod charset;
pub mod error;
pub mod loader;
pub mod options;
pub mod resolve;
pub mod types;

pub use charset::{Charset, EncodeError};
pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use options::{apply_options, parse_option};
pub use resolve::{resolve_output, OutputMode, ResolvedOutput};
pub use types::*;
