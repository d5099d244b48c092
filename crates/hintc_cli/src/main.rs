//! hintc CLI: the command-line interface for the compiler-hint generator.
//!
//! Provides `hintc process` for turning a stream of annotated elements into
//! the `hotspot_compiler` command file (or fragments), and `hintc merge` for
//! reconciling a fragments directory into the final artifact.

#![warn(missing_docs)]

mod merge;
mod process;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use hintc_config::HintConfig;
use tracing_subscriber::EnvFilter;

/// hintc: generates compiler command files from annotated members.
#[derive(Parser, Debug)]
#[command(name = "hintc", version, about = "Compiler hint file generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `hintc.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process annotated elements into the command file or fragments.
    Process(ProcessArgs),
    /// Merge a fragments directory into the command file.
    Merge(MergeArgs),
}

/// Arguments for the `hintc process` subcommand.
#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// JSON file holding the processing rounds (`-` for stdin).
    pub input: String,

    /// Class output root the artifact path is resolved against.
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Processor option in `key=value` form; may be repeated.
    #[arg(short = 'A', value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `hintc merge` subcommand.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Directory holding the fragment files.
    pub fragments_dir: PathBuf,

    /// Path of the artifact to write.
    pub output: PathBuf,

    /// Charset of the artifact (default from `hintc.toml`, else UTF-8).
    #[arg(long)]
    pub charset: Option<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Loads `--config` if given, otherwise `hintc.toml` from `dir` when present.
    pub fn load_config(&self, dir: &Path) -> Result<HintConfig, hintc_config::ConfigError> {
        match &self.config {
            Some(path) => hintc_config::load_config_file(path),
            None => hintc_config::load_config(dir),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Process(ref args) => process::run(args, &global),
        Command::Merge(ref args) => merge::run(args, &global),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    }
}

/// Installs the stderr subscriber. `HINTC_LOG` wins over the verbosity flags.
fn init_tracing(global: &GlobalArgs) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_env("HINTC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(global.color)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_process_default() {
        let cli = Cli::parse_from(["hintc", "process", "rounds.json"]);
        match cli.command {
            Command::Process(ref args) => {
                assert_eq!(args.input, "rounds.json");
                assert_eq!(args.out_dir, PathBuf::from("."));
                assert!(args.options.is_empty());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn parse_process_with_options() {
        let cli = Cli::parse_from([
            "hintc",
            "process",
            "rounds.json",
            "--out-dir",
            "target/classes",
            "-A",
            "compile.command.file.output.charset=US-ASCII",
            "-A",
            "compile.command.incremental.output=INCREMENTAL_FRAGMENTS",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Process(ref args) => {
                assert_eq!(args.out_dir, PathBuf::from("target/classes"));
                assert_eq!(
                    args.options,
                    vec![
                        "compile.command.file.output.charset=US-ASCII",
                        "compile.command.incremental.output=INCREMENTAL_FRAGMENTS",
                    ]
                );
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Process command"),
        }
    }

    #[test]
    fn parse_merge() {
        let cli = Cli::parse_from([
            "hintc",
            "merge",
            "target/fragments",
            "target/classes/META-INF/hotspot_compiler",
        ]);
        match cli.command {
            Command::Merge(ref args) => {
                assert_eq!(args.fragments_dir, PathBuf::from("target/fragments"));
                assert_eq!(
                    args.output,
                    PathBuf::from("target/classes/META-INF/hotspot_compiler")
                );
                assert!(args.charset.is_none());
            }
            _ => panic!("expected Merge command"),
        }
    }

    #[test]
    fn parse_merge_charset() {
        let cli = Cli::parse_from(["hintc", "merge", "frags", "out", "--charset", "UTF-16BE"]);
        match cli.command {
            Command::Merge(ref args) => assert_eq!(args.charset.as_deref(), Some("UTF-16BE")),
            _ => panic!("expected Merge command"),
        }
    }

    #[test]
    fn merge_requires_both_paths() {
        assert!(Cli::try_parse_from(["hintc", "merge", "frags"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["hintc", "--quiet", "--color", "never", "merge", "a", "b"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["hintc", "--config", "/path/to/hintc.toml", "process", "-"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/hintc.toml")));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\npath = \"hints\"\n").unwrap();
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config: Some(path),
        };
        let config = global.load_config(Path::new("unused")).unwrap();
        assert_eq!(config.output.path, "hints");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config: None,
        };
        let config = global.load_config(dir.path()).unwrap();
        assert_eq!(config, HintConfig::default());
    }
}
