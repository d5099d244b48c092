//! `hintc process`: runs the processor over a recorded stream of rounds.
//!
//! The input is JSON, either a single round object or an array of rounds.
//! When no round sets `processing_over`, an empty final round is appended so
//! the run always finalizes.

use std::io::Read;

use hintc_config::{apply_options, parse_option};
use hintc_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use hintc_emit::{EmitError, ProcessOutput, ProcessReport, Processor, Round};
use serde::{Deserialize, Serialize};

use crate::{GlobalArgs, ProcessArgs, ReportFormat};

#[derive(Deserialize)]
#[serde(untagged)]
enum RoundInput {
    Many(Vec<Round>),
    One(Round),
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a ProcessReport,
    diagnostics: &'a [Diagnostic],
}

/// Runs the `hintc process` command.
///
/// Returns exit code 0 when no error diagnostics were reported, 1 otherwise.
/// The artifact is written in either case.
pub fn run(args: &ProcessArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = global.load_config(&cwd)?;

    let options = args
        .options
        .iter()
        .map(|raw| parse_option(raw))
        .collect::<Result<Vec<_>, _>>()?;
    apply_options(
        &mut config,
        options.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )?;

    let rounds = read_rounds(&args.input)?;
    tracing::debug!("read {} round(s) from {}", rounds.len(), args.input);
    let mut processor = Processor::from_config(&config, &args.out_dir);
    let sink = DiagnosticSink::new();
    let report = run_rounds(&mut processor, &rounds, &sink)?;

    let diagnostics = sink.diagnostics();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprintln!("{}", renderer.render(diag));
            }
            if !global.quiet {
                print_summary(&report, sink.error_count(), sink.warning_count());
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonOutput {
                report: &report,
                diagnostics: &diagnostics,
            })?;
            println!("{json}");
        }
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Feeds every round to `processor`, finishing the run if the input did not.
pub fn run_rounds(
    processor: &mut Processor,
    rounds: &[Round],
    sink: &DiagnosticSink,
) -> Result<ProcessReport, EmitError> {
    let mut report = None;
    for round in rounds {
        report = processor.process_round(round, sink)?;
    }
    match report {
        Some(report) => Ok(report),
        None => processor.finish_run(sink),
    }
}

/// Reads rounds from `input`, or from stdin when it is `-`.
pub fn read_rounds(input: &str) -> Result<Vec<Round>, EmitError> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| EmitError::io("<stdin>", e))?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|e| EmitError::io(input, e))?
    };
    parse_rounds(&content)
}

/// Parses a single round or an array of rounds.
pub fn parse_rounds(content: &str) -> Result<Vec<Round>, EmitError> {
    let parsed: RoundInput = serde_json::from_str(content).map_err(|e| EmitError::Input {
        reason: e.to_string(),
    })?;
    Ok(match parsed {
        RoundInput::Many(rounds) => rounds,
        RoundInput::One(round) => vec![round],
    })
}

fn print_summary(report: &ProcessReport, errors: usize, warnings: usize) {
    match &report.output {
        ProcessOutput::Artifact { path, .. } => eprintln!(
            "    Wrote {} line(s) to {}",
            report.lines,
            path.display()
        ),
        ProcessOutput::Fragments { dir } => eprintln!(
            "    Wrote {} fragment line(s) to {}",
            report.lines,
            dir.display()
        ),
    }
    eprintln!("   Result: {errors} error(s), {warnings} warning(s)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    const ROUNDS: &str = r#"[
        {
            "elements": [
                {
                    "element": {"kind": "method", "owner": "pkg.Foo", "name": "b", "returns": "void"},
                    "directives": ["print"]
                }
            ]
        },
        {
            "elements": [
                {
                    "element": {"kind": "method", "owner": "pkg.Foo", "name": "a",
                                "parameters": ["int"], "returns": "java.lang.String"},
                    "directives": ["inline", "quiet"]
                },
                {
                    "element": {"kind": "field", "owner": "pkg.Foo", "name": "x"},
                    "directives": ["exclude"]
                }
            ],
            "processing_over": true
        }
    ]"#;

    fn global(dir: &Path) -> GlobalArgs {
        let config = dir.join("hintc.toml");
        std::fs::write(&config, "").unwrap();
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(config),
        }
    }

    fn args(input: PathBuf, out_dir: PathBuf, options: &[&str]) -> ProcessArgs {
        ProcessArgs {
            input: input.to_string_lossy().into_owned(),
            out_dir,
            options: options.iter().map(|s| s.to_string()).collect(),
            format: ReportFormat::Text,
        }
    }

    #[test]
    fn parse_single_round() {
        let rounds = parse_rounds(r#"{"elements": [], "processing_over": true}"#).unwrap();
        assert_eq!(rounds.len(), 1);
        assert!(rounds[0].processing_over);
    }

    #[test]
    fn parse_invalid_input() {
        let err = parse_rounds("{not json").unwrap_err();
        assert!(matches!(err, EmitError::Input { .. }));
    }

    #[test]
    fn run_writes_artifact_and_fails_on_misplacement() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rounds.json");
        std::fs::write(&input, ROUNDS).unwrap();
        let out = dir.path().join("classes");

        let code = run(&args(input, out.clone(), &[]), &global(dir.path())).unwrap();

        assert_eq!(code, 1);
        assert_eq!(
            std::fs::read_to_string(out.join("META-INF").join("hotspot_compiler")).unwrap(),
            "quiet\ninline pkg.Foo::a (I)Ljava.lang.String;\nprint pkg.Foo::b ()V\n"
        );
    }

    #[test]
    fn run_honors_processor_options() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rounds.json");
        std::fs::write(
            &input,
            r#"{"elements": [{"element": {"kind": "constructor", "owner": "pkg.Foo"},
                              "directives": ["dontinline"]}]}"#,
        )
        .unwrap();
        let out = dir.path().join("classes");

        let code = run(
            &args(
                input,
                out.clone(),
                &["compile.command.file.output.path=hints/compiler"],
            ),
            &global(dir.path()),
        )
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            std::fs::read_to_string(out.join("hints").join("compiler")).unwrap(),
            "dontinline pkg.Foo::<init> ()V\n"
        );
    }

    #[test]
    fn run_rejects_malformed_option() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rounds.json");
        std::fs::write(&input, "[]").unwrap();
        let result = run(
            &args(input, dir.path().to_path_buf(), &["no-equals-sign"]),
            &global(dir.path()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn run_rounds_finishes_open_stream() {
        let dir = tempfile::tempdir().unwrap();
        let mut processor =
            Processor::from_config(&hintc_config::HintConfig::default(), dir.path());
        let report = run_rounds(&mut processor, &[Round::default()], &DiagnosticSink::new())
            .unwrap();
        assert_eq!(report.lines, 0);
        assert!(processor.is_finished());
    }
}
