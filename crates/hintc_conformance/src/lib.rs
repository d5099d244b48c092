//! Conformance test helpers for hintc.
//!
//! Provides shared functions that drive annotated elements through the full
//! processor (validate, aggregate, write) and return the artifact text,
//! fragments, and diagnostics for assertion in integration tests.

#![warn(missing_docs)]

use std::path::Path;

use hintc_common::{Declaration, ParseTypeShapeError, TypeShape};
use hintc_config::{ConfigError, HintConfig, IncrementalConfig, OutputMode};
use hintc_diagnostics::{Diagnostic, DiagnosticSink};
use hintc_emit::{
    Acceptance, Annotation, DirectiveKind, EmitError, ProcessReport, Processor, Round,
};

/// Result of running a complete processing session.
pub struct RunResult {
    /// The processor's report.
    pub report: ProcessReport,
    /// The artifact text, when running in monolithic mode.
    pub artifact: Option<String>,
    /// Fragment files as `(file name, content)` pairs sorted by name, when
    /// running in incremental mode.
    pub fragments: Vec<(String, String)>,
    /// All diagnostics emitted during processing.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

/// Parses a `hintc.toml` document.
pub fn make_config(toml: &str) -> Result<HintConfig, ConfigError> {
    hintc_config::load_config_from_str(toml)
}

/// A configuration writing fragments into `fragments_dir`.
pub fn incremental_config(fragments_dir: &str) -> HintConfig {
    HintConfig {
        incremental: Some(IncrementalConfig {
            fragments_dir: fragments_dir.to_string(),
        }),
        ..HintConfig::default()
    }
}

/// Parses source-style type names into shapes.
pub fn shapes(names: &[&str]) -> Result<Vec<TypeShape>, ParseTypeShapeError> {
    names.iter().map(|name| name.parse()).collect()
}

/// Builds a method declaration from source-style type names.
pub fn method(
    owner: &str,
    name: &str,
    parameters: &[&str],
    returns: &str,
) -> Result<Declaration, ParseTypeShapeError> {
    Ok(Declaration::method(
        owner,
        name,
        shapes(parameters)?,
        returns.parse()?,
    ))
}

/// Builds a constructor declaration from source-style type names.
pub fn constructor(owner: &str, parameters: &[&str]) -> Result<Declaration, ParseTypeShapeError> {
    Ok(Declaration::constructor(owner, shapes(parameters)?))
}

/// Attaches `kinds` to `decl`.
pub fn annotate(decl: Declaration, kinds: &[DirectiveKind]) -> Acceptance {
    Acceptance::new(decl, kinds.iter().cloned().map(Annotation::from).collect())
}

/// Runs a single final round carrying `elements`.
pub fn run_elements(
    elements: Vec<Acceptance>,
    config: &HintConfig,
    output_root: &Path,
) -> Result<RunResult, EmitError> {
    let round = Round {
        elements,
        processing_over: true,
    };
    run_rounds(&[round], config, output_root)
}

/// Runs `rounds` through a fresh processor, finishing the run if no round did.
pub fn run_rounds(
    rounds: &[Round],
    config: &HintConfig,
    output_root: &Path,
) -> Result<RunResult, EmitError> {
    let mut processor = Processor::from_config(config, output_root);
    let sink = DiagnosticSink::new();

    let mut report = None;
    for round in rounds {
        report = processor.process_round(round, &sink)?;
    }
    let report = match report {
        Some(report) => report,
        None => processor.finish_run(&sink)?,
    };

    let (artifact, fragments) = match &processor.output().mode {
        OutputMode::Monolithic { artifact } => (
            Some(std::fs::read_to_string(artifact).map_err(|e| EmitError::io(artifact, e))?),
            Vec::new(),
        ),
        OutputMode::Incremental { fragments_dir } => (None, read_fragments(fragments_dir)?),
    };

    Ok(RunResult {
        report,
        artifact,
        fragments,
        diagnostics: sink.diagnostics(),
        has_errors: sink.has_errors(),
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
    })
}

/// Reads every regular file in `dir` as `(file name, content)`, sorted by
/// name. A missing directory yields no fragments.
pub fn read_fragments(dir: &Path) -> Result<Vec<(String, String)>, EmitError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut fragments = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| EmitError::io(dir, e))? {
        let path = entry.map_err(|e| EmitError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| EmitError::io(&path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        fragments.push((name, content));
    }
    fragments.sort();
    Ok(fragments)
}
