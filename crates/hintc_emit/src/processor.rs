//! The round-driven processor.
//!
//! The discovery collaborator hands over annotated elements in rounds. Every
//! round is validated and folded into one [`Aggregator`]; the round flagged
//! `processing_over` finalizes the run. Misplaced directives become
//! diagnostics and never stop their siblings from being collected.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use hintc_common::Element;
use hintc_config::{resolve_output, HintConfig, OutputMode, ResolvedOutput};
use hintc_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregator;
use crate::artifact::write_artifact;
use crate::directive::{Annotation, DirectiveKind};
use crate::error::EmitError;
use crate::line::Line;

/// A directive attached to an element that cannot carry it.
pub const INVALID_PLACEMENT: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// An option directive whose value would not fit on one artifact line.
pub const INVALID_OPTION: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// The same directive attached twice to one element.
pub const REPEATED_DIRECTIVE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);

/// One element and the directives attached to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    /// The annotated element.
    pub element: Element,
    /// Directives in the order they were attached.
    #[serde(default)]
    pub directives: Vec<Annotation>,
}

impl Acceptance {
    /// Creates an acceptance of `directives` on `element`.
    pub fn new(element: impl Into<Element>, directives: Vec<Annotation>) -> Self {
        Self {
            element: element.into(),
            directives,
        }
    }
}

/// One processing round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Elements discovered in this round.
    #[serde(default)]
    pub elements: Vec<Acceptance>,
    /// Set on the last round; triggers finalization.
    #[serde(default)]
    pub processing_over: bool,
}

impl Round {
    /// A round carrying `elements` that does not finalize.
    pub fn new(elements: Vec<Acceptance>) -> Self {
        Self {
            elements,
            processing_over: false,
        }
    }

    /// The empty final round.
    pub fn over() -> Self {
        Self {
            elements: Vec::new(),
            processing_over: true,
        }
    }
}

/// Where a finished run put its lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProcessOutput {
    /// The artifact was written.
    Artifact {
        /// Artifact path.
        path: PathBuf,
        /// Bytes written.
        bytes: usize,
    },
    /// Fragments were written as directives were accepted.
    Fragments {
        /// Fragments directory.
        dir: PathBuf,
    },
}

/// Summary of a finished processing run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// Directive occurrences accepted, duplicates included.
    pub accepted: usize,
    /// Distinct lines, `quiet` included.
    pub lines: usize,
    /// Whether any scope requested Quiet.
    pub quiet: bool,
    /// Where the lines went.
    pub output: ProcessOutput,
}

/// Validates directives round by round and produces the final output.
pub struct Processor {
    output: ResolvedOutput,
    aggregator: Aggregator,
    rounds: usize,
    finished: bool,
}

impl Processor {
    /// Creates a processor writing to `output`.
    pub fn new(output: ResolvedOutput) -> Self {
        let aggregator = match &output.mode {
            OutputMode::Monolithic { .. } => Aggregator::new(),
            OutputMode::Incremental { fragments_dir } => Aggregator::incremental(fragments_dir),
        };
        Self {
            output,
            aggregator,
            rounds: 0,
            finished: false,
        }
    }

    /// Creates a processor from `config`, resolved against `output_root`.
    pub fn from_config(config: &HintConfig, output_root: &Path) -> Self {
        Self::new(resolve_output(config, output_root))
    }

    /// The resolved output this processor writes to.
    pub fn output(&self) -> &ResolvedOutput {
        &self.output
    }

    /// Returns `true` once the final round has been processed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Processes one round.
    ///
    /// Returns the report once `round.processing_over` is set, `None` for
    /// intermediate rounds. Placement problems go to `sink`; an `Err` means
    /// an I/O or encoding failure, or a round arriving after the last one.
    pub fn process_round(
        &mut self,
        round: &Round,
        sink: &DiagnosticSink,
    ) -> Result<Option<ProcessReport>, EmitError> {
        if self.finished {
            return Err(EmitError::Input {
                reason: "round received after processing was over".to_string(),
            });
        }

        self.rounds += 1;
        if self.rounds == 1 {
            tracing::info!("processing compiler hints");
        }
        tracing::debug!(
            "round {} with {} element(s)",
            self.rounds,
            round.elements.len()
        );

        for acceptance in &round.elements {
            self.accept(acceptance, sink)?;
        }

        if !round.processing_over {
            return Ok(None);
        }
        self.finished = true;
        self.finish().map(Some)
    }

    /// Finishes the run with an empty final round.
    pub fn finish_run(&mut self, sink: &DiagnosticSink) -> Result<ProcessReport, EmitError> {
        let report = self.process_round(&Round::over(), sink)?;
        report.ok_or_else(|| EmitError::Input {
            reason: "final round produced no report".to_string(),
        })
    }

    fn accept(&mut self, acceptance: &Acceptance, sink: &DiagnosticSink) -> Result<(), EmitError> {
        let element = &acceptance.element;
        let mut seen: HashSet<DirectiveKind> = HashSet::new();

        for kind in acceptance.directives.iter().cloned().flat_map(Annotation::expand) {
            let Some(line) = Line::for_element(element, kind.clone()) else {
                sink.emit(misplaced(element, &kind));
                continue;
            };

            if let DirectiveKind::Option(value) = &kind {
                if value.is_empty() || value.contains(|c: char| c == '\n' || c == '\r') {
                    sink.emit(
                        Diagnostic::error(
                            INVALID_OPTION,
                            format!("invalid option value {value:?}"),
                        )
                        .at(element.scope_name())
                        .with_note("option values must be non-empty and fit on one line"),
                    );
                    continue;
                }
            }

            if !seen.insert(kind.clone()) {
                sink.emit(
                    Diagnostic::warning(
                        REPEATED_DIRECTIVE,
                        format!("`{kind}` is attached more than once"),
                    )
                    .at(element.scope_name()),
                );
            }

            self.aggregator.accept_line(line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<ProcessReport, EmitError> {
        let commands = self.aggregator.commands();
        let lines = commands.finalize();
        let quiet = commands.saw_quiet();

        let output = match &self.output.mode {
            OutputMode::Monolithic { artifact } => {
                let bytes = write_artifact(artifact, &lines, self.output.charset)?;
                ProcessOutput::Artifact {
                    path: artifact.clone(),
                    bytes,
                }
            }
            OutputMode::Incremental { fragments_dir } => ProcessOutput::Fragments {
                dir: fragments_dir.clone(),
            },
        };

        tracing::info!(
            "finished processing compiler hints: {} line(s) from {} directive(s)",
            lines.len(),
            self.aggregator.accepted()
        );
        Ok(ProcessReport {
            accepted: self.aggregator.accepted(),
            lines: lines.len(),
            quiet,
            output,
        })
    }
}

fn misplaced(element: &Element, kind: &DirectiveKind) -> Diagnostic {
    let diag = Diagnostic::error(
        INVALID_PLACEMENT,
        format!("`{}` is not allowed on a {}", kind.name(), element.kind()),
    )
    .at(element.scope_name());
    if kind.is_quiet() {
        diag.with_help("`quiet` applies to packages, types, methods and constructors")
    } else {
        diag.with_help("move the directive to a method or constructor")
    }
}
