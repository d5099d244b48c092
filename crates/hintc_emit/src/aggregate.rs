//! Accumulating directive lines into the canonical ordered set.

use std::collections::BTreeSet;
use std::path::Path;

use hintc_common::Declaration;

use crate::directive::DirectiveKind;
use crate::error::EmitError;
use crate::fragment::FragmentWriter;
use crate::line::{Line, QUIET};

/// A deduplicated set of artifact lines plus the global quiet flag.
///
/// Finalized output puts `quiet` first when any scope asked for it, then the
/// remaining lines in ascending byte order. Insertion order never matters.
/// Shared by the aggregator and the fragment merger so both produce
/// byte-identical artifacts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandSet {
    lines: BTreeSet<String>,
    quiet: bool,
}

impl CommandSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rendered line. Returns `false` if it was already present.
    pub fn insert(&mut self, line: &Line) -> bool {
        if line.is_quiet() {
            self.mark_quiet()
        } else {
            self.lines.insert(line.text().to_string())
        }
    }

    /// Inserts raw line text as read back from a fragment.
    ///
    /// The literal `quiet` sets the flag instead of becoming a line.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if text == QUIET {
            self.mark_quiet()
        } else {
            self.lines.insert(text.to_string())
        }
    }

    /// Sets the quiet flag. Returns `false` if it was already set.
    pub fn mark_quiet(&mut self) -> bool {
        !std::mem::replace(&mut self.quiet, true)
    }

    /// Returns `true` if any scope requested Quiet.
    pub fn saw_quiet(&self) -> bool {
        self.quiet
    }

    /// Number of lines the finalized output will have.
    pub fn len(&self) -> usize {
        self.lines.len() + usize::from(self.quiet)
    }

    /// Returns `true` if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produces the ordered output lines.
    pub fn finalize(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        if self.quiet {
            out.push(QUIET.to_string());
        }
        out.extend(self.lines.iter().cloned());
        out
    }
}

/// Collects the directives of one build invocation.
///
/// Private to a single invocation and never shared between threads. When
/// built with [`Aggregator::incremental`], every newly accepted line is also
/// written as a fragment file.
pub struct Aggregator {
    commands: CommandSet,
    fragments: Option<FragmentWriter>,
    accepted: usize,
}

impl Aggregator {
    /// Creates an aggregator that only collects in memory.
    pub fn new() -> Self {
        Self {
            commands: CommandSet::new(),
            fragments: None,
            accepted: 0,
        }
    }

    /// Creates an aggregator that also writes fragments into `fragments_dir`.
    pub fn incremental(fragments_dir: &Path) -> Self {
        Self {
            fragments: Some(FragmentWriter::new(fragments_dir)),
            ..Self::new()
        }
    }

    /// Returns `true` if fragments are being written.
    pub fn is_incremental(&self) -> bool {
        self.fragments.is_some()
    }

    /// The fragment writer, in incremental mode.
    pub fn fragment_writer(&self) -> Option<&FragmentWriter> {
        self.fragments.as_ref()
    }

    /// Renders `kind` on `decl` and accepts the resulting line.
    pub fn accept(&mut self, decl: &Declaration, kind: DirectiveKind) -> Result<bool, EmitError> {
        self.accept_line(Line::new(decl, kind))
    }

    /// Accepts an already rendered line.
    ///
    /// Returns `false` when an identical line was accepted before. In
    /// incremental mode each quiet scope still gets its own fragment, since
    /// another build unit may be the only one to see it.
    pub fn accept_line(&mut self, line: Line) -> Result<bool, EmitError> {
        self.accepted += 1;
        let inserted = self.commands.insert(&line);
        if let Some(writer) = &self.fragments {
            if inserted || line.is_quiet() {
                writer.write(&line)?;
            }
        }
        if inserted {
            tracing::debug!("accepted '{}'", line.text());
        }
        Ok(inserted)
    }

    /// Number of directive occurrences accepted, duplicates included.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Returns `true` if any scope requested Quiet.
    pub fn saw_quiet(&self) -> bool {
        self.commands.saw_quiet()
    }

    /// The collected set.
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Consumes the aggregator, producing the ordered output lines.
    pub fn finalize(self) -> Vec<String> {
        self.commands.finalize()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
