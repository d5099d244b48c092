//! Reconciling a fragments directory into the canonical artifact.
//!
//! Runs after every build unit has finished writing fragments. Enumeration
//! order of the directory never influences the output: fragments are folded
//! into the same [`CommandSet`] the non-incremental path uses.

use std::path::{Path, PathBuf};

use hintc_config::Charset;

use crate::aggregate::CommandSet;
use crate::artifact::write_artifact;
use crate::error::EmitError;

/// Summary of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of fragment files read.
    pub fragments: usize,
    /// Number of lines written, `quiet` included.
    pub lines: usize,
    /// Whether the artifact starts with `quiet`.
    pub quiet: bool,
    /// Where the artifact was written.
    pub output: PathBuf,
}

/// Merges the fragments in `fragments_dir` into a UTF-8 artifact at `output`.
///
/// Preconditions are checked in order before any file is touched: a missing
/// directory argument, a directory that does not exist, then a missing
/// output argument.
pub fn merge(fragments_dir: Option<&Path>, output: Option<&Path>) -> Result<MergeReport, EmitError> {
    merge_with_charset(fragments_dir, output, Charset::Utf8)
}

/// Like [`merge`], writing the artifact in `charset`.
pub fn merge_with_charset(
    fragments_dir: Option<&Path>,
    output: Option<&Path>,
    charset: Charset,
) -> Result<MergeReport, EmitError> {
    let dir = fragments_dir.ok_or(EmitError::MergeInputMissing)?;
    if !dir.is_dir() {
        return Err(EmitError::MergeInputNotDirectory {
            path: dir.to_path_buf(),
        });
    }
    let output = output.ok_or(EmitError::MergeOutputMissing)?;

    tracing::info!("merging fragments from {}", dir.display());
    let (commands, fragments) = collect_fragments(dir)?;
    let lines = commands.finalize();
    write_artifact(output, &lines, charset)?;

    Ok(MergeReport {
        fragments,
        lines: lines.len(),
        quiet: commands.saw_quiet(),
        output: output.to_path_buf(),
    })
}

/// Reads every regular file directly inside `dir` into a [`CommandSet`].
///
/// Each non-empty line of a fragment is one directive line. Returns the set
/// and the number of files read.
pub fn collect_fragments(dir: &Path) -> Result<(CommandSet, usize), EmitError> {
    let entries = std::fs::read_dir(dir).map_err(|e| EmitError::io(dir, e))?;

    let mut commands = CommandSet::new();
    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|e| EmitError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let content = std::fs::read_to_string(&path).map_err(|e| EmitError::io(&path, e))?;
        for line in content.lines().filter(|l| !l.is_empty()) {
            commands.insert_text(line);
        }
        count += 1;
        tracing::debug!("read fragment {}", path.display());
    }

    Ok((commands, count))
}
