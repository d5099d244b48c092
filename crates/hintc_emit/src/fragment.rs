//! Per-directive fragment files for incremental builds.
//!
//! In incremental mode each accepted directive is written to its own file in
//! a flat directory instead of being collected into the artifact. Build units
//! that never share memory can then all write into one directory without
//! coordination, and a later [`merge`](crate::merge::merge) reconciles them.

use std::path::{Path, PathBuf};

use crate::error::EmitError;
use crate::line::Line;

/// Builds the file name for a fragment from a kind keyword and descriptor.
///
/// Starting from `kind + "-" + descriptor`, alphanumerics and `.`, `_`, `-`
/// are kept; every other character is replaced by the lowercase hex value of
/// each of its UTF-16 code units, unpadded and undelimited.
pub fn sanitize(kind: &str, descriptor: &str) -> String {
    let mut out = String::with_capacity(kind.len() + 1 + descriptor.len() * 2);
    let mut units = [0u16; 2];
    for ch in kind.chars().chain(std::iter::once('-')).chain(descriptor.chars()) {
        if ch.is_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("{unit:x}"));
            }
        }
    }
    out
}

/// Writes fragment files into one directory.
pub struct FragmentWriter {
    dir: PathBuf,
}

impl FragmentWriter {
    /// Creates a writer for `dir`. Nothing is touched until the first write.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// The directory fragments are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensures the fragments directory exists.
    pub fn ensure_dir(&self) -> Result<(), EmitError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| EmitError::io(&self.dir, e))
    }

    /// Returns the path the fragment for `line` is written to.
    pub fn fragment_path(&self, line: &Line) -> PathBuf {
        self.dir.join(line.fragment_name())
    }

    /// Writes `line` as its own fragment and returns the file path.
    ///
    /// The file holds exactly the line text with no terminator. Writing the
    /// same line again overwrites the file with identical content.
    pub fn write(&self, line: &Line) -> Result<PathBuf, EmitError> {
        self.ensure_dir()?;
        let path = self.fragment_path(line);
        std::fs::write(&path, line.text()).map_err(|e| EmitError::io(&path, e))?;
        tracing::debug!("wrote fragment {}", path.display());
        Ok(path)
    }

    /// Removes every regular file in the fragments directory.
    ///
    /// Subdirectories are left alone. Returns the number of files removed;
    /// a missing directory counts as already clean.
    pub fn clear(&self) -> Result<usize, EmitError> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        let entries = std::fs::read_dir(&self.dir).map_err(|e| EmitError::io(&self.dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| EmitError::io(&self.dir, e))?;
            let path = entry.path();
            if path.is_file() {
                std::fs::remove_file(&path).map_err(|e| EmitError::io(&path, e))?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
