//! The monolithic artifact: one directive per line.

use std::path::Path;

use hintc_config::Charset;

use crate::error::EmitError;

/// Joins finalized lines into artifact text, each terminated by `\n`.
pub fn render_artifact<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Writes finalized lines to `path` in `charset`.
///
/// Parent directories are created. Encoding happens before the file is
/// opened, so an unmappable character leaves any previous artifact intact.
/// Returns the number of bytes written.
pub fn write_artifact<S: AsRef<str>>(
    path: &Path,
    lines: &[S],
    charset: Charset,
) -> Result<usize, EmitError> {
    let bytes = charset.encode(&render_artifact(lines))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EmitError::io(parent, e))?;
    }
    std::fs::write(path, &bytes).map_err(|e| EmitError::io(path, e))?;

    tracing::info!(
        "wrote {} line(s) to {} ({})",
        lines.len(),
        path.display(),
        charset
    );
    Ok(bytes.len())
}
