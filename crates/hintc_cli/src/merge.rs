//! `hintc merge`: reconciles a fragments directory into the artifact.

use hintc_config::Charset;

use crate::{GlobalArgs, MergeArgs};

/// Runs the `hintc merge` command.
///
/// The charset comes from `--charset`, else from the configuration file,
/// else UTF-8.
pub fn run(args: &MergeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let charset = match &args.charset {
        Some(name) => name.parse::<Charset>()?,
        None => {
            let cwd = std::env::current_dir()?;
            global.load_config(&cwd)?.output.charset
        }
    };

    let report = hintc_emit::merge_with_charset(
        Some(&args.fragments_dir),
        Some(&args.output),
        charset,
    )?;

    if !global.quiet {
        eprintln!(
            "    Merged {} fragment(s) into {} line(s) at {}",
            report.fragments,
            report.lines,
            report.output.display()
        );
    }
    Ok(0)
}
