//! Compiler-hint directive emission.
//!
//! Directives attached to methods and constructors are rendered into lines of
//! the `hotspot_compiler` command file. A [`Processor`] validates placement
//! round by round and either writes the sorted artifact at the end of
//! processing or, in incremental mode, writes one fragment file per directive
//! which [`merge`] later reconciles into the same artifact.

#![warn(missing_docs)]

pub mod aggregate;
pub mod artifact;
pub mod directive;
pub mod error;
pub mod fragment;
pub mod line;
pub mod merge;
pub mod processor;

pub use aggregate::{Aggregator, CommandSet};
pub use artifact::{render_artifact, write_artifact};
pub use directive::{Annotation, DirectiveKind};
pub use error::EmitError;
pub use fragment::{sanitize, FragmentWriter};
pub use line::{render, Line, QUIET};
pub use merge::{collect_fragments, merge, merge_with_charset, MergeReport};
pub use processor::{
    Acceptance, ProcessOutput, ProcessReport, Processor, Round, INVALID_OPTION,
    INVALID_PLACEMENT, REPEATED_DIRECTIVE,
};
