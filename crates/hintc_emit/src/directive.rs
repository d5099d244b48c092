//! Directive kinds and where they may be placed.

use hintc_common::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One compiler-hint instruction.
///
/// Serialized in lowercase (`"inline"`, `"dontinline"`, `{"option": "..."}`),
/// which is also the keyword each line of the artifact starts with.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    /// Force inlining of the member.
    Inline,
    /// Prevent inlining of the member.
    DontInline,
    /// Exclude the member from compilation.
    Exclude,
    /// Compile only the listed members.
    CompileOnly,
    /// Break into the debugger when the member is compiled.
    Break,
    /// Log compilation of the member.
    Log,
    /// Print generated code for the member.
    Print,
    /// Do not print the directives at startup. Global, renders as `quiet`.
    Quiet,
    /// Pass an opaque compiler option for the member.
    Option(String),
}

impl DirectiveKind {
    /// Returns the lowercase keyword of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DirectiveKind::Inline => "inline",
            DirectiveKind::DontInline => "dontinline",
            DirectiveKind::Exclude => "exclude",
            DirectiveKind::CompileOnly => "compileonly",
            DirectiveKind::Break => "break",
            DirectiveKind::Log => "log",
            DirectiveKind::Print => "print",
            DirectiveKind::Quiet => "quiet",
            DirectiveKind::Option(_) => "option",
        }
    }

    /// Returns `true` for [`DirectiveKind::Quiet`].
    pub fn is_quiet(&self) -> bool {
        matches!(self, DirectiveKind::Quiet)
    }

    /// Returns `true` if this kind may be attached to an element of `kind`.
    ///
    /// Quiet is accepted on packages and types as well as executables;
    /// everything else only on methods and constructors.
    pub fn allowed_on(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Method | ElementKind::Constructor => true,
            ElementKind::Package | ElementKind::Type => self.is_quiet(),
            ElementKind::Field | ElementKind::Parameter => false,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKind::Option(value) => write!(f, "option({value})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A directive as attached to an element by the collaborator.
///
/// Besides single directives, several option values can be attached at
/// once with `{"options": [...]}`; each value becomes its own
/// [`DirectiveKind::Option`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    /// A single directive.
    Single(DirectiveKind),
    /// Repeated option values.
    Options {
        /// The option values, in declaration order.
        options: Vec<String>,
    },
}

impl Annotation {
    /// Expands this annotation into the directives it stands for.
    pub fn expand(self) -> Vec<DirectiveKind> {
        match self {
            Annotation::Single(kind) => vec![kind],
            Annotation::Options { options } => {
                options.into_iter().map(DirectiveKind::Option).collect()
            }
        }
    }
}

impl From<DirectiveKind> for Annotation {
    fn from(kind: DirectiveKind) -> Self {
        Annotation::Single(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercase_keywords() {
        assert_eq!(DirectiveKind::DontInline.name(), "dontinline");
        assert_eq!(DirectiveKind::CompileOnly.name(), "compileonly");
        assert_eq!(DirectiveKind::Option("X".into()).name(), "option");
    }

    #[test]
    fn placement_rules() {
        for kind in [ElementKind::Method, ElementKind::Constructor] {
            assert!(DirectiveKind::Inline.allowed_on(kind));
            assert!(DirectiveKind::Quiet.allowed_on(kind));
            assert!(DirectiveKind::Option("X".into()).allowed_on(kind));
        }
        for kind in [ElementKind::Package, ElementKind::Type] {
            assert!(DirectiveKind::Quiet.allowed_on(kind));
            assert!(!DirectiveKind::Print.allowed_on(kind));
        }
        for kind in [ElementKind::Field, ElementKind::Parameter] {
            assert!(!DirectiveKind::Quiet.allowed_on(kind));
            assert!(!DirectiveKind::Exclude.allowed_on(kind));
        }
    }

    #[test]
    fn json_spelling() {
        let kind: DirectiveKind = serde_json::from_str("\"dontinline\"").unwrap();
        assert_eq!(kind, DirectiveKind::DontInline);
        let kind: DirectiveKind = serde_json::from_str(r#"{"option":"UseSuperWord"}"#).unwrap();
        assert_eq!(kind, DirectiveKind::Option("UseSuperWord".to_string()));
    }

    #[test]
    fn options_annotation_expands() {
        let annotation: Annotation =
            serde_json::from_str(r#"{"options":["A=true","B=false"]}"#).unwrap();
        assert_eq!(
            annotation.expand(),
            vec![
                DirectiveKind::Option("A=true".to_string()),
                DirectiveKind::Option("B=false".to_string()),
            ]
        );
    }

    #[test]
    fn single_annotation_expands_to_itself() {
        let annotation: Annotation = serde_json::from_str("\"quiet\"").unwrap();
        assert_eq!(annotation.expand(), vec![DirectiveKind::Quiet]);
    }

    #[test]
    fn display() {
        assert_eq!(DirectiveKind::Log.to_string(), "log");
        assert_eq!(DirectiveKind::Option("X".into()).to_string(), "option(X)");
    }
}
