//! Rendering directives into artifact lines.

use crate::directive::DirectiveKind;
use crate::fragment::sanitize;
use hintc_common::{Declaration, Element};

/// The text every Quiet directive renders to, wherever it is attached.
pub const QUIET: &str = "quiet";

/// Renders one directive on `decl` into its artifact text.
///
/// `inline pkg.Foo::m ()V`, `option pkg.Foo::m ()V UseSuperWord`, or
/// `quiet` for Quiet regardless of the declaration.
pub fn render(decl: &Declaration, kind: &DirectiveKind) -> String {
    match kind {
        DirectiveKind::Quiet => QUIET.to_string(),
        DirectiveKind::Option(value) => format!("option {} {value}", decl.descriptor()),
        other => format!("{} {}", other.name(), decl.descriptor()),
    }
}

/// One rendered directive.
///
/// Lines compare equal when their text is equal; the kind and descriptor only
/// matter for naming fragments.
#[derive(Clone, Debug)]
pub struct Line {
    text: String,
    kind: DirectiveKind,
    descriptor: String,
}

impl Line {
    /// Renders `kind` on `decl`.
    pub fn new(decl: &Declaration, kind: DirectiveKind) -> Self {
        let text = render(decl, &kind);
        let descriptor = match &kind {
            DirectiveKind::Option(value) => format!("{} {value}", decl.descriptor()),
            _ => decl.descriptor(),
        };
        Self {
            text,
            kind,
            descriptor,
        }
    }

    /// A Quiet line requested at `scope` (a package, type, or member name).
    pub fn quiet(scope: impl Into<String>) -> Self {
        Self {
            text: QUIET.to_string(),
            kind: DirectiveKind::Quiet,
            descriptor: scope.into(),
        }
    }

    /// Renders `kind` on `element`, or `None` when the element cannot carry it.
    pub fn for_element(element: &Element, kind: DirectiveKind) -> Option<Self> {
        if !kind.allowed_on(element.kind()) {
            return None;
        }
        match element.declaration() {
            Some(decl) => Some(Self::new(&decl, kind)),
            None => Some(Self::quiet(element.scope_name())),
        }
    }

    /// The rendered artifact text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The directive kind this line was rendered from.
    pub fn kind(&self) -> &DirectiveKind {
        &self.kind
    }

    /// The descriptor the fragment file name is derived from.
    ///
    /// For options this includes the value, so two options on one member get
    /// distinct fragments.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// The sanitized fragment file name for this line.
    pub fn fragment_name(&self) -> String {
        sanitize(self.kind.name(), &self.descriptor)
    }

    /// Returns `true` if this is the global Quiet line.
    pub fn is_quiet(&self) -> bool {
        self.kind.is_quiet()
    }

    /// Consumes the line, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Line {}
