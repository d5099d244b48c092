//! Annotated program elements as supplied by the discovery collaborator.

use crate::declaration::Declaration;
use crate::shape::TypeShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a program element, used for placement checks and messages.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A package.
    Package,
    /// A class, interface, enum, or annotation type.
    Type,
    /// A constructor.
    Constructor,
    /// A method.
    Method,
    /// A field.
    Field,
    /// A method or constructor parameter.
    Parameter,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Package => write!(f, "package"),
            ElementKind::Type => write!(f, "type"),
            ElementKind::Constructor => write!(f, "constructor"),
            ElementKind::Method => write!(f, "method"),
            ElementKind::Field => write!(f, "field"),
            ElementKind::Parameter => write!(f, "parameter"),
        }
    }
}

/// A program element a directive was attached to.
///
/// Only methods and constructors carry a full [`Declaration`]; the other
/// variants carry just enough to name the element in diagnostics and in
/// fragment file names.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// A package, by dotted name.
    Package {
        /// Dotted package name.
        name: String,
    },
    /// A type, by dotted binary name.
    Type {
        /// Dotted binary name.
        name: String,
    },
    /// A constructor of `owner`.
    Constructor {
        /// Dotted binary name of the enclosing type.
        owner: String,
        /// Erased parameter shapes.
        #[serde(default)]
        parameters: Vec<TypeShape>,
    },
    /// A method.
    Method(Declaration),
    /// A field of `owner`.
    Field {
        /// Dotted binary name of the enclosing type.
        owner: String,
        /// Field name.
        name: String,
    },
    /// A parameter of some member.
    Parameter {
        /// Descriptor-style name of the enclosing member.
        owner: String,
        /// Parameter name.
        name: String,
    },
}

impl Element {
    /// Returns the kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Package { .. } => ElementKind::Package,
            Element::Type { .. } => ElementKind::Type,
            Element::Constructor { .. } => ElementKind::Constructor,
            Element::Method(_) => ElementKind::Method,
            Element::Field { .. } => ElementKind::Field,
            Element::Parameter { .. } => ElementKind::Parameter,
        }
    }

    /// Returns the declaration for executable elements.
    pub fn declaration(&self) -> Option<Declaration> {
        match self {
            Element::Method(decl) => Some(decl.clone()),
            Element::Constructor { owner, parameters } => {
                Some(Declaration::constructor(owner.clone(), parameters.clone()))
            }
            _ => None,
        }
    }

    /// Returns the name identifying this element's scope.
    ///
    /// Packages and types yield their dotted names, executables their full
    /// descriptor, and fields and parameters `owner.name`.
    pub fn scope_name(&self) -> String {
        match self {
            Element::Package { name } | Element::Type { name } => name.clone(),
            Element::Constructor { .. } | Element::Method(_) => self
                .declaration()
                .map(|d| d.descriptor())
                .unwrap_or_default(),
            Element::Field { owner, name } | Element::Parameter { owner, name } => {
                format!("{owner}.{name}")
            }
        }
    }
}

impl From<Declaration> for Element {
    fn from(decl: Declaration) -> Self {
        if decl.is_constructor() {
            Element::Constructor {
                owner: decl.owner,
                parameters: decl.parameters,
            }
        } else {
            Element::Method(decl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PrimitiveKind;

    #[test]
    fn kinds() {
        let pkg = Element::Package {
            name: "pkg".to_string(),
        };
        assert_eq!(pkg.kind(), ElementKind::Package);
        let field = Element::Field {
            owner: "pkg.Foo".to_string(),
            name: "x".to_string(),
        };
        assert_eq!(field.kind(), ElementKind::Field);
        assert!(field.declaration().is_none());
    }

    #[test]
    fn constructor_declaration() {
        let ctor = Element::Constructor {
            owner: "pkg.Foo".to_string(),
            parameters: vec![TypeShape::Primitive(PrimitiveKind::Int)],
        };
        let decl = ctor.declaration().unwrap();
        assert_eq!(decl.descriptor(), "pkg.Foo::<init> (I)V");
        assert_eq!(ctor.scope_name(), "pkg.Foo::<init> (I)V");
    }

    #[test]
    fn from_declaration_picks_variant() {
        let ctor: Element = Declaration::constructor("pkg.Foo", vec![]).into();
        assert_eq!(ctor.kind(), ElementKind::Constructor);
        let method: Element = Declaration::method("pkg.Foo", "m", vec![], TypeShape::Void).into();
        assert_eq!(method.kind(), ElementKind::Method);
    }

    #[test]
    fn scope_names() {
        let ty = Element::Type {
            name: "pkg.Outer$Inner".to_string(),
        };
        assert_eq!(ty.scope_name(), "pkg.Outer$Inner");
        let field = Element::Field {
            owner: "pkg.Foo".to_string(),
            name: "count".to_string(),
        };
        assert_eq!(field.scope_name(), "pkg.Foo.count");
    }

    #[test]
    fn display_kind() {
        assert_eq!(ElementKind::Field.to_string(), "field");
        assert_eq!(ElementKind::Constructor.to_string(), "constructor");
    }

    #[test]
    fn json_tagged_by_kind() {
        let json = r#"{"kind":"method","owner":"pkg.Foo","name":"m","parameters":["int"],"returns":"void"}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.scope_name(), "pkg.Foo::m (I)V");

        let json = r#"{"kind":"constructor","owner":"pkg.Foo"}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.scope_name(), "pkg.Foo::<init> ()V");

        let json = r#"{"kind":"package","name":"pkg"}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind(), ElementKind::Package);
    }
}
