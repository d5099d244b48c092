//! Method and constructor declarations and their canonical descriptors.

use crate::shape::TypeShape;
use serde::{Deserialize, Serialize};

/// The member name used for constructors in descriptors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A reference to one method or constructor.
///
/// The owner is the dotted binary name of the enclosing type (nested types
/// use `$`). Parameter and return shapes are already erased. A missing return
/// shape encodes as `V`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Declaration {
    /// Dotted binary name of the enclosing type.
    pub owner: String,
    /// Simple name of the member, or [`CONSTRUCTOR_NAME`].
    pub name: String,
    /// Erased parameter shapes in declaration order.
    #[serde(default)]
    pub parameters: Vec<TypeShape>,
    /// Erased return shape; `None` for constructors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeShape>,
}

impl Declaration {
    /// Creates a method declaration.
    pub fn method(
        owner: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<TypeShape>,
        returns: TypeShape,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            parameters,
            returns: Some(returns),
        }
    }

    /// Creates a constructor declaration.
    pub fn constructor(owner: impl Into<String>, parameters: Vec<TypeShape>) -> Self {
        Self {
            owner: owner.into(),
            name: CONSTRUCTOR_NAME.to_string(),
            parameters,
            returns: None,
        }
    }

    /// Returns `true` if this declaration names a constructor.
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Encodes the parameter list and return shape, e.g. `(I[D)V`.
    pub fn signature(&self) -> String {
        let mut out = String::from("(");
        for parameter in &self.parameters {
            parameter.write_signature(&mut out);
        }
        out.push(')');
        self.returns
            .as_ref()
            .unwrap_or(&TypeShape::Void)
            .write_signature(&mut out);
        out
    }

    /// Builds the canonical descriptor, e.g. `pkg.Foo::m ()V`.
    ///
    /// Names are not escaped; they are assumed to be well-formed.
    pub fn descriptor(&self) -> String {
        format!("{}::{} {}", self.owner, self.name, self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PrimitiveKind;

    fn prim(kind: PrimitiveKind) -> TypeShape {
        TypeShape::Primitive(kind)
    }

    #[test]
    fn no_params_void_return() {
        let decl = Declaration::method("pkg.Foo", "m", vec![], TypeShape::Void);
        assert_eq!(decl.descriptor(), "pkg.Foo::m ()V");
    }

    #[test]
    fn every_primitive_in_order() {
        let params = vec![
            prim(PrimitiveKind::Boolean),
            prim(PrimitiveKind::Short),
            prim(PrimitiveKind::Int),
            prim(PrimitiveKind::Long),
            prim(PrimitiveKind::Float),
            prim(PrimitiveKind::Double),
            prim(PrimitiveKind::Char),
            prim(PrimitiveKind::Byte),
        ];
        let decl = Declaration::method("pkg.Foo", "m", params, TypeShape::Void);
        assert_eq!(decl.signature(), "(ZSIJFDCB)V");
    }

    #[test]
    fn array_parameter() {
        let decl = Declaration::method(
            "pkg.Foo",
            "m",
            vec![TypeShape::array(prim(PrimitiveKind::Double))],
            TypeShape::Void,
        );
        assert_eq!(decl.signature(), "([D)V");
    }

    #[test]
    fn reference_parameter_and_return() {
        let decl = Declaration::method(
            "pkg.Foo",
            "m",
            vec![TypeShape::reference("java.util.List")],
            prim(PrimitiveKind::Double),
        );
        assert_eq!(decl.descriptor(), "pkg.Foo::m (Ljava.util.List;)D");
    }

    #[test]
    fn constructor_uses_init_and_void() {
        let decl = Declaration::constructor("pkg.Foo", vec![prim(PrimitiveKind::Int)]);
        assert!(decl.is_constructor());
        assert_eq!(decl.descriptor(), "pkg.Foo::<init> (I)V");
    }

    #[test]
    fn overloads_have_distinct_descriptors() {
        let a = Declaration::method("pkg.Foo", "m", vec![prim(PrimitiveKind::Int)], TypeShape::Void);
        let b = Declaration::method("pkg.Foo", "m", vec![prim(PrimitiveKind::Long)], TypeShape::Void);
        assert_ne!(a.descriptor(), b.descriptor());
    }

    #[test]
    fn deserialize_from_json() {
        let json = r#"{"owner":"pkg.Foo","name":"m","parameters":["int","double[]"],"returns":"java.lang.String"}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.descriptor(), "pkg.Foo::m (I[D)Ljava.lang.String;");
    }

    #[test]
    fn deserialize_defaults() {
        let json = r#"{"owner":"pkg.Foo","name":"m"}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.descriptor(), "pkg.Foo::m ()V");
    }
}
