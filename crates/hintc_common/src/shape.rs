//! Erased type shapes and their canonical signature encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight primitive value types a signature can mention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// `boolean`, encoded as `Z`.
    Boolean,
    /// `short`, encoded as `S`.
    Short,
    /// `int`, encoded as `I`.
    Int,
    /// `long`, encoded as `J`.
    Long,
    /// `float`, encoded as `F`.
    Float,
    /// `double`, encoded as `D`.
    Double,
    /// `char`, encoded as `C`.
    Char,
    /// `byte`, encoded as `B`.
    Byte,
}

impl PrimitiveKind {
    /// Returns the single-character signature code for this primitive.
    pub fn code(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Byte => 'B',
        }
    }

    /// Returns the source-level keyword for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
        }
    }

    /// Looks up a primitive by its source-level keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "boolean" => PrimitiveKind::Boolean,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "char" => PrimitiveKind::Char,
            "byte" => PrimitiveKind::Byte,
            _ => return None,
        };
        Some(kind)
    }
}

/// The erased shape of a parameter or return type.
///
/// Generic arguments and bounds are assumed to be erased already by whoever
/// built the shape. Serialized as its source-style spelling (`int`,
/// `double[]`, `java.util.List`), which is also what [`Display`](fmt::Display)
/// prints.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeShape {
    /// A primitive value type.
    Primitive(PrimitiveKind),
    /// The absence of a value (`void` returns, constructors).
    Void,
    /// An array of the element shape.
    Array(Box<TypeShape>),
    /// A class or interface, by dotted fully-qualified name.
    Reference(String),
}

impl TypeShape {
    /// Creates an array shape wrapping `element`.
    pub fn array(element: TypeShape) -> Self {
        TypeShape::Array(Box::new(element))
    }

    /// Creates a reference shape for a dotted fully-qualified name.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeShape::Reference(name.into())
    }

    /// Encodes this shape as a signature fragment.
    ///
    /// References keep their dotted name (`Ljava.util.List;`); they are not
    /// rewritten to the slash-separated classfile form.
    pub fn signature(&self) -> String {
        let mut out = String::new();
        self.write_signature(&mut out);
        out
    }

    /// Appends the signature encoding of this shape to `out`.
    pub fn write_signature(&self, out: &mut String) {
        match self {
            TypeShape::Primitive(kind) => out.push(kind.code()),
            TypeShape::Void => out.push('V'),
            TypeShape::Array(element) => {
                out.push('[');
                element.write_signature(out);
            }
            TypeShape::Reference(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Primitive(kind) => f.write_str(kind.keyword()),
            TypeShape::Void => f.write_str("void"),
            TypeShape::Array(element) => write!(f, "{element}[]"),
            TypeShape::Reference(name) => f.write_str(name),
        }
    }
}

/// Error type for parsing type shape strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeShapeError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseTypeShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type shape: '{}'", self.input)
    }
}

impl std::error::Error for ParseTypeShapeError {}

impl FromStr for TypeShape {
    type Err = ParseTypeShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseTypeShapeError {
            input: s.to_string(),
        };

        if let Some(element) = s.strip_suffix("[]") {
            let element: TypeShape = element.parse().map_err(|_| err())?;
            if element == TypeShape::Void {
                return Err(err());
            }
            return Ok(TypeShape::array(element));
        }
        if s == "void" {
            return Ok(TypeShape::Void);
        }
        if let Some(kind) = PrimitiveKind::from_keyword(s) {
            return Ok(TypeShape::Primitive(kind));
        }

        let well_formed = !s.is_empty()
            && s.split('.').all(|part| {
                let mut chars = part.chars();
                matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
                    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            });
        if !well_formed {
            return Err(err());
        }
        Ok(TypeShape::Reference(s.to_string()))
    }
}

impl TryFrom<String> for TypeShape {
    type Error = ParseTypeShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeShape> for String {
    fn from(shape: TypeShape) -> Self {
        shape.to_string()
    }
}
