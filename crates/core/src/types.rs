//! Semantic type tags accepted in `params` and `returnType`.
//!
//! The set is closed: every tag a spec may use is a [`TypeTag`] variant, and
//! the code generator's marshaling rules match on it exhaustively.

use std::fmt;

use crate::error::SpecError;

/// Small value aggregates the generic value type knows how to decode and build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Vector2,
    Vector3,
    Color,
    Rectangle,
    Camera2D,
    Camera3D,
}

impl Aggregate {
    pub const ALL: [Aggregate; 6] = [
        Aggregate::Vector2,
        Aggregate::Vector3,
        Aggregate::Color,
        Aggregate::Rectangle,
        Aggregate::Camera2D,
        Aggregate::Camera3D,
    ];

    /// Canonical tag spelling, which is also the native struct name.
    pub fn name(self) -> &'static str {
        match self {
            Aggregate::Vector2 => "Vector2",
            Aggregate::Vector3 => "Vector3",
            Aggregate::Color => "Color",
            Aggregate::Rectangle => "Rectangle",
            Aggregate::Camera2D => "Camera2D",
            Aggregate::Camera3D => "Camera3D",
        }
    }

    fn parse(tag: &str) -> Option<Aggregate> {
        if tag.eq_ignore_ascii_case("camera") {
            return Some(Aggregate::Camera3D);
        }
        Aggregate::ALL
            .into_iter()
            .find(|a| a.name() == tag || a.name().to_ascii_lowercase() == tag)
    }
}

/// A supported semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Void,
    Int,
    UInt,
    Float,
    Double,
    Bool,
    String,
    Aggregate(Aggregate),
    /// Native pointer carried through the generic layer as an integer handle.
    /// `pointee` is the normalized type text before the trailing `*`s.
    Pointer { pointee: String, depth: usize },
}

impl TypeTag {
    /// Look a tag up in the closed table.
    pub fn parse(tag: &str) -> Option<TypeTag> {
        let tag = tag.trim();
        let scalar = match tag {
            "void" => Some(TypeTag::Void),
            "int" => Some(TypeTag::Int),
            "uint" | "unsigned int" => Some(TypeTag::UInt),
            "float" => Some(TypeTag::Float),
            "double" => Some(TypeTag::Double),
            "bool" => Some(TypeTag::Bool),
            "string" => Some(TypeTag::String),
            _ => None,
        };
        scalar
            .or_else(|| Aggregate::parse(tag).map(TypeTag::Aggregate))
            .or_else(|| parse_pointer(tag))
    }

    /// Like [`TypeTag::parse`], but reports the function that used the tag.
    pub fn lookup(function: &str, tag: &str) -> Result<TypeTag, SpecError> {
        TypeTag::parse(tag).ok_or_else(|| SpecError::UnknownType {
            function: function.to_owned(),
            tag: tag.to_owned(),
        })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeTag::Void)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Void => f.write_str("void"),
            TypeTag::Int => f.write_str("int"),
            TypeTag::UInt => f.write_str("unsigned int"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::Double => f.write_str("double"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Aggregate(a) => f.write_str(a.name()),
            TypeTag::Pointer { pointee, depth } => {
                write!(f, "{}{}", pointee, "*".repeat(*depth))
            }
        }
    }
}

/// `Type*`, `const char*`, `unsigned char **`: one or more identifiers
/// followed by at least one `*`.
fn parse_pointer(tag: &str) -> Option<TypeTag> {
    let base = tag.trim_end_matches(|c: char| c == '*' || c.is_whitespace());
    let depth = tag[base.len()..].chars().filter(|&c| c == '*').count();
    if depth == 0 {
        return None;
    }
    let words: Vec<&str> = base.split_whitespace().collect();
    if words.is_empty() || !words.iter().all(|w| is_identifier(w)) {
        return None;
    }
    Some(TypeTag::Pointer {
        pointee: words.join(" "),
        depth,
    })
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Resolved parameter and return types of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<TypeTag>,
    pub ret: TypeTag,
}
