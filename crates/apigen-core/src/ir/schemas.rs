use std::fmt;

use super::types::NormalizedName;

/// A named schema from the document's `definitions`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefinition {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub fields: Vec<ModelField>,
    /// Parent model name when the schema composes another via `allOf`.
    pub parent: Option<String>,
    /// Further models composed via `allOf` after the parent.
    pub interfaces: Vec<String>,
    pub discriminator: Option<String>,
    /// Values of a top-level string enum schema.
    pub enum_values: Vec<String>,
}

impl ModelDefinition {
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}

/// A field on a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelField {
    pub name: NormalizedName,
    pub original_name: String,
    pub field_type: TypeRef,
    pub required: bool,
    pub description: Option<String>,
    pub read_only: bool,
}

/// A type reference, language-neutral. Profiles map it to target syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    String,
    Integer,
    Long,
    Float,
    Double,
    Number,
    Boolean,
    Date,
    DateTime,
    ByteArray,
    Binary,
    File,
    Array(Box<TypeRef>),
    Map(Box<TypeRef>),
    /// Inline object without a model of its own.
    Object,
    /// Reference to a model by its declared name.
    Model(String),
    Any,
}

impl TypeRef {
    /// Append every model name this type mentions, outermost first.
    pub fn collect_models<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::Model(name) => out.push(name),
            TypeRef::Array(inner) | TypeRef::Map(inner) => inner.collect_models(out),
            _ => {}
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, TypeRef::Array(_) | TypeRef::Map(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::String => write!(f, "string"),
            TypeRef::Integer => write!(f, "integer"),
            TypeRef::Long => write!(f, "long"),
            TypeRef::Float => write!(f, "float"),
            TypeRef::Double => write!(f, "double"),
            TypeRef::Number => write!(f, "number"),
            TypeRef::Boolean => write!(f, "boolean"),
            TypeRef::Date => write!(f, "date"),
            TypeRef::DateTime => write!(f, "date-time"),
            TypeRef::ByteArray => write!(f, "byte"),
            TypeRef::Binary => write!(f, "binary"),
            TypeRef::File => write!(f, "file"),
            TypeRef::Array(inner) => write!(f, "array[{inner}]"),
            TypeRef::Map(inner) => write!(f, "map[string,{inner}]"),
            TypeRef::Object => write!(f, "object"),
            TypeRef::Model(name) => write!(f, "{name}"),
            TypeRef::Any => write!(f, "any"),
        }
    }
}
