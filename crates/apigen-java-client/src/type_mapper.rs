use apigen_core::ir::TypeRef;
use apigen_core::transform::name_normalizer::normalize_name;
use heck::ToShoutySnakeCase;

/// Map a `TypeRef` to a boxed Java type.
pub fn type_ref_to_java(ty: &TypeRef) -> String {
    match ty {
        TypeRef::String => "String".to_string(),
        TypeRef::Integer => "Integer".to_string(),
        TypeRef::Long => "Long".to_string(),
        TypeRef::Float => "Float".to_string(),
        TypeRef::Double => "Double".to_string(),
        TypeRef::Number => "BigDecimal".to_string(),
        TypeRef::Boolean => "Boolean".to_string(),
        TypeRef::Date => "LocalDate".to_string(),
        TypeRef::DateTime => "OffsetDateTime".to_string(),
        TypeRef::ByteArray | TypeRef::Binary => "byte[]".to_string(),
        TypeRef::File => "File".to_string(),
        TypeRef::Array(inner) => format!("List<{}>", type_ref_to_java(inner)),
        TypeRef::Map(inner) => format!("Map<String, {}>", type_ref_to_java(inner)),
        TypeRef::Object | TypeRef::Any => "Object".to_string(),
        TypeRef::Model(name) => normalize_name(name).pascal_case,
    }
}

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long", "native",
    "new", "package", "private", "protected", "public", "return", "short", "static", "strictfp",
    "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try", "void",
    "volatile", "while", "true", "false", "null",
];

/// Prefix Java keywords with `_` so they can be used as identifiers.
pub fn java_ident(name: String) -> String {
    if RESERVED.contains(&name.as_str()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Turn an enum value into a constant name, e.g. `date-time` → `DATE_TIME`.
pub fn java_enum_constant(value: String) -> String {
    let constant = value.to_shouty_snake_case();
    match constant.chars().next() {
        None => "EMPTY".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{constant}"),
        Some(_) => constant,
    }
}

/// Escape `*/` sequences that would close a Javadoc block early.
pub fn escape_javadoc(value: String) -> String {
    value.replace("*/", "*&#47;")
}
