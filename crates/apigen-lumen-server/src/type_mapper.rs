use apigen_core::ir::TypeRef;
use apigen_core::transform::name_normalizer::normalize_name;

/// Map a `TypeRef` to the type used in PHP docblocks.
pub fn type_ref_to_php(ty: &TypeRef) -> String {
    match ty {
        TypeRef::String | TypeRef::ByteArray | TypeRef::Binary => "string".to_string(),
        TypeRef::Integer | TypeRef::Long => "int".to_string(),
        TypeRef::Float | TypeRef::Double | TypeRef::Number => "float".to_string(),
        TypeRef::Boolean => "bool".to_string(),
        TypeRef::Date | TypeRef::DateTime => "\\DateTime".to_string(),
        TypeRef::File => "\\SplFileObject".to_string(),
        TypeRef::Array(inner) => format!("{}[]", type_ref_to_php(inner)),
        TypeRef::Map(_) => "array".to_string(),
        TypeRef::Object => "object".to_string(),
        TypeRef::Model(name) => normalize_name(name).pascal_case,
        TypeRef::Any => "mixed".to_string(),
    }
}

/// A PHP variable for an identifier; `$this` is not assignable.
pub fn php_var(name: String) -> String {
    if name == "this" {
        "$_this".to_string()
    } else {
        format!("${name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(type_ref_to_php(&TypeRef::Long), "int");
        assert_eq!(type_ref_to_php(&TypeRef::Double), "float");
        assert_eq!(type_ref_to_php(&TypeRef::DateTime), "\\DateTime");
        assert_eq!(type_ref_to_php(&TypeRef::Any), "mixed");
    }

    #[test]
    fn test_containers() {
        assert_eq!(
            type_ref_to_php(&TypeRef::Array(Box::new(TypeRef::Model("Pet".to_string())))),
            "Pet[]"
        );
        assert_eq!(type_ref_to_php(&TypeRef::Map(Box::new(TypeRef::Integer))), "array");
    }

    #[test]
    fn test_php_var() {
        assert_eq!(php_var("petId".to_string()), "$petId");
        assert_eq!(php_var("this".to_string()), "$_this");
    }
}
