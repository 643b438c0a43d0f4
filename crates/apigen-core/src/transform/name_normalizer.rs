use heck::{ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

use crate::ir::{HttpMethod, NormalizedName};

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
        screaming_snake: sanitized.to_shouty_snake_case(),
    }
}

/// Derive an operation identifier for an operation that declares none:
/// every path segment (braces dropped) followed by the method, camelCased.
///
/// - `GET /pets` → `petsGet`
/// - `GET /pets/{petId}` → `petsPetIdGet`
/// - `DELETE /store/order/{orderId}` → `storeOrderOrderIdDelete`
/// - `GET /` → `get`
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    let words: Vec<String> = path
        .split('/')
        .map(|seg| seg.trim_start_matches('{').trim_end_matches('}'))
        .filter(|seg| !seg.is_empty())
        .chain(std::iter::once(method.key()))
        .map(|seg| sanitize_identifier(seg).to_pascal_case())
        .collect();

    words.concat().to_lower_camel_case()
}

/// Replace runs of non-alphanumeric characters with a single `_`.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let n = normalize_name("findPetsByStatus");
        assert_eq!(n.pascal_case, "FindPetsByStatus");
        assert_eq!(n.camel_case, "findPetsByStatus");
        assert_eq!(n.snake_case, "find_pets_by_status");
        assert_eq!(n.screaming_snake, "FIND_PETS_BY_STATUS");
        assert_eq!(n.original, "findPetsByStatus");
    }

    #[test]
    fn test_kebab_and_dots() {
        assert_eq!(normalize_name("pet-store").pascal_case, "PetStore");
        assert_eq!(normalize_name("api.v1.user").camel_case, "apiV1User");
    }

    #[test]
    fn test_special_chars_only() {
        assert_eq!(normalize_name("$$").original, "$$");
        assert_eq!(normalize_name("$$").pascal_case, "Unnamed");
    }

    #[test]
    fn test_derive_collection() {
        assert_eq!(derive_operation_id(HttpMethod::Get, "/pets"), "petsGet");
        assert_eq!(derive_operation_id(HttpMethod::Post, "/pets"), "petsPost");
    }

    #[test]
    fn test_derive_with_params() {
        assert_eq!(
            derive_operation_id(HttpMethod::Get, "/pets/{petId}"),
            "petsPetIdGet"
        );
        assert_eq!(
            derive_operation_id(HttpMethod::Delete, "/store/order/{orderId}"),
            "storeOrderOrderIdDelete"
        );
    }

    #[test]
    fn test_derive_root_and_dashes() {
        assert_eq!(derive_operation_id(HttpMethod::Get, "/"), "get");
        assert_eq!(
            derive_operation_id(HttpMethod::Patch, "/user-profiles/{id}"),
            "userProfilesIdPatch"
        );
    }
}
