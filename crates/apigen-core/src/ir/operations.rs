use indexmap::IndexMap;
use serde::Serialize;

use super::schemas::TypeRef;
use super::types::NormalizedName;
use crate::transform::name_normalizer::{derive_operation_id, normalize_name};

/// HTTP method. Swagger 2.0 path items allow exactly these seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// The lowercase key used inside a path item.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            _ => None,
        }
    }
}

/// One declared (path, method) operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationEntry {
    pub method: HttpMethod,
    pub path: String,
    /// The declared `operationId`, empty when the document omits it.
    pub operation_id: String,
    /// Canonical identifier. Alternates carry their primary's.
    pub name: NormalizedName,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<ParameterEntry>,
    pub responses: Vec<ResponseEntry>,
    pub deprecated: bool,
    /// `x-` vendor extensions declared on the operation.
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl OperationEntry {
    /// The success response type: the first 2xx response carrying a schema,
    /// falling back to `default`.
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.responses
            .iter()
            .filter(|r| r.code.starts_with('2'))
            .chain(self.responses.iter().filter(|r| r.code == "default"))
            .find_map(|r| r.response_type.as_ref())
    }

    pub fn body_parameter(&self) -> Option<&ParameterEntry> {
        self.parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
    }

    pub fn has_optional_parameters(&self) -> bool {
        self.parameters.iter().any(|p| !p.required)
    }

    /// The entry's own name, independent of collation: its `operationId`,
    /// or a route-derived one when the document omits it.
    pub fn declared_name(&self) -> NormalizedName {
        if self.operation_id.trim().is_empty() {
            normalize_name(&derive_operation_id(self.method, &self.path))
        } else {
            normalize_name(&self.operation_id)
        }
    }
}

/// A resolved path/query/header/form/body parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub name: NormalizedName,
    pub original_name: String,
    pub location: ParameterLocation,
    pub param_type: TypeRef,
    pub required: bool,
    pub description: Option<String>,
    /// Every definition the declared schema mentions, including refs nested
    /// in inline objects that `param_type` flattens away.
    pub schema_refs: Vec<String>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        }
    }
}

/// A declared response, keyed by status code (or `default`).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    pub code: String,
    pub description: String,
    pub response_type: Option<TypeRef>,
    /// Every definition the response schema mentions, nested ones included.
    pub schema_refs: Vec<String>,
}

/// The canonical per-path record produced by collation.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenOperation {
    pub path: String,
    /// Shared by the primary and every alternate.
    pub name: NormalizedName,
    pub primary: OperationEntry,
    /// Other operations on the same path, in declaration order.
    pub alternates: Vec<OperationEntry>,
    /// Free-form template metadata.
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl CodegenOperation {
    pub fn new(primary: OperationEntry) -> Self {
        Self {
            path: primary.path.clone(),
            name: primary.name.clone(),
            primary,
            alternates: Vec::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Primary first, then alternates.
    pub fn entries(&self) -> impl Iterator<Item = &OperationEntry> {
        std::iter::once(&self.primary).chain(self.alternates.iter())
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut OperationEntry> {
        std::iter::once(&mut self.primary).chain(self.alternates.iter_mut())
    }

    pub fn methods(&self) -> Vec<HttpMethod> {
        self.entries().map(|e| e.method).collect()
    }

    pub fn operation_count(&self) -> usize {
        1 + self.alternates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(responses: Vec<ResponseEntry>) -> OperationEntry {
        OperationEntry {
            method: HttpMethod::Get,
            path: "/pets".to_string(),
            operation_id: "listPets".to_string(),
            name: normalize_name("listPets"),
            summary: None,
            description: None,
            tags: vec![],
            consumes: vec![],
            produces: vec![],
            parameters: vec![],
            responses,
            deprecated: false,
            extensions: IndexMap::new(),
        }
    }

    fn response(code: &str, ty: Option<TypeRef>) -> ResponseEntry {
        ResponseEntry {
            code: code.to_string(),
            description: String::new(),
            response_type: ty,
            schema_refs: vec![],
        }
    }

    #[test]
    fn test_method_keys_round_trip() {
        for m in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
            HttpMethod::Head,
            HttpMethod::Options,
        ] {
            assert_eq!(HttpMethod::from_key(m.key()), Some(m));
            assert_eq!(m.as_str().to_lowercase(), m.key());
        }
        assert_eq!(HttpMethod::from_key("trace"), None);
        assert_eq!(HttpMethod::from_key("parameters"), None);
    }

    #[test]
    fn test_return_type_prefers_success() {
        let e = entry(vec![
            response("default", Some(TypeRef::Model("Error".to_string()))),
            response("404", None),
            response("200", Some(TypeRef::Model("Pet".to_string()))),
        ]);
        assert_eq!(e.return_type(), Some(&TypeRef::Model("Pet".to_string())));
    }

    #[test]
    fn test_return_type_falls_back_to_default() {
        let e = entry(vec![
            response("204", None),
            response("default", Some(TypeRef::String)),
        ]);
        assert_eq!(e.return_type(), Some(&TypeRef::String));
    }

    #[test]
    fn test_return_type_void() {
        assert_eq!(entry(vec![response("204", None)]).return_type(), None);
    }

    #[test]
    fn test_declared_name_ignores_shared_canonical_name() {
        let mut e = entry(vec![]);
        e.name = normalize_name("getPets");
        assert_eq!(e.declared_name().camel_case, "listPets");

        e.operation_id = String::new();
        e.method = HttpMethod::Post;
        assert_eq!(e.declared_name().camel_case, "petsPost");
    }
}
