use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::operations::CodegenOperation;
use super::schemas::ModelDefinition;

/// Everything a profile needs to render one run: metadata, collated operations
/// keyed by path, and model definitions keyed by their declared name.
#[derive(Debug, Clone)]
pub struct CodegenModel {
    pub info: ApiInfo,
    pub operations: IndexMap<String, CodegenOperation>,
    pub models: IndexMap<String, ModelDefinition>,
}

/// API metadata lifted from the document root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub spec_version: String,
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
}

impl ApiInfo {
    /// Base URL built from the first scheme, host and base path.
    pub fn base_url(&self) -> String {
        let scheme = self.schemes.first().map(String::as_str).unwrap_or("http");
        let host = self.host.as_deref().unwrap_or("localhost");
        let base_path = self.base_path.as_deref().unwrap_or("");
        format!("{scheme}://{host}{base_path}")
    }
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub screaming_snake: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(schemes: Vec<&str>, host: Option<&str>, base_path: Option<&str>) -> ApiInfo {
        ApiInfo {
            spec_version: "2.0".to_string(),
            title: "t".to_string(),
            description: None,
            version: "1".to_string(),
            host: host.map(String::from),
            base_path: base_path.map(String::from),
            schemes: schemes.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_base_url() {
        let i = info(vec!["https", "http"], Some("petstore.swagger.io"), Some("/v2"));
        assert_eq!(i.base_url(), "https://petstore.swagger.io/v2");
    }

    #[test]
    fn test_base_url_defaults() {
        assert_eq!(info(vec![], None, None).base_url(), "http://localhost");
    }
}
