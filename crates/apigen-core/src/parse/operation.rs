use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::parameter::ParameterOrRef;
use super::response::ResponseOrRef;
use crate::ir::HttpMethod;

/// Security requirement: scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Operation {
    /// The `x-` vendor extensions, in declaration order.
    pub fn vendor_extensions(&self) -> IndexMap<String, serde_json::Value> {
        self.extra
            .iter()
            .filter(|(k, _)| k.starts_with("x-"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// A path item. Operations keep the order in which the document declares
/// their methods, which a fixed struct field per method would lose.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    pub parameters: Vec<ParameterOrRef>,
    pub operations: Vec<(HttpMethod, Operation)>,
    /// `$ref` and vendor extensions.
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, op)| op)
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();
        for (key, value) in raw {
            if let Some(method) = HttpMethod::from_key(&key) {
                item.operations.push((method, serde_json::from_value(value)?));
            } else if key == "parameters" {
                item.parameters = serde_json::from_value(value)?;
            } else {
                item.extra.insert(key, value);
            }
        }
        Ok(item)
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.extra {
            if key == "$ref" {
                map.serialize_entry(key, value)?;
            }
        }
        for (method, op) in &self.operations {
            map.serialize_entry(method.key(), op)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry("parameters", &self.parameters)?;
        }
        for (key, value) in &self.extra {
            if key != "$ref" {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
