use apigen_core::parse::spec::SpecDocument;
use apigen_core::{GenerateError, OutputCategory, TargetProfile};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Key under `document` holding the serialized description.
pub const SERIALIZED_KEY: &str = "serialized";

fn single_file(document: String) -> IndexMap<String, Value> {
    let mut ctx = IndexMap::new();
    ctx.insert(SERIALIZED_KEY.to_string(), Value::String(document));
    ctx
}

/// Writes the parsed document back out as pretty-printed `swagger.json`.
pub struct SpecEchoProfile;

impl TargetProfile for SpecEchoProfile {
    fn id(&self) -> &'static str {
        "spec-echo"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["swagger", "swagger-json"]
    }

    fn description(&self) -> &'static str {
        "The input description, normalized and written as swagger.json"
    }

    fn categories(&self) -> Vec<OutputCategory> {
        vec![OutputCategory::supporting("swagger.json", "echo.j2")]
    }

    fn templates(&self) -> Vec<(&'static str, &'static str)> {
        vec![("echo.j2", include_str!("../templates/echo.j2"))]
    }

    fn document_context(&self, spec: &SpecDocument) -> Result<IndexMap<String, Value>, GenerateError> {
        let json = serde_json::to_string_pretty(spec)?;
        debug!("Echoing {} as {} bytes of JSON", spec.info.title, json.len());
        Ok(single_file(json))
    }
}

/// Same as [`SpecEchoProfile`], as `swagger.yaml`.
pub struct SpecEchoYamlProfile;

impl TargetProfile for SpecEchoYamlProfile {
    fn id(&self) -> &'static str {
        "spec-echo-yaml"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["swagger-yaml"]
    }

    fn description(&self) -> &'static str {
        "The input description, normalized and written as swagger.yaml"
    }

    fn categories(&self) -> Vec<OutputCategory> {
        vec![OutputCategory::supporting("swagger.yaml", "echo.j2")]
    }

    fn templates(&self) -> Vec<(&'static str, &'static str)> {
        vec![("echo.j2", include_str!("../templates/echo.j2"))]
    }

    fn document_context(&self, spec: &SpecDocument) -> Result<IndexMap<String, Value>, GenerateError> {
        let yaml = serde_yaml_ng::to_string(spec)?;
        debug!("Echoing {} as {} bytes of YAML", spec.info.title, yaml.len());
        Ok(single_file(yaml))
    }
}
