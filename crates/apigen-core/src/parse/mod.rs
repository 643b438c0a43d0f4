pub mod operation;
pub mod parameter;
pub mod response;
pub mod schema;
pub mod spec;

use std::fs;
use std::path::Path;

use crate::error::ParseError;
use spec::SpecDocument;

/// Read and parse a document; `.json` files are parsed as JSON, anything else as YAML.
pub fn from_path(path: &Path) -> Result<SpecDocument, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    }
}

/// Parse a Swagger 2.0 document from YAML.
pub fn from_yaml(input: &str) -> Result<SpecDocument, ParseError> {
    let spec: SpecDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger 2.0 document from JSON.
pub fn from_json(input: &str) -> Result<SpecDocument, ParseError> {
    let spec: SpecDocument = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &SpecDocument) -> Result<(), ParseError> {
    if !spec.swagger.starts_with("2.") {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
