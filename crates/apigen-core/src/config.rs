use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Top-level project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    pub input: String,
    pub output: String,
    pub profile: String,
    pub overwrite: OverwritePolicy,
    pub group_by: GroupBy,
    pub template_dir: Option<PathBuf>,
    pub sort_params_by_required: bool,
    /// Free-form values handed to templates, e.g. `invokerPackage`.
    pub properties: IndexMap<String, serde_json::Value>,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "generated".to_string(),
            profile: "language-client".to_string(),
            overwrite: OverwritePolicy::default(),
            group_by: GroupBy::default(),
            template_dir: None,
            sort_params_by_required: true,
            properties: IndexMap::new(),
        }
    }
}

/// What to do when a target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    #[default]
    Always,
    /// Leave existing files untouched, e.g. hand-edited build descriptors.
    SkipExisting,
}

/// How canonical operations are grouped into per-group files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// First tag of the primary operation; untagged operations go to `default`.
    #[default]
    Tag,
    /// First non-parameter path segment.
    Route,
    /// One group per canonical operation.
    Operation,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, GenerateError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| {
        GenerateError::Configuration(format!("failed to read config {}: {}", path.display(), e))
    })?;
    let config: ApigenConfig = serde_yaml_ng::from_str(&content).map_err(|e| {
        GenerateError::Configuration(format!("failed to parse config {}: {}", path.display(), e))
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
input: swagger.yaml
output: generated
profile: language-client   # language-client | framework-server | doc-site | spec-echo

overwrite: always          # always | skip_existing
group_by: tag              # tag | route | operation
# template_dir: templates  # files here replace the built-in templates of the same name
sort_params_by_required: true

properties: {}
  # invokerPackage: com.example.client
  # artifactId: example-client
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApigenConfig::default();
        assert_eq!(config.input, "swagger.yaml");
        assert_eq!(config.output, "generated");
        assert_eq!(config.profile, "language-client");
        assert_eq!(config.overwrite, OverwritePolicy::Always);
        assert_eq!(config.group_by, GroupBy::Tag);
        assert!(config.sort_params_by_required);
        assert!(config.properties.is_empty());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: petstore.json
output: out
profile: framework-server
overwrite: skip_existing
group_by: route
template_dir: custom
sort_params_by_required: false
properties:
  invokerPackage: com.example
  artifactVersion: 2.1.0
"#;
        let config: ApigenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "petstore.json");
        assert_eq!(config.profile, "framework-server");
        assert_eq!(config.overwrite, OverwritePolicy::SkipExisting);
        assert_eq!(config.group_by, GroupBy::Route);
        assert_eq!(config.template_dir, Some(PathBuf::from("custom")));
        assert!(!config.sort_params_by_required);
        assert_eq!(config.properties["invokerPackage"], "com.example");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: ApigenConfig = serde_yaml_ng::from_str("input: api.yaml\n").unwrap();
        assert_eq!(config.input, "api.yaml");
        assert_eq!(config.output, "generated");
        assert_eq!(config.overwrite, OverwritePolicy::Always);
    }

    #[test]
    fn test_default_content_parses() {
        let config: ApigenConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.group_by, GroupBy::Tag);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.yaml")).unwrap().is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "overwrite: sometimes\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(GenerateError::Configuration(_))
        ));
    }
}
