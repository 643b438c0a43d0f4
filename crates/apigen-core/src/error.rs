use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every way a generation run can fail. All variants are fatal for the run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown target profile `{0}`")]
    UnknownProfile(String),

    #[error("unresolved model reference `{reference}` in {context}")]
    ModelResolution { reference: String, context: String },

    #[error("failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to serialize document as YAML: {0}")]
    SerializeYaml(#[from] serde_yaml_ng::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unresolved(reference: impl Into<String>, context: impl Into<String>) -> Self {
        GenerateError::ModelResolution {
            reference: reference.into(),
            context: context.into(),
        }
    }
}
