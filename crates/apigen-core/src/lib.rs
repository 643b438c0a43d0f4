pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod ir;
pub mod parse;
pub mod profile;
pub mod transform;

pub use emit::manifest::{GenerationManifest, ManifestEntry, WriteOutcome};
pub use error::{GenerateError, ParseError};
pub use generator::{GenerationOptions, Generator};
pub use profile::{CategoryKind, OutputCategory, ProfileRegistry, TargetProfile};

/// A rendered file that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory, always `/`-separated.
    pub path: String,
    pub category: CategoryKind,
    pub content: String,
}
