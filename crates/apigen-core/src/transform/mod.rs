pub mod assemble;
pub mod collate;
pub mod name_normalizer;
pub mod schema_resolver;

pub use assemble::{AssembleOptions, RESOLVED_MODELS_KEY, assemble, collect_entries, resolve_models};
pub use collate::collate;
