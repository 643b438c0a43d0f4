use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use minijinja::Environment;
use serde::Serialize;

use crate::error::GenerateError;
use crate::ir::TypeRef;
use crate::parse::spec::SpecDocument;

/// What one output category iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// One file per model definition.
    PerModel,
    /// One file per operation group.
    PerOperationGroup,
    /// One file per run, seeing the whole model (build descriptors, indexes).
    Supporting,
}

/// A category of generated files: where they go and how they are rendered.
///
/// `path` is itself a template, rendered with the same context as the file,
/// e.g. `src/{{ package_path }}/model/{{ model.name.pascal_case }}.java`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCategory {
    pub kind: CategoryKind,
    pub path: String,
    pub template: String,
}

impl OutputCategory {
    pub fn per_model(path: impl Into<String>, template: impl Into<String>) -> Self {
        Self::new(CategoryKind::PerModel, path, template)
    }

    pub fn per_operation_group(path: impl Into<String>, template: impl Into<String>) -> Self {
        Self::new(CategoryKind::PerOperationGroup, path, template)
    }

    pub fn supporting(path: impl Into<String>, template: impl Into<String>) -> Self {
        Self::new(CategoryKind::Supporting, path, template)
    }

    fn new(kind: CategoryKind, path: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            template: template.into(),
        }
    }
}

/// The capability set of one output flavor. The orchestrator only talks to
/// profiles through this trait.
pub trait TargetProfile: Send + Sync {
    /// Selector used to pick this profile, e.g. `language-client`.
    fn id(&self) -> &'static str;

    /// Additional selectors accepted for this profile.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    /// Output categories, rendered in this order.
    fn categories(&self) -> Vec<OutputCategory>;

    /// Built-in templates as (name, source) pairs.
    fn templates(&self) -> Vec<(&'static str, &'static str)>;

    /// Template properties: the profile's defaults overlaid with user overrides.
    fn properties(
        &self,
        overrides: &IndexMap<String, serde_json::Value>,
    ) -> IndexMap<String, serde_json::Value> {
        overrides.clone()
    }

    /// Render a type reference in the target language.
    fn map_type(&self, ty: &TypeRef) -> String {
        ty.to_string()
    }

    /// Hook for registering filters and functions.
    fn configure_environment(&self, _env: &mut Environment<'static>) {}

    /// Extra values visible to supporting files, derived from the raw document.
    fn document_context(
        &self,
        _spec: &SpecDocument,
    ) -> Result<IndexMap<String, serde_json::Value>, GenerateError> {
        Ok(IndexMap::new())
    }
}

impl fmt::Debug for dyn TargetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetProfile").field("id", &self.id()).finish()
    }
}

/// Selector → profile lookup.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: Vec<Arc<dyn TargetProfile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, profile: impl TargetProfile + 'static) -> &mut Self {
        self.profiles.push(Arc::new(profile));
        self
    }

    /// Find a profile by selector or alias.
    pub fn resolve(&self, selector: &str) -> Result<Arc<dyn TargetProfile>, GenerateError> {
        let wanted = selector.trim();
        self.profiles
            .iter()
            .find(|p| p.id() == wanted || p.aliases().contains(&wanted))
            .cloned()
            .ok_or_else(|| GenerateError::UnknownProfile(selector.to_string()))
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Arc<dyn TargetProfile>> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl TargetProfile for Dummy {
        fn id(&self) -> &'static str {
            "dummy"
        }
        fn aliases(&self) -> &'static [&'static str] {
            &["d"]
        }
        fn description(&self) -> &'static str {
            "test profile"
        }
        fn categories(&self) -> Vec<OutputCategory> {
            vec![OutputCategory::supporting("out.txt", "out.txt.j2")]
        }
        fn templates(&self) -> Vec<(&'static str, &'static str)> {
            vec![("out.txt.j2", "{{ info.title }}")]
        }
    }

    #[test]
    fn test_resolve_by_id_and_alias() {
        let mut registry = ProfileRegistry::new();
        registry.register(Dummy);
        assert_eq!(registry.resolve("dummy").unwrap().id(), "dummy");
        assert_eq!(registry.resolve(" d ").unwrap().id(), "dummy");
    }

    #[test]
    fn test_unknown_profile() {
        let registry = ProfileRegistry::new();
        match registry.resolve("cobol-client") {
            Err(GenerateError::UnknownProfile(s)) => assert_eq!(s, "cobol-client"),
            other => panic!("expected UnknownProfile, got {other:?}"),
        }
    }

    #[test]
    fn test_default_type_mapping() {
        assert_eq!(
            Dummy.map_type(&TypeRef::Array(Box::new(TypeRef::Long))),
            "array[long]"
        );
    }
}
