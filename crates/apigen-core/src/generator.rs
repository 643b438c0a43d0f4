use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info};

use crate::GeneratedFile;
use crate::config::{ApigenConfig, GroupBy, OverwritePolicy};
use crate::emit::EmissionCoordinator;
use crate::emit::manifest::GenerationManifest;
use crate::error::GenerateError;
use crate::ir::{ApiInfo, CodegenModel, CodegenOperation};
use crate::parse::spec::SpecDocument;
use crate::profile::TargetProfile;
use crate::transform::{AssembleOptions, assemble, collate, collect_entries, resolve_models};

/// Run-wide settings that are not the document, the profile, or the output directory.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub overwrite: OverwritePolicy,
    pub group_by: GroupBy,
    /// Directory of templates that replace built-ins with the same name.
    pub template_dir: Option<PathBuf>,
    pub sort_params_by_required: bool,
    pub properties: IndexMap<String, serde_json::Value>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            overwrite: OverwritePolicy::Always,
            group_by: GroupBy::Tag,
            template_dir: None,
            sort_params_by_required: true,
            properties: IndexMap::new(),
        }
    }
}

impl From<&ApigenConfig> for GenerationOptions {
    fn from(config: &ApigenConfig) -> Self {
        Self {
            overwrite: config.overwrite,
            group_by: config.group_by,
            template_dir: config.template_dir.clone(),
            sort_params_by_required: config.sort_params_by_required,
            properties: config.properties.clone(),
        }
    }
}

/// A configured generation run: document, profile, and output directory.
pub struct Generator {
    spec: SpecDocument,
    profile: Arc<dyn TargetProfile>,
    output_dir: PathBuf,
    options: GenerationOptions,
}

impl Generator {
    /// Bind a run. Fails before anything is read or written when the profile
    /// or the output directory is missing.
    pub fn configure(
        spec: SpecDocument,
        profile: Option<Arc<dyn TargetProfile>>,
        output_dir: Option<PathBuf>,
        options: GenerationOptions,
    ) -> Result<Self, GenerateError> {
        let profile = profile
            .ok_or_else(|| GenerateError::Configuration("no target profile selected".to_string()))?;
        let output_dir = output_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| GenerateError::Configuration("no output directory given".to_string()))?;
        if let Some(dir) = &options.template_dir
            && !dir.is_dir()
        {
            return Err(GenerateError::Configuration(format!(
                "template directory {} does not exist",
                dir.display()
            )));
        }

        debug!(
            "Configured profile {} writing to {}",
            profile.id(),
            output_dir.display()
        );
        Ok(Self {
            spec,
            profile,
            output_dir,
            options,
        })
    }

    pub fn spec(&self) -> &SpecDocument {
        &self.spec
    }

    pub fn profile(&self) -> &dyn TargetProfile {
        self.profile.as_ref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// The collated operations, keyed by path in first-appearance order.
    pub fn build_operation_model(&self) -> Result<IndexMap<String, CodegenOperation>, GenerateError> {
        Ok(self.build_codegen_model()?.operations)
    }

    /// Collate operations, resolve models, and assemble them into one model.
    pub fn build_codegen_model(&self) -> Result<CodegenModel, GenerateError> {
        let entries = collect_entries(&self.spec)?;
        let entry_count = entries.len();
        let mut operations = collate(entries);
        let models = resolve_models(&self.spec)?;
        assemble(
            &mut operations,
            &models,
            &AssembleOptions {
                sort_params_by_required: self.options.sort_params_by_required,
            },
        )?;

        debug!(
            "Collated {} operations into {} paths, {} models",
            entry_count,
            operations.len(),
            models.len()
        );
        Ok(CodegenModel {
            info: api_info(&self.spec),
            operations,
            models,
        })
    }

    /// Render every output file without writing anything.
    pub fn render(&self) -> Result<Vec<GeneratedFile>, GenerateError> {
        let model = self.build_codegen_model()?;
        EmissionCoordinator::new(self.profile.as_ref(), &self.options).render(&self.spec, &model)
    }

    /// Build the model and write every output file.
    pub fn generate(&self) -> Result<GenerationManifest, GenerateError> {
        info!(
            "Generating {} from {} {}",
            self.profile.id(),
            self.spec.info.title,
            self.spec.info.version
        );
        let model = self.build_codegen_model()?;
        EmissionCoordinator::new(self.profile.as_ref(), &self.options).emit(
            &self.spec,
            &model,
            &self.output_dir,
        )
    }
}

fn api_info(spec: &SpecDocument) -> ApiInfo {
    ApiInfo {
        spec_version: spec.swagger.clone(),
        title: spec.info.title.clone(),
        description: spec.info.description.clone(),
        version: spec.info.version.clone(),
        host: spec.host.clone(),
        base_path: spec.base_path.clone(),
        schemes: spec.schemes.clone(),
    }
}
