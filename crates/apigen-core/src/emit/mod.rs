//! Emission: turn a codegen model into files through a profile's templates.
//!
//! All paths are planned and checked for collisions first, then every file is
//! rendered in parallel, then files are written in plan order. A render error
//! therefore leaves the output directory untouched.

pub mod context;
pub mod manifest;
pub mod renderer;
pub mod writer;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};
use minijinja::{Value, context};
use rayon::prelude::*;

use crate::GeneratedFile;
use crate::error::GenerateError;
use crate::generator::GenerationOptions;
use crate::ir::grouping::group_operations;
use crate::ir::{CodegenModel, CodegenOperation};
use crate::parse::spec::SpecDocument;
use crate::profile::{CategoryKind, TargetProfile};

use self::context::{group_context, model_context, operation_context};
use self::manifest::{GenerationManifest, ManifestEntry};
use self::renderer::TemplateRenderer;
use self::writer::{normalize_relative_path, write_file};

/// Drives one profile's output categories over a codegen model.
pub struct EmissionCoordinator<'a> {
    profile: &'a dyn TargetProfile,
    options: &'a GenerationOptions,
}

struct PlannedFile {
    path: String,
    category: CategoryKind,
    template: String,
    context: Value,
}

impl<'a> EmissionCoordinator<'a> {
    pub fn new(profile: &'a dyn TargetProfile, options: &'a GenerationOptions) -> Self {
        Self { profile, options }
    }

    /// Render every planned file without touching the disk.
    pub fn render(
        &self,
        spec: &SpecDocument,
        model: &CodegenModel,
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        let renderer = self.renderer(model)?;
        let planned = self.plan(spec, model, &renderer)?;
        debug!("Rendering {} files with profile {}", planned.len(), self.profile.id());

        planned
            .par_iter()
            .map(|file| -> Result<GeneratedFile, GenerateError> {
                let content = renderer.render(&file.template, &file.path, &file.context)?;
                Ok(GeneratedFile {
                    path: file.path.clone(),
                    category: file.category,
                    content,
                })
            })
            .collect()
    }

    /// Render and write every planned file below `output_dir`.
    pub fn emit(
        &self,
        spec: &SpecDocument,
        model: &CodegenModel,
        output_dir: &Path,
    ) -> Result<GenerationManifest, GenerateError> {
        let files = self.render(spec, model)?;

        fs::create_dir_all(output_dir).map_err(|e| GenerateError::io(output_dir, e))?;

        let mut manifest = GenerationManifest::default();
        for file in files {
            let outcome = write_file(output_dir, &file.path, &file.content, self.options.overwrite)?;
            manifest.push(ManifestEntry {
                path: file.path,
                category: file.category,
                content: file.content,
                outcome,
            });
        }

        info!(
            "Generated {} files in {} ({} kept)",
            manifest.written().count(),
            output_dir.display(),
            manifest.skipped().count()
        );
        Ok(manifest)
    }

    fn renderer(&self, model: &CodegenModel) -> Result<TemplateRenderer, GenerateError> {
        let mut renderer = TemplateRenderer::new(self.profile, self.options.template_dir.as_deref())?;

        let properties = self.profile.properties(&self.options.properties);
        for (key, value) in &properties {
            renderer.add_global(key.clone(), Value::from_serialize(value));
        }
        renderer.add_global("properties", Value::from_serialize(&properties));
        renderer.add_global("info", Value::from_serialize(&model.info));
        renderer.add_global("base_url", Value::from(model.info.base_url()));
        Ok(renderer)
    }

    fn plan(
        &self,
        spec: &SpecDocument,
        model: &CodegenModel,
        renderer: &TemplateRenderer,
    ) -> Result<Vec<PlannedFile>, GenerateError> {
        let profile = self.profile;
        let collated: Vec<&CodegenOperation> = model.operations.values().collect();
        let operations: Vec<Value> = collated
            .iter()
            .map(|op| operation_context(op, profile))
            .collect();
        let models: Vec<Value> = model
            .models
            .values()
            .map(|m| model_context(m, profile))
            .collect();
        let groups: Vec<Value> = group_operations(&model.operations, self.options.group_by)
            .iter()
            .map(|g| group_context(g, &operations, &collated))
            .collect();

        let mut planned = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut push = |category: CategoryKind,
                        pattern: &str,
                        template: &str,
                        ctx: Value|
         -> Result<(), GenerateError> {
            let path = normalize_relative_path(&renderer.render_path(pattern, &ctx)?)?;
            if !seen.insert(path.clone()) {
                return Err(GenerateError::Configuration(format!(
                    "more than one output maps to `{path}`"
                )));
            }
            planned.push(PlannedFile {
                path,
                category,
                template: template.to_string(),
                context: ctx,
            });
            Ok(())
        };

        for category in profile.categories() {
            match category.kind {
                CategoryKind::PerModel => {
                    for m in &models {
                        let ctx = context! { model => m.clone() };
                        push(category.kind, &category.path, &category.template, ctx)?;
                    }
                }
                CategoryKind::PerOperationGroup => {
                    for g in &groups {
                        let ctx = context! { group => g.clone() };
                        push(category.kind, &category.path, &category.template, ctx)?;
                    }
                }
                CategoryKind::Supporting => {
                    let ctx = context! {
                        operations => operations.clone(),
                        groups => groups.clone(),
                        models => models.clone(),
                        document => profile.document_context(spec)?,
                    };
                    push(category.kind, &category.path, &category.template, ctx)?;
                }
            }
        }

        Ok(planned)
    }
}
