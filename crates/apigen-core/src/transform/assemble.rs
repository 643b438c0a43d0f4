use indexmap::IndexMap;
use log::debug;

use crate::error::GenerateError;
use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::{self, Parameter, ParameterOrRef};
use crate::parse::response::{Response, ResponseOrRef};
use crate::parse::spec::SpecDocument;

use super::name_normalizer::{derive_operation_id, normalize_name};
use super::schema_resolver::{
    collect_schema_refs, definition_to_model, parameter_schema_refs, parameter_type,
    schema_or_ref_to_type,
};

/// Extension key under which the resolved model names of an operation are stored.
pub const RESOLVED_MODELS_KEY: &str = "resolvedModels";

/// Options for the assembly phase.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Stable-sort parameters so required ones come first.
    pub sort_params_by_required: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            sort_params_by_required: true,
        }
    }
}

/// Flatten the document into operation entries in declared order: path
/// order, then method order within each path item.
pub fn collect_entries(spec: &SpecDocument) -> Result<Vec<OperationEntry>, GenerateError> {
    let mut entries = Vec::with_capacity(spec.operation_count());

    for (path, item) in &spec.paths {
        let shared = item
            .parameters
            .iter()
            .map(|p| lookup_parameter(spec, p, path))
            .collect::<Result<Vec<_>, _>>()?;

        for (method, op) in &item.operations {
            entries.push(build_entry(spec, *method, path, op, &shared)?);
        }
    }

    Ok(entries)
}

fn build_entry(
    spec: &SpecDocument,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    shared: &[&Parameter],
) -> Result<OperationEntry, GenerateError> {
    let operation_id = op.operation_id.clone().unwrap_or_default();
    let raw_name = if operation_id.trim().is_empty() {
        derive_operation_id(method, path)
    } else {
        operation_id.clone()
    };

    let own = op
        .parameters
        .iter()
        .map(|p| lookup_parameter(spec, p, path))
        .collect::<Result<Vec<_>, _>>()?;

    // Operation-level parameters override path-level ones with the same name and location.
    let mut params: Vec<&Parameter> = shared
        .iter()
        .copied()
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .collect();
    params.extend(own);

    let mut responses = Vec::with_capacity(op.responses.len());
    for (code, resp) in &op.responses {
        let resp = lookup_response(spec, resp, path)?;
        let mut refs = Vec::new();
        if let Some(ref schema) = resp.schema {
            collect_schema_refs(schema, &mut refs);
        }
        responses.push(ResponseEntry {
            code: code.clone(),
            description: resp.description.clone(),
            response_type: resp.schema.as_ref().map(schema_or_ref_to_type),
            schema_refs: refs.into_iter().map(String::from).collect(),
        });
    }

    Ok(OperationEntry {
        method,
        path: path.to_string(),
        operation_id,
        name: normalize_name(&raw_name),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        consumes: if op.consumes.is_empty() {
            spec.consumes.clone()
        } else {
            op.consumes.clone()
        },
        produces: if op.produces.is_empty() {
            spec.produces.clone()
        } else {
            op.produces.clone()
        },
        parameters: params.into_iter().map(to_parameter_entry).collect(),
        responses,
        deprecated: op.deprecated.unwrap_or(false),
        extensions: op.vendor_extensions(),
    })
}

fn to_parameter_entry(param: &Parameter) -> ParameterEntry {
    let location = match param.location {
        parameter::ParameterLocation::Path => ParameterLocation::Path,
        parameter::ParameterLocation::Query => ParameterLocation::Query,
        parameter::ParameterLocation::Header => ParameterLocation::Header,
        parameter::ParameterLocation::FormData => ParameterLocation::FormData,
        parameter::ParameterLocation::Body => ParameterLocation::Body,
    };
    ParameterEntry {
        name: normalize_name(&param.name),
        original_name: param.name.clone(),
        location,
        param_type: parameter_type(param),
        // Path parameters are always required, whatever the document says.
        required: param.required || location == ParameterLocation::Path,
        description: param.description.clone(),
        schema_refs: parameter_schema_refs(param),
    }
}

fn lookup_parameter<'a>(
    spec: &'a SpecDocument,
    param: &'a ParameterOrRef,
    path: &str,
) -> Result<&'a Parameter, GenerateError> {
    match param {
        ParameterOrRef::Parameter(p) => Ok(p.as_ref()),
        ParameterOrRef::Ref { ref_path } => {
            let name = ref_path.strip_prefix("#/parameters/").unwrap_or(ref_path);
            spec.parameters
                .get(name)
                .ok_or_else(|| GenerateError::unresolved(ref_path, format!("parameters of {path}")))
        }
    }
}

fn lookup_response<'a>(
    spec: &'a SpecDocument,
    resp: &'a ResponseOrRef,
    path: &str,
) -> Result<&'a Response, GenerateError> {
    match resp {
        ResponseOrRef::Response(r) => Ok(r),
        ResponseOrRef::Ref { ref_path } => {
            let name = ref_path.strip_prefix("#/responses/").unwrap_or(ref_path);
            spec.responses
                .get(name)
                .ok_or_else(|| GenerateError::unresolved(ref_path, format!("responses of {path}")))
        }
    }
}

/// Build every model definition and check that the models they reference exist.
pub fn resolve_models(
    spec: &SpecDocument,
) -> Result<IndexMap<String, ModelDefinition>, GenerateError> {
    let models: IndexMap<String, ModelDefinition> = spec
        .definitions
        .iter()
        .map(|(name, schema)| (name.clone(), definition_to_model(name, schema)))
        .collect();

    for (name, model) in &models {
        for base in model.parent.iter().chain(&model.interfaces) {
            ensure_model(&models, base, || format!("allOf of model {name}"))?;
        }
    }

    // Inline objects flatten to `TypeRef::Object`, so walk the raw schemas.
    for (name, schema) in &spec.definitions {
        let mut refs = Vec::new();
        collect_schema_refs(schema, &mut refs);
        for r in refs {
            ensure_model(&models, r, || format!("model {name}"))?;
        }
    }

    Ok(models)
}

/// Resolve each canonical operation's type references against the models,
/// order its parameters, and record the models it uses.
pub fn assemble(
    operations: &mut IndexMap<String, CodegenOperation>,
    models: &IndexMap<String, ModelDefinition>,
    options: &AssembleOptions,
) -> Result<(), GenerateError> {
    for op in operations.values_mut() {
        let mut used: Vec<String> = Vec::new();

        for entry in op.entries_mut() {
            let label = format!("{} {}", entry.method.as_str(), entry.path);

            for param in &entry.parameters {
                for r in &param.schema_refs {
                    ensure_model(models, r, || {
                        format!("parameter `{}` of {label}", param.original_name)
                    })?;
                }
                let mut refs = Vec::new();
                param.param_type.collect_models(&mut refs);
                for r in refs {
                    ensure_model(models, r, || {
                        format!("parameter `{}` of {label}", param.original_name)
                    })?;
                    push_unique(&mut used, r);
                }
            }

            for resp in &entry.responses {
                for r in &resp.schema_refs {
                    ensure_model(models, r, || format!("response {} of {label}", resp.code))?;
                }
                let mut refs = Vec::new();
                if let Some(ref t) = resp.response_type {
                    t.collect_models(&mut refs);
                }
                for r in refs {
                    ensure_model(models, r, || format!("response {} of {label}", resp.code))?;
                    push_unique(&mut used, r);
                }
            }

            if options.sort_params_by_required {
                // `sort_by_key` is stable, so declaration order holds within each class.
                entry.parameters.sort_by_key(|p| !p.required);
            }
        }

        if !used.is_empty() {
            debug!("{} uses models {:?}", op.path, used);
            op.extensions.insert(
                RESOLVED_MODELS_KEY.to_string(),
                serde_json::Value::from(used),
            );
        }
    }

    Ok(())
}

fn ensure_model(
    models: &IndexMap<String, ModelDefinition>,
    name: &str,
    context: impl FnOnce() -> String,
) -> Result<(), GenerateError> {
    if models.contains_key(name) {
        Ok(())
    } else {
        Err(GenerateError::unresolved(name, context()))
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
