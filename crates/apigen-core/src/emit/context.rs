//! Template contexts built from the codegen model.
//!
//! Every type is rendered through the profile's type mapper before it reaches
//! a template, so templates never see a raw `TypeRef`.

use indexmap::IndexMap;
use minijinja::{Value, context};

use crate::ir::grouping::OperationGroup;
use crate::ir::{CodegenOperation, ModelDefinition, OperationEntry, ParameterEntry, ParameterLocation, TypeRef};
use crate::profile::TargetProfile;
use crate::transform::RESOLVED_MODELS_KEY;

/// Key under which a canonical operation exposes its alternates to templates.
/// Present only when the operation has alternates.
pub const OTHER_METHODS_KEY: &str = "otherMethods";

pub fn model_context(model: &ModelDefinition, profile: &dyn TargetProfile) -> Value {
    let fields: Vec<Value> = model
        .fields
        .iter()
        .map(|f| {
            context! {
                name => f.name.clone(),
                original_name => f.original_name.clone(),
                type => profile.map_type(&f.field_type),
                required => f.required,
                description => f.description.clone(),
                read_only => f.read_only,
                is_container => f.field_type.is_container(),
            }
        })
        .collect();

    let mut imports: Vec<&str> = Vec::new();
    for field in &model.fields {
        let mut refs = Vec::new();
        field.field_type.collect_models(&mut refs);
        for r in refs {
            if r != model.name.original && !imports.contains(&r) {
                imports.push(r);
            }
        }
    }

    context! {
        name => model.name.clone(),
        description => model.description.clone(),
        parent => model.parent.clone(),
        interfaces => model.interfaces.clone(),
        discriminator => model.discriminator.clone(),
        is_enum => model.is_enum(),
        enum_values => model.enum_values.clone(),
        fields => fields,
        has_required => model.fields.iter().any(|f| f.required),
        imports => imports,
    }
}

pub fn operation_context(op: &CodegenOperation, profile: &dyn TargetProfile) -> Value {
    let primary = entry_context(&op.primary, profile);
    let alternates: Vec<Value> = op
        .alternates
        .iter()
        .map(|e| entry_context(e, profile))
        .collect();
    let entries: Vec<Value> = std::iter::once(primary.clone())
        .chain(alternates.iter().cloned())
        .collect();

    let mut ctx: IndexMap<&str, Value> = IndexMap::new();
    ctx.insert("path", Value::from(op.path.as_str()));
    ctx.insert("name", Value::from_serialize(&op.name));
    ctx.insert(
        "methods",
        Value::from_iter(op.entries().map(|e| e.method.as_str())),
    );
    ctx.insert("operation_count", Value::from(op.operation_count()));
    ctx.insert("primary", primary);
    ctx.insert("entries", Value::from(entries));
    if !alternates.is_empty() {
        ctx.insert(OTHER_METHODS_KEY, Value::from(alternates.clone()));
    }
    ctx.insert("alternates", Value::from(alternates));
    ctx.insert(
        "resolved_models",
        op.extensions
            .get(RESOLVED_MODELS_KEY)
            .map(Value::from_serialize)
            .unwrap_or_else(|| Value::from(Vec::<Value>::new())),
    );
    ctx.insert("extensions", Value::from_serialize(&op.extensions));

    Value::from_serialize(&ctx)
}

pub fn group_context(group: &OperationGroup, operations: &[Value], collated: &[&CodegenOperation]) -> Value {
    let ops: Vec<Value> = group
        .operation_indices
        .iter()
        .filter_map(|&i| operations.get(i).cloned())
        .collect();

    let mut imports: Vec<String> = Vec::new();
    for &i in &group.operation_indices {
        let Some(op) = collated.get(i) else { continue };
        if let Some(serde_json::Value::Array(names)) = op.extensions.get(RESOLVED_MODELS_KEY) {
            for name in names.iter().filter_map(|n| n.as_str()) {
                if !imports.iter().any(|m| m == name) {
                    imports.push(name.to_string());
                }
            }
        }
    }

    context! {
        name => group.name.clone(),
        operations => ops,
        imports => imports,
    }
}

fn entry_context(entry: &OperationEntry, profile: &dyn TargetProfile) -> Value {
    let params = |filter: &dyn Fn(&ParameterEntry) -> bool| -> Vec<Value> {
        entry
            .parameters
            .iter()
            .filter(|p| filter(p))
            .map(|p| parameter_context(p, profile))
            .collect()
    };
    let located = |loc: ParameterLocation| params(&|p: &ParameterEntry| p.location == loc);

    let return_type = entry.return_type();
    let return_model = match return_type {
        Some(TypeRef::Model(name)) => Some(name.clone()),
        _ => None,
    };


    let responses: Vec<Value> = entry
        .responses
        .iter()
        .map(|r| {
            context! {
                code => r.code.clone(),
                description => r.description.clone(),
                type => r.response_type.as_ref().map(|t| profile.map_type(t)),
                is_success => r.code.starts_with('2'),
            }
        })
        .collect();

    context! {
        method => entry.method.as_str(),
        method_lower => entry.method.key(),
        path => entry.path.clone(),
        operation_id => entry.operation_id.clone(),
        name => entry.name.clone(),
        // Alternates share `name`; targets with one method per entry use this.
        declared_name => entry.declared_name(),
        summary => entry.summary.clone(),
        description => entry.description.clone(),
        tags => entry.tags.clone(),
        deprecated => entry.deprecated,
        consumes => entry.consumes.clone(),
        produces => entry.produces.clone(),
        parameters => params(&|_| true),
        required_params => params(&|p| p.required),
        optional_params => params(&|p| !p.required),
        has_optional_params => entry.has_optional_parameters(),
        path_params => located(ParameterLocation::Path),
        query_params => located(ParameterLocation::Query),
        header_params => located(ParameterLocation::Header),
        form_params => located(ParameterLocation::FormData),
        body_param => entry.body_parameter().map(|p| parameter_context(p, profile)),
        return_type => return_type.map(|t| profile.map_type(t)),
        return_model => return_model,
        responses => responses,
        extensions => entry.extensions.clone(),
    }
}

fn parameter_context(param: &ParameterEntry, profile: &dyn TargetProfile) -> Value {
    context! {
        name => param.name.clone(),
        original_name => param.original_name.clone(),
        location => param.location.as_str(),
        type => profile.map_type(&param.param_type),
        required => param.required,
        description => param.description.clone(),
        is_body => param.location == ParameterLocation::Body,
    }
}
