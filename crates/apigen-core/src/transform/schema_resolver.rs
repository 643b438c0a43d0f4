use crate::ir::{ModelDefinition, ModelField, TypeRef};
use crate::parse::parameter::Parameter;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, definition_name};

use super::name_normalizer::normalize_name;

/// Convert a parsed `SchemaOrRef` to a `TypeRef`. References become
/// `TypeRef::Model` and are checked against the definitions later.
pub fn schema_or_ref_to_type(schema_or_ref: &SchemaOrRef) -> TypeRef {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => TypeRef::Model(definition_name(ref_path).to_string()),
        SchemaOrRef::Schema(schema) => schema_to_type(schema),
    }
}

/// Convert a parsed `Schema` to a `TypeRef`.
pub fn schema_to_type(schema: &Schema) -> TypeRef {
    match schema.schema_type {
        Some(SchemaType::Object) => object_type(schema),
        Some(t) => primitive_type(t, schema.format.as_deref(), schema.items.as_ref()),
        None => {
            if let [single] = schema.all_of.as_slice() {
                schema_or_ref_to_type(single)
            } else if !schema.properties.is_empty() || !schema.all_of.is_empty() {
                TypeRef::Object
            } else if let Some(ref items) = schema.items {
                TypeRef::Array(Box::new(schema_or_ref_to_type(items)))
            } else if schema.additional_properties.is_some() {
                object_type(schema)
            } else {
                TypeRef::Any
            }
        }
    }
}

/// The type of a non-body parameter, declared inline with `type`/`format`/`items`.
pub fn parameter_type(param: &Parameter) -> TypeRef {
    if let Some(ref schema) = param.schema {
        return schema_or_ref_to_type(schema);
    }
    match param.param_type {
        Some(t) => primitive_type(t, param.format.as_deref(), param.items.as_ref()),
        None => TypeRef::Any,
    }
}

/// Append every definition name a schema mentions, at any depth: properties,
/// array items, map values and `allOf` members. References are not followed.
pub fn collect_schema_refs<'a>(schema_or_ref: &'a SchemaOrRef, out: &mut Vec<&'a str>) {
    let schema = match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            let name = definition_name(ref_path);
            if !out.contains(&name) {
                out.push(name);
            }
            return;
        }
        SchemaOrRef::Schema(schema) => schema,
    };
    for prop in schema.properties.values() {
        collect_schema_refs(prop, out);
    }
    if let Some(ref items) = schema.items {
        collect_schema_refs(items, out);
    }
    if let Some(AdditionalProperties::Schema(ref value)) = schema.additional_properties {
        collect_schema_refs(value, out);
    }
    for part in &schema.all_of {
        collect_schema_refs(part, out);
    }
}

/// Definition names mentioned by a parameter's body schema or inline `items`.
pub fn parameter_schema_refs(param: &Parameter) -> Vec<String> {
    let mut refs = Vec::new();
    if let Some(ref schema) = param.schema {
        collect_schema_refs(schema, &mut refs);
    }
    if let Some(ref items) = param.items {
        collect_schema_refs(items, &mut refs);
    }
    refs.into_iter().map(String::from).collect()
}

fn primitive_type(t: SchemaType, format: Option<&str>, items: Option<&SchemaOrRef>) -> TypeRef {
    match t {
        SchemaType::String => match format {
            Some("date") => TypeRef::Date,
            Some("date-time") => TypeRef::DateTime,
            Some("byte") => TypeRef::ByteArray,
            Some("binary") => TypeRef::Binary,
            _ => TypeRef::String,
        },
        SchemaType::Integer => match format {
            Some("int64") => TypeRef::Long,
            _ => TypeRef::Integer,
        },
        SchemaType::Number => match format {
            Some("float") => TypeRef::Float,
            Some("double") => TypeRef::Double,
            _ => TypeRef::Number,
        },
        SchemaType::Boolean => TypeRef::Boolean,
        SchemaType::File => TypeRef::File,
        SchemaType::Array => TypeRef::Array(Box::new(
            items.map(schema_or_ref_to_type).unwrap_or(TypeRef::Any),
        )),
        SchemaType::Object => TypeRef::Object,
    }
}

fn object_type(schema: &Schema) -> TypeRef {
    if !schema.properties.is_empty() {
        return TypeRef::Object;
    }
    match &schema.additional_properties {
        Some(AdditionalProperties::Schema(s)) => TypeRef::Map(Box::new(schema_or_ref_to_type(s))),
        Some(AdditionalProperties::Bool(true)) => TypeRef::Map(Box::new(TypeRef::Any)),
        Some(AdditionalProperties::Bool(false)) | None => TypeRef::Object,
    }
}

/// Convert a named definition to a `ModelDefinition`. `allOf` members that
/// are references become the parent; inline members contribute fields.
pub fn definition_to_model(name: &str, schema_or_ref: &SchemaOrRef) -> ModelDefinition {
    let mut model = ModelDefinition {
        name: normalize_name(name),
        description: None,
        fields: Vec::new(),
        parent: None,
        interfaces: Vec::new(),
        discriminator: None,
        enum_values: Vec::new(),
    };

    let schema = match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            model.parent = Some(definition_name(ref_path).to_string());
            return model;
        }
        SchemaOrRef::Schema(schema) => schema,
    };

    model.description = schema.description.clone();
    model.discriminator = schema.discriminator.clone();
    model.enum_values = schema
        .enum_values
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect();

    for part in &schema.all_of {
        match part {
            SchemaOrRef::Ref { ref_path } => {
                let name = definition_name(ref_path).to_string();
                if model.parent.is_none() {
                    model.parent = Some(name);
                } else {
                    model.interfaces.push(name);
                }
            }
            SchemaOrRef::Schema(inline) => {
                push_fields(&mut model.fields, inline);
                if model.discriminator.is_none() {
                    model.discriminator = inline.discriminator.clone();
                }
            }
        }
    }
    push_fields(&mut model.fields, schema);

    model
}

fn push_fields(fields: &mut Vec<ModelField>, schema: &Schema) {
    for (name, prop) in &schema.properties {
        let (description, read_only) = match prop {
            SchemaOrRef::Schema(s) => (s.description.clone(), s.read_only),
            SchemaOrRef::Ref { .. } => (None, false),
        };
        fields.push(ModelField {
            name: normalize_name(name),
            original_name: name.clone(),
            field_type: schema_or_ref_to_type(prop),
            required: schema.required.contains(name),
            description,
            read_only,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: &str) -> SchemaOrRef {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_primitive_formats() {
        assert_eq!(
            schema_or_ref_to_type(&schema(r#"{"type":"integer","format":"int64"}"#)),
            TypeRef::Long
        );
        assert_eq!(
            schema_or_ref_to_type(&schema(r#"{"type":"string","format":"date-time"}"#)),
            TypeRef::DateTime
        );
        assert_eq!(
            schema_or_ref_to_type(&schema(r#"{"type":"number","format":"float"}"#)),
            TypeRef::Float
        );
        assert_eq!(
            schema_or_ref_to_type(&schema(r#"{"type":"file"}"#)),
            TypeRef::File
        );
        assert_eq!(schema_or_ref_to_type(&schema("{}")), TypeRef::Any);
    }

    #[test]
    fn test_array_of_refs() {
        let t = schema_or_ref_to_type(&schema(
            r##"{"type":"array","items":{"$ref":"#/definitions/Pet"}}"##,
        ));
        assert_eq!(t, TypeRef::Array(Box::new(TypeRef::Model("Pet".to_string()))));
    }

    #[test]
    fn test_map_type() {
        let t = schema_or_ref_to_type(&schema(
            r#"{"type":"object","additionalProperties":{"type":"integer","format":"int32"}}"#,
        ));
        assert_eq!(t, TypeRef::Map(Box::new(TypeRef::Integer)));
    }

    #[test]
    fn test_parameter_type_inline() {
        let p: Parameter = serde_json::from_str(
            r#"{"name":"status","in":"query","type":"array","items":{"type":"string"}}"#,
        )
        .unwrap();
        assert_eq!(
            parameter_type(&p),
            TypeRef::Array(Box::new(TypeRef::String))
        );
    }

    #[test]
    fn test_definition_fields_and_required() {
        let m = definition_to_model(
            "Pet",
            &schema(
                r##"{
                "type": "object",
                "required": ["name"],
                "properties": {
                    "id": {"type": "integer", "format": "int64", "readOnly": true},
                    "name": {"type": "string", "description": "pet name"},
                    "category": {"$ref": "#/definitions/Category"}
                }
            }"##,
            ),
        );
        assert_eq!(m.name.pascal_case, "Pet");
        assert_eq!(m.fields.len(), 3);
        assert!(m.fields[0].read_only);
        assert!(!m.fields[0].required);
        assert!(m.fields[1].required);
        assert_eq!(m.fields[1].description.as_deref(), Some("pet name"));
        assert_eq!(m.fields[2].field_type, TypeRef::Model("Category".to_string()));
    }

    #[test]
    fn test_definition_all_of_parent() {
        let m = definition_to_model(
            "Dog",
            &schema(
                r##"{"allOf": [
                    {"$ref": "#/definitions/Animal"},
                    {"type": "object", "properties": {"bark": {"type": "boolean"}}}
                ]}"##,
            ),
        );
        assert_eq!(m.parent.as_deref(), Some("Animal"));
        assert!(m.interfaces.is_empty());
        assert_eq!(m.fields.len(), 1);
        assert_eq!(m.fields[0].name.camel_case, "bark");
    }

    #[test]
    fn test_definition_enum() {
        let m = definition_to_model(
            "Status",
            &schema(r#"{"type":"string","enum":["placed","approved","delivered"]}"#),
        );
        assert!(m.is_enum());
        assert_eq!(m.enum_values, vec!["placed", "approved", "delivered"]);
    }

    #[test]
    fn test_later_all_of_refs_become_interfaces() {
        let m = definition_to_model(
            "Dog",
            &schema(
                r##"{"allOf": [
                    {"$ref": "#/definitions/Animal"},
                    {"$ref": "#/definitions/Pet"},
                    {"$ref": "#/definitions/Named"}
                ]}"##,
            ),
        );
        assert_eq!(m.parent.as_deref(), Some("Animal"));
        assert_eq!(m.interfaces, vec!["Pet", "Named"]);
    }

    #[test]
    fn test_schema_refs_reach_into_inline_objects() {
        let s = schema(
            r##"{
            "type": "object",
            "properties": {
                "meta": {"type": "object", "properties": {"owner": {"$ref": "#/definitions/User"}}},
                "tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}},
                "scores": {"type": "object", "additionalProperties": {"$ref": "#/definitions/Score"}},
                "again": {"$ref": "#/definitions/User"}
            },
            "allOf": [{"$ref": "#/definitions/Base"}]
        }"##,
        );
        let mut refs = Vec::new();
        collect_schema_refs(&s, &mut refs);
        assert_eq!(refs, vec!["User", "Tag", "Score", "Base"]);
        // An inline object still flattens to a plain object type.
        assert_eq!(schema_or_ref_to_type(&s), TypeRef::Object);
    }
}
