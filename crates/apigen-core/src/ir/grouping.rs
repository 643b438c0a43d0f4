use indexmap::IndexMap;

use super::operations::CodegenOperation;
use super::types::NormalizedName;
use crate::config::GroupBy;
use crate::transform::name_normalizer::normalize_name;

/// A group of canonical operations rendered into one file.
#[derive(Debug, Clone)]
pub struct OperationGroup {
    pub name: NormalizedName,
    /// Indices into the collated operation list.
    pub operation_indices: Vec<usize>,
}

/// Group collated operations according to the strategy. Group order follows
/// first appearance, so output is stable across runs.
pub fn group_operations(
    operations: &IndexMap<String, CodegenOperation>,
    group_by: GroupBy,
) -> Vec<OperationGroup> {
    match group_by {
        GroupBy::Tag => group_by_key(operations, |op| {
            op.primary
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| "default".to_string())
        }),
        GroupBy::Route => group_by_key(operations, |op| extract_path_prefix(&op.path)),
        GroupBy::Operation => operations
            .values()
            .enumerate()
            .map(|(i, op)| OperationGroup {
                name: op.name.clone(),
                operation_indices: vec![i],
            })
            .collect(),
    }
}

fn group_by_key(
    operations: &IndexMap<String, CodegenOperation>,
    key: impl Fn(&CodegenOperation) -> String,
) -> Vec<OperationGroup> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();

    for (i, op) in operations.values().enumerate() {
        groups.entry(key(op)).or_default().push(i);
    }

    groups
        .into_iter()
        .map(|(name, indices)| OperationGroup {
            name: normalize_name(&name),
            operation_indices: indices,
        })
        .collect()
}

/// Extract the first meaningful path segment as a group name.
/// e.g. "/pets/{petId}" → "pets", "/store/inventory" → "store"
fn extract_path_prefix(path: &str) -> String {
    path.split('/')
        .find(|s| !s.is_empty() && !s.starts_with('{'))
        .unwrap_or("default")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{HttpMethod, OperationEntry};

    fn op(path: &str, tag: Option<&str>, id: &str) -> CodegenOperation {
        CodegenOperation::new(OperationEntry {
            method: HttpMethod::Get,
            path: path.to_string(),
            operation_id: id.to_string(),
            name: normalize_name(id),
            summary: None,
            description: None,
            tags: tag.map(|t| vec![t.to_string()]).unwrap_or_default(),
            consumes: vec![],
            produces: vec![],
            parameters: vec![],
            responses: vec![],
            deprecated: false,
            extensions: IndexMap::new(),
        })
    }

    fn ops() -> IndexMap<String, CodegenOperation> {
        [
            op("/pets", Some("pet"), "listPets"),
            op("/store/inventory", Some("store"), "getInventory"),
            op("/pets/{petId}", Some("pet"), "getPet"),
            op("/health", None, "health"),
        ]
        .into_iter()
        .map(|o| (o.path.clone(), o))
        .collect()
    }

    #[test]
    fn test_extract_path_prefix() {
        assert_eq!(extract_path_prefix("/pets"), "pets");
        assert_eq!(extract_path_prefix("/pets/{petId}"), "pets");
        assert_eq!(extract_path_prefix("/store/inventory"), "store");
        assert_eq!(extract_path_prefix("/{tenant}/users"), "users");
        assert_eq!(extract_path_prefix("/"), "default");
    }

    #[test]
    fn test_group_by_tag_keeps_first_appearance_order() {
        let groups = group_operations(&ops(), GroupBy::Tag);
        let names: Vec<_> = groups.iter().map(|g| g.name.original.as_str()).collect();
        assert_eq!(names, vec!["pet", "store", "default"]);
        assert_eq!(groups[0].operation_indices, vec![0, 2]);
    }

    #[test]
    fn test_group_by_route() {
        let groups = group_operations(&ops(), GroupBy::Route);
        let names: Vec<_> = groups.iter().map(|g| g.name.original.as_str()).collect();
        assert_eq!(names, vec!["pets", "store", "health"]);
    }

    #[test]
    fn test_group_by_operation() {
        let groups = group_operations(&ops(), GroupBy::Operation);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[1].name.pascal_case, "GetInventory");
    }
}
