use indexmap::IndexMap;
use log::{debug, warn};

use crate::ir::{CodegenOperation, OperationEntry};

/// Merge operations that share a path into one canonical record per path.
///
/// The first entry seen for a path becomes the primary; later entries for the
/// same path become alternates, in encounter order, and take the primary's
/// canonical name. A repeated (path, method) pair is kept as a further
/// alternate rather than dropped.
pub fn collate(entries: impl IntoIterator<Item = OperationEntry>) -> IndexMap<String, CodegenOperation> {
    let mut collated: IndexMap<String, CodegenOperation> = IndexMap::new();

    for mut entry in entries {
        match collated.get_mut(&entry.path) {
            Some(existing) => {
                if existing.entries().any(|e| e.method == entry.method) {
                    warn!(
                        "{} {} is declared more than once; keeping the repeat as an alternate",
                        entry.method.as_str(),
                        entry.path
                    );
                }
                debug!(
                    "{} {} joins {} as an alternate",
                    entry.method.as_str(),
                    entry.path,
                    existing.name.camel_case
                );
                entry.name = existing.name.clone();
                existing.alternates.push(entry);
            }
            None => {
                collated.insert(entry.path.clone(), CodegenOperation::new(entry));
            }
        }
    }

    collated
}
