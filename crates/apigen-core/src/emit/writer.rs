use std::fs;
use std::path::{Component, Path};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::config::OverwritePolicy;
use crate::error::GenerateError;

use super::manifest::WriteOutcome;

/// Write one file below `output_dir`, honoring the overwrite policy.
///
/// Content goes to a temporary file in the target directory and is renamed
/// into place, so readers never see a half-written file.
pub fn write_file(
    output_dir: &Path,
    relative: &str,
    content: &str,
    policy: OverwritePolicy,
) -> Result<WriteOutcome, GenerateError> {
    let target = output_dir.join(relative);

    if policy == OverwritePolicy::SkipExisting && target.exists() {
        warn!("Keeping existing {}", target.display());
        return Ok(WriteOutcome::Skipped);
    }

    let parent_dir = target.parent().unwrap_or(output_dir);
    if !parent_dir.exists() {
        debug!("Creating directory {}", parent_dir.display());
        fs::create_dir_all(parent_dir).map_err(|e| GenerateError::io(parent_dir, e))?;
    }

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| GenerateError::io(parent_dir, e))?;
    fs::write(temp_file.path(), content).map_err(|e| GenerateError::io(temp_file.path(), e))?;
    temp_file
        .persist(&target)
        .map_err(|e| GenerateError::io(&target, e.error))?;

    debug!("Wrote {}", target.display());
    Ok(WriteOutcome::Written)
}

/// Validate a rendered output path and normalize it to `/`-separated form.
/// Absolute paths and `..` segments would escape the output directory.
pub fn normalize_relative_path(rendered: &str) -> Result<String, GenerateError> {
    let cleaned = rendered.trim().replace('\\', "/");
    let path = Path::new(&cleaned);

    let mut parts: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(s) => parts.push(s),
                None => return Err(bad_path(rendered)),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(bad_path(rendered));
            }
        }
    }

    if parts.is_empty() {
        return Err(bad_path(rendered));
    }
    Ok(parts.join("/"))
}

fn bad_path(rendered: &str) -> GenerateError {
    GenerateError::Configuration(format!(
        "output path `{rendered}` must be a non-empty path inside the output directory"
    ))
}
