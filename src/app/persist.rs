use crate::app::errors::GenerateError;
use crate::app::models::GeneratedIndex;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes every index in the tree, children before their parent.
/// Stops at the first failure; files already written are left in place.
pub fn persist_tree(index: &GeneratedIndex) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::new();
    for node in index.post_order() {
        write_index(node)?;
        written.push(node.target_file.clone());
    }
    Ok(written)
}

/// Replaces the target file in one step so a failed write leaves no partial
/// file behind.
pub fn write_index(index: &GeneratedIndex) -> Result<(), GenerateError> {
    let target = &index.target_file;
    let temp_path = temp_path_for(target);

    let write_err = |source| GenerateError::Write {
        path: target.clone(),
        source,
    };

    fs::write(&temp_path, &index.content).map_err(write_err)?;
    if let Err(source) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(source));
    }

    Ok(())
}

// Dot-prefixed, so never listed as a module.
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp", file_name))
}
