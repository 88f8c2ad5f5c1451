use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the directory already exists.
pub fn require_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }
    if !path.is_dir() {
        anyhow::bail!("Path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// List the `*.geojson` files directly inside `dir`, sorted by file name.
pub fn list_geojson_files(dir: &Path) -> Result<Vec<PathBuf>> {
    require_dir_exists(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        let is_geojson = path.extension().and_then(|e| e.to_str()) == Some("geojson");
        if entry.file_type().is_file() && is_geojson {
            files.push(path.to_path_buf());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// File name component as a `String` (lossy), or the whole path if there is none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_geojson_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Region 2A.geojson", "notes.txt", "Region 1B.geojson", "Region 1A.geojson"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.geojson")).unwrap();

        let names: Vec<String> = list_geojson_files(dir.path()).unwrap()
            .iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, ["Region 1A.geojson", "Region 1B.geojson", "Region 2A.geojson"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_geojson_files(&dir.path().join("absent")).is_err());
    }
}
