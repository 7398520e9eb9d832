use crate::config::DEFAULT_CONFIG_NAME;
use anyhow::{Context, Result};
use sqlts_schema::Namespace;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata documents under `path`, or `path` itself if it is a file.
///
/// The config file and anything under `exclude_dir` are skipped, so a
/// source directory that also holds the config or the output still works.
pub fn find_metadata_files(path: &Path, exclude_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let exclude_dir =
        exclude_dir.map(|dir| dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));
    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e.path(), exclude_dir.as_deref()))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.file_name().and_then(|s| s.to_str()) == Some(DEFAULT_CONFIG_NAME) {
            continue;
        }
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn is_excluded(path: &Path, exclude_dir: Option<&Path>) -> bool {
    let Some(dir) = exclude_dir else {
        return false;
    };
    path == dir || path.canonicalize().is_ok_and(|p| p == dir)
}

/// Read and validate one metadata document
pub fn load_namespace(path: &Path) -> Result<Namespace> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Namespace::from_json(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_config_and_output_dir() {
        let root = std::env::temp_dir().join("sqlts_documents_test");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("types")).unwrap();
        fs::write(root.join("films.json"), "{}").unwrap();
        fs::write(root.join(DEFAULT_CONFIG_NAME), "{}").unwrap();
        fs::write(root.join("types").join("stale.json"), "{}").unwrap();

        let files = find_metadata_files(&root.join("."), Some(&root.join("types"))).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|f| f.file_name().and_then(|s| s.to_str()))
            .collect();
        assert_eq!(names, vec!["films.json"]);

        let all = find_metadata_files(&root, None).unwrap();
        assert_eq!(all.len(), 2);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_explicit_file_is_returned_as_is() {
        let root = std::env::temp_dir().join("sqlts_documents_single_test");
        fs::create_dir_all(&root).unwrap();
        let file = root.join("films.json");
        fs::write(&file, "{}").unwrap();

        assert_eq!(find_metadata_files(&file, None).unwrap(), vec![file.clone()]);

        fs::remove_dir_all(&root).unwrap();
    }
}
