//! Disk loader for named-type definitions.
//!
//! Bulk-populates a [`TypeRegistry`] from a directory of JSON definition
//! files: each `<name>.json` file registers one type under `<name>`.
//! Loading is a startup-time concern; validation itself never touches the
//! filesystem.

use std::fs;
use std::path::Path;

use crate::errors::LoaderError;
use crate::registry::TypeRegistry;
use crate::schema::Schema;

/// Loads every `*.json` definition in `dir` into the registry.
///
/// Non-JSON files are skipped. Returns the number of types registered.
pub fn load_dir(registry: &mut TypeRegistry, dir: &Path) -> Result<usize, LoaderError> {
    let entries = fs::read_dir(dir).map_err(|source| LoaderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut loaded = 0;
    for entry in entries {
        let entry = entry.map_err(|source| LoaderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| LoaderError::BadDefinition {
                path: path.clone(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;

        let content = fs::read_to_string(&path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;

        let schema: Schema =
            serde_json::from_str(&content).map_err(|source| LoaderError::Parse {
                path: path.clone(),
                source,
            })?;

        if schema.type_name.is_empty() {
            return Err(LoaderError::BadDefinition {
                path,
                reason: "expected a string \"type\" field".to_string(),
            });
        }

        registry.register(name, schema);
        loaded += 1;
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_directory_of_definitions() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "TypeOnDisk.json",
            r#"{ "type": "object", "fields": { "testField": { "type": "integer" } } }"#,
        );
        write_file(tmp.path(), "Port.json", r#"{ "type": "integer", "minValue": 1 }"#,);
        write_file(tmp.path(), "README.md", "not a definition");

        let mut registry = TypeRegistry::new();
        let loaded = load_dir(&mut registry, tmp.path()).unwrap();

        assert_eq!(loaded, 2);
        assert!(registry.contains("TypeOnDisk"));
        assert_eq!(registry.get("Port").unwrap().min_value, Some(1.0));
        assert!(!registry.contains("README"));
    }

    #[test]
    fn test_load_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new();
        assert_eq!(load_dir(&mut registry, tmp.path()).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let mut registry = TypeRegistry::new();
        let result = load_dir(&mut registry, &tmp.path().join("nope"));
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "Broken.json", "{ not json");

        let mut registry = TypeRegistry::new();
        let result = load_dir(&mut registry, tmp.path());
        assert!(matches!(result, Err(LoaderError::Parse { .. })));
    }

    #[test]
    fn test_definition_without_type_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "NoType.json", r#"{ "optional": true }"#);

        let mut registry = TypeRegistry::new();
        let result = load_dir(&mut registry, tmp.path());
        assert!(matches!(result, Err(LoaderError::BadDefinition { .. })));
    }
}
