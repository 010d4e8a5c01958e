use super::entry::{merge_schema, AttributeSchemaEntry, TypeSchema};
use crate::error::{AttrFormError, Result};
use crate::mime;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of per-type attribute schemas.
pub trait SchemaStore {
    /// Entries declared by exactly this type. Unknown types have no entries.
    fn type_entries(&self, type_id: &str) -> Result<Vec<AttributeSchemaEntry>>;
}

/// The schema that applies to `type_id`: its own entries, then its supertype's.
pub fn merged_schema_for<S: SchemaStore + ?Sized>(
    store: &S,
    type_id: &str,
) -> Result<Vec<AttributeSchemaEntry>> {
    let own = store.type_entries(type_id)?;
    let inherited = match mime::supertype(type_id) {
        Some(sup) => store.type_entries(sup)?,
        None => Vec::new(),
    };
    debug!(
        type_id,
        own = own.len(),
        inherited = inherited.len(),
        "merged attribute schema"
    );
    Ok(merge_schema(&own, &inherited))
}

/// Reads schemas from JSON files below a directory.
pub struct FsSchemaStore {
    root: PathBuf,
}

impl FsSchemaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SchemaStore for FsSchemaStore {
    fn type_entries(&self, type_id: &str) -> Result<Vec<AttributeSchemaEntry>> {
        let path = mime::type_file(&self.root, type_id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AttrFormError::Schema(format!("{}: {}", path.display(), e)))
            }
        };
        let schema: TypeSchema = serde_json::from_str(&content).map_err(|e| {
            AttrFormError::Schema(format!("{}: {}", path.display(), e))
        })?;
        Ok(schema.attributes)
    }
}

/// In-memory schema store.
#[derive(Debug, Clone, Default)]
pub struct MemSchemaStore {
    schemas: HashMap<String, Vec<AttributeSchemaEntry>>,
}

impl MemSchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, type_id: &str, entries: Vec<AttributeSchemaEntry>) -> Self {
        self.schemas.insert(type_id.to_ascii_lowercase(), entries);
        self
    }
}

impl SchemaStore for MemSchemaStore {
    fn type_entries(&self, type_id: &str) -> Result<Vec<AttributeSchemaEntry>> {
        Ok(self
            .schemas
            .get(&type_id.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, json: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    #[test]
    fn fs_store_reads_type_and_supertype() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "text/x-note.json",
            r#"{ "attributes": [ { "name": "Title", "editable": true } ] }"#,
        );
        write(
            dir.path(),
            "text.json",
            r#"{ "attributes": [ { "name": "Title", "viewable": false }, { "name": "Encoding" } ] }"#,
        );

        let store = FsSchemaStore::new(dir.path());
        let merged = merged_schema_for(&store, "text/x-note").unwrap();
        let names: Vec<_> = merged.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Title", "Title", "Encoding"]);
        assert!(merged[0].editable);
        assert!(!merged[1].viewable);
    }

    #[test]
    fn fs_store_missing_files_mean_empty_schema() {
        let dir = TempDir::new().unwrap();
        let store = FsSchemaStore::new(dir.path());
        assert!(merged_schema_for(&store, "application/x-foo")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn fs_store_reports_broken_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "text/plain.json", "{ broken");
        let store = FsSchemaStore::new(dir.path());
        assert!(matches!(
            store.type_entries("text/plain"),
            Err(AttrFormError::Schema(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn fs_store_reports_unreadable_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("text/plain.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&path, &path).unwrap();
        let store = FsSchemaStore::new(dir.path());
        assert!(matches!(
            store.type_entries("text/plain"),
            Err(AttrFormError::Schema(_))
        ));
    }

    #[test]
    fn fs_store_rejects_bad_type_ids() {
        let dir = TempDir::new().unwrap();
        let store = FsSchemaStore::new(dir.path());
        assert!(store.type_entries("../secrets").is_err());
    }

    #[test]
    fn mem_store_is_case_insensitive() {
        let store = MemSchemaStore::new().with("Text/Plain", vec![AttributeSchemaEntry::new("A")]);
        assert_eq!(store.type_entries("text/plain").unwrap().len(), 1);
        assert!(store.type_entries("text/html").unwrap().is_empty());
    }
}
