use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_true() -> bool {
    true
}

/// Schema metadata for one attribute of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchemaEntry {
    pub name: String,

    #[serde(default = "default_true")]
    pub viewable: bool,

    #[serde(default)]
    pub editable: bool,

    /// Public label shown instead of the raw attribute name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AttributeSchemaEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            viewable: true,
            editable: false,
            label: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.viewable = false;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// On-disk representation of one type's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    #[serde(default)]
    pub attributes: Vec<AttributeSchemaEntry>,
}

/// Concatenates a type's entries with its supertype's, type first.
///
/// Order is preserved and nothing is deduplicated; [`SchemaIndex`] decides which
/// entry applies to a name.
pub fn merge_schema(
    type_schema: &[AttributeSchemaEntry],
    super_schema: &[AttributeSchemaEntry],
) -> Vec<AttributeSchemaEntry> {
    type_schema
        .iter()
        .chain(super_schema.iter())
        .cloned()
        .collect()
}

/// Name-keyed view over a merged schema. The first entry for a name wins.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    entries: HashMap<String, AttributeSchemaEntry>,
}

impl SchemaIndex {
    pub fn new(merged: &[AttributeSchemaEntry]) -> Self {
        let mut entries = HashMap::with_capacity(merged.len());
        for entry in merged {
            entries
                .entry(entry.name.clone())
                .or_insert_with(|| entry.clone());
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchemaEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_type_entries_first() {
        let own = vec![AttributeSchemaEntry::new("Title").editable()];
        let sup = vec![
            AttributeSchemaEntry::new("Title").hidden(),
            AttributeSchemaEntry::new("Size"),
        ];

        let merged = merge_schema(&own, &sup);
        let names: Vec<_> = merged.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Title", "Title", "Size"]);
    }

    #[test]
    fn index_prefers_first_entry() {
        let own = vec![AttributeSchemaEntry::new("Title").editable()];
        let sup = vec![AttributeSchemaEntry::new("Title").hidden()];
        let index = SchemaIndex::new(&merge_schema(&own, &sup));

        let title = index.get("Title").unwrap();
        assert!(title.viewable);
        assert!(title.editable);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn entry_defaults_from_json() {
        let entry: AttributeSchemaEntry = serde_json::from_str(r#"{ "name": "Title" }"#).unwrap();
        assert!(entry.viewable);
        assert!(!entry.editable);
        assert_eq!(entry.label, None);
    }

    #[test]
    fn type_schema_from_json() {
        let schema: TypeSchema = serde_json::from_str(
            r#"{ "attributes": [
                { "name": "Title", "editable": true, "label": "Headline" },
                { "name": "Secret", "viewable": false }
            ] }"#,
        )
        .unwrap();
        assert_eq!(schema.attributes.len(), 2);
        assert_eq!(schema.attributes[0].label.as_deref(), Some("Headline"));
        assert!(!schema.attributes[1].viewable);
    }
}
