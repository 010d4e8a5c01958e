//! File-backed layout templates.
//!
//! A layout lists which attributes appear, in which order and under which label:
//!
//! ```json
//! {
//!   "title": "Person",
//!   "fields": [
//!     { "attr": "META:name", "label": "Name" },
//!     { "attr": "META:email", "label": "E-mail" }
//!   ],
//!   "include_unlisted": false
//! }
//! ```
//!
//! Slots naming attributes the record does not have are skipped. With
//! `include_unlisted`, record attributes not named by any slot are appended in
//! record order.

use super::FormStrategy;
use crate::form::Layout;
use crate::model::TypedRecord;
use crate::render::render_entry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub attr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSlot>,
    #[serde(default)]
    pub include_unlisted: bool,
}

impl LayoutTemplate {
    /// Parses and checks a layout. Errors are human-readable causes.
    pub fn parse(json: &str) -> Result<Self, String> {
        let layout: LayoutTemplate = serde_json::from_str(json).map_err(|e| e.to_string())?;
        layout.check()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        Self::parse(&content).map_err(|e| format!("{}: {}", path.display(), e))
    }

    fn check(&self) -> Result<(), String> {
        if self.fields.is_empty() && !self.include_unlisted {
            return Err("layout declares no fields".to_string());
        }
        let mut seen = HashSet::new();
        for slot in &self.fields {
            if slot.attr.is_empty() {
                return Err("layout field without an attribute name".to_string());
            }
            if !seen.insert(slot.attr.as_str()) {
                return Err(format!("attribute '{}' is laid out twice", slot.attr));
            }
        }
        Ok(())
    }

    fn lists(&self, name: &str) -> bool {
        self.fields.iter().any(|slot| slot.attr == name)
    }
}

impl FormStrategy for LayoutTemplate {
    fn name(&self) -> &str {
        "layout"
    }

    fn layout(&self, record: &TypedRecord) -> Layout {
        let mut fields: Vec<_> = self
            .fields
            .iter()
            .filter_map(|slot| {
                let entry = record.get(&slot.attr)?;
                let field = render_entry(&slot.attr, entry);
                Some(match &slot.label {
                    Some(label) => field.with_label(label),
                    None => field,
                })
            })
            .collect();

        if self.include_unlisted {
            fields.extend(
                record
                    .iter()
                    .filter(|(name, _)| !self.lists(name))
                    .map(|(name, entry)| render_entry(name, entry)),
            );
        }

        Layout {
            title: self.title.clone(),
            fields,
        }
    }
}
