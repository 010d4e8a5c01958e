//! Form assembly: the ordered result handed to a presentation layer.

use crate::model::FieldDescriptor;
use serde::Serialize;

/// Which step of template resolution produced a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBy {
    /// A template registered for the exact type.
    Specific,
    /// A template registered for the type's supertype.
    Supertype,
    /// The generic, type-agnostic form.
    Generic,
}

/// A complete form, fields in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub type_id: String,
    pub title: String,
    /// Name of the strategy that laid out the fields.
    pub strategy: String,
    pub resolved_by: ResolvedBy,
    pub fields: Vec<FieldDescriptor>,
}

impl Form {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that could not be rendered normally.
    pub fn placeholders(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_placeholder())
    }
}

/// Fields laid out by a strategy, before the form is stamped with how it was resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub title: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl Layout {
    pub fn into_form(self, type_id: &str, strategy: &str, resolved_by: ResolvedBy) -> Form {
        Form {
            type_id: type_id.to_string(),
            title: self.title.unwrap_or_else(|| type_id.to_string()),
            strategy: strategy.to_string(),
            resolved_by,
            fields: self.fields,
        }
    }
}
