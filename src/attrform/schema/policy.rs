use super::entry::{AttributeSchemaEntry, SchemaIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub viewable: bool,
    pub editable: bool,
}

impl Visibility {
    pub const HIDDEN: Visibility = Visibility {
        viewable: false,
        editable: false,
    };

    pub const READ_ONLY: Visibility = Visibility {
        viewable: true,
        editable: false,
    };
}

/// Decides whether an attribute is shown and whether it may be edited.
#[derive(Debug, Clone)]
pub struct VisibilityPolicy {
    index: SchemaIndex,
    unlisted: Visibility,
}

impl Default for VisibilityPolicy {
    /// No schema, everything shown read-only.
    fn default() -> Self {
        Self {
            index: SchemaIndex::default(),
            unlisted: Visibility::READ_ONLY,
        }
    }
}

impl VisibilityPolicy {
    pub fn new(merged: &[AttributeSchemaEntry]) -> Self {
        Self {
            index: SchemaIndex::new(merged),
            ..Self::default()
        }
    }

    /// How attributes missing from the schema are treated.
    pub fn with_unlisted(mut self, unlisted: Visibility) -> Self {
        self.unlisted = unlisted;
        self
    }

    /// Convenience for the `show_unlisted` config switch.
    pub fn show_unlisted(self, show: bool) -> Self {
        self.with_unlisted(if show {
            Visibility::READ_ONLY
        } else {
            Visibility::HIDDEN
        })
    }

    pub fn visibility(&self, name: &str) -> Visibility {
        match self.index.get(name) {
            Some(entry) => Visibility {
                viewable: entry.viewable,
                editable: entry.viewable && entry.editable,
            },
            None => self.unlisted,
        }
    }

    /// Schema label for a name, if one was declared.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.index.get(name).and_then(|entry| entry.label.as_deref())
    }
}
