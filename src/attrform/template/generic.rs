use super::FormStrategy;
use crate::form::Layout;
use crate::model::TypedRecord;
use crate::render::render_entry;

/// Form built from type tags alone: one field per record entry, in record order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericForm;

impl FormStrategy for GenericForm {
    fn name(&self) -> &str {
        "generic"
    }

    fn layout(&self, record: &TypedRecord) -> Layout {
        Layout {
            title: None,
            fields: record
                .iter()
                .map(|(name, entry)| render_entry(name, entry))
                .collect(),
        }
    }
}
