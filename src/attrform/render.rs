//! # Field Rendering
//!
//! Maps one typed attribute value to a [`FieldDescriptor`].
//!
//! | Tag | Widget | Value |
//! |-----|--------|-------|
//! | `Boolean` | `Checkbox` | toggle state |
//! | `Double`, `Float`, `Int8`, `Int16`, `Int32` | `TextField` | decimal text |
//! | `String` | `TextField` | the text as-is |
//! | anything else | `ErrorPlaceholder` | explanation naming the attribute |
//!
//! [`render`] never fails. An unsupported type only affects its own field, the rest of
//! the form is unaffected. Numbers are stored little endian.

use crate::model::{FieldDescriptor, FieldValue, RecordEntry, TypeTag, WidgetKind};

pub fn unsupported_message(name: &str) -> String {
    format!("field type of attribute '{}' is not supported", name)
}

pub fn undecodable_message(name: &str) -> String {
    format!("value of attribute '{}' could not be decoded", name)
}

fn fixed<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.get(..N)?.try_into().ok()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

/// Decodes a known tag's value. `None` when the bytes are too short.
fn decode(tag: TypeTag, bytes: &[u8]) -> Option<(WidgetKind, FieldValue)> {
    let field = match tag {
        TypeTag::Boolean => (
            WidgetKind::Checkbox,
            FieldValue::Toggle(*bytes.first()? != 0),
        ),
        TypeTag::Double => numeric(f64::from_le_bytes(fixed(bytes)?)),
        TypeTag::Float => numeric(f32::from_le_bytes(fixed(bytes)?)),
        TypeTag::Int8 => numeric(i8::from_le_bytes(fixed(bytes)?)),
        TypeTag::Int16 => numeric(i16::from_le_bytes(fixed(bytes)?)),
        TypeTag::Int32 => numeric(i32::from_le_bytes(fixed(bytes)?)),
        TypeTag::String => (WidgetKind::TextField, FieldValue::Text(text(bytes))),
        TypeTag::Other(_) => return None,
    };
    Some(field)
}

fn numeric(n: impl ToString) -> (WidgetKind, FieldValue) {
    (WidgetKind::TextField, FieldValue::Text(n.to_string()))
}

fn placeholder(message: String) -> (WidgetKind, FieldValue) {
    (WidgetKind::ErrorPlaceholder, FieldValue::Text(message))
}

/// Renders one attribute. Editability is passed through unchanged.
pub fn render(name: &str, tag: TypeTag, bytes: &[u8], editable: bool) -> FieldDescriptor {
    let (widget, value) = match tag {
        TypeTag::Other(_) => placeholder(unsupported_message(name)),
        known => decode(known, bytes).unwrap_or_else(|| placeholder(undecodable_message(name))),
    };

    FieldDescriptor {
        name: name.to_string(),
        label: name.to_string(),
        widget,
        value,
        editable,
    }
}

/// Renders a record entry, labelled with its schema label when it has one.
pub fn render_entry(name: &str, entry: &RecordEntry) -> FieldDescriptor {
    let field = render(name, entry.tag, &entry.bytes, entry.editable);
    match &entry.label {
        Some(label) => field.with_label(label),
        None => field,
    }
}
