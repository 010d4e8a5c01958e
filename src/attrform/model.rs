//! Core data types shared by the extraction and rendering stages.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Names starting with any of these belong to the system and are never shown.
pub const RESERVED_PREFIXES: &[&str] = &["BEOS:", "be:", "_trk/"];

/// Whether `name` lives in a reserved internal namespace.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

const fn code(tag: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*tag)
}

pub const BOOL_CODE: u32 = code(b"BOOL");
pub const DOUBLE_CODE: u32 = code(b"DBLE");
pub const FLOAT_CODE: u32 = code(b"FLOT");
pub const INT8_CODE: u32 = code(b"BYTE");
pub const INT16_CODE: u32 = code(b"SHRT");
pub const INT32_CODE: u32 = code(b"LONG");
pub const STRING_CODE: u32 = code(b"CSTR");

/// Primitive representation of an attribute value.
///
/// The known set is closed; everything else is carried as `Other` with its raw
/// four-character type code so it can still be named in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Boolean,
    Double,
    Float,
    Int8,
    Int16,
    Int32,
    String,
    Other(u32),
}

impl TypeTag {
    pub fn from_code(code: u32) -> Self {
        match code {
            BOOL_CODE => TypeTag::Boolean,
            DOUBLE_CODE => TypeTag::Double,
            FLOAT_CODE => TypeTag::Float,
            INT8_CODE => TypeTag::Int8,
            INT16_CODE => TypeTag::Int16,
            INT32_CODE => TypeTag::Int32,
            STRING_CODE => TypeTag::String,
            other => TypeTag::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            TypeTag::Boolean => BOOL_CODE,
            TypeTag::Double => DOUBLE_CODE,
            TypeTag::Float => FLOAT_CODE,
            TypeTag::Int8 => INT8_CODE,
            TypeTag::Int16 => INT16_CODE,
            TypeTag::Int32 => INT32_CODE,
            TypeTag::String => STRING_CODE,
            TypeTag::Other(code) => *code,
        }
    }

    /// Payload width in bytes for fixed-size types, `None` for variable-size ones.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            TypeTag::Boolean | TypeTag::Int8 => Some(1),
            TypeTag::Int16 => Some(2),
            TypeTag::Float | TypeTag::Int32 => Some(4),
            TypeTag::Double => Some(8),
            TypeTag::String | TypeTag::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TypeTag::Other(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Boolean => write!(f, "bool"),
            TypeTag::Double => write!(f, "double"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Int8 => write!(f, "int8"),
            TypeTag::Int16 => write!(f, "int16"),
            TypeTag::Int32 => write!(f, "int32"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Other(code) => {
                let bytes = code.to_be_bytes();
                if bytes.iter().all(|b| b.is_ascii_graphic()) {
                    write!(f, "{}", String::from_utf8_lossy(&bytes))
                } else {
                    write!(f, "{:#010x}", code)
                }
            }
        }
    }
}

/// Parses a lowercase type name (`int32`), a four-character code (`LONG`, `ICON`)
/// or a numeric code (`0x49434f4e`).
impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "bool" | "boolean" => TypeTag::Boolean,
            "double" => TypeTag::Double,
            "float" => TypeTag::Float,
            "int8" => TypeTag::Int8,
            "int16" => TypeTag::Int16,
            "int32" => TypeTag::Int32,
            "string" => TypeTag::String,
            _ if s.len() == 4 && s.is_ascii() => {
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(s.as_bytes());
                TypeTag::from_code(u32::from_be_bytes(bytes))
            }
            _ => {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let code = u32::from_str_radix(digits, 16)
                    .map_err(|_| format!("Unknown type tag: {}", s))?;
                TypeTag::from_code(code)
            }
        };
        Ok(tag)
    }
}

/// One attribute as read from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    pub name: String,
    pub tag: TypeTag,
    pub bytes: Vec<u8>,
}

impl RawAttribute {
    pub fn new(name: impl Into<String>, tag: TypeTag, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            tag,
            bytes,
        }
    }
}

/// Metadata a source reports for a name before its value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrInfo {
    pub tag: TypeTag,
    pub size: usize,
    /// Number of value instances stored under the name.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub tag: TypeTag,
    pub bytes: Vec<u8>,
    pub editable: bool,
    /// Label declared by the type schema, if any.
    pub label: Option<String>,
}

/// Ordered mapping from attribute name to its typed value.
///
/// Insertion order is the order attributes were accepted by the extractor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedRecord {
    entries: Vec<(String, RecordEntry)>,
}

impl TypedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing value) when the name is already present.
    pub(crate) fn insert(&mut self, name: String, entry: RecordEntry) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, entry));
        true
    }

    pub fn get(&self, name: &str) -> Option<&RecordEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

/// Builds a record from pairs; a repeated name keeps its first value.
impl FromIterator<(String, RecordEntry)> for TypedRecord {
    fn from_iter<I: IntoIterator<Item = (String, RecordEntry)>>(iter: I) -> Self {
        let mut record = TypedRecord::new();
        for (name, entry) in iter {
            record.insert(name, entry);
        }
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Checkbox,
    TextField,
    ErrorPlaceholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Toggle(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Toggle(_) => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            FieldValue::Toggle(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Toggle(b) => write!(f, "{}", b),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Display-ready representation of one attribute, independent of any widget toolkit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub widget: WidgetKind,
    pub value: FieldValue,
    pub editable: bool,
}

impl FieldDescriptor {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.widget == WidgetKind::ErrorPlaceholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: TypeTag) -> RecordEntry {
        RecordEntry {
            tag,
            bytes: vec![1],
            editable: false,
            label: None,
        }
    }

    #[test]
    fn reserved_prefixes_are_detected() {
        assert!(is_reserved("BEOS:TYPE"));
        assert!(is_reserved("be:deskbar_item_status"));
        assert!(is_reserved("_trk/pinfo_le"));
        assert!(!is_reserved("Title"));
        assert!(!is_reserved("beos:lowercase"));
    }

    #[test]
    fn codes_map_to_known_tags() {
        assert_eq!(TypeTag::from_code(INT32_CODE), TypeTag::Int32);
        assert_eq!(TypeTag::from_code(STRING_CODE), TypeTag::String);
        assert_eq!(TypeTag::Boolean.code(), u32::from_be_bytes(*b"BOOL"));

        let icon = u32::from_be_bytes(*b"ICON");
        assert_eq!(TypeTag::from_code(icon), TypeTag::Other(icon));
        assert!(!TypeTag::Other(icon).is_known());
    }

    #[test]
    fn fixed_widths() {
        assert_eq!(TypeTag::Boolean.fixed_width(), Some(1));
        assert_eq!(TypeTag::Int16.fixed_width(), Some(2));
        assert_eq!(TypeTag::Float.fixed_width(), Some(4));
        assert_eq!(TypeTag::Double.fixed_width(), Some(8));
        assert_eq!(TypeTag::String.fixed_width(), None);
    }

    #[test]
    fn parse_type_names_and_codes() {
        assert_eq!("int32".parse::<TypeTag>().unwrap(), TypeTag::Int32);
        assert_eq!("bool".parse::<TypeTag>().unwrap(), TypeTag::Boolean);
        assert_eq!("LONG".parse::<TypeTag>().unwrap(), TypeTag::Int32);
        assert_eq!(
            "ICON".parse::<TypeTag>().unwrap(),
            TypeTag::Other(u32::from_be_bytes(*b"ICON"))
        );
        assert_eq!(
            "0x49434f4e".parse::<TypeTag>().unwrap(),
            TypeTag::Other(u32::from_be_bytes(*b"ICON"))
        );
        assert!("not a tag".parse::<TypeTag>().is_err());
    }

    #[test]
    fn other_tag_displays_as_code() {
        let icon = TypeTag::Other(u32::from_be_bytes(*b"ICON"));
        assert_eq!(icon.to_string(), "ICON");
        assert_eq!(TypeTag::Other(1).to_string(), "0x00000001");
    }

    #[test]
    fn record_keeps_insertion_order_and_first_value() {
        let record: TypedRecord = vec![
            ("b".to_string(), entry(TypeTag::Int8)),
            ("a".to_string(), entry(TypeTag::Boolean)),
            ("b".to_string(), entry(TypeTag::String)),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.len(), 2);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.get("b").unwrap().tag, TypeTag::Int8);
    }
}
