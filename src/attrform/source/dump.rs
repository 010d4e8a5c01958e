//! JSON attribute dumps.
//!
//! A dump describes a node's attributes without needing a filesystem that
//! supports extended attributes:
//!
//! ```json
//! {
//!   "type": "text/x-note",
//!   "attributes": [
//!     { "name": "Title",  "type": "string", "value": "Hello" },
//!     { "name": "Rating", "type": "int32",  "value": 5 },
//!     { "name": "BEOS:icon", "type": "ICON", "bytes": [0, 1, 2] }
//!   ]
//! }
//! ```
//!
//! `type` accepts the same spellings as [`TypeTag`]'s `FromStr`. A value is
//! given either as `value` (JSON bool, number or string, encoded according to
//! the tag) or as raw `bytes`. Repeated names are kept as separate instances.

use super::memory::MemSource;
use crate::error::{AttrFormError, Result};
use crate::model::TypeTag;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DumpFile {
    #[serde(rename = "type")]
    type_id: Option<String>,
    #[serde(default)]
    attributes: Vec<DumpAttr>,
}

#[derive(Debug, Deserialize)]
struct DumpAttr {
    name: String,
    #[serde(rename = "type")]
    tag: String,
    value: Option<Value>,
    bytes: Option<Vec<u8>>,
}

fn invalid(name: &str, detail: impl std::fmt::Display) -> AttrFormError {
    AttrFormError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("attribute '{}': {}", name, detail),
    ))
}

fn encode(name: &str, tag: TypeTag, value: &Value) -> Result<Vec<u8>> {
    let int_in = |min: i64, max: i64| -> Result<i64> {
        value
            .as_i64()
            .filter(|n| (min..=max).contains(n))
            .ok_or_else(|| invalid(name, format!("expected an integer for {}", tag)))
    };

    let bytes = match tag {
        TypeTag::Boolean => {
            let b = value
                .as_bool()
                .ok_or_else(|| invalid(name, "expected a boolean"))?;
            vec![b as u8]
        }
        TypeTag::Double => value
            .as_f64()
            .ok_or_else(|| invalid(name, "expected a number"))?
            .to_le_bytes()
            .to_vec(),
        TypeTag::Float => (value
            .as_f64()
            .ok_or_else(|| invalid(name, "expected a number"))? as f32)
            .to_le_bytes()
            .to_vec(),
        TypeTag::Int8 => (int_in(i8::MIN.into(), i8::MAX.into())? as i8)
            .to_le_bytes()
            .to_vec(),
        TypeTag::Int16 => (int_in(i16::MIN.into(), i16::MAX.into())? as i16)
            .to_le_bytes()
            .to_vec(),
        TypeTag::Int32 => (int_in(i32::MIN.into(), i32::MAX.into())? as i32)
            .to_le_bytes()
            .to_vec(),
        TypeTag::String => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid(name, "expected a string"))?;
            s.as_bytes().to_vec()
        }
        TypeTag::Other(_) => {
            return Err(invalid(
                name,
                format!("type {} needs raw \"bytes\" instead of a value", tag),
            ))
        }
    };
    Ok(bytes)
}

/// Parses dump JSON into an in-memory source.
pub fn parse(json: &str) -> Result<MemSource> {
    let dump: DumpFile = serde_json::from_str(json)?;
    let mut source = MemSource::new();
    if let Some(type_id) = dump.type_id {
        source = source.with_type(type_id);
    }

    for attr in dump.attributes {
        let tag: TypeTag = attr.tag.parse().map_err(|e| invalid(&attr.name, e))?;
        let bytes = match (&attr.bytes, &attr.value) {
            (Some(bytes), _) => bytes.clone(),
            (None, Some(value)) => encode(&attr.name, tag, value)?,
            (None, None) => return Err(invalid(&attr.name, "needs a \"value\" or \"bytes\"")),
        };
        source.add(attr.name, tag, bytes);
    }

    Ok(source)
}

/// Loads a dump file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<MemSource> {
    let content = fs::read_to_string(path.as_ref())?;
    parse(&content)
}
