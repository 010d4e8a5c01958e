//! Extended-attribute backed source.
//!
//! Filesystem xattrs are untyped byte strings, so typed attributes are stored
//! under a namespace prefix (default `user.haiku.`) with a small header:
//!
//! ```text
//! [ type code: u32, little endian ][ payload ... ]
//! ```
//!
//! Names are reported with the namespace stripped. Attributes outside the
//! namespace are not enumerated.
//!
//! The node's type identifier comes from the `BEOS:TYPE` attribute inside the
//! namespace, falling back to the freedesktop `user.mime_type` attribute.

use super::{AttributeSource, NameIter};
use crate::model::{AttrInfo, TypeTag};
use std::ffi::OsStr;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMESPACE: &str = "user.haiku.";
pub const TYPE_ATTR: &str = "BEOS:TYPE";
pub const MIME_TYPE_XATTR: &str = "user.mime_type";

const HEADER_LEN: usize = 4;

/// Encodes a typed value the way [`XattrSource`] expects to find it on disk.
pub fn encode_value(tag: TypeTag, payload: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(HEADER_LEN + payload.len());
    raw.extend_from_slice(&tag.code().to_le_bytes());
    raw.extend_from_slice(payload);
    raw
}

fn decode_value(name: &str, raw: &[u8]) -> io::Result<(TypeTag, Vec<u8>)> {
    if raw.len() < HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("attribute '{}' is missing its type header", name),
        ));
    }
    let (header, payload) = raw.split_at(HEADER_LEN);
    let mut code = [0u8; HEADER_LEN];
    code.copy_from_slice(header);
    Ok((TypeTag::from_code(u32::from_le_bytes(code)), payload.to_vec()))
}

/// Strips `namespace` from a listed xattr name. Names outside the namespace are
/// `None` whatever their encoding; only names inside it must be UTF-8.
fn namespaced_name(namespace: &str, raw: &OsStr) -> Option<io::Result<String>> {
    let rest = raw.as_bytes().strip_prefix(namespace.as_bytes())?;
    Some(
        std::str::from_utf8(rest)
            .map(str::to_string)
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("attribute name is not valid UTF-8: {:?}", raw),
                )
            }),
    )
}

fn text_value(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}

pub struct XattrSource {
    path: PathBuf,
    namespace: String,
}

impl XattrSource {
    /// Opens the node at `path`. Fails if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::symlink_metadata(&path)?;
        Ok(Self {
            path,
            namespace: DEFAULT_NAMESPACE.to_string(),
        })
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn full_name(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    fn read_raw(&self, name: &str) -> io::Result<Vec<u8>> {
        xattr::get(&self.path, self.full_name(name))?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no attribute named '{}'", name),
            )
        })
    }

    fn read_typed(&self, name: &str) -> io::Result<(TypeTag, Vec<u8>)> {
        let raw = self.read_raw(name)?;
        decode_value(name, &raw)
    }
}

impl AttributeSource for XattrSource {
    fn attr_names(&self) -> io::Result<NameIter<'_>> {
        let listed = xattr::list(&self.path)?;
        let namespace = self.namespace.clone();
        let iter = listed.filter_map(move |raw| namespaced_name(&namespace, &raw));
        Ok(Box::new(iter))
    }

    fn attr_info(&self, name: &str) -> io::Result<AttrInfo> {
        let (tag, payload) = self.read_typed(name)?;
        Ok(AttrInfo {
            tag,
            size: payload.len(),
            count: 1,
        })
    }

    fn read_attr(&self, name: &str, _info: &AttrInfo) -> io::Result<Vec<u8>> {
        let (_, payload) = self.read_typed(name)?;
        Ok(payload)
    }

    fn type_identifier(&self) -> io::Result<Option<String>> {
        if let Some(raw) = xattr::get(&self.path, self.full_name(TYPE_ATTR))? {
            let (_, payload) = decode_value(TYPE_ATTR, &raw)?;
            if let Some(type_id) = text_value(&payload) {
                return Ok(Some(type_id));
            }
        }
        Ok(xattr::get(&self.path, MIME_TYPE_XATTR)?.and_then(|raw| text_value(&raw)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
