//! # Attribute Sources
//!
//! An [`AttributeSource`] is the boundary between attrform and wherever typed attributes
//! actually live. The extractor only ever talks to this trait.
//!
//! ## Contract
//!
//! - **Enumerate**: [`AttributeSource::attr_names`] yields every distinct attribute name.
//!   Running out of names is the normal end; an `Err` item is an enumeration failure.
//! - **Describe**: [`AttributeSource::attr_info`] reports type tag, payload size and the
//!   number of value instances stored under a name.
//! - **Read**: [`AttributeSource::read_attr`] returns the raw payload bytes.
//!
//! All calls are blocking and assumed cheap (few attributes, small values).
//!
//! ## Implementations
//!
//! - [`fs::XattrSource`]: extended attributes of a file on disk.
//! - [`dump`]: loads a JSON attribute dump into a [`memory::MemSource`].
//! - [`memory::MemSource`]: in-memory attributes, with failure injection for tests.

use crate::model::AttrInfo;
use std::io;

pub mod dump;
pub mod fs;
pub mod memory;

pub type NameIter<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

/// Read access to the typed attributes of one data object.
pub trait AttributeSource {
    /// Enumerate attribute names.
    fn attr_names(&self) -> io::Result<NameIter<'_>>;

    /// Type, size and instance count for a name.
    fn attr_info(&self, name: &str) -> io::Result<AttrInfo>;

    /// Raw payload bytes for a name.
    fn read_attr(&self, name: &str, info: &AttrInfo) -> io::Result<Vec<u8>>;

    /// Type identifier of the object (e.g. a MIME type), if it has one.
    fn type_identifier(&self) -> io::Result<Option<String>>;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;
}
