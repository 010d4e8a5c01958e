//! # Attribute Extraction
//!
//! Turns the attributes of an [`AttributeSource`] into a [`TypedRecord`].
//!
//! For every enumerated name, in source order:
//!
//! 1. Names in a reserved namespace (`BEOS:`, `be:`, `_trk/`) are dropped.
//! 2. The attribute's metadata is read. More than one value instance is fatal.
//! 3. The [`VisibilityPolicy`] is consulted by name. Hidden attributes are dropped.
//! 4. The payload is read. It must be non-empty, and fixed-width types must carry
//!    at least their full width.
//!
//! Any failure aborts the pass. Callers either get the complete record or an error,
//! never a partial record.

use crate::error::ExtractionError;
use crate::model::{is_reserved, RecordEntry, TypedRecord};
use crate::schema::VisibilityPolicy;
use crate::source::AttributeSource;
use std::collections::HashSet;
use std::io;
use tracing::debug;

pub fn extract<S: AttributeSource + ?Sized>(
    source: &S,
    policy: &VisibilityPolicy,
) -> Result<TypedRecord, ExtractionError> {
    let names = source
        .attr_names()
        .map_err(|cause| ExtractionError::Enumeration { cause })?;

    let mut record = TypedRecord::new();
    let mut seen = HashSet::new();

    for name in names {
        let name = name.map_err(|cause| ExtractionError::Enumeration { cause })?;

        if is_reserved(&name) {
            debug!(%name, "skipping reserved attribute");
            continue;
        }

        // A name listed twice is a second value instance, whatever attr_info says.
        if !seen.insert(name.clone()) {
            return Err(ExtractionError::InputCardinality { name, count: 2 });
        }

        let read_error = |cause: io::Error| ExtractionError::Read {
            name: name.clone(),
            cause,
        };

        let info = source.attr_info(&name).map_err(read_error)?;
        if info.count != 1 {
            return Err(ExtractionError::InputCardinality {
                name,
                count: info.count,
            });
        }

        let visibility = policy.visibility(&name);
        if !visibility.viewable {
            debug!(%name, "skipping hidden attribute");
            continue;
        }

        let bytes = source.read_attr(&name, &info).map_err(read_error)?;
        if bytes.is_empty() {
            return Err(read_error(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "attribute value is empty",
            )));
        }
        if let Some(width) = info.tag.fixed_width() {
            if bytes.len() < width {
                return Err(read_error(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "malformed {} value: expected {} bytes, got {}",
                        info.tag,
                        width,
                        bytes.len()
                    ),
                )));
            }
        }

        debug!(%name, tag = %info.tag, size = bytes.len(), "accepted attribute");
        let label = policy.label(&name).map(str::to_string);
        record.insert(
            name,
            RecordEntry {
                tag: info.tag,
                bytes,
                editable: visibility.editable,
                label,
            },
        );
    }

    Ok(record)
}
