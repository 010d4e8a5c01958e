//! Helpers for MIME-like type identifiers (`supertype/subtype`).

use crate::error::{AttrFormError, Result};
use std::path::{Path, PathBuf};

/// Type assumed when a node carries no type information.
pub const DEFAULT_TYPE: &str = "application/octet-stream";

/// The supertype of a full type identifier: `text/plain` -> `text`.
///
/// A bare supertype has no supertype of its own.
pub fn supertype(type_id: &str) -> Option<&str> {
    type_id
        .split_once('/')
        .map(|(sup, _)| sup)
        .filter(|sup| !sup.is_empty())
}

/// Checks that a type identifier is usable as a lookup key.
///
/// Allowed forms are `super` and `super/sub`, lowercase-insensitive, made of
/// token characters only.
pub fn validate(type_id: &str) -> Result<()> {
    let valid_token = |s: &str| {
        !s.is_empty()
            && s != "."
            && s != ".."
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c))
    };

    let ok = match type_id.split_once('/') {
        Some((sup, sub)) => valid_token(sup) && valid_token(sub),
        None => valid_token(type_id),
    };

    if ok {
        Ok(())
    } else {
        Err(AttrFormError::TypeLookup(format!(
            "Invalid type identifier: '{}'",
            type_id
        )))
    }
}

/// File that holds per-type data below `root`: `text/x-note` -> `root/text/x-note.json`.
pub fn type_file(root: &Path, type_id: &str) -> Result<PathBuf> {
    validate(type_id)?;
    let lowered = type_id.to_ascii_lowercase();
    let mut path = root.to_path_buf();
    match lowered.split_once('/') {
        Some((sup, sub)) => {
            path.push(sup);
            path.push(format!("{}.json", sub));
        }
        None => path.push(format!("{}.json", lowered)),
    }
    Ok(path)
}
