//! # Attribute Schemas
//!
//! A type's schema lists the attributes it knows about and whether each one is
//! viewable and editable. The schema that applies to a node is the type's own
//! entries followed by its supertype's ([`merge_schema`]).
//!
//! ## Lookup by name
//!
//! Visibility is decided by attribute *name*. The merged entry list is indexed once
//! ([`SchemaIndex`]) before extraction starts; when a name appears more than once,
//! the first entry wins, so a type's own entries shadow its supertype's.
//! The order in which a source happens to enumerate its attributes has no influence
//! on which schema entry applies.
//!
//! Attributes with no schema entry fall back to the policy's `unlisted` visibility.
//!
//! ## Storage
//!
//! | Store | Use |
//! |-------|-----|
//! | [`store::FsSchemaStore`] | `<schema_dir>/<super>/<sub>.json` and `<schema_dir>/<super>.json` |
//! | [`store::MemSchemaStore`] | Tests and embedding |

mod entry;
mod policy;
pub mod store;

pub use entry::{merge_schema, AttributeSchemaEntry, SchemaIndex, TypeSchema};
pub use policy::{Visibility, VisibilityPolicy};
pub use store::{merged_schema_for, FsSchemaStore, MemSchemaStore, SchemaStore};
