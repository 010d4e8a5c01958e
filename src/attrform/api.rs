//! # API Facade
//!
//! [`FormApi`] is the single entry point for building forms, whatever the UI. It wires
//! the pipeline together and returns structured results; it never prints.
//!
//! ```text
//! source ──► type id ──► schema (type + supertype) ──► VisibilityPolicy
//!    │                                                       │
//!    └──────────────────────► extract ◄──────────────────────┘
//!                                │
//!                          TypedRecord ──► TemplateRegistry::resolve ──► Form
//! ```
//!
//! `FormApi<S: SchemaStore>` is generic over where schemas come from:
//! - Production: `FormApi<FsSchemaStore>`
//! - Testing: `FormApi<MemSchemaStore>`

use crate::error::{AttrFormError, Result};
use crate::extract::extract;
use crate::form::Form;
use crate::mime;
use crate::model::TypedRecord;
use crate::schema::{merged_schema_for, AttributeSchemaEntry, SchemaStore, VisibilityPolicy};
use crate::source::AttributeSource;
use crate::template::TemplateRegistry;
use tracing::{debug, warn};

/// Everything produced for one form request.
#[derive(Debug)]
pub struct FormResult {
    pub form: Form,
    pub record: TypedRecord,
}

pub struct FormApi<S: SchemaStore> {
    schemas: S,
    templates: TemplateRegistry,
    show_unlisted: bool,
}

impl<S: SchemaStore> FormApi<S> {
    pub fn new(schemas: S, templates: TemplateRegistry) -> Self {
        Self {
            schemas,
            templates,
            show_unlisted: true,
        }
    }

    pub fn with_show_unlisted(mut self, show: bool) -> Self {
        self.show_unlisted = show;
        self
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.templates
    }

    /// The type identifier used for `source`: the override if given, else the
    /// source's own, else [`mime::DEFAULT_TYPE`].
    pub fn type_for<A: AttributeSource + ?Sized>(
        &self,
        source: &A,
        type_override: Option<&str>,
    ) -> Result<String> {
        let type_id = match type_override {
            Some(t) => t.to_string(),
            None => match source
                .type_identifier()
                .map_err(|e| AttrFormError::TypeLookup(e.to_string()))?
            {
                Some(t) => t,
                None => {
                    warn!(source = %source.describe(), "node has no type, assuming {}", mime::DEFAULT_TYPE);
                    mime::DEFAULT_TYPE.to_string()
                }
            },
        };
        mime::validate(&type_id)?;
        Ok(type_id)
    }

    /// Merged schema for a type.
    pub fn schema_for(&self, type_id: &str) -> Result<Vec<AttributeSchemaEntry>> {
        mime::validate(type_id)?;
        merged_schema_for(&self.schemas, type_id)
    }

    /// Runs the full pipeline for one source.
    pub fn build_form<A: AttributeSource + ?Sized>(
        &self,
        source: &A,
        type_override: Option<&str>,
    ) -> Result<FormResult> {
        let type_id = self.type_for(source, type_override)?;
        debug!(source = %source.describe(), %type_id, "building form");

        let schema = self.schema_for(&type_id)?;
        let policy = VisibilityPolicy::new(&schema).show_unlisted(self.show_unlisted);

        let record = extract(source, &policy)?;
        let resolution = self.templates.resolve(&type_id)?;
        let form = resolution.build(&type_id, &record);

        Ok(FormResult { form, record })
    }
}
