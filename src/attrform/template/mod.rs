//! # Template Resolution
//!
//! A [`FormStrategy`] turns a [`TypedRecord`] into laid-out fields. The
//! [`TemplateRegistry`] picks the strategy for a type identifier by trying, in order:
//!
//! 1. **Specific**: a strategy for the exact type, either registered in-process with
//!    [`TemplateRegistry::register`] or a layout file `<template_dir>/<super>/<sub>.json`.
//! 2. **Supertype**: the same lookup for the type's supertype. Disabled unless
//!    [`TemplateRegistry::with_supertype_templates`] is set; by default resolution goes
//!    straight from the specific step to the generic form.
//! 3. **Generic**: [`GenericForm`], which needs no type knowledge and always works.
//!
//! Attempts are evaluated lazily and stop at the first hit. Only "no template here"
//! moves on to the next attempt. A template that exists but fails to initialize is a
//! [`TemplateError`]; the generic form is never used to paper over it.

use crate::error::TemplateError;
use crate::form::{Form, Layout, ResolvedBy};
use crate::mime;
use crate::model::TypedRecord;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

mod generic;
mod layout;

pub use generic::GenericForm;
pub use layout::{FieldSlot, LayoutTemplate};

/// A way of laying out a form.
pub trait FormStrategy {
    fn name(&self) -> &str;

    fn layout(&self, record: &TypedRecord) -> Layout;
}

/// Builds a strategy on demand. An `Err` is an initialization failure.
pub type StrategyFactory = Box<dyn Fn() -> Result<Box<dyn FormStrategy>, String>>;

/// A resolved strategy and the step that found it.
pub struct Resolution {
    pub strategy: Box<dyn FormStrategy>,
    pub resolved_by: ResolvedBy,
    /// The type key the strategy was found under.
    pub matched_type: Option<String>,
}

impl Resolution {
    /// Lays out `record` and stamps the form with `type_id`.
    pub fn build(&self, type_id: &str, record: &TypedRecord) -> Form {
        self.strategy
            .layout(record)
            .into_form(type_id, self.strategy.name(), self.resolved_by)
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("strategy", &self.strategy.name())
            .field("resolved_by", &self.resolved_by)
            .field("matched_type", &self.matched_type)
            .finish()
    }
}

#[derive(Default)]
pub struct TemplateRegistry {
    factories: HashMap<String, StrategyFactory>,
    template_dir: Option<PathBuf>,
    supertype_templates: bool,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also look for layout files below `dir`.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Try the supertype's template before falling back to the generic form.
    pub fn with_supertype_templates(mut self, enabled: bool) -> Self {
        self.supertype_templates = enabled;
        self
    }

    /// Register a strategy factory for a type. Takes precedence over layout files.
    pub fn register<F>(&mut self, type_id: &str, factory: F)
    where
        F: Fn() -> Result<Box<dyn FormStrategy>, String> + 'static,
    {
        self.factories
            .insert(type_id.to_ascii_lowercase(), Box::new(factory));
    }

    pub fn is_registered(&self, type_id: &str) -> bool {
        self.factories.contains_key(&type_id.to_ascii_lowercase())
    }

    /// Looks for a template stored under exactly `type_id`.
    ///
    /// `Ok(None)` means there is none; `Err` means there is one and it is broken.
    fn load(&self, type_id: &str) -> Result<Option<Box<dyn FormStrategy>>, TemplateError> {
        let init_error = |cause: String| TemplateError::Init {
            type_id: type_id.to_string(),
            cause,
        };

        if let Some(factory) = self.factories.get(&type_id.to_ascii_lowercase()) {
            return factory().map(Some).map_err(init_error);
        }

        let Some(dir) = &self.template_dir else {
            return Ok(None);
        };
        let path = mime::type_file(dir, type_id).map_err(|e| init_error(e.to_string()))?;
        // Only a missing file moves resolution on; unreadable metadata is a broken template.
        let found = path
            .try_exists()
            .map_err(|e| init_error(format!("{}: {}", path.display(), e)))?;
        if !found {
            return Ok(None);
        }
        let layout = LayoutTemplate::load(&path).map_err(init_error)?;
        Ok(Some(Box::new(layout)))
    }

    /// Resolves the strategy for `type_id`.
    pub fn resolve(&self, type_id: &str) -> Result<Resolution, TemplateError> {
        let mut attempts = vec![(ResolvedBy::Specific, type_id)];
        if self.supertype_templates {
            if let Some(sup) = mime::supertype(type_id) {
                attempts.push((ResolvedBy::Supertype, sup));
            }
        }

        for (step, key) in attempts {
            if let Some(strategy) = self.load(key)? {
                info!(type_id, matched = key, strategy = strategy.name(), "resolved form template");
                return Ok(Resolution {
                    strategy,
                    resolved_by: step,
                    matched_type: Some(key.to_string()),
                });
            }
            debug!(type_id, key, ?step, "no template");
        }

        info!(type_id, "no template for type, using generic form");
        Ok(Resolution {
            strategy: Box::new(GenericForm),
            resolved_by: ResolvedBy::Generic,
            matched_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordEntry, TypeTag};
    use std::fs;
    use tempfile::TempDir;

    struct Fixed;

    impl FormStrategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn layout(&self, _record: &TypedRecord) -> Layout {
            Layout {
                title: Some("Fixed".into()),
                fields: vec![],
            }
        }
    }

    fn note_record() -> TypedRecord {
        vec![(
            "Note".to_string(),
            RecordEntry {
                tag: TypeTag::String,
                bytes: b"x".to_vec(),
                editable: false,
                label: None,
            },
        )]
        .into_iter()
        .collect()
    }

    fn write_layout(dir: &TempDir, rel: &str, json: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    #[test]
    fn registered_strategy_wins() {
        let mut registry = TemplateRegistry::new();
        registry.register("application/x-foo", || Ok(Box::new(Fixed)));

        let resolution = registry.resolve("application/x-foo").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Specific);
        assert_eq!(resolution.strategy.name(), "fixed");
        assert_eq!(resolution.matched_type.as_deref(), Some("application/x-foo"));
    }

    #[test]
    fn missing_template_falls_back_to_generic() {
        let registry = TemplateRegistry::new();
        let resolution = registry.resolve("application/x-foo").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Generic);

        let record = note_record();
        let form = resolution.build("application/x-foo", &record);
        assert_eq!(form.field_count(), record.len());
        assert_eq!(form.fields[0].value.as_text(), Some("x"));
        assert_eq!(form.strategy, "generic");
    }

    #[test]
    fn failing_strategy_is_reported_not_masked() {
        let mut registry = TemplateRegistry::new();
        registry.register("application/x-foo", || Err("no resources".to_string()));

        match registry.resolve("application/x-foo") {
            Err(TemplateError::Init { type_id, cause }) => {
                assert_eq!(type_id, "application/x-foo");
                assert_eq!(cause, "no resources");
            }
            other => panic!("expected init failure, got {:?}", other),
        }
    }

    #[test]
    fn layout_file_is_found_by_type() {
        let dir = TempDir::new().unwrap();
        write_layout(
            &dir,
            "text/x-note.json",
            r#"{ "title": "Note", "fields": [ { "attr": "Note", "label": "Body" } ] }"#,
        );
        let registry = TemplateRegistry::new().with_template_dir(dir.path());

        let resolution = registry.resolve("text/x-note").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Specific);
        let form = resolution.build("text/x-note", &note_record());
        assert_eq!(form.title, "Note");
        assert_eq!(form.fields[0].label, "Body");
    }

    #[test]
    fn broken_layout_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_layout(&dir, "text/x-note.json", "{ broken");
        let registry = TemplateRegistry::new().with_template_dir(dir.path());

        assert!(matches!(
            registry.resolve("text/x-note"),
            Err(TemplateError::Init { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_layout_file_is_not_mistaken_for_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("text/x-note.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&path, &path).unwrap();
        let registry = TemplateRegistry::new().with_template_dir(dir.path());

        assert!(matches!(
            registry.resolve("text/x-note"),
            Err(TemplateError::Init { .. })
        ));
    }

    #[test]
    fn supertype_template_is_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        write_layout(&dir, "text.json", r#"{ "include_unlisted": true, "title": "Text" }"#);
        let registry = TemplateRegistry::new().with_template_dir(dir.path());

        let resolution = registry.resolve("text/x-note").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Generic);
    }

    #[test]
    fn supertype_template_when_enabled() {
        let dir = TempDir::new().unwrap();
        write_layout(&dir, "text.json", r#"{ "include_unlisted": true, "title": "Text" }"#);
        let registry = TemplateRegistry::new()
            .with_template_dir(dir.path())
            .with_supertype_templates(true);

        let resolution = registry.resolve("text/x-note").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Supertype);
        assert_eq!(resolution.matched_type.as_deref(), Some("text"));
        let form = resolution.build("text/x-note", &note_record());
        assert_eq!(form.title, "Text");
        assert_eq!(form.type_id, "text/x-note");
    }

    #[test]
    fn specific_beats_supertype() {
        let mut registry = TemplateRegistry::new().with_supertype_templates(true);
        registry.register("text", || Err("should not be built".to_string()));
        registry.register("text/x-note", || Ok(Box::new(Fixed)));

        let resolution = registry.resolve("text/x-note").unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Specific);
    }

    #[test]
    fn registration_is_case_insensitive() {
        let mut registry = TemplateRegistry::new();
        registry.register("Application/X-Foo", || Ok(Box::new(Fixed)));
        assert!(registry.is_registered("application/x-foo"));
        assert_eq!(
            registry.resolve("application/x-foo").unwrap().resolved_by,
            ResolvedBy::Specific
        );
    }
}
