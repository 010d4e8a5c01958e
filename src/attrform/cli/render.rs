//! # Rendering Module
//!
//! Forms and schemas become terminal text through minijinja templates
//! (`templates.rs`) and a `style` filter backed by [`ATTRFORM_THEME`].
//!
//! Label alignment is computed here with `unicode-width`; templates only choose
//! styles from the semantic fields they receive.

use super::styles::ATTRFORM_THEME;
use super::templates::{FORM_TEMPLATE, SCHEMA_TEMPLATE};
use attrform::form::Form;
use attrform::model::{FieldValue, WidgetKind};
use attrform::schema::AttributeSchemaEntry;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

#[derive(Serialize)]
struct FieldLine {
    label: String,
    padding: String,
    widget: WidgetKind,
    value: String,
    checked: bool,
    editable: bool,
}

#[derive(Serialize)]
struct FormData {
    title: String,
    meta: String,
    fields: Vec<FieldLine>,
    empty: bool,
}

#[derive(Serialize)]
struct SchemaLine {
    name: String,
    padding: String,
    viewable: bool,
    editable: bool,
    label: Option<String>,
}

#[derive(Serialize)]
struct SchemaData {
    type_id: String,
    entries: Vec<SchemaLine>,
    empty: bool,
}

fn padding_for(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

fn render_template<T: Serialize>(template: &str, data: &T, use_color: bool) -> String {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        ATTRFORM_THEME.apply(&name, &value.to_string(), use_color)
    });

    env.template_from_str(template)
        .and_then(|tmpl| tmpl.render(data))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_form(form: &Form, use_color: bool) -> String {
    let width = form.fields.iter().map(|f| f.label.width()).max().unwrap_or(0);

    let fields = form
        .fields
        .iter()
        .map(|field| FieldLine {
            label: field.label.clone(),
            padding: padding_for(&field.label, width),
            widget: field.widget,
            value: field.value.to_string(),
            checked: matches!(field.value, FieldValue::Toggle(true)),
            editable: field.editable,
        })
        .collect::<Vec<_>>();

    let data = FormData {
        title: form.title.clone(),
        meta: format!(
            "{} · {} · {}",
            form.type_id,
            format!("{:?}", form.resolved_by).to_lowercase(),
            form.strategy
        ),
        empty: fields.is_empty(),
        fields,
    };
    render_template(FORM_TEMPLATE, &data, use_color)
}

pub fn render_schema(type_id: &str, entries: &[AttributeSchemaEntry], use_color: bool) -> String {
    let width = entries.iter().map(|e| e.name.width()).max().unwrap_or(0);

    let data = SchemaData {
        type_id: type_id.to_string(),
        entries: entries
            .iter()
            .map(|entry| SchemaLine {
                name: entry.name.clone(),
                padding: padding_for(&entry.name, width),
                viewable: entry.viewable,
                editable: entry.editable,
                label: entry.label.clone(),
            })
            .collect(),
        empty: entries.is_empty(),
    };
    render_template(SCHEMA_TEMPLATE, &data, use_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrform::form::ResolvedBy;
    use attrform::model::FieldDescriptor;

    fn field(name: &str, widget: WidgetKind, value: FieldValue, editable: bool) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            label: name.to_string(),
            widget,
            value,
            editable,
        }
    }

    fn form() -> Form {
        Form {
            type_id: "text/x-note".to_string(),
            title: "Note".to_string(),
            strategy: "generic".to_string(),
            resolved_by: ResolvedBy::Generic,
            fields: vec![
                field("Title", WidgetKind::TextField, FieldValue::Text("Hello".into()), true),
                field("Done", WidgetKind::Checkbox, FieldValue::Toggle(true), false),
                field(
                    "Icon",
                    WidgetKind::ErrorPlaceholder,
                    FieldValue::Text("field type of attribute 'Icon' is not supported".into()),
                    false,
                ),
            ],
        }
    }

    #[test]
    fn form_lines_are_aligned() {
        let out = render_form(&form(), false);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "Note");
        assert_eq!(lines[1], "text/x-note · generic · generic");
        assert_eq!(lines[2], "  Title  Hello (editable)");
        assert_eq!(lines[3], "  Done   [x]");
        assert_eq!(
            lines[4],
            "  Icon   field type of attribute 'Icon' is not supported"
        );
    }

    #[test]
    fn empty_form_says_so() {
        let mut empty = form();
        empty.fields.clear();
        assert!(render_form(&empty, false).contains("No attributes to show."));
    }

    #[test]
    fn schema_lists_flags() {
        let entries = vec![
            AttributeSchemaEntry::new("META:name").editable().with_label("Name"),
            AttributeSchemaEntry::new("Secret").hidden(),
        ];
        let out = render_schema("text/x-person", &entries, false);
        assert!(out.contains("META:name  viewable editable Name"));
        assert!(out.contains("Secret     hidden"));
    }
}
