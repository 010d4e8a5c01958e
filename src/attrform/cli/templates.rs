//! Templates for terminal output. Layout (label padding) is computed in Rust,
//! templates only pick styles.

pub const FORM_TEMPLATE: &str = r#"{{ title | style("title") }}
{{ meta | style("meta") }}
{% if empty %}  {{ "No attributes to show." | style("readonly") }}
{% endif %}{% for field in fields %}  {{ field.label | style("label") }}{{ field.padding }}  {% if field.widget == "checkbox" %}{% if field.checked %}{{ "[x]" | style("checked") }}{% else %}{{ "[ ]" | style("unchecked") }}{% endif %}{% elif field.widget == "error_placeholder" %}{{ field.value | style("placeholder") }}{% else %}{{ field.value | style("value") }}{% endif %}{% if field.editable %} {{ "(editable)" | style("editable") }}{% endif %}
{% endfor %}"#;

pub const SCHEMA_TEMPLATE: &str = r#"{{ type_id | style("title") }}
{% if empty %}  {{ "No schema entries." | style("readonly") }}
{% endif %}{% for entry in entries %}  {{ entry.name | style("label") }}{{ entry.padding }}  {% if entry.viewable %}{{ "viewable" | style("value") }}{% else %}{{ "hidden" | style("readonly") }}{% endif %}{% if entry.editable %} {{ "editable" | style("editable") }}{% endif %}{% if entry.label %} {{ entry.label | style("meta") }}{% endif %}
{% endfor %}"#;
