use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Named styles available to templates through the `style` filter.
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Applies `name` to `text`. Unknown names leave the text alone.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            _ => text.to_string(),
        }
    }
}

pub static ATTRFORM_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("title", Style::new().bold())
        .add("meta", Style::new().color256(245).italic())
        .add("label", Style::new().cyan())
        .add("value", Style::new())
        .add("readonly", Style::new().dim())
        .add("editable", Style::new().green())
        .add("checked", Style::new().green())
        .add("unchecked", Style::new().dim())
        .add("placeholder", Style::new().yellow())
});
