// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A minimal [`TemplateEngine`]: `{{ dotted.path }}` substitution and nothing else.
//! There are no tags, filters or auto escaping. Missing keys print as nothing.
//!
//! The default instance knows a small markup template for every layout kind, registered
//! under each stock template pack.

use std::collections::HashMap;

use crate::{Context, LayoutError, LayoutResult, STOCK_TEMPLATE_PACKS, TemplateEngine,
            value_to_text};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Paths are relative to a template pack directory.
pub const STOCK_TEMPLATES: &[(&str, &str)] = &[
    (
        "field.html",
        r#"<div id="div_id_{{ field.name }}" class="{{ wrapper_class }}"><input name="{{ field.name }}" type="{{ field.widget.kind }}"{{ flat_attrs }}/></div>"#,
    ),
    (
        "multifield.html",
        r#"<div class="{{ labelclass }}"><input name="{{ field.name }}"{{ flat_attrs }}/></div>"#,
    ),
    (
        "accordion.html",
        r#"<div class="accordion" id="{{ accordion.css_id }}">{{ content }}</div>"#,
    ),
    (
        "accordion-group.html",
        r##"<div class="accordion-group"><a data-parent="#{{ div.data_parent }}" href="#{{ div.css_id }}">{{ div.name }}</a><div id="{{ div.css_id }}" class="accordion-body {{ div.css_class }}">{{ fields }}</div></div>"##,
    ),
    (
        "layout/div.html",
        r#"<div id="{{ div.css_id }}" class="{{ div.css_class }}"{{ div.flat_attrs }}>{{ fields }}</div>"#,
    ),
    (
        "layout/fieldset.html",
        r#"<fieldset class="{{ fieldset.css_class }}"{{ fieldset.flat_attrs }}><legend>{{ legend }}</legend>{{ fields }}</fieldset>"#,
    ),
    (
        "layout/multifield.html",
        r#"<div class="{{ multifield.css_class }}"><p>{{ multifield.label_html }}</p>{{ fields_output }}</div>"#,
    ),
    (
        "layout/buttonholder.html",
        r#"<div class="buttonHolder {{ buttonholder.css_class }}">{{ fields_output }}</div>"#,
    ),
    (
        "layout/formactions.html",
        r#"<div class="form-actions"{{ formactions.flat_attrs }}>{{ fields_output }}</div>"#,
    ),
    (
        "layout/tab.html",
        r#"<ul class="nav nav-tabs">{{ links }}</ul><div class="tab-content {{ tabs.css_class }}">{{ content }}</div>"#,
    ),
    (
        "layout/tab-link.html",
        r##"<li class="{{ link.css_class }}"><a href="#{{ link.css_id }}">{{ link.name }}</a></li>"##,
    ),
    (
        "layout/field_with_buttons.html",
        r#"<div class="input-group" id="{{ div.css_id }}"><input name="{{ field.name }}"{{ flat_attrs }}/>{{ buttons }}</div>"#,
    ),
    ("layout/field.html", r#"<input name="{{ field.name }}"{{ flat_attrs }}/>"#),
    (
        "layout/inline_field.html",
        r#"<label class="inline"><input name="{{ field.name }}"{{ flat_attrs }}/></label>"#,
    ),
    (
        "layout/uneditable_input.html",
        r#"<span class="{{ field.widget.attrs.class }}">{{ field.value }}</span>"#,
    ),
    (
        "layout/checkboxselectmultiple_inline.html",
        r#"<div class="{{ inline_class }}" data-name="{{ field.name }}"></div>"#,
    ),
    (
        "layout/radioselect_inline.html",
        r#"<div class="{{ inline_class }}" data-name="{{ field.name }}"></div>"#,
    ),
    (
        "layout/prepended_appended_text.html",
        r#"<div class="input-group {{ input_size }}"><span>{{ crispy_prepended_text }}</span><input name="{{ field.name }}"{{ flat_attrs }}/><span>{{ crispy_appended_text }}</span></div>"#,
    ),
    (
        "layout/baseinput.html",
        r#"<input type="{{ input.input_type }}" name="{{ input.name }}" value="{{ input.value }}" class="{{ input.field_classes }}" id="{{ input.id }}"{{ input.flat_attrs }}/>"#,
    ),
    ("layout/button.html", r#"<button{{ button.flat_attrs }}>{{ button.content }}</button>"#),
    (
        "layout/alert.html",
        r#"<div class="{{ alert.css_class }}" data-dismiss="{{ dismiss }}">{{ content }}</div>"#,
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTemplateEngine {
    pub templates: HashMap<String, String>,
}

impl Default for SimpleTemplateEngine {
    /// Every entry of [`STOCK_TEMPLATES`] under every stock template pack.
    fn default() -> Self {
        let mut it = Self::empty();
        for pack in STOCK_TEMPLATE_PACKS {
            for (path, source) in STOCK_TEMPLATES {
                it.templates.insert(format!("{pack}/{path}"), (*source).to_string());
            }
        }
        it
    }
}

impl SimpleTemplateEngine {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Register (or replace) the template called `name`.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    fn substitute(template: &str, source: &str, context: &Context) -> LayoutResult<String> {
        let mut acc = String::with_capacity(source.len());
        let mut rest = source;
        while let Some(start) = rest.find(OPEN) {
            acc.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                return Err(LayoutError::template_render(
                    template,
                    format!("unclosed `{OPEN}` at byte {}", source.len() - rest.len() + start),
                ));
            };
            let key = after_open[..end].trim();
            if let Some(value) = context.lookup(key) {
                acc.push_str(&value_to_text(value));
            }
            rest = &after_open[end + CLOSE.len()..];
        }
        acc.push_str(rest);
        Ok(acc)
    }
}

impl TemplateEngine for SimpleTemplateEngine {
    fn render(&self, template_name: &str, context: &Context) -> LayoutResult<String> {
        let source = self
            .templates
            .get(template_name)
            .ok_or_else(|| LayoutError::template_render(template_name, "template not found"))?;
        Self::substitute(template_name, source, context)
    }

    fn render_str(&self, source: &str, context: &Context) -> LayoutResult<String> {
        Self::substitute("<inline>", source, context)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_substitute_dotted_paths() {
        let engine = SimpleTemplateEngine::empty();
        let context =
            Context::from_pairs([("field", json!({"name": "email", "tags": ["a", "b"]}))]);
        let html = engine
            .render_str(
                "{{field.name}}/{{ field.tags.1 }}/{{ nope }}/{{ field.missing.deep }}",
                &context,
            )
            .unwrap();
        assert_eq2!(html, "email/b//");
    }

    #[test]
    fn test_unclosed_tag() {
        let engine = SimpleTemplateEngine::empty();
        let result = engine.render_str("a {{ b", &Context::new());
        assert!(matches!(result, Err(LayoutError::TemplateRender { .. })));
    }

    #[test]
    fn test_missing_template() {
        let engine = SimpleTemplateEngine::empty();
        let result = engine.render("bootstrap4/field.html", &Context::new());
        assert!(matches!(
            result,
            Err(LayoutError::TemplateRender { template, .. }) if template == "bootstrap4/field.html"
        ));
    }

    #[test]
    fn test_stock_templates_for_every_pack() {
        let engine = SimpleTemplateEngine::default();
        for pack in STOCK_TEMPLATE_PACKS {
            assert!(engine.templates.contains_key(&format!("{pack}/layout/div.html")));
        }
        assert_eq2!(
            engine.templates.len(),
            STOCK_TEMPLATE_PACKS.len() * STOCK_TEMPLATES.len()
        );
    }

    #[test]
    fn test_with_template_replaces() {
        let engine = SimpleTemplateEngine::default().with_template("bootstrap4/field.html", "x");
        assert_eq2!(engine.render("bootstrap4/field.html", &Context::new()).unwrap(), "x");
    }
}
