// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Rendering a single form field, and the per render state that every node shares.
//!
//! A field is rendered by resolving its name through the [`Form`], merging any layout
//! supplied attributes into its widget, and passing it to the field template. Every
//! rendered name is recorded in [`Renderer::rendered_fields`] so that the orchestration
//! can later append the fields that the layout never mentioned.

use serde_json::Value;

use crate::{AttrMap, Context, Form, LayoutError, LayoutResult, Scope, TemplateEngine,
            Widget, flatatt, resolve_template_name};

/// Used when neither the field nor the helper names a template.
pub const FIELD_TEMPLATE: &str = "%s/field.html";

/// Attributes a layout injects into a field's widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAttrs {
    /// Applied to the widget, or to every sub widget of a multi widget.
    Same(AttrMap),
    /// Applied positionally to the sub widgets of a multi widget. A plain widget only
    /// takes the first entry.
    PerWidget(Vec<AttrMap>),
}

/// How one field is rendered. The default renders with the helper's field template (or
/// the pack's `field.html`) and no extra bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRenderOptions {
    /// Template name, may contain the `%s` pack placeholder.
    pub template: Option<String>,
    pub labelclass: Option<String>,
    pub attrs: Option<WidgetAttrs>,
    /// Bound after the field itself, so it may shadow `field`, `labelclass` and
    /// `flat_attrs`.
    pub extra_context: Scope,
}

impl FieldRenderOptions {
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_labelclass(mut self, labelclass: impl Into<String>) -> Self {
        self.labelclass = Some(labelclass.into());
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: WidgetAttrs) -> Self {
        self.attrs = Some(attrs);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_context.insert(key.into(), value.into());
        self
    }
}

/// State for one walk over a layout tree. Created by [`crate::FormHelper::render_layout`]
/// and dropped at the end of it, so the rendered field set is never shared across
/// renders.
#[derive(Debug)]
pub struct Renderer<'a> {
    pub form: &'a dyn Form,
    pub engine: &'a dyn TemplateEngine,
    pub template_pack: String,
    /// Form style css class (`""` or `"inlineLabels"`).
    pub form_style: String,
    pub fail_silently: bool,
    pub form_show_errors: bool,
    /// The helper's field template, used when a field has no template of its own.
    pub field_template: Option<String>,
    /// Field names in the order they were first rendered.
    pub rendered_fields: Vec<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(
        form: &'a dyn Form,
        engine: &'a dyn TemplateEngine,
        template_pack: impl Into<String>,
    ) -> Self {
        Self {
            form,
            engine,
            template_pack: template_pack.into(),
            form_style: String::new(),
            fail_silently: true,
            form_show_errors: true,
            field_template: None,
            rendered_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_rendered(&self, field_name: &str) -> bool {
        self.rendered_fields.iter().any(|it| it == field_name)
    }

    /// `template` with the `%s` placeholder replaced by this render's template pack.
    #[must_use]
    pub fn template_name(&self, template: &str) -> String {
        resolve_template_name(template, &self.template_pack)
    }

    /// Render the form field called `field_name`.
    ///
    /// An unresolvable field renders as an empty string, and a field that was already
    /// rendered is rendered again. Both are logged as warnings when fail silently is on.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnresolvableField`] and [`LayoutError::DoubleRender`] when fail
    /// silently is off, or a template engine error.
    pub fn render_field(
        &mut self,
        field_name: &str,
        context: &mut Context,
        options: &FieldRenderOptions,
    ) -> LayoutResult<String> {
        let mut context = context.keep();

        let bound_field = match self.form.bound_field(field_name) {
            Some(mut it) => {
                if let Some(attrs) = &options.attrs {
                    apply_widget_attrs(&mut it.widget, attrs);
                }
                Some(it)
            }
            None => {
                self.recover(LayoutError::UnresolvableField {
                    name: field_name.to_string(),
                })?;
                None
            }
        };

        if self.is_rendered(field_name) {
            self.recover(LayoutError::DoubleRender {
                name: field_name.to_string(),
            })?;
        } else {
            self.rendered_fields.push(field_name.to_string());
        }

        let Some(bound_field) = bound_field else {
            return Ok(String::new());
        };

        let template = match (&options.template, &self.field_template) {
            (Some(template), _) | (None, Some(template)) => self.template_name(template),
            (None, None) => self.template_name(FIELD_TEMPLATE),
        };

        let flat_attrs = match &options.attrs {
            Some(WidgetAttrs::Same(attrs)) => flatatt(attrs),
            Some(WidgetAttrs::PerWidget(_)) | None => String::new(),
        };

        context.insert_serialized("field", &bound_field);
        context.insert(
            "labelclass",
            options.labelclass.clone().map_or(Value::Null, Value::String),
        );
        context.insert("flat_attrs", flat_attrs);
        context.extend(options.extra_context.clone());

        tracing::trace!(message = "render field", field = %field_name, template = %template);
        self.engine.render(&template, &context)
    }

    /// Swallow `error` as a warning when it is recoverable and fail silently is on.
    ///
    /// # Errors
    ///
    /// `error` itself otherwise.
    pub fn recover(&self, error: LayoutError) -> LayoutResult<()> {
        if self.fail_silently && error.is_recoverable() {
            tracing::warn!(message = %error);
            Ok(())
        } else {
            Err(error)
        }
    }
}

/// Merge `attrs` into `widget`. A `type: "hidden"` entry swaps the (sub) widget for a
/// hidden one carrying exactly that entry's attributes.
pub fn apply_widget_attrs(widget: &mut Widget, attrs: &WidgetAttrs) {
    if widget.is_multi() {
        let count = widget.sub_widgets.len();
        let per_widget: Vec<&AttrMap> = match attrs {
            WidgetAttrs::Same(it) => std::iter::repeat_n(it, count).collect(),
            WidgetAttrs::PerWidget(list) => list.iter().collect(),
        };
        for (sub_widget, attr) in widget.sub_widgets.iter_mut().zip(per_widget) {
            apply_one(sub_widget, attr);
        }
        return;
    }

    let attr = match attrs {
        WidgetAttrs::Same(it) => Some(it),
        WidgetAttrs::PerWidget(list) => list.first(),
    };
    if let Some(attr) = attr {
        apply_one(widget, attr);
    }
}

fn apply_one(widget: &mut Widget, attr: &AttrMap) {
    let is_hidden = attr.get("type").and_then(Value::as_str) == Some("hidden");
    if is_hidden {
        widget.make_hidden();
        widget.attrs = attr.clone();
    } else {
        widget
            .attrs
            .extend(attr.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
}
