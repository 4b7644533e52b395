// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Top level render entry points of a [`FormHelper`].
//!
//! 1. The declared tree is rendered.
//! 2. Fields the tree never mentioned are appended, in the form's natural order, when the
//!    matching helper flag asks for them (every field, hidden fields, required fields).
//! 3. Fields from the form's meta field list that are still missing are appended, no
//!    matter what the flags say.

use serde::Serialize;

use crate::{Context, FieldRenderOptions, Form, FormHelper, LayoutError, LayoutResult,
            Renderer, TemplateEngine};

/// Output of one [`FormHelper::render_layout`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLayout {
    pub html: String,
    /// Every field name that was rendered, in the order it was first rendered.
    pub rendered_fields: Vec<String>,
}

impl RenderedLayout {
    #[must_use]
    pub fn contains(&self, field_name: &str) -> bool {
        self.rendered_fields.iter().any(|it| it == field_name)
    }
}

/// Bound as `forloop` while each form of a formset renders, so that legends and html
/// snippets can read `{{ forloop.counter }}` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForLoopCounter {
    /// 1 based.
    pub counter: usize,
    pub counter0: usize,
    /// Iterations left, including this one.
    pub revcounter: usize,
    pub revcounter0: usize,
    pub first: bool,
    pub last: bool,
}

impl ForLoopCounter {
    /// Counter for iteration `index` (0 based) of `len`.
    #[must_use]
    pub fn new(index: usize, len: usize) -> Self {
        let revcounter0 = len.saturating_sub(index + 1);
        Self {
            counter: index + 1,
            counter0: index,
            revcounter: revcounter0 + 1,
            revcounter0,
            first: index == 0,
            last: revcounter0 == 0,
        }
    }
}

impl FormHelper {
    /// Render the attached layout for `form`.
    ///
    /// Keys bound in `context` by nodes and fields are scoped to them, so `context` is
    /// unchanged afterwards.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::LayoutMissing`] without a layout.
    /// - [`LayoutError::UnresolvableField`] and [`LayoutError::DoubleRender`] when fail
    ///   silently is off.
    /// - Template engine errors.
    #[tracing::instrument(skip(self, form, engine, context), fields(template_pack = %self.template_pack()))]
    pub fn render_layout(
        &self,
        form: &dyn Form,
        engine: &dyn TemplateEngine,
        context: &mut Context,
    ) -> LayoutResult<RenderedLayout> {
        self.render_layout_impl(form, engine, context, false)
    }

    /// Render the layout once per form of a formset. Each render sees a
    /// [`ForLoopCounter`] as `forloop`, and always appends hidden fields that the layout
    /// didn't mention.
    ///
    /// # Errors
    ///
    /// See [`FormHelper::render_layout`]. The first failing form stops the loop.
    #[tracing::instrument(skip(self, forms, engine, context), fields(forms = forms.len()))]
    pub fn render_formset_layouts(
        &self,
        forms: &[&dyn Form],
        engine: &dyn TemplateEngine,
        context: &mut Context,
    ) -> LayoutResult<Vec<RenderedLayout>> {
        let len = forms.len();
        let mut acc = Vec::with_capacity(len);
        for (index, form) in forms.iter().enumerate() {
            let mut context = context.keep();
            context.insert_serialized("forloop", &ForLoopCounter::new(index, len));
            acc.push(self.render_layout_impl(*form, engine, &mut context, true)?);
        }
        Ok(acc)
    }

    fn render_layout_impl(
        &self,
        form: &dyn Form,
        engine: &dyn TemplateEngine,
        context: &mut Context,
        force_hidden_fields: bool,
    ) -> LayoutResult<RenderedLayout> {
        let layout = self.layout().ok_or(LayoutError::LayoutMissing)?;
        let mut renderer = self.renderer(form, engine);

        let mut html = renderer.render_node(layout, context)?;

        let render_hidden_fields = self.render_hidden_fields || force_hidden_fields;
        if self.render_unmentioned_fields || render_hidden_fields || self.render_required_fields
        {
            for name in form.field_names() {
                if renderer.is_rendered(&name) {
                    continue;
                }
                let widget = form.bound_field(&name).map(|it| it.widget);
                let is_hidden = widget.as_ref().is_some_and(|it| it.is_hidden);
                let is_required = widget.as_ref().is_some_and(|it| it.is_required);
                if self.render_unmentioned_fields
                    || (render_hidden_fields && is_hidden)
                    || (self.render_required_fields && is_required)
                {
                    tracing::debug!(message = "append field", field = %name);
                    html.push_str(&renderer.render_field(
                        &name,
                        context,
                        &FieldRenderOptions::default(),
                    )?);
                }
            }
        }

        if let Some(meta_fields) = form.meta_fields() {
            for name in form.field_names() {
                if meta_fields.contains(&name) && !renderer.is_rendered(&name) {
                    tracing::debug!(message = "append meta field", field = %name);
                    html.push_str(&renderer.render_field(
                        &name,
                        context,
                        &FieldRenderOptions::default(),
                    )?);
                }
            }
        }

        Ok(RenderedLayout {
            html,
            rendered_fields: renderer.rendered_fields,
        })
    }

    /// A [`Renderer`] carrying this helper's options.
    #[must_use]
    pub fn renderer<'a>(&self, form: &'a dyn Form, engine: &'a dyn TemplateEngine) -> Renderer<'a> {
        let mut renderer = Renderer::new(form, engine, self.template_pack());
        renderer.form_style = self.form_style().to_string();
        renderer.fail_silently = self.settings.fail_silently;
        renderer.form_show_errors = self.form_show_errors;
        renderer.field_template.clone_from(&self.field_template);
        renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundField, LayoutNode, MemoryForm, SimpleTemplateEngine, Widget, WidgetKind,
                assert_eq2, layout};

    #[test]
    fn test_for_loop_counter() {
        assert_eq2!(ForLoopCounter::new(0, 3), ForLoopCounter {
            counter: 1,
            counter0: 0,
            revcounter: 3,
            revcounter0: 2,
            first: true,
            last: false,
        });
        let last = ForLoopCounter::new(2, 3);
        assert!(last.last);
        assert!(!last.first);
        assert_eq2!(last.revcounter, 1);

        let only = ForLoopCounter::new(0, 1);
        assert!(only.first && only.last);
    }

    #[test]
    fn test_render_without_layout() {
        let helper = FormHelper::default();
        let form = MemoryForm::with_text_fields(["a"]);
        let result = helper.render_layout(
            &form,
            &SimpleTemplateEngine::default(),
            &mut Context::new(),
        );
        assert!(matches!(result, Err(LayoutError::LayoutMissing)));
    }

    #[test]
    fn test_hidden_and_required_flags() {
        let mut required = BoundField::new("required", Widget::new(WidgetKind::TextInput));
        required.widget.is_required = true;
        let form = MemoryForm::with_text_fields(["a", "plain"])
            .with_field(BoundField::new("secret", Widget::new(WidgetKind::HiddenInput)))
            .with_field(required);
        let engine = SimpleTemplateEngine::default();

        let mut helper = FormHelper::default();
        helper.set_layout(layout!("a"));

        let rendered = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        assert_eq2!(rendered.rendered_fields, vec!["a".to_string()]);

        helper.render_hidden_fields = true;
        let rendered = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        assert_eq2!(rendered.rendered_fields, vec!["a".to_string(), "secret".to_string()]);

        helper.render_hidden_fields = false;
        helper.render_required_fields = true;
        let rendered = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        assert_eq2!(rendered.rendered_fields, vec![
            "a".to_string(),
            "required".to_string()
        ]);
    }

    #[test]
    fn test_meta_fields_are_appended_without_flags() {
        let form = MemoryForm::with_text_fields(["a", "b", "c"]).with_meta_fields(["c", "zzz"]);
        let engine = SimpleTemplateEngine::default();
        let mut helper = FormHelper::default();
        helper.set_layout(layout!("a"));

        let rendered = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        assert_eq2!(rendered.rendered_fields, vec!["a".to_string(), "c".to_string()]);
        assert!(!rendered.contains("b"));
    }

    #[test]
    fn test_rendered_fields_are_fresh_per_call() {
        let form = MemoryForm::with_text_fields(["a"]);
        let engine = SimpleTemplateEngine::default();
        let mut helper = FormHelper::default();
        helper.settings.fail_silently = false;
        helper.set_layout(layout!("a"));

        let first = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        let second = helper
            .render_layout(&form, &engine, &mut Context::new())
            .unwrap();
        assert_eq2!(first, second);
    }

    #[test]
    fn test_formset_forloop_and_hidden_fields() {
        let first = MemoryForm::with_text_fields(["name"])
            .with_field(BoundField::new("id", Widget::new(WidgetKind::HiddenInput)));
        let second = first.clone();
        let engine = SimpleTemplateEngine::default();

        let mut helper = FormHelper::default();
        helper.set_layout(layout!(
            LayoutNode::html("#{{ forloop.counter }}/{{ forloop.last }};"),
            "name"
        ));

        let mut context = Context::new();
        let forms: [&dyn Form; 2] = [&first, &second];
        let rendered = helper
            .render_formset_layouts(&forms, &engine, &mut context)
            .unwrap();

        assert_eq2!(rendered.len(), 2);
        assert!(rendered[0].html.starts_with("#1/false;"));
        assert!(rendered[1].html.starts_with("#2/true;"));
        assert!(rendered.iter().all(|it| it.contains("id")));
        assert!(!context.contains_key("forloop"));
    }
}
