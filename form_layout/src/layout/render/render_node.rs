// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per kind rendering of layout nodes.
//!
//! Every node renders inside its own [`crate::KeepContext`] scope. The node is exposed to
//! its template as a JSON object (its "view") bound under a kind specific key, eg: `div`
//! for Div, Row, Column and Tab, `fieldset` for Fieldset, `input` for the button inputs.
//! Every view carries `css_class`, `css_id` and `flat_attrs`, plus the kind's own data.
//!
//! Nothing here writes to the tree. Group activation, multifield error classes and
//! generated accordion ids only exist in the views of a single render.

use rand::Rng;
use serde_json::Value;

use crate::{Context, FieldRenderOptions, LayoutKind, LayoutNode, LayoutResult, NodePayload,
            NodeRef, Renderer, Scope, WidgetAttrs, flatatt, join_classes,
            resolve_template_name, slugify};

pub const TAB_LINK_TEMPLATE: &str = "%s/layout/tab-link.html";
/// Template for the buttons of a `FieldWithButtons`.
pub const FIELD_WITH_BUTTONS_BUTTON_TEMPLATE: &str = "%s/layout/field.html";
pub const ACTIVE_CLASS: &str = "active";
pub const ERROR_CLASS: &str = "error";
pub const ALERT_BLOCK_CLASS: &str = "alert-block";
pub const INLINE_CLASS: &str = "inline";
pub const ACCORDION_ID_PREFIX: &str = "accordion";

impl Renderer<'_> {
    /// Render `node` and everything below it.
    ///
    /// # Errors
    ///
    /// Template engine errors, and the field errors described in
    /// [`Renderer::render_field`].
    pub fn render_node(&mut self, node: &LayoutNode, context: &mut Context) -> LayoutResult<String> {
        let mut context = context.keep();
        tracing::trace!(message = "render node", kind = %node.kind);

        match node.kind {
            LayoutKind::Layout => {
                self.render_children(&node.children, &mut context, &FieldRenderOptions::default())
            }
            LayoutKind::Div | LayoutKind::Row | LayoutKind::Column => {
                self.render_div(node, &mut context)
            }
            LayoutKind::ButtonHolder => {
                self.render_fields_output(node, "buttonholder", &mut context)
            }
            LayoutKind::FormActions => self.render_fields_output(node, "formactions", &mut context),
            LayoutKind::Fieldset => self.render_fieldset(node, &mut context),
            LayoutKind::MultiField => self.render_multi_field(node, &mut context),
            LayoutKind::Tab | LayoutKind::AccordionGroup => {
                let is_active = explicit_active(node) == Some(true);
                self.render_group(node, is_active, None, &mut context)
            }
            LayoutKind::TabHolder => self.render_tab_holder(node, &mut context),
            LayoutKind::Accordion => self.render_accordion(node, &mut context),
            LayoutKind::FieldWithButtons => self.render_field_with_buttons(node, &mut context),
            LayoutKind::Field
            | LayoutKind::MultiWidgetField
            | LayoutKind::InlineField
            | LayoutKind::UneditableField
            | LayoutKind::InlineCheckboxes
            | LayoutKind::InlineRadios => self.render_field_wrapper(node, &mut context),
            LayoutKind::PrependedText
            | LayoutKind::AppendedText
            | LayoutKind::PrependedAppendedText => self.render_add_on(node, &mut context),
            LayoutKind::Html => match &node.payload {
                NodePayload::Html { source } => self.engine.render_str(source, &context),
                _ => Ok(String::new()),
            },
            LayoutKind::Submit | LayoutKind::Button | LayoutKind::Hidden | LayoutKind::Reset => {
                self.render_input(node, &mut context)
            }
            LayoutKind::StrictButton => self.render_strict_button(node, &mut context),
            LayoutKind::Alert => self.render_alert(node, &mut context),
        }
    }

    /// Field references render as fields with `options`, nodes render themselves.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render_node`].
    pub fn render_child(
        &mut self,
        child: &NodeRef,
        context: &mut Context,
        options: &FieldRenderOptions,
    ) -> LayoutResult<String> {
        match child {
            NodeRef::Field(name) => self.render_field(name, context, options),
            NodeRef::Node(node) => self.render_node(node, context),
        }
    }

    /// Concatenated output of every child.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render_node`].
    pub fn render_children(
        &mut self,
        children: &[NodeRef],
        context: &mut Context,
        options: &FieldRenderOptions,
    ) -> LayoutResult<String> {
        let mut acc = String::new();
        for child in children {
            acc.push_str(&self.render_child(child, context, options)?);
        }
        Ok(acc)
    }

    fn render_div(&mut self, node: &LayoutNode, context: &mut Context) -> LayoutResult<String> {
        let fields =
            self.render_children(&node.children, context, &FieldRenderOptions::default())?;
        context.insert("div", node_view(node, &self.template_pack));
        context.insert("fields", fields);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    /// `ButtonHolder` and `FormActions`.
    fn render_fields_output(
        &mut self,
        node: &LayoutNode,
        key: &str,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let fields_output =
            self.render_children(&node.children, context, &FieldRenderOptions::default())?;
        context.insert(key, node_view(node, &self.template_pack));
        context.insert("fields_output", fields_output);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    fn render_fieldset(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let fields =
            self.render_children(&node.children, context, &FieldRenderOptions::default())?;

        let legend = match node.legend() {
            Some(legend) if !legend.is_empty() => self.engine.render_str(legend, context)?,
            _ => String::new(),
        };

        let mut view = node_view(node, &self.template_pack);
        view.insert("legend".into(), legend.clone().into());

        context.insert("fieldset", view);
        context.insert("legend", legend);
        context.insert("fields", fields);
        context.insert("form_style", self.form_style.clone());
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    fn render_multi_field(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let NodePayload::MultiField {
            label,
            label_class,
            help_text,
            field_template,
        } = &node.payload
        else {
            return self.render_div(node, context);
        };

        let mut view = node_view(node, &self.template_pack);
        if self.form_show_errors && self.has_errors_in(node) {
            let class = join_classes(&css_class_of(node, &self.template_pack), ERROR_CLASS);
            view.insert("css_class".into(), class.into());
        }
        view.insert("label_html".into(), label.clone().into());
        view.insert("label_class".into(), label_class.clone().into());
        view.insert("help_text".into(), opt_text(help_text.as_ref()));

        let options = FieldRenderOptions::default()
            .with_template(field_template.clone())
            .with_labelclass(label_class.clone());
        let fields_output = self.render_children(&node.children, context, &options)?;

        context.insert("multifield", view);
        context.insert("fields_output", fields_output);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    /// Does any field below `node` have a validation error.
    fn has_errors_in(&self, node: &LayoutNode) -> bool {
        self.form
            .error_fields()
            .iter()
            .any(|name| node.contains_field(name))
    }

    /// View of a tab or accordion group. The class carries exactly one `active` token
    /// when `is_active`, and none otherwise.
    #[must_use]
    pub fn group_view(
        &self,
        node: &LayoutNode,
        is_active: bool,
        data_parent: Option<&str>,
    ) -> Scope {
        let name = node.group_name().unwrap_or_default();
        let mut view = node_view(node, &self.template_pack);
        view.insert(
            "css_class".into(),
            with_active_class(&css_class_of(node, &self.template_pack), is_active).into(),
        );
        view.insert(
            "css_id".into(),
            node.css_id.clone().unwrap_or_else(|| slugify(name)).into(),
        );
        view.insert("name".into(), name.into());
        view.insert("active".into(), is_active.into());
        view.insert(
            "data_parent".into(),
            data_parent.map_or(Value::Null, Value::from),
        );
        view
    }

    fn render_group(
        &mut self,
        node: &LayoutNode,
        is_active: bool,
        data_parent: Option<&str>,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let mut context = context.keep();
        let fields =
            self.render_children(&node.children, &mut context, &FieldRenderOptions::default())?;
        context.insert("div", self.group_view(node, is_active, data_parent));
        context.insert("fields", fields);
        self.engine.render(&node_template(node, &self.template_pack), &context)
    }

    /// Index of the child group a holder opens on this render.
    ///
    /// The first group holding a field with errors wins. Otherwise the first child is
    /// opened, unless it was explicitly constructed with `active = false`, in which case
    /// none is.
    #[must_use]
    pub fn active_group(&self, holder: &LayoutNode) -> Option<usize> {
        let error_fields = self.form.error_fields();
        let with_errors = holder.children.iter().position(|child| {
            child.as_node().is_some_and(|group| {
                error_fields.iter().any(|name| group.contains_field(name))
            })
        });
        if with_errors.is_some() {
            return with_errors;
        }

        let first = holder.children.first()?;
        match first.as_node().and_then(explicit_active) {
            Some(false) => None,
            _ => Some(0),
        }
    }

    fn render_tab_holder(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let target = self.active_group(node);
        tracing::debug!(message = "tab holder", active = ?target);

        let mut content = String::new();
        let mut links = String::new();
        for (index, child) in node.children.iter().enumerate() {
            match child.as_node() {
                Some(group) if group.kind.is_group() => {
                    let is_active = target == Some(index);
                    content.push_str(&self.render_group(group, is_active, None, context)?);

                    let link_context = Context::from_pairs([(
                        "link",
                        Value::Object(self.group_view(group, is_active, None)),
                    )]);
                    links.push_str(
                        &self
                            .engine
                            .render(&self.template_name(TAB_LINK_TEMPLATE), &link_context)?,
                    );
                }
                _ => content.push_str(&self.render_child(
                    child,
                    context,
                    &FieldRenderOptions::default(),
                )?),
            }
        }

        context.insert("tabs", node_view(node, &self.template_pack));
        context.insert("links", links);
        context.insert("content", content);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    fn render_accordion(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let css_id = node.css_id.clone().unwrap_or_else(|| {
            let suffix = rand::rng().random_range(1000..=9999);
            format!("{ACCORDION_ID_PREFIX}-{suffix}")
        });
        let target = self.active_group(node);
        tracing::debug!(message = "accordion", css_id = %css_id, active = ?target);

        let mut content = String::new();
        for (index, child) in node.children.iter().enumerate() {
            match child.as_node() {
                Some(group) if group.kind.is_group() => {
                    let is_active = target == Some(index);
                    content.push_str(&self.render_group(
                        group,
                        is_active,
                        Some(&css_id),
                        context,
                    )?);
                }
                _ => content.push_str(&self.render_child(
                    child,
                    context,
                    &FieldRenderOptions::default(),
                )?),
            }
        }

        let mut view = node_view(node, &self.template_pack);
        view.insert("css_id".into(), css_id.into());
        context.insert("accordion", view);
        context.insert("content", content);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    /// The buttons (every child after the first) render first, then the first child is
    /// rendered as a field with the buttons in its context.
    fn render_field_with_buttons(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let Some((first, buttons)) = node.children.split_first() else {
            return Ok(String::new());
        };

        let button_options =
            FieldRenderOptions::default().with_template(FIELD_WITH_BUTTONS_BUTTON_TEMPLATE);
        let buttons = self.render_children(buttons, context, &button_options)?;

        let mut options = FieldRenderOptions::default()
            .with_template(node_template(node, &self.template_pack))
            .with_extra("div", node_view(node, &self.template_pack))
            .with_extra("buttons", buttons);

        match first {
            NodeRef::Node(field) if field.kind == LayoutKind::Field => {
                options.attrs = Some(WidgetAttrs::Same(field.attrs.clone()));
                match field.children.first() {
                    Some(inner) => self.render_child(inner, context, &options),
                    None => Ok(String::new()),
                }
            }
            other => self.render_child(other, context, &options),
        }
    }

    /// Field, `InlineField`, `UneditableField`, `MultiWidgetField` and the inline
    /// checkbox and radio kinds.
    fn render_field_wrapper(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let mut options = FieldRenderOptions::default()
            .with_template(node_template(node, &self.template_pack));
        options.attrs = Some(match &node.payload {
            NodePayload::MultiWidget { widget_attrs } => {
                WidgetAttrs::PerWidget(widget_attrs.clone())
            }
            _ => WidgetAttrs::Same(node.attrs.clone()),
        });
        if let NodePayload::Field {
            wrapper_class: Some(wrapper_class),
        } = &node.payload
        {
            options = options.with_extra("wrapper_class", wrapper_class.clone());
        }
        if matches!(
            node.kind,
            LayoutKind::InlineCheckboxes | LayoutKind::InlineRadios
        ) {
            options = options.with_extra("inline_class", INLINE_CLASS);
        }

        self.render_children(&node.children, context, &options)
    }

    /// Prepended and appended text. Only the first child is rendered.
    fn render_add_on(&mut self, node: &LayoutNode, context: &mut Context) -> LayoutResult<String> {
        let Some(field) = node.children.first() else {
            return Ok(String::new());
        };

        let mut options = FieldRenderOptions::default()
            .with_template(node_template(node, &self.template_pack))
            .with_attrs(WidgetAttrs::Same(node.attrs.clone()));
        if let NodePayload::AddOn {
            prepended,
            appended,
            input_size,
            active,
            wrapper_class,
        } = &node.payload
        {
            options = options
                .with_extra("crispy_prepended_text", opt_text(prepended.as_ref()))
                .with_extra("crispy_appended_text", opt_text(appended.as_ref()))
                .with_extra("input_size", opt_text(input_size.as_ref()))
                .with_extra("active", *active);
            if let Some(wrapper_class) = wrapper_class {
                options = options.with_extra("wrapper_class", wrapper_class.clone());
            }
        }

        self.render_child(field, context, &options)
    }

    /// The value is evaluated as an inline template first.
    fn render_input(&mut self, node: &LayoutNode, context: &mut Context) -> LayoutResult<String> {
        let value = match &node.payload {
            NodePayload::Input { value, .. } => self.engine.render_str(value, context)?,
            _ => String::new(),
        };
        context.insert("input", input_view(node, &self.template_pack, &value));
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    /// `css_id` and the class end up as plain `id` and `class` attributes, and `type`
    /// defaults to `button`.
    fn render_strict_button(
        &mut self,
        node: &LayoutNode,
        context: &mut Context,
    ) -> LayoutResult<String> {
        let content = match &node.payload {
            NodePayload::StrictButton { content } => self.engine.render_str(content, context)?,
            _ => String::new(),
        };

        let mut attrs = node.attrs.clone();
        attrs
            .entry("type".to_string())
            .or_insert_with(|| "button".into());
        if let Some(css_id) = &node.css_id {
            attrs.insert("id".to_string(), css_id.clone().into());
        }
        attrs.insert("class".to_string(), css_class_of(node, &self.template_pack).into());

        let mut view = node_view(node, &self.template_pack);
        view.insert("content".into(), content.into());
        view.insert("field_classes".into(), css_class_of(node, &self.template_pack).into());
        view.insert("flat_attrs".into(), flatatt(&attrs).into());

        context.insert("button", view);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }

    fn render_alert(&mut self, node: &LayoutNode, context: &mut Context) -> LayoutResult<String> {
        let (content, dismiss) = match &node.payload {
            NodePayload::Alert {
                content, dismiss, ..
            } => (content.clone(), *dismiss),
            _ => (String::new(), false),
        };
        context.insert("alert", node_view(node, &self.template_pack));
        context.insert("content", content);
        context.insert("dismiss", dismiss);
        self.engine.render(&node_template(node, &self.template_pack), context)
    }
}

/// Default class for the kind (which depends on the template pack for some kinds), then
/// the node's own `css_class`.
#[must_use]
pub fn css_class_of(node: &LayoutNode, template_pack: &str) -> String {
    let mut class = node
        .kind
        .default_css_class(template_pack)
        .unwrap_or_default()
        .to_string();
    if let NodePayload::Alert { block: true, .. } = node.payload {
        class = join_classes(&class, ALERT_BLOCK_CLASS);
    }
    join_classes(&class, node.css_class.as_deref().unwrap_or_default())
}

/// Template name for `node`, with the pack placeholder resolved.
#[must_use]
pub fn node_template(node: &LayoutNode, template_pack: &str) -> String {
    let template = node
        .template
        .as_deref()
        .or_else(|| node.kind.default_template())
        .unwrap_or_default();
    resolve_template_name(template, template_pack)
}

/// The values every node template can read.
#[must_use]
pub fn node_view(node: &LayoutNode, template_pack: &str) -> Scope {
    let mut view = Scope::new();
    view.insert("kind".into(), node.kind.name().into());
    view.insert("css_class".into(), css_class_of(node, template_pack).into());
    view.insert("css_id".into(), opt_text(node.css_id.as_ref()));
    view.insert("flat_attrs".into(), flatatt(&node.attrs).into());
    view.insert("template".into(), node_template(node, template_pack).into());
    view
}

/// View of a Submit, Button, Hidden or Reset input, with `value` as given.
#[must_use]
pub fn input_view(node: &LayoutNode, template_pack: &str, value: &str) -> Scope {
    let input_type = node.kind.input_type().unwrap_or_default();
    let name = match &node.payload {
        NodePayload::Input { name, .. } => name.as_str(),
        _ => "",
    };
    let id = node
        .css_id
        .clone()
        .unwrap_or_else(|| format!("{input_type}-id-{}", slugify(name)));

    let mut view = node_view(node, template_pack);
    view.insert("input_type".into(), input_type.into());
    view.insert("name".into(), name.into());
    view.insert("value".into(), value.into());
    view.insert("field_classes".into(), css_class_of(node, template_pack).into());
    view.insert("id".into(), id.into());
    view
}

/// `Some` only when `active` was given when the group was built.
fn explicit_active(node: &LayoutNode) -> Option<bool> {
    match node.payload {
        NodePayload::Group { active, .. } => active,
        _ => None,
    }
}

/// Drop any `active` token from `class`, then add exactly one back if `is_active`.
#[must_use]
pub fn with_active_class(class: &str, is_active: bool) -> String {
    let mut tokens: Vec<&str> = class
        .split_whitespace()
        .filter(|token| *token != ACTIVE_CLASS)
        .collect();
    if is_active {
        tokens.push(ACTIVE_CLASS);
    }
    tokens.join(" ")
}

fn opt_text(it: Option<&String>) -> Value { it.map_or(Value::Null, |it| Value::from(it.as_str())) }
