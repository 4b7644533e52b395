// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`FormHelper`] owns a layout (and optionally the form it lays out) and is the main
//! entry point of this crate:
//! - Helper level options that a form template reads through [`FormHelper::attributes`].
//! - Queries that produce a [`LayoutSlice`] over the layout (all, filter by kind, filter
//!   by widget, by index or range, by field name).
//! - Rendering, see [`FormHelper::render_layout`].
//!
//! # Example
//!
//! ```
//! use r3bl_form_layout::{FormHelper, LayoutArgs, LayoutKind, MemoryForm, WidgetKind,
//!                        layout};
//!
//! let form = MemoryForm::default()
//!     .with_widget("email", WidgetKind::EmailInput)
//!     .with_widget("password1", WidgetKind::PasswordInput);
//! let mut helper = FormHelper::for_form(form);
//!
//! helper
//!     .exclude_by_widget(|widget| widget.kind == WidgetKind::PasswordInput)
//!     .unwrap()
//!     .wrap(LayoutKind::Field, LayoutArgs::default().kwarg("css_class", "wide"))
//!     .unwrap();
//!
//! let tree = helper.layout().unwrap();
//! assert_eq!(tree.child(0).unwrap().kind(), Some(LayoutKind::Field));
//! assert_eq!(tree.child(1).unwrap().as_field(), Some("password1"));
//! ```

use std::str::FromStr;

use serde_json::Value;

use crate::{AddressSet, AttrMap, CrispySettings, Form, KindFilter, LayoutError, LayoutNode,
            LayoutResult, LayoutSlice, NodePayload, NodeRef, Pointer, Scope, SliceRange,
            UNI_FORM_PACK, Widget, flatatt, input_view, join_classes, value_to_text};

/// Valid values of the form's `method` attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

/// Label placement style.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FormStyle {
    #[default]
    Default,
    Inline,
}

impl FormStyle {
    /// Css class a template puts on the form for this style.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            FormStyle::Default => "",
            FormStyle::Inline => "inlineLabels",
        }
    }
}

/// What [`FormHelper::lookup`] resolved a key to.
#[derive(Debug)]
pub enum HelperItem<'a> {
    /// The key names one of the [`FormHelper::attributes`].
    Attribute(Value),
    /// Every field reference with that name.
    Fields(LayoutSlice<'a>),
}

#[derive(Debug)]
pub struct FormHelper {
    layout: Option<LayoutNode>,
    form: Option<Box<dyn Form>>,
    pub settings: CrispySettings,
    template_pack: Option<String>,
    form_method: FormMethod,
    form_style: FormStyle,
    help_text_inline: bool,
    error_text_inline: bool,
    pub form_action: String,
    pub form_id: String,
    pub form_class: String,
    /// Render the surrounding `<form>` tags.
    pub form_tag: bool,
    pub form_error_title: Option<String>,
    pub formset_error_title: Option<String>,
    pub form_show_errors: bool,
    pub form_show_labels: bool,
    pub render_unmentioned_fields: bool,
    pub render_hidden_fields: bool,
    pub render_required_fields: bool,
    pub html5_required: bool,
    pub disable_csrf: bool,
    /// Template for the whole form.
    pub template: Option<String>,
    /// Template for fields that don't set their own.
    pub field_template: Option<String>,
    pub label_class: String,
    pub field_class: String,
    /// Extra attributes of the `<form>` element.
    pub attrs: AttrMap,
    /// Buttons rendered after the form's fields.
    pub inputs: Vec<LayoutNode>,
}

impl Default for FormHelper {
    fn default() -> Self {
        Self {
            layout: None,
            form: None,
            settings: CrispySettings::default(),
            template_pack: None,
            form_method: FormMethod::default(),
            form_style: FormStyle::default(),
            help_text_inline: false,
            error_text_inline: true,
            form_action: String::new(),
            form_id: String::new(),
            form_class: String::new(),
            form_tag: true,
            form_error_title: None,
            formset_error_title: None,
            form_show_errors: true,
            form_show_labels: true,
            render_unmentioned_fields: false,
            render_hidden_fields: false,
            render_required_fields: false,
            html5_required: false,
            disable_csrf: false,
            template: None,
            field_template: None,
            label_class: String::new(),
            field_class: String::new(),
            attrs: AttrMap::new(),
            inputs: Vec::new(),
        }
    }
}

/// Attaching a layout and a form.
mod setup {
    use super::{CrispySettings, Form, FormHelper, LayoutNode, NodeRef};

    impl FormHelper {
        /// A helper for `form` whose layout lists every form field in order.
        pub fn for_form(form: impl Form + 'static) -> Self {
            let mut it = Self::default();
            it.set_layout(Self::build_default_layout(&form));
            it.set_form(form);
            it
        }

        #[must_use]
        pub fn with_settings(mut self, settings: CrispySettings) -> Self {
            self.settings = settings;
            self
        }

        #[must_use]
        pub fn build_default_layout(form: &dyn Form) -> LayoutNode {
            LayoutNode::layout(form.field_names().into_iter().map(NodeRef::from))
        }

        pub fn set_layout(&mut self, layout: LayoutNode) { self.layout = Some(layout); }

        #[must_use]
        pub fn layout(&self) -> Option<&LayoutNode> { self.layout.as_ref() }

        pub fn layout_mut(&mut self) -> Option<&mut LayoutNode> { self.layout.as_mut() }

        pub fn take_layout(&mut self) -> Option<LayoutNode> { self.layout.take() }

        pub fn set_form(&mut self, form: impl Form + 'static) {
            self.form = Some(Box::new(form));
        }

        #[must_use]
        pub fn form(&self) -> Option<&dyn Form> { self.form.as_deref() }

        pub fn add_input(&mut self, input: LayoutNode) { self.inputs.push(input); }
    }
}

/// Validated options, and the attribute map a form template reads.
mod options {
    use super::{AttrMap, FormHelper, FormMethod, FormStyle, FromStr, LayoutError, LayoutNode,
                LayoutResult, NodePayload, Scope, UNI_FORM_PACK, Value, flatatt, input_view,
                join_classes, value_to_text};

    impl FormHelper {
        #[must_use]
        pub fn form_method(&self) -> FormMethod { self.form_method }

        /// # Errors
        ///
        /// [`LayoutError::InvalidFormMethod`] for anything but `get` or `post` (in any
        /// case).
        pub fn set_form_method(&mut self, method: &str) -> LayoutResult<()> {
            self.form_method =
                FormMethod::from_str(method.trim()).map_err(|_| LayoutError::InvalidFormMethod {
                    method: method.to_string(),
                })?;
            Ok(())
        }

        /// Css class for the form style, `""` or `"inlineLabels"`.
        #[must_use]
        pub fn form_style(&self) -> &'static str { self.form_style.css_class() }

        /// # Errors
        ///
        /// [`LayoutError::InvalidFormStyle`] for anything but `default` or `inline`.
        pub fn set_form_style(&mut self, style: &str) -> LayoutResult<()> {
            self.form_style =
                FormStyle::from_str(style.trim()).map_err(|_| LayoutError::InvalidFormStyle {
                    style: style.to_string(),
                })?;
            Ok(())
        }

        #[must_use]
        pub fn help_text_inline(&self) -> bool { self.help_text_inline }

        #[must_use]
        pub fn error_text_inline(&self) -> bool { self.error_text_inline }

        /// Help text and error text can't both be inline, so this also sets
        /// [`Self::error_text_inline`] to the opposite.
        pub fn set_help_text_inline(&mut self, flag: bool) {
            self.help_text_inline = flag;
            self.error_text_inline = !flag;
        }

        /// Also sets [`Self::help_text_inline`] to the opposite.
        pub fn set_error_text_inline(&mut self, flag: bool) {
            self.error_text_inline = flag;
            self.help_text_inline = !flag;
        }

        /// The helper's own template pack, or the settings' one.
        #[must_use]
        pub fn template_pack(&self) -> &str {
            self.template_pack
                .as_deref()
                .unwrap_or(self.settings.template_pack.as_str())
        }

        /// # Errors
        ///
        /// [`LayoutError::TemplatePackNotAllowed`] when the settings don't allow it.
        pub fn set_template_pack(&mut self, template_pack: &str) -> LayoutResult<()> {
            self.settings.check_template_pack(template_pack)?;
            self.template_pack = Some(template_pack.to_string());
            Ok(())
        }

        /// Everything a form template needs to know about this helper.
        ///
        /// `label_size` and `bootstrap_device_type` are only present when `label_class`
        /// looks like `col-md-3`. `attrs` collects `action`, `id` and `class` next to
        /// [`FormHelper::attrs`], and the `uni_form` pack always adds its `uniForm` class.
        #[must_use]
        pub fn attributes(&self) -> Scope {
            let mut items = Scope::new();
            items.insert("form_method".into(), self.form_method.as_ref().into());
            items.insert("form_tag".into(), self.form_tag.into());
            items.insert("form_style".into(), self.form_style().into());
            items.insert("form_show_errors".into(), self.form_show_errors.into());
            items.insert("help_text_inline".into(), self.help_text_inline.into());
            items.insert("error_text_inline".into(), self.error_text_inline.into());
            items.insert("html5_required".into(), self.html5_required.into());
            items.insert("form_show_labels".into(), self.form_show_labels.into());
            items.insert("disable_csrf".into(), self.disable_csrf.into());
            items.insert("label_class".into(), self.label_class.clone().into());
            items.insert("field_class".into(), self.field_class.clone().into());
            items.insert("template_pack".into(), self.template_pack().into());
            items.insert(
                "render_unmentioned_fields".into(),
                self.render_unmentioned_fields.into(),
            );
            items.insert("render_hidden_fields".into(), self.render_hidden_fields.into());
            items.insert("render_required_fields".into(), self.render_required_fields.into());

            if let Some((label_size, device_type)) = parse_label_size(&self.label_class) {
                items.insert("label_size".into(), label_size.into());
                items.insert("bootstrap_device_type".into(), device_type.into());
            }

            let attrs = self.form_attrs();
            items.insert("flat_attrs".into(), flatatt(&attrs).into());
            items.insert(
                "attrs".into(),
                Value::Object(attrs.into_iter().collect()),
            );

            if !self.inputs.is_empty() {
                let inputs = self
                    .inputs
                    .iter()
                    .map(|input| {
                        let value = input_value(input);
                        Value::Object(input_view(input, self.template_pack(), &value))
                    })
                    .collect();
                items.insert("inputs".into(), Value::Array(inputs));
            }
            if let Some(title) = &self.form_error_title {
                items.insert("form_error_title".into(), title.trim().into());
            }
            if let Some(title) = &self.formset_error_title {
                items.insert("formset_error_title".into(), title.trim().into());
            }
            if let Some(template) = &self.template {
                items.insert("template".into(), template.clone().into());
            }
            if let Some(field_template) = &self.field_template {
                items.insert("field_template".into(), field_template.clone().into());
            }
            items
        }

        fn form_attrs(&self) -> AttrMap {
            let is_uni_form = self.template_pack() == UNI_FORM_PACK;
            let mut attrs = self.attrs.clone();
            if !self.form_action.trim().is_empty() {
                attrs.insert("action".into(), self.form_action.trim().into());
            }
            if !self.form_id.trim().is_empty() {
                attrs.insert("id".into(), self.form_id.trim().into());
            }
            let form_class = self.form_class.trim();
            if !form_class.is_empty() {
                let class = if is_uni_form {
                    format!("uniForm {form_class}")
                } else {
                    form_class.to_string()
                };
                attrs.insert("class".into(), class.into());
            } else if is_uni_form {
                let existing = attrs
                    .get("class")
                    .map(value_to_text)
                    .unwrap_or_default();
                attrs.insert("class".into(), join_classes(&existing, "uniForm").into());
            }
            attrs
        }
    }

    /// Inputs are described with the value they were built with, it isn't evaluated.
    fn input_value(input: &LayoutNode) -> String {
        match &input.payload {
            NodePayload::Input { value, .. } => value.clone(),
            _ => String::new(),
        }
    }

    /// `col-md-3` → `(3, "md")`. Both the first digit run and a device type (`lg`, `md`,
    /// `sm` or `xs`) must be present.
    pub(super) fn parse_label_size(label_class: &str) -> Option<(u64, &'static str)> {
        let digits: String = label_class
            .chars()
            .skip_while(|it| !it.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        let label_size = digits.parse::<u64>().ok()?;
        let device_type = ["lg", "md", "sm", "xs"]
            .into_iter()
            .filter_map(|device| label_class.find(device).map(|at| (at, device)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, device)| device)?;
        Some((label_size, device_type))
    }
}

/// Queries that address parts of the layout.
mod queries {
    use super::{AddressSet, FormHelper, HelperItem, KindFilter, LayoutError, LayoutNode,
                LayoutResult, LayoutSlice, NodeRef, Pointer, SliceRange, Widget};

    impl FormHelper {
        fn layout_or_err(&mut self) -> LayoutResult<&mut LayoutNode> {
            self.layout.as_mut().ok_or(LayoutError::LayoutMissing)
        }

        /// Every first level child.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn all(&mut self) -> LayoutResult<LayoutSlice<'_>> {
            self.slice(SliceRange::default())
        }

        /// Nodes (or, with [`KindFilter::FieldNames`], field references) matching
        /// `filter`, among the first level children only.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn filter(&mut self, filter: impl Into<KindFilter>) -> LayoutResult<LayoutSlice<'_>> {
            self.filter_with(filter, 0, false)
        }

        /// See [`LayoutNode::get_layout_objects`] for `max_level` and `greedy`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn filter_with(
            &mut self,
            filter: impl Into<KindFilter>,
            max_level: usize,
            greedy: bool,
        ) -> LayoutResult<LayoutSlice<'_>> {
            let filter = filter.into();
            let layout = self.layout_or_err()?;
            let pointers = layout.get_layout_objects(&filter, max_level, greedy);
            tracing::debug!(message = "filter", filter = ?filter, found = pointers.len());
            Ok(LayoutSlice::new(layout, AddressSet::Pointers(pointers)))
        }

        /// Field references, at any depth, whose widget satisfies `predicate`. Names the
        /// form can't resolve are skipped.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`] or [`LayoutError::FormMissing`].
        pub fn filter_by_widget(
            &mut self,
            predicate: impl Fn(&Widget) -> bool,
        ) -> LayoutResult<LayoutSlice<'_>> {
            self.select_by_widget(predicate)
        }

        /// Field references, at any depth, whose widget does *not* satisfy `predicate`.
        /// Names the form can't resolve are skipped.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`] or [`LayoutError::FormMissing`].
        pub fn exclude_by_widget(
            &mut self,
            predicate: impl Fn(&Widget) -> bool,
        ) -> LayoutResult<LayoutSlice<'_>> {
            self.select_by_widget(|widget| !predicate(widget))
        }

        fn select_by_widget(
            &mut self,
            keep: impl Fn(&Widget) -> bool,
        ) -> LayoutResult<LayoutSlice<'_>> {
            let layout = self.layout.as_mut().ok_or(LayoutError::LayoutMissing)?;
            let form = self.form.as_deref().ok_or(LayoutError::FormMissing)?;

            let pointers: Vec<Pointer> = layout
                .get_field_names()
                .into_iter()
                .filter(|pointer| {
                    form.bound_field(&pointer.label)
                        .is_some_and(|field| keep(&field.widget))
                })
                .collect();

            Ok(LayoutSlice::new(layout, AddressSet::Pointers(pointers)))
        }

        /// The first level child at `index`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn index(&mut self, index: usize) -> LayoutResult<LayoutSlice<'_>> {
            self.slice(SliceRange::index(index))
        }

        /// First level children in `range`, eg: `helper.range(1..3)`, `helper.range(2..)`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn range(&mut self, range: impl Into<SliceRange>) -> LayoutResult<LayoutSlice<'_>> {
            self.slice(range.into())
        }

        /// First level children addressed by a slice, which may have negative bounds and
        /// steps.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn slice(&mut self, range: SliceRange) -> LayoutResult<LayoutSlice<'_>> {
            let layout = self.layout_or_err()?;
            Ok(LayoutSlice::new(layout, AddressSet::Range(range)))
        }

        /// Every reference to the field called `field_name`, at any depth.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`].
        pub fn field(&mut self, field_name: &str) -> LayoutResult<LayoutSlice<'_>> {
            let layout = self.layout_or_err()?;
            let pointers = layout
                .get_field_names()
                .into_iter()
                .filter(|pointer| pointer.label == field_name)
                .collect();
            Ok(LayoutSlice::new(layout, AddressSet::Pointers(pointers)))
        }

        /// A helper attribute when `key` names one (see [`FormHelper::attributes`]),
        /// otherwise every reference to the field called `key`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`] when `key` falls through to a field lookup.
        pub fn lookup(&mut self, key: &str) -> LayoutResult<HelperItem<'_>> {
            if let Some(value) = self.attributes().remove(key) {
                return Ok(HelperItem::Attribute(value));
            }
            Ok(HelperItem::Fields(self.field(key)?))
        }

        /// Replace the first level child at `index`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`], or [`LayoutError::StaleAddress`] when `index`
        /// is out of range.
        pub fn set(&mut self, index: usize, child: impl Into<NodeRef>) -> LayoutResult<()> {
            let layout = self.layout_or_err()?;
            let slot = layout
                .children
                .get_mut(index)
                .ok_or_else(|| LayoutError::StaleAddress { path: vec![index] })?;
            *slot = child.into();
            Ok(())
        }

        /// Remove and return the first level child at `index`.
        ///
        /// # Errors
        ///
        /// [`LayoutError::LayoutMissing`], or [`LayoutError::StaleAddress`] when `index`
        /// is out of range.
        pub fn remove(&mut self, index: usize) -> LayoutResult<NodeRef> {
            let layout = self.layout_or_err()?;
            if index >= layout.len() {
                return Err(LayoutError::StaleAddress { path: vec![index] });
            }
            Ok(layout.children.remove(index))
        }

        /// Number of first level children, 0 without a layout.
        #[must_use]
        pub fn len(&self) -> usize { self.layout.as_ref().map_or(0, LayoutNode::len) }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }
}
