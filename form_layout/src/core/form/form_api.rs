// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The form collaborator. A layout only holds field *names*; a [`Form`] resolves those
//! names into [`BoundField`]s at render time and answers questions about its errors.

use serde::Serialize;
use serde_json::Value;

use crate::AttrMap;

/// The subset of a form object that layouts need.
pub trait Form: std::fmt::Debug {
    /// Field names in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Resolve `name` into a renderable field. `None` if the form has no such field.
    fn bound_field(&self, name: &str) -> Option<BoundField>;

    /// Names of the fields that currently have validation errors.
    fn error_fields(&self) -> Vec<String>;

    fn has_errors_for(&self, name: &str) -> bool {
        self.error_fields().iter().any(|it| it == name)
    }

    /// Errors that are not tied to a single field.
    fn non_field_errors(&self) -> Vec<String> { Vec::new() }

    /// The field list declared on the form's model metadata, if it has one.
    fn meta_fields(&self) -> Option<Vec<String>> { None }

    fn is_bound(&self) -> bool { false }

    /// Formset rendering prefix. `None` for a standalone form.
    fn prefix(&self) -> Option<String> { None }
}

/// Widget families that the render pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WidgetKind {
    TextInput,
    EmailInput,
    PasswordInput,
    NumberInput,
    CheckboxInput,
    RadioSelect,
    CheckboxSelectMultiple,
    Select,
    Textarea,
    HiddenInput,
    FileInput,
    MultiWidget,
    Other(String),
}

/// The widget attached to a bound field. Attributes merged in by a layout land in
/// [`Widget::attrs`] (or in the matching entry of [`Widget::sub_widgets`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub kind: WidgetKind,
    pub attrs: AttrMap,
    pub is_hidden: bool,
    pub is_required: bool,
    pub sub_widgets: Vec<Widget>,
}

impl Widget {
    #[must_use]
    pub fn new(kind: WidgetKind) -> Self {
        let is_hidden = kind == WidgetKind::HiddenInput;
        Self {
            kind,
            attrs: AttrMap::new(),
            is_hidden,
            is_required: false,
            sub_widgets: Vec::new(),
        }
    }

    /// A multi widget with one sub widget per `kinds` entry.
    #[must_use]
    pub fn multi(kinds: impl IntoIterator<Item = WidgetKind>) -> Self {
        let mut it = Self::new(WidgetKind::MultiWidget);
        it.sub_widgets = kinds.into_iter().map(Widget::new).collect();
        it
    }

    #[must_use]
    pub fn is_multi(&self) -> bool { self.kind == WidgetKind::MultiWidget }

    /// Swap this widget for a hidden one, keeping attributes.
    pub fn make_hidden(&mut self) {
        self.kind = WidgetKind::HiddenInput;
        self.is_hidden = true;
    }

    #[must_use]
    pub fn is_checkbox(&self) -> bool { self.kind == WidgetKind::CheckboxInput }

    #[must_use]
    pub fn is_file(&self) -> bool { self.kind == WidgetKind::FileInput }
}

/// A form field resolved for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundField {
    pub name: String,
    pub label: String,
    pub value: Value,
    pub help_text: String,
    pub errors: Vec<String>,
    pub widget: Widget,
}

impl BoundField {
    #[must_use]
    pub fn new(name: impl Into<String>, widget: Widget) -> Self {
        let name = name.into();
        let label = default_label(&name);
        Self {
            name,
            label,
            value: Value::Null,
            help_text: String::new(),
            errors: Vec::new(),
            widget,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool { self.widget.is_hidden }

    #[must_use]
    pub fn html_name(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{prefix}-{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// `first_name` → `First name`.
#[must_use]
pub fn default_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
