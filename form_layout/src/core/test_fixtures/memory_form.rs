// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An in memory [`Form`] for tests, doc examples and callers that don't have a form
//! object of their own.

use crate::{BoundField, Form, Widget, WidgetKind};

/// Fields are kept in declaration order. Adding a field whose name already exists
/// replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryForm {
    pub fields: Vec<BoundField>,
    pub error_fields: Vec<String>,
    pub non_field_errors: Vec<String>,
    pub meta_fields: Option<Vec<String>>,
    pub prefix: Option<String>,
    pub is_bound: bool,
}

impl MemoryForm {
    /// A form with one [`WidgetKind::TextInput`] field per name.
    pub fn with_text_fields(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        names
            .into_iter()
            .fold(Self::default(), |acc, name| acc.with_widget(name, WidgetKind::TextInput))
    }

    #[must_use]
    pub fn with_field(mut self, field: BoundField) -> Self {
        match self.fields.iter_mut().find(|it| it.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    #[must_use]
    pub fn with_widget(self, name: impl Into<String>, kind: WidgetKind) -> Self {
        self.with_field(BoundField::new(name, Widget::new(kind)))
    }

    /// Record a validation error on `name`. Marks the form as bound.
    #[must_use]
    pub fn with_error(mut self, name: &str, message: impl Into<String>) -> Self {
        if !self.error_fields.iter().any(|it| it == name) {
            self.error_fields.push(name.to_string());
        }
        if let Some(field) = self.fields.iter_mut().find(|it| it.name == name) {
            field.errors.push(message.into());
        }
        self.is_bound = true;
        self
    }

    #[must_use]
    pub fn with_non_field_error(mut self, message: impl Into<String>) -> Self {
        self.non_field_errors.push(message.into());
        self.is_bound = true;
        self
    }

    #[must_use]
    pub fn with_meta_fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.meta_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl Form for MemoryForm {
    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|it| it.name.clone()).collect()
    }

    fn bound_field(&self, name: &str) -> Option<BoundField> {
        self.fields.iter().find(|it| it.name == name).cloned()
    }

    fn error_fields(&self) -> Vec<String> { self.error_fields.clone() }

    fn non_field_errors(&self) -> Vec<String> { self.non_field_errors.clone() }

    fn meta_fields(&self) -> Option<Vec<String>> { self.meta_fields.clone() }

    fn is_bound(&self) -> bool { self.is_bound }

    fn prefix(&self) -> Option<String> { self.prefix.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_field_order_and_replace() {
        let form = MemoryForm::with_text_fields(["a", "b"])
            .with_widget("a", WidgetKind::EmailInput)
            .with_widget("c", WidgetKind::HiddenInput);
        assert_eq2!(form.field_names(), vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string()
        ]);
        assert_eq2!(form.bound_field("a").unwrap().widget.kind, WidgetKind::EmailInput);
        assert!(form.bound_field("c").unwrap().is_hidden());
        assert_eq2!(form.bound_field("zzz"), None);
    }

    #[test]
    fn test_errors() {
        let form = MemoryForm::with_text_fields(["a", "b"])
            .with_error("b", "required")
            .with_error("b", "too short");
        assert!(form.is_bound());
        assert!(form.has_errors_for("b"));
        assert!(!form.has_errors_for("a"));
        assert_eq2!(form.error_fields(), vec!["b".to_string()]);
        assert_eq2!(form.bound_field("b").unwrap().errors.len(), 2);
    }
}
