// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The key/value environment a template is rendered against.
//!
//! A [`Context`] is a stack of scopes. Lookups walk from the innermost scope outwards,
//! writes go to the innermost scope. Every node and field render pushes a fresh scope
//! through a [`KeepContext`] guard, so bindings one node introduces never leak to its
//! siblings, even when the render returns early with an error.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use serde_json::{Map, Value};

pub type Scope = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    scopes: Vec<Scope>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }
}

impl Context {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Build a single scope context from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut it = Self::default();
        for (key, value) in pairs {
            it.insert(key, value);
        }
        it
    }

    /// Bind `key` in the innermost scope.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    /// Serialize `value` and bind it. Values that fail to serialize are bound as `null`.
    pub fn insert_serialized(&mut self, key: impl Into<String>, value: &impl Serialize) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.insert(key, value);
    }

    /// Bind every entry of `scope` in the innermost scope.
    pub fn extend(&mut self, scope: Scope) {
        for (key, value) in scope {
            self.insert(key, value);
        }
    }

    /// Innermost binding of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key))
    }

    /// Resolve a dotted path like `field.widget.attrs.class`. Numeric segments index
    /// into arrays.
    #[must_use]
    pub fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut segments = dotted_path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool { self.get(key).is_some() }

    /// Number of scopes on the stack. Always at least one.
    #[must_use]
    pub fn depth(&self) -> usize { self.scopes.len() }

    /// Collapse the stack into one map, inner bindings shadowing outer ones.
    #[must_use]
    pub fn flatten(&self) -> Scope {
        let mut acc = Scope::new();
        for scope in &self.scopes {
            for (key, value) in scope {
                acc.insert(key.clone(), value.clone());
            }
        }
        acc
    }

    /// Push a scope that is popped when the returned guard drops.
    pub fn keep(&mut self) -> KeepContext<'_> { KeepContext::new(self) }

    fn push_scope(&mut self) { self.scopes.push(Scope::new()); }

    fn pop_scope(&mut self) {
        // The outermost scope belongs to the caller.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}

/// Scope guard. Everything inserted through it is discarded on drop.
#[derive(Debug)]
pub struct KeepContext<'a> {
    context: &'a mut Context,
}

impl<'a> KeepContext<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        context.push_scope();
        Self { context }
    }
}

impl Deref for KeepContext<'_> {
    type Target = Context;

    fn deref(&self) -> &Self::Target { self.context }
}

impl DerefMut for KeepContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.context }
}

impl Drop for KeepContext<'_> {
    fn drop(&mut self) { self.context.pop_scope(); }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_keep_context_pops_on_drop() {
        let mut context = Context::from_pairs([("form_show_errors", true)]);
        {
            let mut scoped = context.keep();
            scoped.insert("field", "email");
            assert_eq2!(scoped.depth(), 2);
            assert_eq2!(scoped.get("field"), Some(&json!("email")));
            assert_eq2!(scoped.get("form_show_errors"), Some(&json!(true)));
        }
        assert_eq2!(context.depth(), 1);
        assert!(!context.contains_key("field"));
    }

    #[test]
    fn test_keep_context_pops_on_early_return() {
        fn fails(context: &mut Context) -> Result<(), String> {
            let mut scoped = context.keep();
            scoped.insert("leaky", 1);
            Err("boom".into())
        }

        let mut context = Context::new();
        assert!(fails(&mut context).is_err());
        assert!(!context.contains_key("leaky"));
    }

    #[test]
    fn test_inner_shadows_outer() {
        let mut context = Context::from_pairs([("labelclass", "outer")]);
        let mut scoped = context.keep();
        scoped.insert("labelclass", "inner");
        assert_eq2!(scoped.get("labelclass"), Some(&json!("inner")));
        assert_eq2!(scoped.flatten().get("labelclass"), Some(&json!("inner")));
    }

    #[test]
    fn test_dotted_lookup() {
        let context = Context::from_pairs([(
            "field",
            json!({"widget": {"attrs": {"class": "wide"}}, "errors": ["bad"]}),
        )]);
        assert_eq2!(
            context.lookup("field.widget.attrs.class"),
            Some(&json!("wide"))
        );
        assert_eq2!(context.lookup("field.errors.0"), Some(&json!("bad")));
        assert_eq2!(context.lookup("field.missing"), None);
        assert_eq2!(context.lookup("nope"), None);
    }

    #[test]
    fn test_outermost_scope_is_never_popped() {
        let mut context = Context::new();
        context.pop_scope();
        assert_eq2!(context.depth(), 1);
    }
}
