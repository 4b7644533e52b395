// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! HTML attribute maps and the helpers used to flatten them into markup.

use std::{collections::BTreeMap, fmt::Write as _};

use serde_json::Value;

/// Attribute (and keyword argument) map. Ordered so that flattened output is stable.
pub type AttrMap = BTreeMap<String, Value>;

/// Key that is space appended onto an existing `class` instead of overwriting it.
pub const CSS_CLASS_KEY: &str = "css_class";
pub const CLASS_KEY: &str = "class";

/// Convert an attribute map to a single string of ` key="value"` pairs.
///
/// - Underscores in keys become dashes (`data_id` → `data-id`).
/// - `true` renders the bare key, `false` and `null` are dropped.
/// - Values are HTML escaped.
#[must_use]
pub fn flatatt(attrs: &AttrMap) -> String {
    let mut acc = String::new();
    for (key, value) in attrs {
        let key = key.replace('_', "-");
        match value {
            Value::Bool(true) => {
                let _unused = write!(acc, " {key}");
            }
            Value::Bool(false) | Value::Null => {}
            other => {
                let _unused =
                    write!(acc, " {key}=\"{}\"", escape_html(&value_to_text(other)));
            }
        }
    }
    acc
}

/// Text form of a value as a template would print it. Strings are not quoted.
#[must_use]
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(it) => it.clone(),
        other => other.to_string(),
    }
}

#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut acc = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => acc.push_str("&amp;"),
            '<' => acc.push_str("&lt;"),
            '>' => acc.push_str("&gt;"),
            '"' => acc.push_str("&quot;"),
            '\'' => acc.push_str("&#x27;"),
            _ => acc.push(ch),
        }
    }
    acc
}

/// Merge `kwargs` into `attrs`. A `css_class` entry is appended (space separated) onto
/// any existing `class` value, every other key overwrites.
pub fn merge_attrs(attrs: &mut AttrMap, kwargs: &AttrMap) {
    for (key, value) in kwargs {
        if key == CSS_CLASS_KEY {
            append_class(attrs, &value_to_text(value));
        } else {
            attrs.insert(key.clone(), value.clone());
        }
    }
}

/// Append `class_names` onto `attrs["class"]`.
pub fn append_class(attrs: &mut AttrMap, class_names: &str) {
    let merged = match attrs.get(CLASS_KEY) {
        Some(existing) => join_classes(&value_to_text(existing), class_names),
        None => class_names.to_string(),
    };
    attrs.insert(CLASS_KEY.to_string(), Value::String(merged));
}

/// Space join two class strings, skipping empty sides.
#[must_use]
pub fn join_classes(lhs: &str, rhs: &str) -> String {
    match (lhs.trim().is_empty(), rhs.trim().is_empty()) {
        (true, true) => String::new(),
        (true, false) => rhs.trim().to_string(),
        (false, true) => lhs.trim().to_string(),
        (false, false) => format!("{} {}", lhs.trim(), rhs.trim()),
    }
}

/// Lowercase, drop anything that isn't alphanumeric, `-` or `_`, and turn runs of
/// whitespace into a single `-`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut acc = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = !acc.is_empty();
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_dash {
                acc.push('-');
                pending_dash = false;
            }
            acc.extend(ch.to_lowercase());
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, kwargs};
    use test_case::test_case;

    #[test]
    fn test_flatatt_dashes_and_escaping() {
        let attrs = kwargs! {
            "data_id" => "a\"b",
            "readonly" => true,
            "disabled" => false,
        };
        assert_eq2!(flatatt(&attrs), " data-id=\"a&quot;b\" readonly");
    }

    #[test]
    fn test_flatatt_empty() {
        assert_eq2!(flatatt(&AttrMap::new()), "");
    }

    #[test]
    fn test_merge_attrs_appends_css_class() {
        let mut attrs = kwargs! { "class" => "one" };
        merge_attrs(&mut attrs, &kwargs! { "css_class" => "two", "readonly" => true });
        assert_eq2!(attrs, kwargs! { "class" => "one two", "readonly" => true });
    }

    #[test]
    fn test_merge_attrs_sets_class_when_missing() {
        let mut attrs = AttrMap::new();
        merge_attrs(&mut attrs, &kwargs! { "css_class" => "two" });
        assert_eq2!(attrs, kwargs! { "class" => "two" });
    }

    #[test_case("Contact details", "contact-details")]
    #[test_case("  Tab: One & Two ", "tab-one-two")]
    #[test_case("already-slugged_ok", "already-slugged_ok")]
    fn test_slugify(input: &str, expected: &str) {
        assert_eq2!(slugify(input), expected);
    }

    #[test_case("", "", ""; "both empty")]
    #[test_case("row", "", "row"; "rhs empty")]
    #[test_case("", "wide", "wide"; "lhs empty")]
    #[test_case("row", "wide", "row wide"; "both set")]
    fn test_join_classes(lhs: &str, rhs: &str, expected: &str) {
        assert_eq2!(join_classes(lhs, rhs), expected);
    }
}
