// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrapper for [`pretty_assertions::assert_eq!`] macro.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Build an [`AttrMap`](crate::AttrMap) of keyword arguments, in the same shape that is
/// accepted by [`crate::LayoutArgs`], [`crate::LayoutSlice::update_attributes`] and the
/// node builders.
///
/// ```
/// use r3bl_form_layout::kwargs;
///
/// let it = kwargs! { "css_class" => "wide", "readonly" => true };
/// assert_eq!(it.len(), 2);
/// assert_eq!(it["readonly"], serde_json::Value::Bool(true));
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::AttrMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::AttrMap::new();
        $(
            map.insert($key.to_string(), serde_json::Value::from($value));
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    #[test]
    fn test_kwargs_empty() {
        let it = kwargs!();
        assert!(it.is_empty());
    }

    #[test]
    fn test_kwargs_keeps_value_types() {
        let it = kwargs! { "data_id" => "x", "readonly" => true, "size" => 3 };
        assert_eq2!(it["data_id"], Value::from("x"));
        assert_eq2!(it["readonly"], Value::Bool(true));
        assert_eq2!(it["size"], Value::from(3));
    }
}
