// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Build a node of a kind that is only known at runtime, from positional and keyword
//! arguments. This is how [`crate::LayoutSlice::wrap`] creates wrapper nodes.

use serde_json::Value;

use crate::{AttrMap, CSS_CLASS_KEY, LayoutError, LayoutKind, LayoutNode, LayoutResult,
            NodePayload, NodeRef, UNEDITABLE_INPUT_CLASS, append_class, value_to_text};

/// Positional and keyword arguments for [`LayoutNode::construct`].
///
/// Positional text arguments (a legend, a group name, an add-on text) are passed as
/// [`NodeRef::Field`] values, exactly like field names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutArgs {
    pub positional: Vec<NodeRef>,
    pub kwargs: AttrMap,
}

impl LayoutArgs {
    #[must_use]
    pub fn arg(mut self, arg: impl Into<NodeRef>) -> Self {
        self.positional.push(arg.into());
        self
    }

    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_kwargs(mut self, kwargs: AttrMap) -> Self {
        self.kwargs.extend(kwargs);
        self
    }
}

impl From<AttrMap> for LayoutArgs {
    fn from(kwargs: AttrMap) -> Self {
        Self {
            positional: Vec::new(),
            kwargs,
        }
    }
}

const KEY_CSS_ID: &str = "css_id";
const KEY_TEMPLATE: &str = "template";
const KEY_WRAPPER_CLASS: &str = "wrapper_class";
const KEY_ACTIVE: &str = "active";
const KEY_LABEL_CLASS: &str = "label_class";
const KEY_HELP_TEXT: &str = "help_text";
const KEY_FIELD_TEMPLATE: &str = "field_template";
const KEY_ATTRS: &str = "attrs";
const KEY_PREPENDED_TEXT: &str = "prepended_text";
const KEY_APPENDED_TEXT: &str = "appended_text";
const KEY_CONTENT: &str = "content";
const KEY_DISMISS: &str = "dismiss";
const KEY_BLOCK: &str = "block";

impl LayoutNode {
    /// Construct a node of `kind` from `positional` and `kwargs`.
    ///
    /// - Fieldset, `MultiField`, Tab and `AccordionGroup` take a text first argument
    ///   (legend, label, name), the rest are children.
    /// - Add-ons take the field then their text(s), Html takes its source, the input
    ///   kinds take name and value, `StrictButton` and Alert take their content.
    /// - Every other kind takes children only.
    ///
    /// Recognised keywords (`css_class`, `css_id`, `template`, plus the kind specific
    /// ones) configure the node. Anything else becomes an html attribute, with
    /// underscores turned into dashes for field wrapping kinds.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidConstructorArgs`] for a missing or non text argument where
    /// text is expected, or a keyword with the wrong value type.
    pub fn construct(
        kind: LayoutKind,
        positional: Vec<NodeRef>,
        kwargs: &AttrMap,
    ) -> LayoutResult<Self> {
        let mut args = positional.into_iter();

        let mut node = match kind {
            LayoutKind::Fieldset => {
                let legend = next_text(kind, &mut args, "legend")?;
                LayoutNode::fieldset(legend, args.by_ref())
            }
            LayoutKind::MultiField => {
                let label = next_text(kind, &mut args, "label")?;
                LayoutNode::multi_field(label, args.by_ref())
            }
            LayoutKind::Tab | LayoutKind::AccordionGroup => {
                let name = next_text(kind, &mut args, "name")?;
                let mut it = LayoutNode::new(kind, args.by_ref());
                it.payload = NodePayload::Group { name, active: None };
                it
            }
            LayoutKind::PrependedText
            | LayoutKind::AppendedText
            | LayoutKind::PrependedAppendedText => {
                let field = args.next().ok_or_else(|| {
                    LayoutError::constructor_args(kind, "missing the field to decorate")
                })?;
                let (prepended, appended) = add_on_texts(kind, &mut args, kwargs)?;
                let mut it = LayoutNode::new(kind, [field]);
                if let NodePayload::AddOn {
                    prepended: it_prepended,
                    appended: it_appended,
                    ..
                } = &mut it.payload
                {
                    *it_prepended = prepended;
                    *it_appended = appended;
                }
                it
            }
            LayoutKind::Html => LayoutNode::html(next_text(kind, &mut args, "html")?),
            LayoutKind::Submit | LayoutKind::Button | LayoutKind::Hidden | LayoutKind::Reset => {
                let name = next_text(kind, &mut args, "name")?;
                let value = next_text(kind, &mut args, "value")?;
                let mut it = LayoutNode::new(kind, Vec::<NodeRef>::new());
                it.payload = NodePayload::Input { name, value };
                it
            }
            LayoutKind::StrictButton => {
                LayoutNode::strict_button(next_text(kind, &mut args, "content")?)
            }
            LayoutKind::Alert => {
                let content = match kwargs.get(KEY_CONTENT) {
                    Some(value) => value_to_text(value),
                    None => next_text(kind, &mut args, "content")?,
                };
                LayoutNode::alert(content)
            }
            LayoutKind::UneditableField => {
                let mut it = LayoutNode::new(kind, args.by_ref());
                append_class(&mut it.attrs, UNEDITABLE_INPUT_CLASS);
                it
            }
            LayoutKind::Layout
            | LayoutKind::Div
            | LayoutKind::Row
            | LayoutKind::Column
            | LayoutKind::ButtonHolder
            | LayoutKind::FormActions
            | LayoutKind::TabHolder
            | LayoutKind::Accordion
            | LayoutKind::FieldWithButtons
            | LayoutKind::Field
            | LayoutKind::MultiWidgetField
            | LayoutKind::InlineField
            | LayoutKind::InlineCheckboxes
            | LayoutKind::InlineRadios => LayoutNode::new(kind, args.by_ref()),
        };

        if args.len() > 0 {
            return Err(LayoutError::constructor_args(
                kind,
                format!("got {} unexpected positional argument(s)", args.len()),
            ));
        }

        node.apply_kwargs(kwargs)?;
        Ok(node)
    }

    /// Apply keyword arguments as [`LayoutNode::construct`] does.
    ///
    /// # Errors
    ///
    /// A recognised keyword with a value of the wrong type.
    pub fn apply_kwargs(&mut self, kwargs: &AttrMap) -> LayoutResult<()> {
        let kind = self.kind;
        for (key, value) in kwargs {
            match key.as_str() {
                CSS_CLASS_KEY => self.add_css_class(&value_to_text(value)),
                KEY_CSS_ID => self.css_id = Some(value_to_text(value)),
                KEY_TEMPLATE => self.template = Some(value_to_text(value)),
                _ => {
                    if !self.apply_payload_kwarg(key, value)? {
                        let key = if kind.is_field_wrapper() {
                            key.replace('_', "-")
                        } else {
                            key.clone()
                        };
                        self.attrs.insert(key, value.clone());
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns `false` when `key` isn't a keyword of this node's payload.
    fn apply_payload_kwarg(&mut self, key: &str, value: &Value) -> LayoutResult<bool> {
        let kind = self.kind;
        match (&mut self.payload, key) {
            (NodePayload::Field { wrapper_class }, KEY_WRAPPER_CLASS)
            | (NodePayload::AddOn { wrapper_class, .. }, KEY_WRAPPER_CLASS) => {
                *wrapper_class = Some(value_to_text(value));
            }
            (NodePayload::AddOn { active, .. }, KEY_ACTIVE) => {
                *active = as_bool(kind, key, value)?;
            }
            (NodePayload::AddOn { .. }, KEY_PREPENDED_TEXT | KEY_APPENDED_TEXT) => {
                // Consumed by `add_on_texts()`.
            }
            (NodePayload::Group { active, .. }, KEY_ACTIVE) => {
                *active = Some(as_bool(kind, key, value)?);
            }
            (NodePayload::MultiField { label_class, .. }, KEY_LABEL_CLASS) => {
                *label_class = value_to_text(value);
            }
            (NodePayload::MultiField { help_text, .. }, KEY_HELP_TEXT) => {
                *help_text = Some(value_to_text(value));
            }
            (NodePayload::MultiField { field_template, .. }, KEY_FIELD_TEMPLATE) => {
                *field_template = value_to_text(value);
            }
            (NodePayload::MultiWidget { widget_attrs }, KEY_ATTRS) => {
                *widget_attrs = as_attr_list(kind, value)?;
            }
            (NodePayload::Alert { dismiss, .. }, KEY_DISMISS) => {
                *dismiss = as_bool(kind, key, value)?;
            }
            (NodePayload::Alert { block, .. }, KEY_BLOCK) => {
                *block = as_bool(kind, key, value)?;
            }
            (NodePayload::Alert { .. }, KEY_CONTENT) => {
                // Consumed by `construct()`.
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn next_text(
    kind: LayoutKind,
    args: &mut impl Iterator<Item = NodeRef>,
    what: &str,
) -> LayoutResult<String> {
    match args.next() {
        Some(NodeRef::Field(text)) => Ok(text),
        Some(NodeRef::Node(node)) => Err(LayoutError::constructor_args(
            kind,
            format!("{what} must be text, got a '{}' node", node.kind),
        )),
        None => Err(LayoutError::constructor_args(kind, format!("missing {what}"))),
    }
}

fn add_on_texts(
    kind: LayoutKind,
    args: &mut impl Iterator<Item = NodeRef>,
    kwargs: &AttrMap,
) -> LayoutResult<(Option<String>, Option<String>)> {
    let kwarg_text = |key: &str| kwargs.get(key).map(value_to_text);
    Ok(match kind {
        LayoutKind::PrependedText => (Some(next_text(kind, args, "text")?), None),
        LayoutKind::AppendedText => (None, Some(next_text(kind, args, "text")?)),
        _ => {
            let prepended = match args.next() {
                Some(NodeRef::Field(text)) => Some(text),
                Some(NodeRef::Node(_)) => {
                    return Err(LayoutError::constructor_args(
                        kind,
                        "prepended text must be text",
                    ));
                }
                None => kwarg_text(KEY_PREPENDED_TEXT),
            };
            let appended = match args.next() {
                Some(NodeRef::Field(text)) => Some(text),
                Some(NodeRef::Node(_)) => {
                    return Err(LayoutError::constructor_args(
                        kind,
                        "appended text must be text",
                    ));
                }
                None => kwarg_text(KEY_APPENDED_TEXT),
            };
            (prepended, appended)
        }
    })
}

fn as_bool(kind: LayoutKind, key: &str, value: &Value) -> LayoutResult<bool> {
    value.as_bool().ok_or_else(|| {
        LayoutError::constructor_args(kind, format!("'{key}' must be a boolean, got {value}"))
    })
}

fn as_attr_list(kind: LayoutKind, value: &Value) -> LayoutResult<Vec<AttrMap>> {
    let invalid = || LayoutError::constructor_args(kind, "'attrs' must be a list of objects");
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| {
            item.as_object()
                .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .ok_or_else(invalid)
        })
        .collect()
}
