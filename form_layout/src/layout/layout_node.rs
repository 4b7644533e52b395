// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The layout tree. A [`LayoutNode`] owns an ordered list of children, each of which is
//! either a reference to a form field by name or another node ([`NodeRef`]).
//!
//! Addresses into the tree are index paths from the root (see [`crate::Pointer`]). They
//! are only valid until the next structural mutation at or before their position.

use serde_json::Value;

use crate::{AttrMap, CLASS_KEY, LayoutKind, append_class, join_classes};

/// A child in a layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeRef {
    /// Leaf reference to a form field, by name.
    Field(String),
    Node(Box<LayoutNode>),
}

mod node_ref_impl {
    use super::{LayoutKind, LayoutNode, NodeRef};

    impl NodeRef {
        #[must_use]
        pub fn as_field(&self) -> Option<&str> {
            match self {
                NodeRef::Field(name) => Some(name.as_str()),
                NodeRef::Node(_) => None,
            }
        }

        #[must_use]
        pub fn as_node(&self) -> Option<&LayoutNode> {
            match self {
                NodeRef::Field(_) => None,
                NodeRef::Node(node) => Some(&**node),
            }
        }

        pub fn as_node_mut(&mut self) -> Option<&mut LayoutNode> {
            match self {
                NodeRef::Field(_) => None,
                NodeRef::Node(node) => Some(&mut **node),
            }
        }

        #[must_use]
        pub fn is_field(&self) -> bool { matches!(self, NodeRef::Field(_)) }

        /// `None` for a field reference.
        #[must_use]
        pub fn kind(&self) -> Option<LayoutKind> { self.as_node().map(|it| it.kind) }

        /// The field name for a field reference, otherwise the lowercase kind name.
        #[must_use]
        pub fn label(&self) -> &str {
            match self {
                NodeRef::Field(name) => name.as_str(),
                NodeRef::Node(node) => node.kind.name(),
            }
        }
    }

    impl From<&str> for NodeRef {
        fn from(name: &str) -> Self { NodeRef::Field(name.to_string()) }
    }

    impl From<String> for NodeRef {
        fn from(name: String) -> Self { NodeRef::Field(name) }
    }

    impl From<&String> for NodeRef {
        fn from(name: &String) -> Self { NodeRef::Field(name.clone()) }
    }

    impl From<LayoutNode> for NodeRef {
        fn from(node: LayoutNode) -> Self { NodeRef::Node(Box::new(node)) }
    }

    impl PartialEq<str> for NodeRef {
        fn eq(&self, other: &str) -> bool { self.as_field() == Some(other) }
    }

    impl PartialEq<&str> for NodeRef {
        fn eq(&self, other: &&str) -> bool { self.as_field() == Some(*other) }
    }
}

/// Kind specific data. Which variant a node carries is fixed by its [`LayoutKind`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodePayload {
    #[default]
    None,
    Fieldset {
        /// Evaluated as an inline template at render time.
        legend: String,
    },
    MultiField {
        label: String,
        label_class: String,
        help_text: Option<String>,
        field_template: String,
    },
    Field {
        wrapper_class: Option<String>,
    },
    /// One attribute map per sub widget, applied positionally.
    MultiWidget {
        widget_attrs: Vec<AttrMap>,
    },
    AddOn {
        prepended: Option<String>,
        appended: Option<String>,
        input_size: Option<String>,
        active: bool,
        wrapper_class: Option<String>,
    },
    Html {
        source: String,
    },
    Input {
        name: String,
        value: String,
    },
    StrictButton {
        content: String,
    },
    /// Tab and accordion group. `active` is `None` unless it was given at construction.
    Group {
        name: String,
        active: Option<bool>,
    },
    Alert {
        content: String,
        dismiss: bool,
        block: bool,
    },
}

pub const MULTIFIELD_LABEL_CLASS: &str = "blockLabel";
pub const MULTIFIELD_FIELD_TEMPLATE: &str = "%s/multifield.html";
pub const UNEDITABLE_INPUT_CLASS: &str = "uneditable-input";
pub const INPUT_SIZE_LARGE: &str = "input-lg";
pub const INPUT_SIZE_SMALL: &str = "input-sm";

impl NodePayload {
    /// Empty payload for `kind`.
    #[must_use]
    pub fn for_kind(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Fieldset => NodePayload::Fieldset {
                legend: String::new(),
            },
            LayoutKind::MultiField => NodePayload::MultiField {
                label: String::new(),
                label_class: MULTIFIELD_LABEL_CLASS.to_string(),
                help_text: None,
                field_template: MULTIFIELD_FIELD_TEMPLATE.to_string(),
            },
            LayoutKind::Field
            | LayoutKind::InlineField
            | LayoutKind::UneditableField
            | LayoutKind::InlineCheckboxes
            | LayoutKind::InlineRadios => NodePayload::Field {
                wrapper_class: None,
            },
            LayoutKind::MultiWidgetField => NodePayload::MultiWidget {
                widget_attrs: Vec::new(),
            },
            LayoutKind::PrependedText
            | LayoutKind::AppendedText
            | LayoutKind::PrependedAppendedText => NodePayload::AddOn {
                prepended: None,
                appended: None,
                input_size: None,
                active: false,
                wrapper_class: None,
            },
            LayoutKind::Html => NodePayload::Html {
                source: String::new(),
            },
            LayoutKind::Submit | LayoutKind::Button | LayoutKind::Hidden | LayoutKind::Reset => {
                NodePayload::Input {
                    name: String::new(),
                    value: String::new(),
                }
            }
            LayoutKind::StrictButton => NodePayload::StrictButton {
                content: String::new(),
            },
            LayoutKind::Tab | LayoutKind::AccordionGroup => NodePayload::Group {
                name: String::new(),
                active: None,
            },
            LayoutKind::Alert => NodePayload::Alert {
                content: String::new(),
                dismiss: true,
                block: false,
            },
            LayoutKind::Layout
            | LayoutKind::Div
            | LayoutKind::Row
            | LayoutKind::Column
            | LayoutKind::ButtonHolder
            | LayoutKind::FormActions
            | LayoutKind::TabHolder
            | LayoutKind::Accordion
            | LayoutKind::FieldWithButtons => NodePayload::None,
        }
    }
}

/// A node of the layout tree. Every node allocates its own children and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: LayoutKind,
    pub children: Vec<NodeRef>,
    /// Appended after the kind's default class at render time. Field wrapping kinds
    /// keep their class in `attrs["class"]` instead.
    pub css_class: Option<String>,
    pub css_id: Option<String>,
    /// Overrides [`LayoutKind::default_template`].
    pub template: Option<String>,
    /// Widget attributes for field wrapping kinds, extra html attributes otherwise.
    pub attrs: AttrMap,
    pub payload: NodePayload,
}

/// Constructors, one per kind.
mod constructors {
    use super::{AttrMap, CLASS_KEY, LayoutKind, LayoutNode, NodePayload, NodeRef,
                UNEDITABLE_INPUT_CLASS};

    impl LayoutNode {
        /// A node of `kind` with `children` and an empty payload.
        pub fn new(
            kind: LayoutKind,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            let children = if kind.is_leaf() {
                Vec::new()
            } else {
                children.into_iter().map(Into::into).collect()
            };
            Self {
                kind,
                children,
                css_class: None,
                css_id: None,
                template: None,
                attrs: AttrMap::new(),
                payload: NodePayload::for_kind(kind),
            }
        }

        fn leaf(kind: LayoutKind, payload: NodePayload) -> Self {
            let mut it = Self::new(kind, Vec::<NodeRef>::new());
            it.payload = payload;
            it
        }

        pub fn layout(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Layout, children)
        }

        pub fn div(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Div, children)
        }

        pub fn row(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Row, children)
        }

        pub fn column(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Column, children)
        }

        pub fn fieldset(
            legend: impl Into<String>,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            let mut it = Self::new(LayoutKind::Fieldset, children);
            it.payload = NodePayload::Fieldset {
                legend: legend.into(),
            };
            it
        }

        pub fn multi_field(
            label: impl Into<String>,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            let mut it = Self::new(LayoutKind::MultiField, children);
            if let NodePayload::MultiField { label: it_label, .. } = &mut it.payload {
                *it_label = label.into();
            }
            it
        }

        pub fn button_holder(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::ButtonHolder, children)
        }

        pub fn form_actions(children: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::FormActions, children)
        }

        pub fn tab(
            name: impl Into<String>,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            Self::group(LayoutKind::Tab, name.into(), children)
        }

        pub fn accordion_group(
            name: impl Into<String>,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            Self::group(LayoutKind::AccordionGroup, name.into(), children)
        }

        fn group(
            kind: LayoutKind,
            name: String,
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            let mut it = Self::new(kind, children);
            it.payload = NodePayload::Group { name, active: None };
            it
        }

        pub fn tab_holder(tabs: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::TabHolder, tabs)
        }

        pub fn accordion(groups: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Accordion, groups)
        }

        /// First child is the field, the rest are the buttons.
        pub fn field_with_buttons(
            children: impl IntoIterator<Item = impl Into<NodeRef>>,
        ) -> Self {
            Self::new(LayoutKind::FieldWithButtons, children)
        }

        pub fn field(fields: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::Field, fields)
        }

        pub fn inline_field(fields: impl IntoIterator<Item = impl Into<NodeRef>>) -> Self {
            Self::new(LayoutKind::InlineField, fields)
        }

        pub fn uneditable_field(field: impl Into<NodeRef>) -> Self {
            let mut it = Self::new(LayoutKind::UneditableField, [field]);
            it.attrs
                .insert(CLASS_KEY.to_string(), UNEDITABLE_INPUT_CLASS.into());
            it
        }

        pub fn inline_checkboxes(field: impl Into<NodeRef>) -> Self {
            Self::new(LayoutKind::InlineCheckboxes, [field])
        }

        pub fn inline_radios(field: impl Into<NodeRef>) -> Self {
            Self::new(LayoutKind::InlineRadios, [field])
        }

        /// `widget_attrs[i]` is merged into the `i`th sub widget.
        pub fn multi_widget_field(
            field: impl Into<NodeRef>,
            widget_attrs: impl IntoIterator<Item = AttrMap>,
        ) -> Self {
            let mut it = Self::new(LayoutKind::MultiWidgetField, [field]);
            it.payload = NodePayload::MultiWidget {
                widget_attrs: widget_attrs.into_iter().collect(),
            };
            it
        }

        pub fn prepended_text(field: impl Into<NodeRef>, text: impl Into<String>) -> Self {
            Self::add_on(LayoutKind::PrependedText, field, Some(text.into()), None)
        }

        pub fn appended_text(field: impl Into<NodeRef>, text: impl Into<String>) -> Self {
            Self::add_on(LayoutKind::AppendedText, field, None, Some(text.into()))
        }

        pub fn prepended_appended_text(
            field: impl Into<NodeRef>,
            prepended: Option<String>,
            appended: Option<String>,
        ) -> Self {
            Self::add_on(LayoutKind::PrependedAppendedText, field, prepended, appended)
        }

        fn add_on(
            kind: LayoutKind,
            field: impl Into<NodeRef>,
            prepended: Option<String>,
            appended: Option<String>,
        ) -> Self {
            let mut it = Self::new(kind, [field]);
            it.payload = NodePayload::AddOn {
                prepended,
                appended,
                input_size: None,
                active: false,
                wrapper_class: None,
            };
            it
        }

        /// `source` is evaluated as an inline template against the render context.
        pub fn html(source: impl Into<String>) -> Self {
            Self::leaf(LayoutKind::Html, NodePayload::Html {
                source: source.into(),
            })
        }

        pub fn submit(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self::input(LayoutKind::Submit, name.into(), value.into())
        }

        pub fn button(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self::input(LayoutKind::Button, name.into(), value.into())
        }

        pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self::input(LayoutKind::Hidden, name.into(), value.into())
        }

        pub fn reset(name: impl Into<String>, value: impl Into<String>) -> Self {
            Self::input(LayoutKind::Reset, name.into(), value.into())
        }

        fn input(kind: LayoutKind, name: String, value: String) -> Self {
            Self::leaf(kind, NodePayload::Input { name, value })
        }

        pub fn strict_button(content: impl Into<String>) -> Self {
            Self::leaf(LayoutKind::StrictButton, NodePayload::StrictButton {
                content: content.into(),
            })
        }

        pub fn alert(content: impl Into<String>) -> Self {
            Self::leaf(LayoutKind::Alert, NodePayload::Alert {
                content: content.into(),
                dismiss: true,
                block: false,
            })
        }
    }
}

/// Consuming builders for the optional parts of a node.
mod builders {
    use super::{INPUT_SIZE_LARGE, INPUT_SIZE_SMALL, LayoutNode, NodePayload, Value,
                append_class, join_classes};

    impl LayoutNode {
        /// Field wrapping kinds and `FormActions` append to `attrs["class"]`, every other
        /// kind appends to [`LayoutNode::css_class`].
        #[must_use]
        pub fn with_css_class(mut self, css_class: impl AsRef<str>) -> Self {
            self.add_css_class(css_class.as_ref());
            self
        }

        #[must_use]
        pub fn with_css_id(mut self, css_id: impl Into<String>) -> Self {
            self.css_id = Some(css_id.into());
            self
        }

        #[must_use]
        pub fn with_template(mut self, template: impl Into<String>) -> Self {
            self.template = Some(template.into());
            self
        }

        #[must_use]
        pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
            self.attrs.insert(key.into(), value.into());
            self
        }

        /// Ignored by kinds that don't render a field wrapper.
        #[must_use]
        pub fn with_wrapper_class(mut self, wrapper_class: impl Into<String>) -> Self {
            match &mut self.payload {
                NodePayload::Field { wrapper_class: it }
                | NodePayload::AddOn {
                    wrapper_class: it, ..
                } => *it = Some(wrapper_class.into()),
                _ => {}
            }
            self
        }

        /// Explicit activation of a tab, accordion group or add-on.
        #[must_use]
        pub fn with_active(mut self, is_active: bool) -> Self {
            match &mut self.payload {
                NodePayload::Group { active, .. } => *active = Some(is_active),
                NodePayload::AddOn { active, .. } => *active = is_active,
                _ => {}
            }
            self
        }

        #[must_use]
        pub fn with_label_class(mut self, new_label_class: impl Into<String>) -> Self {
            if let NodePayload::MultiField { label_class, .. } = &mut self.payload {
                *label_class = new_label_class.into();
            }
            self
        }

        #[must_use]
        pub fn with_help_text(mut self, new_help_text: impl Into<String>) -> Self {
            if let NodePayload::MultiField { help_text, .. } = &mut self.payload {
                *help_text = Some(new_help_text.into());
            }
            self
        }

        #[must_use]
        pub fn with_field_template(mut self, new_field_template: impl Into<String>) -> Self {
            if let NodePayload::MultiField { field_template, .. } = &mut self.payload {
                *field_template = new_field_template.into();
            }
            self
        }

        #[must_use]
        pub fn with_dismiss(mut self, is_dismissable: bool) -> Self {
            if let NodePayload::Alert { dismiss, .. } = &mut self.payload {
                *dismiss = is_dismissable;
            }
            self
        }

        #[must_use]
        pub fn with_block(mut self, is_block: bool) -> Self {
            if let NodePayload::Alert { block, .. } = &mut self.payload {
                *block = is_block;
            }
            self
        }

        pub(crate) fn add_css_class(&mut self, css_class: &str) {
            if let NodePayload::AddOn { input_size, .. } = &mut self.payload {
                if css_class.contains(INPUT_SIZE_LARGE) {
                    *input_size = Some(INPUT_SIZE_LARGE.to_string());
                }
                if css_class.contains(INPUT_SIZE_SMALL) {
                    *input_size = Some(INPUT_SIZE_SMALL.to_string());
                }
            }

            if self.kind.is_field_wrapper() || self.kind == crate::LayoutKind::FormActions {
                append_class(&mut self.attrs, css_class);
            } else {
                let existing = self.css_class.take().unwrap_or_default();
                self.css_class = Some(join_classes(&existing, css_class));
            }
        }
    }
}

/// Child list access and read only queries.
mod accessors {
    use super::{LayoutNode, NodePayload, NodeRef};

    impl LayoutNode {
        #[must_use]
        pub fn children(&self) -> &[NodeRef] { &self.children }

        pub fn children_mut(&mut self) -> &mut Vec<NodeRef> { &mut self.children }

        #[must_use]
        pub fn child(&self, index: usize) -> Option<&NodeRef> { self.children.get(index) }

        pub fn child_mut(&mut self, index: usize) -> Option<&mut NodeRef> {
            self.children.get_mut(index)
        }

        #[must_use]
        pub fn len(&self) -> usize { self.children.len() }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.children.is_empty() }

        /// Append a child. Leaf kinds ignore it.
        pub fn push(&mut self, child: impl Into<NodeRef>) {
            if !self.kind.is_leaf() {
                self.children.push(child.into());
            }
        }

        #[must_use]
        pub fn kind_name(&self) -> &'static str { self.kind.name() }

        /// Walk `path` from this node. An empty path returns `None`.
        #[must_use]
        pub fn at(&self, path: &[usize]) -> Option<&NodeRef> {
            let (first, rest) = path.split_first()?;
            let mut current = self.children.get(*first)?;
            for index in rest {
                current = current.as_node()?.children.get(*index)?;
            }
            Some(current)
        }

        pub fn at_mut(&mut self, path: &[usize]) -> Option<&mut NodeRef> {
            let (first, rest) = path.split_first()?;
            let mut current = self.children.get_mut(*first)?;
            for index in rest {
                current = current.as_node_mut()?.children.get_mut(*index)?;
            }
            Some(current)
        }

        /// Does a field reference called `field_name` appear at any depth. Node kinds
        /// never match, only field names.
        #[must_use]
        pub fn contains_field(&self, field_name: &str) -> bool {
            self.children.iter().any(|child| match child {
                NodeRef::Field(name) => name == field_name,
                NodeRef::Node(node) => node.contains_field(field_name),
            })
        }

        /// Name of a tab or accordion group.
        #[must_use]
        pub fn group_name(&self) -> Option<&str> {
            match &self.payload {
                NodePayload::Group { name, .. } => Some(name.as_str()),
                _ => None,
            }
        }

        /// Legend of a fieldset, label of a multifield.
        #[must_use]
        pub fn legend(&self) -> Option<&str> {
            match &self.payload {
                NodePayload::Fieldset { legend } => Some(legend.as_str()),
                NodePayload::MultiField { label, .. } => Some(label.as_str()),
                _ => None,
            }
        }
    }
}
