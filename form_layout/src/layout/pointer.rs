// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Addressing nodes and fields in a layout tree.
//!
//! A [`Pointer`] pairs an index path from the root with a label: the field name for a
//! field reference, the lowercase kind name for a node. Pointers are produced by a depth
//! first, pre-order walk that visits children left to right, so a list of pointers is
//! always in document order.
//!
//! ```text
//! Layout                       Pointers for KindFilter::FieldNames (greedy)
//! ├── 0: "email"               ([0],    "email")
//! └── 1: Div                   ([1, 0], "password1")
//!     ├── 0: "password1"       ([1, 1], "password2")
//!     └── 1: "password2"
//! ```

use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use crate::{LayoutKind, LayoutNode, NodeRef};

/// Index path from the root. Most layouts are shallow, so this lives on the stack.
pub type PointerPath = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub path: PointerPath,
    pub label: String,
}

impl Pointer {
    pub fn new(path: impl IntoIterator<Item = usize>, label: impl Into<String>) -> Self {
        Self {
            path: path.into_iter().collect(),
            label: label.into(),
        }
    }

    /// How many levels below the root the addressed child sits. Root children are 1.
    #[must_use]
    pub fn depth(&self) -> usize { self.path.len() }

    /// Path of the node that holds the addressed child.
    #[must_use]
    pub fn parent_path(&self) -> &[usize] {
        match self.path.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}", self.path.as_slice(), self.label)
    }
}

/// What [`LayoutNode::get_layout_objects`] looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindFilter {
    /// Leaf field references. Pointer labels are the field names.
    FieldNames,
    /// Nodes of any of these kinds, or of a kind specializing one of them (a Row matches
    /// Div, see [`LayoutKind::is_a`]). Pointer labels are the node's own lowercase kind
    /// name.
    Kinds(Vec<LayoutKind>),
}

impl KindFilter {
    #[must_use]
    pub fn matches(&self, child: &NodeRef) -> bool {
        match (self, child) {
            (KindFilter::FieldNames, NodeRef::Field(_)) => true,
            (KindFilter::Kinds(kinds), NodeRef::Node(node)) => {
                kinds.iter().any(|kind| node.kind.is_a(*kind))
            }
            _ => false,
        }
    }
}

impl From<LayoutKind> for KindFilter {
    fn from(kind: LayoutKind) -> Self { KindFilter::Kinds(vec![kind]) }
}

impl<const N: usize> From<[LayoutKind; N]> for KindFilter {
    fn from(kinds: [LayoutKind; N]) -> Self { KindFilter::Kinds(kinds.to_vec()) }
}

impl From<Vec<LayoutKind>> for KindFilter {
    fn from(kinds: Vec<LayoutKind>) -> Self { KindFilter::Kinds(kinds) }
}

impl LayoutNode {
    /// Pointers to every child matching `filter`, in document order.
    ///
    /// A child node is descended into when `greedy` is set, or when the path of the node
    /// being scanned is shorter than `max_level`. The root's path is empty, so
    /// `max_level = 0` only reports the root's direct children and `max_level = 1` also
    /// reports their children.
    #[must_use]
    pub fn get_layout_objects(
        &self,
        filter: &KindFilter,
        max_level: usize,
        greedy: bool,
    ) -> Vec<Pointer> {
        let mut acc = Vec::new();
        let mut parent_path = PointerPath::new();
        self.collect_layout_objects(filter, max_level, greedy, &mut parent_path, &mut acc);
        acc
    }

    fn collect_layout_objects(
        &self,
        filter: &KindFilter,
        max_level: usize,
        greedy: bool,
        parent_path: &mut PointerPath,
        acc: &mut Vec<Pointer>,
    ) {
        let should_descend = greedy || parent_path.len() < max_level;

        for (index, child) in self.children.iter().enumerate() {
            if filter.matches(child) {
                let mut path = parent_path.clone();
                path.push(index);
                acc.push(Pointer {
                    path,
                    label: child.label().to_string(),
                });
            }

            if let NodeRef::Node(node) = child
                && should_descend
            {
                parent_path.push(index);
                node.collect_layout_objects(filter, max_level, greedy, parent_path, acc);
                parent_path.pop();
            }
        }
    }

    /// Pointers to every field reference at any depth.
    #[must_use]
    pub fn get_field_names(&self) -> Vec<Pointer> {
        self.get_layout_objects(&KindFilter::FieldNames, 0, true)
    }
}
