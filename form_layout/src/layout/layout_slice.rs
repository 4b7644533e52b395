// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In place rewriting of a layout tree over a set of addresses.
//!
//! A [`LayoutSlice`] pairs a mutable borrow of the tree with an [`AddressSet`]:
//! - [`AddressSet::Range`] addresses root children by a slice range, resolved
//!   against the current child count every time an operation runs.
//! - [`AddressSet::Pointers`] addresses arbitrary depths, as computed by
//!   [`LayoutNode::get_layout_objects`]. These go stale after structural mutations at or
//!   before their position, and a stale one is reported as
//!   [`LayoutError::StaleAddress`] rather than silently rewriting the wrong node.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::{AttrMap, CSS_CLASS_KEY, LayoutArgs, LayoutError, LayoutKind, LayoutNode,
            LayoutResult, NodeRef, Pointer, value_to_text};

/// Slice semantics: half open `[start, stop)`, `step` may be negative, negative
/// bounds count from the end, out of range bounds are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRange {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: isize,
}

impl Default for SliceRange {
    fn default() -> Self {
        Self {
            start: None,
            stop: None,
            step: 1,
        }
    }
}

impl SliceRange {
    #[must_use]
    pub fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }

    /// Exactly one position.
    #[must_use]
    pub fn index(index: usize) -> Self {
        let start = isize::try_from(index).unwrap_or(isize::MAX);
        Self {
            start: Some(start),
            stop: Some(start.saturating_add(1)),
            step: 1,
        }
    }

    /// Positions addressed in a sequence of `len` items, in slice order. A zero step
    /// addresses nothing.
    #[must_use]
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let step = self.step;
        if step == 0 {
            return Vec::new();
        }

        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(it) if it < 0 => (it + len).max(lower),
            Some(it) => it.min(upper),
        };

        let start = clamp(self.start, if step > 0 { lower } else { upper });
        let stop = clamp(self.stop, if step > 0 { upper } else { lower });

        let mut acc = Vec::new();
        let mut current = start;
        while (step > 0 && current < stop) || (step < 0 && current > stop) {
            if let Ok(it) = usize::try_from(current) {
                acc.push(it);
            }
            current += step;
        }
        acc
    }
}

fn to_isize(it: usize) -> isize { isize::try_from(it).unwrap_or(isize::MAX) }

impl From<Range<usize>> for SliceRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(Some(to_isize(range.start)), Some(to_isize(range.end)), 1)
    }
}

impl From<RangeFrom<usize>> for SliceRange {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(Some(to_isize(range.start)), None, 1)
    }
}

impl From<RangeTo<usize>> for SliceRange {
    fn from(range: RangeTo<usize>) -> Self { Self::new(None, Some(to_isize(range.end)), 1) }
}

impl From<RangeFull> for SliceRange {
    fn from(_: RangeFull) -> Self { Self::default() }
}

/// What a [`LayoutSlice`] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSet {
    Range(SliceRange),
    Pointers(Vec<Pointer>),
}

/// A set of addresses into a tree, plus the mutations that can be applied over them.
#[derive(Debug)]
pub struct LayoutSlice<'a> {
    layout: &'a mut LayoutNode,
    selection: AddressSet,
}

impl<'a> LayoutSlice<'a> {
    pub fn new(layout: &'a mut LayoutNode, selection: AddressSet) -> Self {
        Self { layout, selection }
    }

    #[must_use]
    pub fn selection(&self) -> &AddressSet { &self.selection }

    /// Pointers addressed by this slice. Range slices are resolved against the root.
    #[must_use]
    pub fn pointers(&self) -> Vec<Pointer> {
        match &self.selection {
            AddressSet::Pointers(pointers) => pointers.clone(),
            AddressSet::Range(range) => range
                .indices(self.layout.len())
                .into_iter()
                .filter_map(|index| {
                    self.layout
                        .child(index)
                        .map(|child| Pointer::new([index], child.label()))
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.selection {
            AddressSet::Pointers(pointers) => pointers.len(),
            AddressSet::Range(range) => range.indices(self.layout.len()).len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Replace every addressed child with a `kind` node built from that child plus
    /// `args`. See [`LayoutNode::construct`] for how `args` are interpreted.
    ///
    /// # Errors
    ///
    /// [`LayoutError::StaleAddress`] for a pointer that no longer resolves, or any error
    /// from constructing the wrapper. Positions visited before the failing one stay
    /// wrapped, the tree is not rolled back.
    pub fn wrap(&mut self, kind: LayoutKind, args: LayoutArgs) -> LayoutResult<()> {
        tracing::debug!(message = "wrap", kind = %kind, selection = ?self.selection);
        self.pre_map(|parent, index| wrap_child(parent, index, kind, &args))
    }

    /// Like [`Self::wrap`] with a closure that builds the wrapper from the wrapped child.
    ///
    /// # Errors
    ///
    /// [`LayoutError::StaleAddress`] for a pointer that no longer resolves, or whatever
    /// `build` returns. Earlier positions stay wrapped, as with [`Self::wrap`].
    pub fn wrap_with(
        &mut self,
        mut build: impl FnMut(NodeRef) -> LayoutResult<LayoutNode>,
    ) -> LayoutResult<()> {
        self.pre_map(|parent, index| {
            replace_child(parent, index, |old| build(old).map(NodeRef::from))
        })
    }

    /// Like [`Self::wrap`], but positions that already hold a `kind` node, or whose
    /// parent is a `kind` node, are left alone. Specialized kinds count, so a field
    /// inside an `AppendedText` isn't wrapped in a Field again (see [`LayoutKind::is_a`]).
    /// Wrapping twice is the same as once.
    ///
    /// # Errors
    ///
    /// See [`Self::wrap`].
    pub fn wrap_once(&mut self, kind: LayoutKind, args: LayoutArgs) -> LayoutResult<()> {
        tracing::debug!(message = "wrap_once", kind = %kind, selection = ?self.selection);
        self.pre_map(|parent, index| {
            let occupant_kind = parent.child(index).and_then(NodeRef::kind);
            if parent.kind.is_a(kind) || occupant_kind.is_some_and(|it| it.is_a(kind)) {
                return Ok(());
            }
            wrap_child(parent, index, kind, &args)
        })
    }

    /// Replace the whole range with one `kind` node holding the addressed children, in
    /// slice order. It takes the place of the first (lowest) addressed position, and the
    /// root loses `len - 1` children. An empty range is a no-op.
    ///
    /// # Errors
    ///
    /// [`LayoutError::WrapTogetherNeedsRange`] for a pointer based slice, or any error
    /// from constructing the wrapper. The tree is unchanged on error.
    pub fn wrap_together(&mut self, kind: LayoutKind, args: LayoutArgs) -> LayoutResult<()> {
        let AddressSet::Range(range) = &self.selection else {
            return Err(LayoutError::WrapTogetherNeedsRange);
        };

        let indices = range.indices(self.layout.len());
        let Some(insert_at) = indices.iter().min().copied() else {
            tracing::debug!(message = "wrap_together on an empty range", kind = %kind);
            return Ok(());
        };

        let wrapped: Vec<NodeRef> = indices
            .iter()
            .filter_map(|index| self.layout.child(*index).cloned())
            .collect();
        let wrapper = wrapped_object(kind, wrapped, &args)?;

        let mut descending = indices.clone();
        descending.sort_unstable_by(|lhs, rhs| rhs.cmp(lhs));
        for index in descending {
            self.layout.children.remove(index);
        }
        self.layout.children.insert(insert_at, wrapper.into());

        tracing::debug!(
            message = "wrap_together",
            kind = %kind,
            wrapped = indices.len(),
            at = insert_at
        );
        Ok(())
    }

    /// Merge `kwargs` into the attributes of every addressed node. `css_class` is
    /// appended to the existing class. A pointer to a field reference updates the node
    /// that holds it. Range positions holding a field reference are skipped.
    ///
    /// # Errors
    ///
    /// [`LayoutError::StaleAddress`] for a pointer that no longer resolves. Nodes updated
    /// before the failing pointer keep their new attributes.
    pub fn update_attributes(&mut self, kwargs: &AttrMap) -> LayoutResult<()> {
        tracing::debug!(message = "update_attributes", kwargs = ?kwargs, selection = ?self.selection);
        match &self.selection {
            AddressSet::Range(range) => {
                for index in range.indices(self.layout.len()) {
                    if let Some(NodeRef::Node(node)) = self.layout.children.get_mut(index) {
                        node.update_attributes(kwargs);
                    }
                }
                Ok(())
            }
            AddressSet::Pointers(pointers) => {
                for pointer in pointers {
                    let parent = walk_to_parent(self.layout, pointer)?;
                    let Some(last) = pointer.path.last().copied() else {
                        continue;
                    };
                    match parent.children.get_mut(last) {
                        Some(NodeRef::Node(node)) => node.update_attributes(kwargs),
                        Some(NodeRef::Field(_)) => parent.update_attributes(kwargs),
                        None => return Err(stale(pointer)),
                    }
                }
                Ok(())
            }
        }
    }

    /// Run `function` on every addressed child.
    ///
    /// # Errors
    ///
    /// [`LayoutError::StaleAddress`] for a pointer that no longer resolves, or whatever
    /// `function` returns. Changes made before the error are kept.
    pub fn map(
        &mut self,
        mut function: impl FnMut(&mut NodeRef) -> LayoutResult<()>,
    ) -> LayoutResult<()> {
        self.pre_map(|parent, index| match parent.children.get_mut(index) {
            Some(child) => function(child),
            None => Err(LayoutError::StaleAddress { path: vec![index] }),
        })
    }

    /// Run `function` with the parent of every addressed child and the child's index in
    /// it. This is what the other operations are built on.
    ///
    /// # Errors
    ///
    /// [`LayoutError::StaleAddress`] when a pointer's path runs into a field reference or
    /// past the end of a child list, or whatever `function` returns. Addresses are
    /// visited in order and the first error stops the walk, so changes made at earlier
    /// addresses are kept.
    pub fn pre_map(
        &mut self,
        mut function: impl FnMut(&mut LayoutNode, usize) -> LayoutResult<()>,
    ) -> LayoutResult<()> {
        match &self.selection {
            AddressSet::Range(range) => {
                for index in range.indices(self.layout.len()) {
                    function(self.layout, index)?;
                }
            }
            AddressSet::Pointers(pointers) => {
                for pointer in pointers {
                    let Some(last) = pointer.path.last().copied() else {
                        continue;
                    };
                    let parent = walk_to_parent(self.layout, pointer)?;
                    if last >= parent.len() {
                        return Err(stale(pointer));
                    }
                    function(parent, last).map_err(|error| match error {
                        LayoutError::StaleAddress { .. } => stale(pointer),
                        other => other,
                    })?;
                }
            }
        }
        Ok(())
    }
}

impl LayoutNode {
    /// Merge keyword arguments into this node. `css_class` is appended (see
    /// [`LayoutNode::with_css_class`]), every other key overwrites an html attribute.
    pub fn update_attributes(&mut self, kwargs: &AttrMap) {
        for (key, value) in kwargs {
            if key == CSS_CLASS_KEY {
                self.add_css_class(&value_to_text(value));
            } else {
                self.attrs.insert(key.clone(), value.clone());
            }
        }
    }
}

fn stale(pointer: &Pointer) -> LayoutError {
    LayoutError::StaleAddress {
        path: pointer.path.to_vec(),
    }
}

/// The node holding the child `pointer` addresses.
fn walk_to_parent<'a>(
    root: &'a mut LayoutNode,
    pointer: &Pointer,
) -> LayoutResult<&'a mut LayoutNode> {
    let mut current = root;
    for index in pointer.parent_path() {
        current = match current.children.get_mut(*index) {
            Some(NodeRef::Node(node)) => &mut **node,
            Some(NodeRef::Field(_)) | None => return Err(stale(pointer)),
        };
    }
    Ok(current)
}

/// Build a `kind` node around `fields`. Kinds that take text first (a legend or a name)
/// get `args.positional` before the wrapped children, all others after.
fn wrapped_object(
    kind: LayoutKind,
    fields: Vec<NodeRef>,
    args: &LayoutArgs,
) -> LayoutResult<LayoutNode> {
    let positional = if kind.is_args_first() {
        args.positional.iter().cloned().chain(fields).collect()
    } else {
        fields.into_iter().chain(args.positional.iter().cloned()).collect()
    };
    LayoutNode::construct(kind, positional, &args.kwargs)
}

fn wrap_child(
    parent: &mut LayoutNode,
    index: usize,
    kind: LayoutKind,
    args: &LayoutArgs,
) -> LayoutResult<()> {
    replace_child(parent, index, |old| {
        wrapped_object(kind, vec![old], args).map(NodeRef::from)
    })
}

/// Swap `parent.children[index]` for `build(old)`. The old child is put back if `build`
/// fails.
fn replace_child(
    parent: &mut LayoutNode,
    index: usize,
    build: impl FnOnce(NodeRef) -> LayoutResult<NodeRef>,
) -> LayoutResult<()> {
    let Some(slot) = parent.children.get_mut(index) else {
        return Err(LayoutError::StaleAddress { path: vec![index] });
    };
    let old = std::mem::replace(slot, NodeRef::Field(String::new()));
    let backup = old.clone();
    match build(old) {
        Ok(new) => {
            *slot = new;
            Ok(())
        }
        Err(error) => {
            *slot = backup;
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{assert_eq2, kwargs, layout, row};

    #[test_case(SliceRange::default(), 5, vec![0, 1, 2, 3, 4]; "everything")]
    #[test_case(SliceRange::new(Some(1), Some(3), 1), 5, vec![1, 2]; "middle")]
    #[test_case(SliceRange::new(Some(-2), None, 1), 5, vec![3, 4]; "negative start")]
    #[test_case(SliceRange::new(None, Some(-1), 1), 5, vec![0, 1, 2, 3]; "negative stop")]
    #[test_case(SliceRange::new(None, None, 2), 5, vec![0, 2, 4]; "stepped")]
    #[test_case(SliceRange::new(None, None, -1), 3, vec![2, 1, 0]; "reversed")]
    #[test_case(SliceRange::new(Some(3), Some(10), 1), 5, vec![3, 4]; "clamped stop")]
    #[test_case(SliceRange::new(Some(7), Some(9), 1), 5, vec![]; "past the end")]
    #[test_case(SliceRange::new(None, None, 0), 5, vec![]; "zero step")]
    #[test_case(SliceRange::index(2), 5, vec![2]; "single index")]
    fn test_slice_indices(range: SliceRange, len: usize, expected: Vec<usize>) {
        assert_eq2!(range.indices(len), expected);
    }

    #[test]
    fn test_wrap_range() {
        let mut tree = layout!("a", "b", "c");
        LayoutSlice::new(&mut tree, AddressSet::Range((1..3).into()))
            .wrap(LayoutKind::Div, LayoutArgs::default().kwarg("css_class", "x"))
            .unwrap();
        assert_eq2!(*tree.child(0).unwrap(), "a");
        assert_eq2!(tree.at(&[1]).unwrap().kind(), Some(LayoutKind::Div));
        assert_eq2!(*tree.at(&[1, 0]).unwrap(), "b");
        assert_eq2!(*tree.at(&[2, 0]).unwrap(), "c");
    }

    #[test]
    fn test_wrap_args_first() {
        let mut tree = layout!("a");
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::index(0)))
            .wrap(LayoutKind::Fieldset, LayoutArgs::default().arg("Legend"))
            .unwrap();
        let fieldset = tree.child(0).and_then(NodeRef::as_node).unwrap();
        assert_eq2!(fieldset.legend(), Some("Legend"));
        assert_eq2!(*fieldset.child(0).unwrap(), "a");
    }

    #[test]
    fn test_wrap_args_last() {
        let mut tree = layout!("price");
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::index(0)))
            .wrap(LayoutKind::AppendedText, LayoutArgs::default().arg(".00"))
            .unwrap();
        let node = tree.child(0).and_then(NodeRef::as_node).unwrap();
        assert_eq2!(node.kind, LayoutKind::AppendedText);
        assert_eq2!(*node.child(0).unwrap(), "price");
    }

    #[test]
    fn test_failed_wrap_leaves_tree_unchanged() {
        // A fieldset needs a text legend, and the first addressed child is a node.
        let mut tree = layout!(LayoutNode::div(["a"]), "b");
        let before = tree.clone();
        let result = LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::default()))
            .wrap(LayoutKind::Fieldset, LayoutArgs::default());
        assert!(matches!(result, Err(LayoutError::InvalidConstructorArgs { .. })));
        assert_eq2!(tree, before);
    }

    #[test]
    fn test_wrap_together_contiguity() {
        let mut tree = layout!("a", "b", "c");
        LayoutSlice::new(&mut tree, AddressSet::Range((0..2).into()))
            .wrap_together(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
        assert_eq2!(tree.len(), 2);
        assert_eq2!(*tree.at(&[0, 0]).unwrap(), "a");
        assert_eq2!(*tree.at(&[0, 1]).unwrap(), "b");
        assert_eq2!(*tree.child(1).unwrap(), "c");
    }

    #[test]
    fn test_wrap_together_reversed_keeps_slice_order() {
        let mut tree = layout!("a", "b", "c", "d");
        LayoutSlice::new(
            &mut tree,
            AddressSet::Range(SliceRange::new(Some(2), Some(0), -1)),
        )
        .wrap_together(LayoutKind::Row, LayoutArgs::default())
        .unwrap();
        assert_eq2!(tree.len(), 3);
        assert_eq2!(*tree.child(0).unwrap(), "a");
        assert_eq2!(*tree.at(&[1, 0]).unwrap(), "c");
        assert_eq2!(*tree.at(&[1, 1]).unwrap(), "b");
        assert_eq2!(*tree.child(2).unwrap(), "d");
    }

    #[test]
    fn test_wrap_together_empty_range_is_noop() {
        let mut tree = layout!("a", "b");
        let before = tree.clone();
        LayoutSlice::new(&mut tree, AddressSet::Range((5..9).into()))
            .wrap_together(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
        assert_eq2!(tree, before);
    }

    #[test]
    fn test_wrap_together_rejects_pointers() {
        let mut tree = layout!("a", "b");
        let pointers = tree.get_field_names();
        let result = LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .wrap_together(LayoutKind::Div, LayoutArgs::default());
        assert!(matches!(result, Err(LayoutError::WrapTogetherNeedsRange)));
    }

    #[test]
    fn test_wrap_once_is_idempotent() {
        let mut once = layout!("a", layout!("b"));
        let pointers = once.get_field_names();
        LayoutSlice::new(&mut once, AddressSet::Pointers(pointers.clone()))
            .wrap_once(LayoutKind::Field, LayoutArgs::default())
            .unwrap();

        let mut twice = once.clone();
        LayoutSlice::new(&mut twice, AddressSet::Pointers(pointers))
            .wrap_once(LayoutKind::Field, LayoutArgs::default())
            .unwrap();

        assert_eq2!(twice, once);
        assert_eq2!(once.at(&[1, 0]).unwrap().kind(), Some(LayoutKind::Field));
    }

    #[test]
    fn test_wrap_once_skips_specialized_kinds() {
        let mut tree = layout!(
            LayoutNode::appended_text("price", ".00"),
            row!("a"),
            LayoutNode::inline_field(["b"]),
        );
        let before = tree.clone();

        let pointers = tree.get_field_names();
        LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .wrap_once(LayoutKind::Field, LayoutArgs::default())
            .unwrap();
        // Only "a" sits outside a Field family node.
        assert_eq2!(tree.at(&[1, 0]).unwrap().kind(), Some(LayoutKind::Field));
        assert_eq2!(tree.at(&[0]), before.at(&[0]));
        assert_eq2!(tree.at(&[2]), before.at(&[2]));

        let mut tree = before.clone();
        let pointers = tree.get_field_names();
        LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .wrap_once(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
        assert_eq2!(*tree.at(&[1, 0]).unwrap(), "a");

        let mut tree = before.clone();
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::default()))
            .wrap_once(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
        assert_eq2!(tree.child(1).unwrap().kind(), Some(LayoutKind::Row));
        assert_eq2!(tree.child(0).unwrap().kind(), Some(LayoutKind::Div));
    }

    #[test]
    fn test_wrap_once_skips_when_parent_is_same_kind() {
        let mut tree = layout!(LayoutNode::field(["a"]));
        let pointers = tree.get_field_names();
        LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .wrap_once(LayoutKind::Field, LayoutArgs::default())
            .unwrap();
        assert_eq2!(*tree.at(&[0, 0]).unwrap(), "a");
    }

    #[test]
    fn test_stale_pointer_fails() {
        let mut tree = layout!(layout!("a", "b"));
        let pointers = tree.get_field_names();

        // Wrap "a" at [0, 0], then try to wrap something below where "a" used to be.
        LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .wrap(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
        let before = tree.clone();

        let stale_pointers = vec![Pointer::new([0, 0, 0, 3], "a")];
        let result = LayoutSlice::new(&mut tree, AddressSet::Pointers(stale_pointers))
            .wrap(LayoutKind::Div, LayoutArgs::default());
        assert!(matches!(
            result,
            Err(LayoutError::StaleAddress { ref path }) if path == &vec![0, 0, 0, 3]
        ));
        assert_eq2!(tree, before);
    }

    #[test]
    fn test_update_attributes_on_field_pointer_updates_parent() {
        let mut tree = layout!(LayoutNode::field(["a"]).with_css_class("one"));
        let pointers = tree.get_field_names();
        LayoutSlice::new(&mut tree, AddressSet::Pointers(pointers))
            .update_attributes(&kwargs! { "css_class" => "two", "readonly" => true })
            .unwrap();
        let field = tree.child(0).and_then(NodeRef::as_node).unwrap();
        assert_eq2!(field.attrs, kwargs! { "class" => "one two", "readonly" => true });
    }

    #[test]
    fn test_update_attributes_on_range_skips_field_refs() {
        let mut tree = layout!("a", LayoutNode::div(["b"]));
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::default()))
            .update_attributes(&kwargs! { "css_class" => "x" })
            .unwrap();
        assert_eq2!(*tree.child(0).unwrap(), "a");
        let div = tree.child(1).and_then(NodeRef::as_node).unwrap();
        assert_eq2!(div.css_class.as_deref(), Some("x"));
        assert!(tree.attrs.is_empty());
    }

    #[test]
    fn test_map_visits_addressed_children() {
        let mut tree = layout!("a", "b", "c");
        let mut seen = vec![];
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::new(None, None, 2)))
            .map(|child| {
                seen.push(child.label().to_string());
                Ok(())
            })
            .unwrap();
        assert_eq2!(seen, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_wrap_with_closure() {
        let mut tree = layout!("a");
        LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::default()))
            .wrap_with(|old| Ok(LayoutNode::row([old]).with_css_id("r")))
            .unwrap();
        let row = tree.child(0).and_then(NodeRef::as_node).unwrap();
        assert_eq2!(row.kind, LayoutKind::Row);
        assert_eq2!(row.css_id.as_deref(), Some("r"));
    }

    #[test]
    fn test_pointers_of_range() {
        let mut tree = layout!("a", LayoutNode::div(["b"]));
        let slice = LayoutSlice::new(&mut tree, AddressSet::Range(SliceRange::default()));
        assert_eq2!(slice.pointers(), vec![
            Pointer::new([0], "a"),
            Pointer::new([1], "div")
        ]);
        assert_eq2!(slice.len(), 2);
    }
}
