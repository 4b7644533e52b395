// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end rewrites of a layout through [`FormHelper`].

use serde_json::json;

use crate::{AddressSet, FormHelper, KindFilter, LayoutArgs, LayoutError, LayoutKind,
            LayoutNode, LayoutSlice, MemoryForm, NodeRef, Pointer, SliceRange, WidgetKind,
            assert_eq2, div, kwargs, layout, row};

fn signup_form() -> MemoryForm {
    MemoryForm::default()
        .with_widget("email", WidgetKind::EmailInput)
        .with_widget("password1", WidgetKind::PasswordInput)
        .with_widget("password2", WidgetKind::PasswordInput)
        .with_widget("first_name", WidgetKind::TextInput)
        .with_widget("last_name", WidgetKind::TextInput)
}

fn labels(pointers: &[Pointer]) -> Vec<&str> {
    pointers.iter().map(|it| it.label.as_str()).collect()
}

#[test]
fn test_wrap_every_child() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("email", "password1", "password2"));

    helper
        .all()
        .unwrap()
        .wrap(LayoutKind::Field, LayoutArgs::default().kwarg("css_class", "x"))
        .unwrap();

    let tree = helper.layout().unwrap();
    assert_eq2!(tree.len(), 3);
    for child in tree.children() {
        let node = child.as_node().unwrap();
        assert_eq2!(node.kind, LayoutKind::Field);
        assert_eq2!(node.attrs["class"], json!("x"));
    }
    let second = tree.child(1).unwrap().as_node().unwrap();
    assert_eq2!(second.child(0).unwrap().as_field(), Some("password1"));
}

#[test]
fn test_exclude_by_widget_in_nested_tree() {
    let mut helper = FormHelper::for_form(signup_form());
    helper.set_layout(layout!(
        "email",
        div!("password1", row!("first_name", "password2")),
        LayoutNode::fieldset("Name", ["last_name"]),
    ));

    let slice = helper
        .exclude_by_widget(|widget| widget.kind == WidgetKind::PasswordInput)
        .unwrap();
    let pointers = slice.pointers();
    assert_eq2!(labels(&pointers), vec!["email", "first_name", "last_name"]);
    assert_eq2!(pointers[1].path.as_slice(), &[1, 1, 0]);
    assert_eq2!(pointers[2].path.as_slice(), &[2, 0]);
}

#[test]
fn test_filter_by_widget_then_wrap() {
    let mut helper = FormHelper::for_form(signup_form());
    helper
        .filter_by_widget(|widget| widget.kind == WidgetKind::PasswordInput)
        .unwrap()
        .wrap(LayoutKind::Div, LayoutArgs::default().kwarg("css_class", "secret"))
        .unwrap();

    let tree = helper.layout().unwrap();
    assert_eq2!(tree.child(0).unwrap().as_field(), Some("email"));
    for index in [1, 2] {
        let node = tree.child(index).unwrap().as_node().unwrap();
        assert_eq2!(node.kind, LayoutKind::Div);
        assert_eq2!(node.css_class.as_deref(), Some("secret"));
    }
}

#[test]
fn test_filter_by_kind_and_update_attributes() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!(
        div!("a"),
        "b",
        div!(div!("c")),
        LayoutNode::fieldset("Legend", ["d"]),
    ));

    let pointers = helper.filter(LayoutKind::Div).unwrap().pointers();
    assert_eq2!(labels(&pointers), vec!["div", "div"]);

    let pointers = helper.filter_with(LayoutKind::Div, 0, true).unwrap().pointers();
    assert_eq2!(pointers.len(), 3);
    assert_eq2!(pointers[2].path.as_slice(), &[2, 0]);

    helper
        .filter_with(LayoutKind::Div, 0, true)
        .unwrap()
        .update_attributes(&kwargs! { "css_class" => "extra", "data_x" => "1" })
        .unwrap();

    let tree = helper.layout().unwrap();
    let inner = tree.at(&[2, 0]).unwrap().as_node().unwrap();
    assert_eq2!(inner.css_class.as_deref(), Some("extra"));
    let fieldset = tree.child(3).unwrap().as_node().unwrap();
    assert_eq2!(fieldset.css_class, None);
}

#[test]
fn test_filter_field_names_first_level_only() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", div!("b"), "c"));
    let pointers = helper.filter(KindFilter::FieldNames).unwrap().pointers();
    assert_eq2!(labels(&pointers), vec!["a", "c"]);
}

#[test]
fn test_wrap_together_partial_slices() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", "b", "c", "d", "e"));

    helper
        .range(1..3)
        .unwrap()
        .wrap_together(LayoutKind::Fieldset, LayoutArgs::default().arg("Middle"))
        .unwrap();

    let tree = helper.layout().unwrap();
    assert_eq2!(tree.len(), 4);
    let fieldset = tree.child(1).unwrap().as_node().unwrap();
    assert_eq2!(fieldset.kind, LayoutKind::Fieldset);
    assert_eq2!(fieldset.legend(), Some("Middle"));
    assert_eq2!(
        fieldset.children().iter().map(NodeRef::label).collect::<Vec<_>>(),
        vec!["b", "c"]
    );
    assert_eq2!(tree.child(2).unwrap().as_field(), Some("d"));

    helper
        .slice(SliceRange::new(Some(-2), None, 1))
        .unwrap()
        .wrap_together(LayoutKind::Div, LayoutArgs::default())
        .unwrap();
    let tree = helper.layout().unwrap();
    assert_eq2!(tree.len(), 3);
    let div = tree.child(2).unwrap().as_node().unwrap();
    assert_eq2!(
        div.children().iter().map(NodeRef::label).collect::<Vec<_>>(),
        vec!["d", "e"]
    );
}

#[test]
fn test_wrap_together_empty_range_is_noop() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", "b"));
    let before = helper.layout().unwrap().clone();
    helper
        .range(5..)
        .unwrap()
        .wrap_together(LayoutKind::Div, LayoutArgs::default())
        .unwrap();
    assert_eq2!(helper.layout().unwrap(), &before);
}

#[test]
fn test_wrap_together_needs_range() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", "b"));
    let result = helper
        .field("a")
        .unwrap()
        .wrap_together(LayoutKind::Div, LayoutArgs::default());
    assert!(matches!(result, Err(LayoutError::WrapTogetherNeedsRange)));
}

#[test]
fn test_stale_address_after_structural_change() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!(div!("email"), "password1"));
    let stale = helper.layout().unwrap().get_field_names();
    assert_eq2!(stale[0].path.as_slice(), &[0, 0]);

    // The div at 0 is gone, its old child address now runs into a field reference.
    helper.set(0, "email").unwrap();
    let before = helper.layout().unwrap().clone();

    let layout = helper.layout_mut().unwrap();
    let result = LayoutSlice::new(layout, AddressSet::Pointers(stale))
        .wrap(LayoutKind::Field, LayoutArgs::default());
    assert!(matches!(result, Err(LayoutError::StaleAddress { path }) if path == vec![0, 0]));
    assert_eq2!(helper.layout().unwrap(), &before);
}

#[test]
fn test_filter_and_wrap_nested_divs_goes_stale() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!(div!("extra_field", div!("password1"))));
    let original = helper.layout().unwrap().child(0).unwrap().clone();

    let mut slice = helper.filter_with(LayoutKind::Div, 2, false).unwrap();
    assert_eq2!(slice.pointers(), vec![
        Pointer::new([0], "div"),
        Pointer::new([0, 1], "div"),
    ]);

    // Wrapping the outer div moves the inner one under [0, 0, 1].
    let result =
        slice.wrap(LayoutKind::Div, LayoutArgs::default().kwarg("css_class", "test-class"));
    assert!(matches!(result, Err(LayoutError::StaleAddress { path }) if path == vec![0, 1]));

    let tree = helper.layout().unwrap();
    let wrapper = tree.child(0).unwrap().as_node().unwrap();
    assert_eq2!(wrapper.kind, LayoutKind::Div);
    assert_eq2!(wrapper.css_class.as_deref(), Some("test-class"));
    assert_eq2!(wrapper.children(), &[original]);
}

#[test]
fn test_wrap_once_is_idempotent() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", "b"));
    for _ in 0..2 {
        helper
            .all()
            .unwrap()
            .wrap_once(LayoutKind::Div, LayoutArgs::default())
            .unwrap();
    }
    let tree = helper.layout().unwrap();
    for child in tree.children() {
        let node = child.as_node().unwrap();
        assert_eq2!(node.kind, LayoutKind::Div);
        assert!(node.child(0).unwrap().is_field());
    }
}

#[test]
fn test_field_slice_updates_holder() {
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a", LayoutNode::field(["b"])));
    helper
        .field("b")
        .unwrap()
        .update_attributes(&kwargs! { "placeholder" => "Bee" })
        .unwrap();
    let holder = helper.layout().unwrap().child(1).unwrap().as_node().unwrap();
    assert_eq2!(holder.attrs["placeholder"], json!("Bee"));
}

#[test]
fn test_get_field_names_shapes() {
    let tree = layout!(
        "a",
        LayoutNode::tab_holder([
            LayoutNode::tab("One", ["b", "c"]),
            LayoutNode::tab("Two", [NodeRef::from(div!("d"))]),
        ]),
    );
    let pointers = tree.get_field_names();
    assert_eq2!(labels(&pointers), vec!["a", "b", "c", "d"]);
    let paths: Vec<Vec<usize>> = pointers.iter().map(|it| it.path.to_vec()).collect();
    assert_eq2!(paths, vec![vec![0], vec![1, 0, 0], vec![1, 0, 1], vec![
        1, 1, 0, 0
    ]]);
}
