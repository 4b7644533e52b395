// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Whole layout renders through [`FormHelper::render_layout`] with the stock templates.

use crate::{Context, FormHelper, LayoutArgs, LayoutKind, LayoutNode, MemoryForm,
            SimpleTemplateEngine, WidgetKind, assert_eq2, layout};

#[test]
fn test_unmentioned_fields_are_appended_in_form_order() {
    let form = MemoryForm::with_text_fields(["a", "b", "c"]);
    let engine = SimpleTemplateEngine::default();
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a"));
    helper.render_unmentioned_fields = true;

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();

    assert_eq2!(rendered.rendered_fields, vec![
        "a".to_string(),
        "b".to_string(),
        "c".to_string()
    ]);
    let a = rendered.html.find("div_id_a").unwrap();
    let b = rendered.html.find("div_id_b").unwrap();
    let c = rendered.html.find("div_id_c").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_unmentioned_fields_off_by_default() {
    let form = MemoryForm::with_text_fields(["a", "b"]);
    let engine = SimpleTemplateEngine::default();
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a"));

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    assert!(!rendered.html.contains("div_id_b"));
}

#[test]
fn test_single_active_tab_across_renders() {
    let form = MemoryForm::with_text_fields(["first_name", "last_name"]);
    let engine = SimpleTemplateEngine::default();
    let mut helper = FormHelper::default();
    helper.set_layout(layout!(LayoutNode::tab_holder([
        LayoutNode::tab("One", ["first_name"]),
        LayoutNode::tab("Two", ["last_name"]).with_css_class("active"),
    ])));

    let first = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    let second = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();

    assert_eq2!(first, second);
    assert!(!first.html.contains("active active"));
    // One tab link and one tab pane.
    assert_eq2!(first.html.matches("tab-pane active").count(), 2);
    assert!(first.html.contains("<div id=\"one\" class=\"tab-pane active\">"));
    assert!(first.html.contains("<div id=\"two\" class=\"tab-pane\">"));
}

#[test]
fn test_errors_move_the_active_tab() {
    let form =
        MemoryForm::with_text_fields(["first_name", "last_name"]).with_error("last_name", "!");
    let engine = SimpleTemplateEngine::default();
    let mut helper = FormHelper::default();
    helper.set_layout(layout!(LayoutNode::tab_holder([
        LayoutNode::tab("One", ["first_name"]),
        LayoutNode::tab("Two", ["last_name"]),
    ])));

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    assert!(rendered.html.contains("<div id=\"two\" class=\"tab-pane active\">"));
    assert!(rendered.html.contains("<div id=\"one\" class=\"tab-pane\">"));
}

#[test]
fn test_rewrite_then_render() {
    let form = MemoryForm::default()
        .with_widget("email", WidgetKind::EmailInput)
        .with_widget("password1", WidgetKind::PasswordInput);
    let engine = SimpleTemplateEngine::default();
    let mut helper = FormHelper::for_form(form.clone());

    helper
        .field("email")
        .unwrap()
        .wrap(
            LayoutKind::Field,
            LayoutArgs::default()
                .kwarg("css_class", "wide")
                .kwarg("wrapper_class", "outer"),
        )
        .unwrap();
    helper
        .all()
        .unwrap()
        .wrap_together(LayoutKind::Fieldset, LayoutArgs::default().arg("Account"))
        .unwrap();

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    assert!(rendered.html.starts_with("<fieldset"));
    assert!(rendered.html.contains("<legend>Account</legend>"));
    assert!(rendered.html.contains(
        "<div id=\"div_id_email\" class=\"outer\"><input name=\"email\" type=\"email_input\" \
         class=\"wide\"/></div>"
    ));
    assert!(rendered.html.contains("type=\"password_input\""));
}

#[test]
fn test_field_template_from_helper() {
    let form = MemoryForm::with_text_fields(["a"]);
    let engine =
        SimpleTemplateEngine::default().with_template("mine/field.html", "[{{ field.name }}]");
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a"));
    helper.field_template = Some("mine/field.html".to_string());

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    assert_eq2!(rendered.html, "[a]");
}

#[test]
fn test_template_pack_selects_templates() {
    let form = MemoryForm::with_text_fields(["a"]);
    let engine = SimpleTemplateEngine::default()
        .with_template("uni_form/field.html", "uni:{{ field.name }}");
    let mut helper = FormHelper::default();
    helper.set_layout(layout!("a"));
    helper.set_template_pack("uni_form").unwrap();

    let rendered = helper
        .render_layout(&form, &engine, &mut Context::new())
        .unwrap();
    assert_eq2!(rendered.html, "uni:a");
}
