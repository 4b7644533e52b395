// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::UNI_FORM_PACK;

/// Every kind of node a layout tree can hold. The lowercase name (`"div"`,
/// `"multifield"`, `"prependedappendedtext"`, ...) is used as the label of a
/// [`crate::Pointer`] that addresses a node of this kind.
///
/// Kinds fall into three families:
///
/// | Family         | Kinds                                                                    |
/// | :------------- | :----------------------------------------------------------------------- |
/// | Container      | `Layout` `Div` `Row` `Column` `Fieldset` `MultiField` `ButtonHolder` ... |
/// | Field wrapping | `Field` `MultiWidgetField` `InlineField` `UneditableField` ...           |
/// | Leaf           | `Html` `Submit` `Button` `Hidden` `Reset` `StrictButton` `Alert`         |
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum LayoutKind {
    // Containers.
    Layout,
    Div,
    Row,
    Column,
    Fieldset,
    MultiField,
    ButtonHolder,
    FormActions,
    Tab,
    TabHolder,
    AccordionGroup,
    Accordion,
    FieldWithButtons,
    // Field wrapping.
    Field,
    MultiWidgetField,
    InlineField,
    UneditableField,
    InlineCheckboxes,
    InlineRadios,
    PrependedText,
    AppendedText,
    PrependedAppendedText,
    // Leaves.
    Html,
    Submit,
    Button,
    Hidden,
    Reset,
    StrictButton,
    Alert,
}

impl LayoutKind {
    /// Lowercase kind name, the label of a pointer to a node of this kind.
    #[must_use]
    pub fn name(self) -> &'static str { self.into() }

    /// Kinds whose positional arguments come before the wrapped children when they are
    /// constructed by [`crate::LayoutSlice::wrap`] (a legend, a label or a group name).
    #[must_use]
    pub fn is_args_first(self) -> bool {
        matches!(
            self,
            LayoutKind::Fieldset
                | LayoutKind::MultiField
                | LayoutKind::Tab
                | LayoutKind::AccordionGroup
        )
    }

    /// The kind this one specializes, if any. Row, Column, the group kinds and their
    /// holders, `FieldWithButtons` and Alert are Divs. Every field wrapper is a Field,
    /// with `PrependedText` and `AppendedText` going through `PrependedAppendedText`.
    #[must_use]
    pub fn base(self) -> Option<LayoutKind> {
        match self {
            LayoutKind::Row
            | LayoutKind::Column
            | LayoutKind::Tab
            | LayoutKind::TabHolder
            | LayoutKind::AccordionGroup
            | LayoutKind::Accordion
            | LayoutKind::FieldWithButtons
            | LayoutKind::Alert => Some(LayoutKind::Div),
            LayoutKind::PrependedText | LayoutKind::AppendedText => {
                Some(LayoutKind::PrependedAppendedText)
            }
            LayoutKind::PrependedAppendedText
            | LayoutKind::MultiWidgetField
            | LayoutKind::InlineField
            | LayoutKind::UneditableField
            | LayoutKind::InlineCheckboxes
            | LayoutKind::InlineRadios => Some(LayoutKind::Field),
            _ => None,
        }
    }

    /// Is this `kind` itself, or a specialization of it (see [`LayoutKind::base`]).
    /// Kind filters and [`crate::LayoutSlice::wrap_once`] match this way.
    #[must_use]
    pub fn is_a(self, kind: LayoutKind) -> bool {
        std::iter::successors(Some(self), |it| it.base()).any(|it| it == kind)
    }

    /// Kinds that never have children.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            LayoutKind::Html
                | LayoutKind::Submit
                | LayoutKind::Button
                | LayoutKind::Hidden
                | LayoutKind::Reset
                | LayoutKind::StrictButton
                | LayoutKind::Alert
        )
    }

    /// Kinds that inject attributes into the widget of the field(s) they hold.
    #[must_use]
    pub fn is_field_wrapper(self) -> bool {
        matches!(
            self,
            LayoutKind::Field
                | LayoutKind::MultiWidgetField
                | LayoutKind::InlineField
                | LayoutKind::UneditableField
                | LayoutKind::InlineCheckboxes
                | LayoutKind::InlineRadios
                | LayoutKind::PrependedText
                | LayoutKind::AppendedText
                | LayoutKind::PrependedAppendedText
        )
    }

    #[must_use]
    pub fn is_add_on(self) -> bool {
        matches!(
            self,
            LayoutKind::PrependedText
                | LayoutKind::AppendedText
                | LayoutKind::PrependedAppendedText
        )
    }

    /// Submit, Button, Hidden and Reset.
    #[must_use]
    pub fn is_input(self) -> bool {
        matches!(
            self,
            LayoutKind::Submit | LayoutKind::Button | LayoutKind::Hidden | LayoutKind::Reset
        )
    }

    /// Tab and `AccordionGroup`, named groups that can be active.
    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, LayoutKind::Tab | LayoutKind::AccordionGroup)
    }

    /// `TabHolder` and Accordion, which open exactly one of their groups per render.
    #[must_use]
    pub fn is_group_holder(self) -> bool {
        matches!(self, LayoutKind::TabHolder | LayoutKind::Accordion)
    }

    /// Template used when a node doesn't override it. `%s` is the template pack. `None`
    /// for kinds that render without a template of their own.
    #[must_use]
    pub fn default_template(self) -> Option<&'static str> {
        Some(match self {
            LayoutKind::Layout | LayoutKind::Html => return None,
            LayoutKind::Div | LayoutKind::Row | LayoutKind::Column | LayoutKind::Tab => {
                "%s/layout/div.html"
            }
            LayoutKind::Fieldset => "%s/layout/fieldset.html",
            LayoutKind::MultiField => "%s/layout/multifield.html",
            LayoutKind::ButtonHolder => "%s/layout/buttonholder.html",
            LayoutKind::FormActions => "%s/layout/formactions.html",
            LayoutKind::TabHolder => "%s/layout/tab.html",
            LayoutKind::AccordionGroup => "%s/accordion-group.html",
            LayoutKind::Accordion => "%s/accordion.html",
            LayoutKind::FieldWithButtons => "%s/layout/field_with_buttons.html",
            LayoutKind::Field | LayoutKind::MultiWidgetField => "%s/field.html",
            LayoutKind::InlineField => "%s/layout/inline_field.html",
            LayoutKind::UneditableField => "%s/layout/uneditable_input.html",
            LayoutKind::InlineCheckboxes => "%s/layout/checkboxselectmultiple_inline.html",
            LayoutKind::InlineRadios => "%s/layout/radioselect_inline.html",
            LayoutKind::PrependedText
            | LayoutKind::AppendedText
            | LayoutKind::PrependedAppendedText => "%s/layout/prepended_appended_text.html",
            LayoutKind::Submit | LayoutKind::Button | LayoutKind::Hidden | LayoutKind::Reset => {
                "%s/layout/baseinput.html"
            }
            LayoutKind::StrictButton => "%s/layout/button.html",
            LayoutKind::Alert => "%s/layout/alert.html",
        })
    }

    /// Class a node of this kind carries before any `css_class` is appended. Row and
    /// the button inputs depend on the template pack.
    #[must_use]
    pub fn default_css_class(self, template_pack: &str) -> Option<&'static str> {
        let is_uni_form = template_pack == UNI_FORM_PACK;
        match self {
            LayoutKind::Row => Some(if is_uni_form { "formRow" } else { "row" }),
            LayoutKind::Column => Some("formColumn"),
            LayoutKind::Tab => Some("tab-pane"),
            LayoutKind::MultiField => Some("ctrlHolder"),
            LayoutKind::Alert => Some("alert"),
            LayoutKind::StrictButton => Some("btn"),
            LayoutKind::Submit => Some(if is_uni_form {
                "submit submitButton"
            } else {
                "btn btn-primary"
            }),
            LayoutKind::Button => Some(if is_uni_form { "button" } else { "btn" }),
            LayoutKind::Hidden => Some("hidden"),
            LayoutKind::Reset => Some(if is_uni_form {
                "reset resetButton"
            } else {
                "btn btn-inverse"
            }),
            _ => None,
        }
    }

    /// `type` attribute of the `<input>` rendered by the input kinds.
    #[must_use]
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            LayoutKind::Submit => Some("submit"),
            LayoutKind::Button => Some("button"),
            LayoutKind::Hidden => Some("hidden"),
            LayoutKind::Reset => Some("reset"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(LayoutKind::Div, "div")]
    #[test_case(LayoutKind::MultiField, "multifield")]
    #[test_case(LayoutKind::PrependedAppendedText, "prependedappendedtext")]
    #[test_case(LayoutKind::FieldWithButtons, "fieldwithbuttons")]
    #[test_case(LayoutKind::Html, "html")]
    fn test_lowercase_names(kind: LayoutKind, expected: &str) {
        assert_eq2!(kind.name(), expected);
        assert_eq2!(kind.to_string(), expected);
        assert_eq2!(LayoutKind::from_str(expected).unwrap(), kind);
    }

    #[test]
    fn test_families_are_disjoint() {
        for kind in LayoutKind::iter() {
            assert!(!(kind.is_leaf() && kind.is_field_wrapper()), "{kind}");
        }
    }

    #[test]
    fn test_args_first() {
        let args_first: Vec<_> =
            LayoutKind::iter().filter(|it| it.is_args_first()).collect();
        assert_eq2!(
            args_first,
            vec![
                LayoutKind::Fieldset,
                LayoutKind::MultiField,
                LayoutKind::Tab,
                LayoutKind::AccordionGroup
            ]
        );
    }

    #[test_case(LayoutKind::Row, LayoutKind::Div, true)]
    #[test_case(LayoutKind::Column, LayoutKind::Div, true)]
    #[test_case(LayoutKind::Tab, LayoutKind::Div, true)]
    #[test_case(LayoutKind::Accordion, LayoutKind::Div, true)]
    #[test_case(LayoutKind::AppendedText, LayoutKind::PrependedAppendedText, true)]
    #[test_case(LayoutKind::AppendedText, LayoutKind::Field, true)]
    #[test_case(LayoutKind::InlineRadios, LayoutKind::Field, true)]
    #[test_case(LayoutKind::Div, LayoutKind::Div, true)]
    #[test_case(LayoutKind::Div, LayoutKind::Row, false)]
    #[test_case(LayoutKind::Field, LayoutKind::AppendedText, false)]
    #[test_case(LayoutKind::Fieldset, LayoutKind::Div, false)]
    #[test_case(LayoutKind::AppendedText, LayoutKind::Div, false)]
    fn test_is_a(kind: LayoutKind, base: LayoutKind, expected: bool) {
        assert_eq2!(kind.is_a(base), expected);
    }

    #[test]
    fn test_every_kind_reaches_a_root() {
        for kind in LayoutKind::iter() {
            let depth = std::iter::successors(Some(kind), |it| it.base()).count();
            assert!(depth <= 3, "{kind}");
            assert!(kind.is_a(kind), "{kind}");
        }
    }

    #[test_case(LayoutKind::Row, "uni_form", Some("formRow"))]
    #[test_case(LayoutKind::Row, "bootstrap4", Some("row"))]
    #[test_case(LayoutKind::Submit, "uni_form", Some("submit submitButton"))]
    #[test_case(LayoutKind::Submit, "bootstrap3", Some("btn btn-primary"))]
    #[test_case(LayoutKind::Reset, "bootstrap", Some("btn btn-inverse"))]
    #[test_case(LayoutKind::Hidden, "uni_form", Some("hidden"))]
    #[test_case(LayoutKind::Div, "bootstrap4", None)]
    fn test_default_css_class(kind: LayoutKind, pack: &str, expected: Option<&str>) {
        assert_eq2!(kind.default_css_class(pack), expected);
    }

    #[test]
    fn test_every_templated_kind_has_placeholder() {
        for kind in LayoutKind::iter() {
            if let Some(template) = kind.default_template() {
                assert!(template.starts_with("%s/"), "{kind}: {template}");
            }
        }
    }
}
