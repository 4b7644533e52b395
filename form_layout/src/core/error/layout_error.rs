// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors for building, rewriting and rendering layouts. See [`LayoutError`] for the
//! variants and [`ErrorCategory`] for how they are grouped.

/// Convenience alias used by every fallible operation in this crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors from [`crate::FormHelper`], [`crate::LayoutSlice`], [`crate::LayoutNode`] and
/// the render pipeline.
///
/// | Category        | Variants                                                      | Raised when                         |
/// | :-------------- | :------------------------------------------------------------ | :---------------------------------- |
/// | `Configuration` | `LayoutMissing`, `FormMissing`, `InvalidFormMethod`, ...      | Always                              |
/// | `DynamicLayout` | [`StaleAddress`], [`WrapTogetherNeedsRange`]                  | Always                              |
/// | `Render`        | [`UnresolvableField`], [`DoubleRender`], [`TemplateRender`]   | Unless fail silently is on (first 2) |
///
/// [`StaleAddress`]: Self::StaleAddress
/// [`WrapTogetherNeedsRange`]: Self::WrapTogetherNeedsRange
/// [`UnresolvableField`]: Self::UnresolvableField
/// [`DoubleRender`]: Self::DoubleRender
/// [`TemplateRender`]: Self::TemplateRender
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LayoutError {
    #[error("🧩 No layout is attached to the form helper")]
    #[diagnostic(
        code(r3bl_form_layout::config::layout_missing),
        help("Call `FormHelper::set_layout()` before slicing or rendering.")
    )]
    LayoutMissing,

    #[error("📝 No form instance is attached to the form helper")]
    #[diagnostic(
        code(r3bl_form_layout::config::form_missing),
        help("Widget filters resolve fields against a form, use `FormHelper::set_form()`.")
    )]
    FormMissing,

    #[error("📮 Invalid form method: '{method}'")]
    #[diagnostic(
        code(r3bl_form_layout::config::form_method),
        help("Only GET and POST are valid form methods.")
    )]
    InvalidFormMethod { method: String },

    #[error("🎨 Invalid form style: '{style}'")]
    #[diagnostic(
        code(r3bl_form_layout::config::form_style),
        help("Only `default` and `inline` are valid form styles.")
    )]
    InvalidFormStyle { style: String },

    #[error("📦 Template pack '{template_pack}' is not allowed")]
    #[diagnostic(
        code(r3bl_form_layout::config::template_pack),
        help("Add it to `CrispySettings::allowed_template_packs` first.")
    )]
    TemplatePackNotAllowed {
        template_pack: String,
        allowed: Vec<String>,
    },

    #[error("🏗️ Can't construct a '{kind}' node: {reason}")]
    #[diagnostic(code(r3bl_form_layout::config::constructor_args))]
    InvalidConstructorArgs { kind: String, reason: String },

    #[error("⚙️ Invalid settings: {reason}")]
    #[diagnostic(code(r3bl_form_layout::config::settings))]
    InvalidSettings { reason: String },

    #[error("🧭 Stale address {path:?}, it no longer points into the layout")]
    #[diagnostic(
        code(r3bl_form_layout::dynamic::stale_address),
        help(
            "Trying to wrap a field within an already wrapped field. \
             Recheck your filter or layout, and recompute addresses after each mutation."
        )
    )]
    StaleAddress { path: Vec<usize> },

    #[error("🧺 wrap_together only works with a range of first level positions")]
    #[diagnostic(
        code(r3bl_form_layout::dynamic::wrap_together),
        help("Use `FormHelper::range()` or `FormHelper::index()`, not a filter.")
    )]
    WrapTogetherNeedsRange,

    #[error("🔍 Could not resolve form field '{name}'")]
    #[diagnostic(code(r3bl_form_layout::render::unresolvable_field))]
    UnresolvableField { name: String },

    #[error("♊ A field should only be rendered once: {name}")]
    #[diagnostic(code(r3bl_form_layout::render::double_render))]
    DoubleRender { name: String },

    #[error("🖨️ Could not render template '{template}': {reason}")]
    #[diagnostic(code(r3bl_form_layout::render::template))]
    TemplateRender { template: String, reason: String },
}

/// Grouping of [`LayoutError`] variants by who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Helper or node is set up incorrectly.
    Configuration,
    /// Mutations were applied in an order that invalidated an address.
    DynamicLayout,
    /// A problem found while walking the tree to produce markup.
    Render,
}

impl LayoutError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoutError::LayoutMissing
            | LayoutError::FormMissing
            | LayoutError::InvalidFormMethod { .. }
            | LayoutError::InvalidFormStyle { .. }
            | LayoutError::TemplatePackNotAllowed { .. }
            | LayoutError::InvalidConstructorArgs { .. }
            | LayoutError::InvalidSettings { .. } => ErrorCategory::Configuration,
            LayoutError::StaleAddress { .. } | LayoutError::WrapTogetherNeedsRange => {
                ErrorCategory::DynamicLayout
            }
            LayoutError::UnresolvableField { .. }
            | LayoutError::DoubleRender { .. }
            | LayoutError::TemplateRender { .. } => ErrorCategory::Render,
        }
    }

    /// Only these two are downgraded to warnings when fail silently is on.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LayoutError::UnresolvableField { .. } | LayoutError::DoubleRender { .. }
        )
    }

    pub fn constructor_args(kind: impl ToString, reason: impl ToString) -> Self {
        LayoutError::InvalidConstructorArgs {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn template_render(template: impl ToString, reason: impl ToString) -> Self {
        LayoutError::TemplateRender {
            template: template.to_string(),
            reason: reason.to_string(),
        }
    }
}
