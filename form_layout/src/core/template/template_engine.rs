// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Context, LayoutResult};

/// Placeholder in template names that is replaced with the active template pack.
pub const TEMPLATE_PACK_PLACEHOLDER: &str = "%s";

/// The template collaborator. Implementations report failures as
/// [`crate::LayoutError::TemplateRender`].
pub trait TemplateEngine: std::fmt::Debug {
    /// Render the named template (eg: `bootstrap4/layout/div.html`).
    ///
    /// # Errors
    ///
    /// The template can't be found or fails to render.
    fn render(&self, template_name: &str, context: &Context) -> LayoutResult<String>;

    /// Evaluate `source` as an inline template. Used for legends, html snippets and
    /// button values.
    ///
    /// # Errors
    ///
    /// The source fails to render.
    fn render_str(&self, source: &str, context: &Context) -> LayoutResult<String>;
}

/// `"%s/layout/div.html"` + `"uni_form"` → `"uni_form/layout/div.html"`. Names without
/// the placeholder are returned as is.
#[must_use]
pub fn resolve_template_name(template: &str, template_pack: &str) -> String {
    template.replacen(TEMPLATE_PACK_PLACEHOLDER, template_pack, 1)
}
