// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Process level defaults that a [`crate::FormHelper`] falls back on when it doesn't set
//! its own value.

use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult};

pub const ENV_TEMPLATE_PACK: &str = "CRISPY_TEMPLATE_PACK";
pub const ENV_ALLOWED_TEMPLATE_PACKS: &str = "CRISPY_ALLOWED_TEMPLATE_PACKS";
pub const ENV_FAIL_SILENTLY: &str = "CRISPY_FAIL_SILENTLY";

pub const DEFAULT_TEMPLATE_PACK: &str = "bootstrap4";
pub const UNI_FORM_PACK: &str = "uni_form";
pub const STOCK_TEMPLATE_PACKS: [&str; 4] =
    ["bootstrap", "uni_form", "bootstrap3", "bootstrap4"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrispySettings {
    pub template_pack: String,
    pub allowed_template_packs: Vec<String>,
    /// Downgrade unresolvable and double rendered fields to warnings.
    pub fail_silently: bool,
}

impl Default for CrispySettings {
    fn default() -> Self {
        Self {
            template_pack: DEFAULT_TEMPLATE_PACK.to_string(),
            allowed_template_packs: STOCK_TEMPLATE_PACKS
                .iter()
                .map(ToString::to_string)
                .collect(),
            fail_silently: true,
        }
    }
}

impl CrispySettings {
    /// Parse from JSON. Missing keys take their default.
    ///
    /// # Errors
    ///
    /// Malformed JSON, or a template pack that isn't in the allowed list.
    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        let it: Self =
            serde_json::from_str(json).map_err(|error| LayoutError::InvalidSettings {
                reason: error.to_string(),
            })?;
        it.validate()?;
        Ok(it)
    }

    /// Defaults overridden by the `CRISPY_*` environment variables that are set.
    ///
    /// # Errors
    ///
    /// An unparseable `CRISPY_FAIL_SILENTLY`, or a template pack that isn't allowed.
    pub fn from_env() -> LayoutResult<Self> {
        let mut it = Self::default();

        if let Ok(value) = std::env::var(ENV_ALLOWED_TEMPLATE_PACKS) {
            it.allowed_template_packs = value
                .split(',')
                .map(str::trim)
                .filter(|pack| !pack.is_empty())
                .map(ToString::to_string)
                .collect();
        }

        if let Ok(value) = std::env::var(ENV_TEMPLATE_PACK) {
            it.template_pack = value.trim().to_string();
        }

        if let Ok(value) = std::env::var(ENV_FAIL_SILENTLY) {
            it.fail_silently = parse_bool(&value).ok_or_else(|| {
                LayoutError::InvalidSettings {
                    reason: format!("{ENV_FAIL_SILENTLY}={value} is not a boolean"),
                }
            })?;
        }

        it.validate()?;
        tracing::debug!(message = "crispy settings loaded from env", settings = ?it);
        Ok(it)
    }

    /// # Errors
    ///
    /// [`LayoutError::TemplatePackNotAllowed`] when `template_pack` isn't allowed.
    pub fn validate(&self) -> LayoutResult<()> { self.check_template_pack(&self.template_pack) }

    /// # Errors
    ///
    /// [`LayoutError::TemplatePackNotAllowed`] when `template_pack` isn't allowed.
    pub fn check_template_pack(&self, template_pack: &str) -> LayoutResult<()> {
        if self.allowed_template_packs.iter().any(|it| it == template_pack) {
            Ok(())
        } else {
            Err(LayoutError::TemplatePackNotAllowed {
                template_pack: template_pack.to_string(),
                allowed: self.allowed_template_packs.clone(),
            })
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
