// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_form_layout
//!
//! Declare how the fields of a form are grouped, wrapped and decorated as a tree of
//! layout nodes, rewrite that tree programmatically, and render it into markup.
//!
//! The crate does not know anything about a particular web framework. It talks to two
//! collaborators, which you supply:
//! 1. A [`Form`] which resolves field names into [`BoundField`]s, knows its error set, and
//!    the natural order of its fields.
//! 2. A [`TemplateEngine`] which turns a template name (or an inline template string) plus
//!    a [`Context`] into markup.
//!
//! ## Building a layout
//!
//! Trees are built with nested constructor calls (or the [`layout!`], [`div!`] and
//! [`row!`] macros). Plain `&str` children are field references.
//!
//! ```
//! use r3bl_form_layout::{LayoutNode, layout, row};
//!
//! let tree = layout!(
//!     LayoutNode::fieldset("Contact details", ["email", "phone"]),
//!     row!("password1", "password2"),
//! );
//! assert_eq!(tree.children().len(), 2);
//! ```
//!
//! ## Rewriting a layout
//!
//! The [`FormHelper`] façade computes address sets over the tree ([`LayoutSlice`]) which
//! are then used to wrap nodes, wrap ranges together, or update attributes.
//!
//! ```
//! use r3bl_form_layout::{FormHelper, LayoutArgs, LayoutKind, layout};
//!
//! let mut helper = FormHelper::default();
//! helper.set_layout(layout!("email", "password1", "password2"));
//! helper
//!     .all()
//!     .unwrap()
//!     .wrap(LayoutKind::Field, LayoutArgs::default().kwarg("css_class", "x"))
//!     .unwrap();
//!
//! let tree = helper.layout().unwrap();
//! assert_eq!(tree.child(1).unwrap().kind(), Some(LayoutKind::Field));
//! ```
//!
//! Addresses (pointers) are only valid right after they are computed. Any structural
//! mutation invalidates the addresses at or after the mutated position, and using a stale
//! one is reported as [`LayoutError::StaleAddress`].

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod layout;

// Re-export.
pub use crate::core::*;
pub use crate::layout::*;
