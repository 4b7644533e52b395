// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod form_helper;
pub mod layout_args;
pub mod layout_kind;
pub mod layout_macros;
pub mod layout_node;
pub mod layout_slice;
pub mod pointer;
pub mod render;

// Re-export.
pub use form_helper::*;
pub use layout_args::*;
pub use layout_kind::*;
pub use layout_node::*;
pub use layout_slice::*;
pub use pointer::*;
pub use render::*;

#[cfg(test)]
mod test_dynamic_api;
