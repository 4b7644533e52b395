// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod render_field;
pub mod render_layout;
pub mod render_node;

// Re-export.
pub use render_field::*;
pub use render_layout::*;
pub use render_node::*;

#[cfg(test)]
mod test_render_scenarios;
