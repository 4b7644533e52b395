// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod render_context;

// Re-export.
pub use render_context::*;
