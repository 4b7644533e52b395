// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod template_engine;

// Re-export.
pub use template_engine::*;
