// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod memory_form;
pub mod simple_template_engine;

// Re-export.
pub use memory_form::*;
pub use simple_template_engine::*;
