// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod crispy_settings;

// Re-export.
pub use crispy_settings::*;
