// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod attrs;
pub mod form_api;

// Re-export.
pub use attrs::*;
pub use form_api::*;
