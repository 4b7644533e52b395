// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod context;
pub mod decl_macros;
pub mod error;
pub mod form;
pub mod log;
pub mod settings;
pub mod template;
pub mod test_fixtures;

// Re-export.
pub use context::*;
pub use error::*;
pub use form::*;
pub use log::*;
pub use settings::*;
pub use template::*;
pub use test_fixtures::*;
