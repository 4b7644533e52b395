// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Configure where the layout engine's diagnostics go (mutation seams at `debug`,
/// recoverable render problems at `warn`) and at what level.
///
/// Use [`TracingConfig::install_global`] once per process, or
/// [`TracingConfig::install_thread_local`] in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `tracing_log_file_path_and_prefix`: [String] is the file path to log to. Eg:
///   `/tmp/form_layout.log`.
/// - [`DisplayPreference`] picks stdout or stderr.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(
        DisplayPreference,
        String, /* tracing_log_file_path_and_prefix */
    ),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

pub const DEFAULT_LOG_FILE_NAME: &str = "form_layout_log.txt";

impl TracingConfig {
    /// Log to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new_file_and_display(
        filename: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

/// Display on stderr at the given level.
impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::Display(DisplayPreference::Stderr),
            level_filter: LevelFilter::from_level(level),
        }
    }
}

mod writer_config_impl {
    use super::{DisplayPreference, WriterConfig};

    /// Merge two writer configs. A display on the right wins over one on the left, and
    /// the same for files.
    impl std::ops::Add for WriterConfig {
        type Output = WriterConfig;

        fn add(self, rhs: Self) -> Self::Output {
            let (lhs_display, lhs_file) = self.split();
            let (rhs_display, rhs_file) = rhs.split();
            WriterConfig::join(rhs_display.or(lhs_display), rhs_file.or(lhs_file))
        }
    }

    impl WriterConfig {
        fn split(self) -> (Option<DisplayPreference>, Option<String>) {
            match self {
                WriterConfig::None => (None, None),
                WriterConfig::Display(display) => (Some(display), None),
                WriterConfig::File(file) => (None, Some(file)),
                WriterConfig::DisplayAndFile(display, file) => (Some(display), Some(file)),
            }
        }

        fn join(display: Option<DisplayPreference>, file: Option<String>) -> Self {
            match (display, file) {
                (None, None) => WriterConfig::None,
                (Some(display), None) => WriterConfig::Display(display),
                (None, Some(file)) => WriterConfig::File(file),
                (Some(display), Some(file)) => WriterConfig::DisplayAndFile(display, file),
            }
        }
    }
}
