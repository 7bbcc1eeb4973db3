//! Leveled diagnostic logger
//!
//! The logger is an explicit value handed to every pipeline stage. It owns the
//! active threshold, supports a temporary override that is restored when the
//! returned [`LevelOverride`] guard is dropped, and forwards accepted messages
//! to `tracing`.

use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SitemapError};

/// Diagnostic levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    /// Plain progress output, between info and warn
    Log,
    Warn,
    /// Always emitted regardless of the threshold
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Log => "log",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = SitemapError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" | "verbose" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "log" | "quiet" => Ok(LogLevel::Log),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(SitemapError::InvalidLogLevel(name.to_string())),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct LevelState {
    current: LogLevel,
    original: Option<LogLevel>,
}

/// Leveled logger with a single-slot temporary override.
///
/// Nested overrides are not supported: overriding while an override is active
/// replaces the saved original with the current temporary level.
#[derive(Debug)]
pub struct Logger {
    state: Mutex<LevelState>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            state: Mutex::new(LevelState {
                current: level,
                original: None,
            }),
        }
    }

    /// Create a logger from a level name or alias
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    fn state(&self) -> MutexGuard<'_, LevelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn level(&self) -> LogLevel {
        self.state().current
    }

    pub fn set_level(&self, name: &str) -> Result<()> {
        let level: LogLevel = name.parse()?;
        self.state().current = level;
        Ok(())
    }

    /// Switch to `name` until [`Logger::reset_level`] is called.
    ///
    /// Returns `true` if the level actually changed.
    pub fn set_temporary_level(&self, name: &str) -> Result<bool> {
        let level: LogLevel = name.parse()?;
        let mut state = self.state();
        if level == state.current {
            return Ok(false);
        }
        state.original = Some(state.current);
        state.current = level;
        Ok(true)
    }

    /// Restore the level saved by the last temporary override, if any
    pub fn reset_level(&self) {
        let mut state = self.state();
        if let Some(original) = state.original.take() {
            state.current = original;
        }
    }

    pub fn set_debug(&self, enabled: bool) {
        if enabled {
            self.state().current = LogLevel::Debug;
            self.debug("Debug mode is enabled");
        } else {
            self.debug("Debug mode is disabled");
            self.state().current = LogLevel::Info;
        }
    }

    /// Apply an optional temporary level for the lifetime of the returned guard
    pub fn override_level(&self, name: Option<&str>) -> Result<LevelOverride<'_>> {
        let active = match name {
            Some(name) => self.set_temporary_level(name)?,
            None => false,
        };
        Ok(LevelOverride {
            logger: self,
            active,
        })
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level == LogLevel::Error || level >= self.level()
    }

    pub fn debug(&self, message: impl Display) {
        if self.should_log(LogLevel::Debug) {
            tracing::debug!("{message}");
        }
    }

    pub fn info(&self, message: impl Display) {
        if self.should_log(LogLevel::Info) {
            tracing::info!("{message}");
        }
    }

    pub fn log(&self, message: impl Display) {
        if self.should_log(LogLevel::Log) {
            tracing::info!(kind = "log", "{message}");
        }
    }

    pub fn warn(&self, message: impl Display) {
        if self.should_log(LogLevel::Warn) {
            tracing::warn!("{message}");
        }
    }

    pub fn error(&self, message: impl Display) {
        tracing::error!("{message}");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

/// Restores the logger's level on drop when the override took effect
#[must_use = "the level is restored as soon as the guard is dropped"]
pub struct LevelOverride<'a> {
    logger: &'a Logger,
    active: bool,
}

impl LevelOverride<'_> {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for LevelOverride<'_> {
    fn drop(&mut self) {
        if self.active {
            self.logger.reset_level();
        }
    }
}

/// Install the stderr `tracing` subscriber used by the binary.
///
/// `RUST_LOG` wins when set; otherwise every crate message passes and the
/// [`Logger`] threshold does the filtering.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sitemap_diff=trace"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}
