//! Stack capture configuration
//!
//! Read once from the environment the first time a stack is captured:
//! - `ERRCHAIN_STACK` - `1`, `true`, `on`, `full` enable capture (default);
//!   `0`, `false`, `off` disable it
//! - `ERRCHAIN_STACK_DEPTH` - positive integer limiting frames per capture
//!
//! Capture is unavailable altogether when the `full-backtrace` feature is
//! disabled.

use once_cell::sync::Lazy;

/// Environment variable toggling stack capture
pub const STACK_ENV: &str = "ERRCHAIN_STACK";

/// Environment variable limiting the number of frames per capture
pub const STACK_DEPTH_ENV: &str = "ERRCHAIN_STACK_DEPTH";

static GLOBAL: Lazy<StackConfig> = Lazy::new(StackConfig::from_env);

/// Errors raised while parsing stack configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An on/off variable held something else
    #[error("invalid value {value:?} for {var}: expected 1, true, on, full, 0, false or off")]
    InvalidToggle {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
    },

    /// A depth variable was not a positive integer
    #[error("invalid value {value:?} for {var}: expected a positive integer")]
    InvalidDepth {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
    },
}

/// Settings for [`crate::Stack::capture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct StackConfig {
    /// Whether stacks are captured at all
    pub enabled: bool,

    /// Upper bound on frames per capture, unbounded when `None`
    pub max_frames: Option<usize>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "full-backtrace"),
            max_frames: None,
        }
    }
}

impl StackConfig {
    /// The process-wide configuration, read from the environment on first use
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Read the configuration from the process environment
    ///
    /// Invalid values are logged and replaced by their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup, falling back
    /// to the default for each invalid value
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = parse_toggle(STACK_ENV, lookup(STACK_ENV)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring stack configuration");
            None
        });
        let max_frames = parse_depth(STACK_DEPTH_ENV, lookup(STACK_DEPTH_ENV)).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring stack configuration");
            None
        });
        Self {
            enabled: defaults.enabled && enabled.unwrap_or(true),
            max_frames: max_frames.or(defaults.max_frames),
        }
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns [`ConfigError`] for the first variable holding an invalid value.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = parse_toggle(STACK_ENV, lookup(STACK_ENV))?;
        let max_frames = parse_depth(STACK_DEPTH_ENV, lookup(STACK_DEPTH_ENV))?;
        Ok(Self {
            enabled: defaults.enabled && enabled.unwrap_or(true),
            max_frames: max_frames.or(defaults.max_frames),
        })
    }
}

fn parse_toggle(var: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Ok(None),
        "1" | "true" | "on" | "full" => Ok(Some(true)),
        "0" | "false" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidToggle { var, value }),
    }
}

fn parse_depth(var: &'static str, value: Option<String>) -> Result<Option<usize>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(Some(depth)),
        _ => Err(ConfigError::InvalidDepth { var, value }),
    }
}
