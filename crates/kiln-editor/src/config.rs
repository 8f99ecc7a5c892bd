//! Editor settings.
//!
//! Defaults are compiled in; a few can be overridden from the environment:
//!
//! | Variable                 | Field               | Default              |
//! |--------------------------|---------------------|----------------------|
//! | `KILN_QUIT_TIMES`        | `quit_times`        | 3                    |
//! | `KILN_MESSAGE_TIMEOUT`   | `message_timeout`   | 4 (seconds)          |
//! | `KILN_PROTOTYPE_PATTERN` | `prototype_pattern` | [`DEFAULT_PROTOTYPE_PATTERN`] |
//!
//! A value that does not parse is ignored with a warning.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Matches a C function definition header, capturing the signature in
/// group 1: return type and name, then a parameter list with no nested
/// parentheses, optionally followed by `{`.
pub const DEFAULT_PROTOTYPE_PATTERN: &str =
    r"^([A-Za-z_][A-Za-z0-9_\s\*]*?[\s\*]\*?[A-Za-z_][A-Za-z0-9_]*\s*\([^;{}()]*\))\s*\{?\s*$";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays in the message bar.
    pub message_timeout: Duration,
    /// Regex used by the prototype generator when the prompt is left empty.
    pub prototype_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quit_times: 3,
            message_timeout: Duration::from_secs(4),
            prototype_pattern: DEFAULT_PROTOTYPE_PATTERN.to_owned(),
        }
    }
}

impl Config {
    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults with overrides from `lookup(name)`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(times) = parse_var(&lookup, "KILN_QUIT_TIMES") {
            config.quit_times = times;
        }
        if let Some(secs) = parse_var(&lookup, "KILN_MESSAGE_TIMEOUT") {
            config.message_timeout = Duration::from_secs(secs);
        }
        if let Some(pattern) = lookup("KILN_PROTOTYPE_PATTERN").filter(|p| !p.trim().is_empty()) {
            config.prototype_pattern = pattern;
        }
        config
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let value = lookup(name)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(name, value, "ignoring unparsable setting");
            None
        }
    }
}
