//! Runtime configuration.
//!
//! Read from the environment after `.env` is loaded. CLI flags override
//! these values.
//!
//! | Variable                      | Default | Meaning                            |
//! |-------------------------------|---------|------------------------------------|
//! | `MENUCHECK_PORT`              | `3000`  | HTTP port for `serve`              |
//! | `MENUCHECK_HIDE_EMPTY_COMBOS` | `false` | Drop combos without items          |
//! | `MENUCHECK_QUIET`             | `false` | Do not echo logs to stderr         |

use std::env;

pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_PORT: &str = "MENUCHECK_PORT";
pub const ENV_HIDE_EMPTY_COMBOS: &str = "MENUCHECK_HIDE_EMPTY_COMBOS";
pub const ENV_QUIET: &str = "MENUCHECK_QUIET";

/// Maximum upload size accepted by the HTTP API (bytes).
pub const MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub hide_empty_combos: bool,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            hide_empty_combos: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: lookup(ENV_PORT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            hide_empty_combos: lookup(ENV_HIDE_EMPTY_COMBOS)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.hide_empty_combos),
            quiet: lookup(ENV_QUIET)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.quiet),
        }
    }

    /// Combo suppression for one request: an explicit flag wins over the
    /// configured default.
    pub fn suppress_empty_combos(&self, hide: Option<bool>) -> bool {
        hide.unwrap_or(self.hide_empty_combos)
    }
}

/// `1/0`, `true/false`, `yes/no`, `on/off`, case-insensitive.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn test_values_read() {
        let config = Config::from_lookup(lookup(&[
            (ENV_PORT, "8080"),
            (ENV_HIDE_EMPTY_COMBOS, "Yes"),
            (ENV_QUIET, "1"),
        ]));
        assert_eq!(config.port, 8080);
        assert!(config.hide_empty_combos);
        assert!(config.quiet);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[(ENV_PORT, "http"), (ENV_QUIET, "maybe")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.quiet);
    }

    #[test]
    fn test_explicit_flag_overrides_hide_empty_default() {
        let config = Config::from_lookup(lookup(&[(ENV_HIDE_EMPTY_COMBOS, "true")]));
        assert!(config.suppress_empty_combos(None));
        assert!(!config.suppress_empty_combos(Some(false)));

        let config = Config::default();
        assert!(!config.suppress_empty_combos(None));
        assert!(config.suppress_empty_combos(Some(true)));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" OFF "), Some(false));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool(""), None);
    }
}
