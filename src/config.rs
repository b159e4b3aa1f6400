//! Runtime settings.
//!
//! Settings come from the environment; command line flags override
//! them in `main`.
//!
//! | Variable           | Default          |
//! |--------------------|------------------|
//! | `RAISE_BIND_ADDR`  | `127.0.0.1:3000` |
//! | `RAISE_RATES_FILE` | built-in rates   |

use crate::rates::RateTable;
use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    pub rates_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            rates_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Settings {
            bind_addr: lookup("RAISE_BIND_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            rates_file: lookup("RAISE_RATES_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// The rate table to use: the configured file, or the defaults.
    pub fn load_rates(&self) -> Result<RateTable> {
        match &self.rates_file {
            Some(path) => RateTable::load(path),
            None => Ok(RateTable::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn unset_variables_use_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.load_rates().unwrap(), RateTable::default());
    }

    #[test]
    fn variables_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("RAISE_BIND_ADDR", "0.0.0.0:8080"),
            ("RAISE_RATES_FILE", "/etc/raise/rates.json"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.rates_file, Some(PathBuf::from("/etc/raise/rates.json")));
    }
}
