//! Net-conversion rates.
//!
//! A [`RateTable`] maps each [`Profile`] to the fraction of gross
//! salary paid out as net before withholding.  The default table
//! carries the usual French private-sector ratios; a deployment may
//! override them with a JSON file of the form
//! `{"nonManager": 0.78, "manager": 0.75}`.

use crate::error::{CalcError, Field};
use crate::models::Profile;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lowest accepted net-conversion rate.
pub const MIN_NET_RATE: f64 = 0.60;
/// Highest accepted net-conversion rate.
pub const MAX_NET_RATE: f64 = 0.90;

pub const DEFAULT_NON_MANAGER_RATE: f64 = 0.78;
pub const DEFAULT_MANAGER_RATE: f64 = 0.75;

/// Returns `true` when `rate` lies in `[MIN_NET_RATE, MAX_NET_RATE]`.
pub fn is_valid_net_rate(rate: f64) -> bool {
    (MIN_NET_RATE..=MAX_NET_RATE).contains(&rate)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub non_manager: f64,
    pub manager: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            non_manager: DEFAULT_NON_MANAGER_RATE,
            manager: DEFAULT_MANAGER_RATE,
        }
    }
}

impl RateTable {
    /// Resolve the net-conversion rate for `profile`.
    ///
    /// Only the custom profile reads `custom`; it must be present and
    /// within bounds.  The custom value is never replaced by a default.
    pub fn resolve(&self, profile: Profile, custom: Option<f64>) -> Result<f64, CalcError> {
        match profile {
            Profile::NonManagerDefault => Ok(self.non_manager),
            Profile::ManagerDefault => Ok(self.manager),
            Profile::Custom => {
                let rate = custom.ok_or_else(|| CalcError::missing(Field::CustomNetConversionRate))?;
                if is_valid_net_rate(rate) {
                    Ok(rate)
                } else {
                    Err(CalcError::validation(
                        Field::CustomNetConversionRate,
                        "out of [0.60,0.90]",
                    ))
                }
            }
        }
    }

    /// Parse a rate table from JSON, rejecting rates outside the accepted range.
    pub fn from_json(data: &str) -> Result<Self> {
        let table: RateTable = serde_json::from_str(data)?;
        for (name, rate) in [("nonManager", table.non_manager), ("manager", table.manager)] {
            if !is_valid_net_rate(rate) {
                bail!("rate '{}' = {} is outside [{}, {}]", name, rate, MIN_NET_RATE, MAX_NET_RATE);
            }
        }
        Ok(table)
    }

    /// Load a rate table from a JSON file.
    ///
    /// A path that does not exist yields the default table; a file that
    /// exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "rates file not found, using default rates");
            return Ok(RateTable::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rates file {}", path.display()))?;
        let table = Self::from_json(&data)
            .with_context(|| format!("invalid rates file {}", path.display()))?;
        tracing::info!(path = %path.display(), ?table, "loaded net-conversion rates");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiles_resolve_to_table_rates() {
        let table = RateTable::default();
        assert_eq!(table.resolve(Profile::NonManagerDefault, None).unwrap(), 0.78);
        assert_eq!(table.resolve(Profile::ManagerDefault, Some(0.95)).unwrap(), 0.75);
    }

    #[test]
    fn custom_profile_requires_rate_in_bounds() {
        let table = RateTable::default();
        assert_eq!(table.resolve(Profile::Custom, Some(0.60)).unwrap(), 0.60);
        assert_eq!(table.resolve(Profile::Custom, Some(0.90)).unwrap(), 0.90);
        assert_eq!(
            table.resolve(Profile::Custom, Some(0.95)).unwrap_err(),
            CalcError::validation(Field::CustomNetConversionRate, "out of [0.60,0.90]")
        );
        assert_eq!(
            table.resolve(Profile::Custom, None).unwrap_err(),
            CalcError::missing(Field::CustomNetConversionRate)
        );
        assert!(table.resolve(Profile::Custom, Some(f64::NAN)).is_err());
        assert!(table.resolve(Profile::Custom, Some(0.0)).is_err());
    }

    #[test]
    fn rate_file_is_validated() {
        let table = RateTable::from_json(r#"{"nonManager": 0.80, "manager": 0.77}"#).unwrap();
        assert_eq!(table.non_manager, 0.80);
        assert_eq!(table.manager, 0.77);
        assert!(RateTable::from_json(r#"{"nonManager": 1.2, "manager": 0.77}"#).is_err());
        assert!(RateTable::from_json("not json").is_err());
    }

    #[test]
    fn missing_rate_file_falls_back_to_defaults() {
        let table = RateTable::load(Path::new("/nonexistent/rates.json")).unwrap();
        assert_eq!(table, RateTable::default());
    }
}
