//! Data models for the Raise Engine.
//!
//! The `models` module defines the serialisable value records passed
//! into and out of the calculator.  They are created on each
//! submission, consumed by the presentation layer and then discarded;
//! nothing here is persisted.

use crate::error::{CalcError, Field};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of monthly payments assumed per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Whether the supplied gross salary is a monthly or a yearly figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    /// The figure is paid every month.
    #[default]
    Monthly,
    /// The figure covers a full year of twelve monthly payments.
    Yearly,
}

impl SalaryPeriod {
    /// Normalise a gross salary expressed in this period to a monthly figure.
    pub fn to_monthly(self, gross: f64) -> f64 {
        match self {
            SalaryPeriod::Monthly => gross,
            SalaryPeriod::Yearly => gross / MONTHS_PER_YEAR,
        }
    }
}

impl FromStr for SalaryPeriod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monthly" => Ok(SalaryPeriod::Monthly),
            "yearly" => Ok(SalaryPeriod::Yearly),
            other => Err(CalcError::validation(
                Field::SalaryPeriod,
                format!("unknown salary period '{}'", other),
            )),
        }
    }
}

/// Which forward calculation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    /// Find the gross increase that yields a given net monthly gain.
    #[default]
    TargetNetGain,
    /// Find the net gain produced by a given percentage increase.
    TargetPercentIncrease,
}

impl FromStr for CalculationMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "target-net-gain" => Ok(CalculationMode::TargetNetGain),
            "target-percent-increase" => Ok(CalculationMode::TargetPercentIncrease),
            other => Err(CalcError::validation(
                Field::Mode,
                format!("unknown mode '{}'", other),
            )),
        }
    }
}

/// Employment profile, selecting where the net-conversion rate comes from.
///
/// The French form labels (`non-cadre`, `cadre`) are accepted as
/// aliases of the English tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Non-manager employee (`non-cadre`); uses the table's non-manager rate.
    #[serde(rename = "non-manager", alias = "non-cadre")]
    NonManagerDefault,
    /// Manager (`cadre`); higher social contributions, lower net rate.
    #[serde(rename = "manager", alias = "cadre")]
    ManagerDefault,
    /// The user supplies the rate in `custom_net_conversion_rate`.
    Custom,
}

impl FromStr for Profile {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "non-manager" | "non-cadre" => Ok(Profile::NonManagerDefault),
            "manager" | "cadre" => Ok(Profile::ManagerDefault),
            "custom" => Ok(Profile::Custom),
            other => Err(CalcError::validation(
                Field::Profile,
                format!("unknown profile '{}'", other),
            )),
        }
    }
}

/// Input to the calculator.
///
/// Optional fields are required only by some modes or profiles; see
/// [`crate::validation::validate`] for the exact rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Current gross salary, monthly or yearly according to `salary_period`.
    pub current_gross: f64,
    /// Whether `current_gross` is a monthly or a yearly figure.
    pub salary_period: SalaryPeriod,
    /// Which forward calculation to run.
    pub mode: CalculationMode,
    /// Desired take-home increase per month, after withholding.
    pub target_net_monthly_gain: Option<f64>,
    /// Desired gross increase in percent.
    pub target_percent_increase: Option<f64>,
    /// Withholding tax (PAS) rate, in percent.
    pub withholding_tax_rate_percent: f64,
    /// Employment profile selecting the net-conversion rate.
    pub profile: Profile,
    /// Fraction of gross kept as net before withholding, for `Profile::Custom`.
    pub custom_net_conversion_rate: Option<f64>,
    /// Employer social charges as a fraction of gross.  When present the
    /// result carries employer cost figures.
    pub employer_charge_rate: Option<f64>,
}

impl CalculationInput {
    /// Input for the target-net-gain mode with no employer variant.
    pub fn target_net(current_gross: f64, target: f64, tax_percent: f64, profile: Profile) -> Self {
        CalculationInput {
            current_gross,
            salary_period: SalaryPeriod::Monthly,
            mode: CalculationMode::TargetNetGain,
            target_net_monthly_gain: Some(target),
            target_percent_increase: None,
            withholding_tax_rate_percent: tax_percent,
            profile,
            custom_net_conversion_rate: None,
            employer_charge_rate: None,
        }
    }

    /// Input for the percent-increase mode with no employer variant.
    pub fn percent(current_gross: f64, percent: f64, tax_percent: f64, profile: Profile) -> Self {
        CalculationInput {
            mode: CalculationMode::TargetPercentIncrease,
            target_net_monthly_gain: None,
            target_percent_increase: Some(percent),
            ..Self::target_net(current_gross, 0.0, tax_percent, profile)
        }
    }
}

/// Figures derived from a [`CalculationInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// The calculation that produced these figures.
    pub mode: CalculationMode,
    /// Gross increase per month.
    pub gross_monthly_increase: f64,
    /// Gross increase over a year; always the monthly increase times twelve.
    pub gross_yearly_increase: f64,
    /// Gross increase relative to the current monthly gross, in percent.
    pub percent_increase: f64,
    /// Monthly net gain before withholding tax.
    pub net_monthly_gain_before_tax: f64,
    /// Monthly take-home gain once withholding tax is deducted.
    pub net_monthly_gain_after_tax: f64,
    /// Yearly take-home gain; the monthly figure times twelve.
    pub net_yearly_gain_after_tax: f64,
    /// Monthly gross salary after the increase.
    pub new_gross_monthly: f64,
    /// Yearly gross salary after the increase.
    pub new_gross_yearly: f64,
    /// Monthly cost of the increase to the employer, charges included.
    /// Present only when an employer charge rate was supplied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub employer_monthly_cost: Option<f64>,
    /// Yearly counterpart of `employer_monthly_cost`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub employer_yearly_cost: Option<f64>,
    /// Current gross salary normalised to a month.
    pub current_gross_monthly: f64,
    /// Net-conversion rate actually applied.
    pub net_conversion_rate: f64,
    /// Current monthly take-home pay after withholding.
    pub current_net_monthly_after_tax: f64,
    /// Monthly take-home pay after withholding once the increase applies.
    pub new_net_monthly_after_tax: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearly_salary_is_normalised_to_monthly() {
        assert_eq!(SalaryPeriod::Yearly.to_monthly(42000.0), 3500.0);
        assert_eq!(SalaryPeriod::Monthly.to_monthly(3500.0), 3500.0);
    }

    #[test]
    fn profile_tags_accept_french_aliases() {
        assert_eq!("cadre".parse::<Profile>().unwrap(), Profile::ManagerDefault);
        assert_eq!("non-manager".parse::<Profile>().unwrap(), Profile::NonManagerDefault);
        let err = "freelance".parse::<Profile>().unwrap_err();
        assert_eq!(err.field(), Some(Field::Profile));
    }

    #[test]
    fn input_deserialises_from_camel_case_json() {
        let input: CalculationInput = serde_json::from_value(serde_json::json!({
            "currentGross": 3000.0,
            "salaryPeriod": "monthly",
            "mode": "target-net-gain",
            "targetNetMonthlyGain": 200.0,
            "targetPercentIncrease": null,
            "withholdingTaxRatePercent": 10.0,
            "profile": "non-cadre",
            "customNetConversionRate": null,
            "employerChargeRate": null
        }))
        .unwrap();
        assert_eq!(input, CalculationInput::target_net(3000.0, 200.0, 10.0, Profile::NonManagerDefault));
    }
}
