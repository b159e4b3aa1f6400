//! Raw form submissions.
//!
//! A [`RawSubmission`] holds field values exactly as a form sends them:
//! optional strings.  [`RawSubmission::into_input`] checks presence and
//! number format and builds a [`CalculationInput`]; domain bounds are
//! left to [`crate::validation`].

use crate::error::{CalcError, CalcResult, Field};
use crate::models::{CalculationInput, CalculationMode, Profile, SalaryPeriod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubmission {
    /// `monthly` (default) or `yearly`.
    pub salary_period: Option<String>,
    pub salary_value: Option<String>,
    /// `target-net-gain` (default) or `target-percent-increase`.
    pub mode: Option<String>,
    pub target_net: Option<String>,
    pub target_percent: Option<String>,
    /// Blank means no withholding.
    pub tax_rate: Option<String>,
    pub profile: Option<String>,
    pub custom_net_rate: Option<String>,
    pub employer_charge_rate: Option<String>,
}

/// Treat empty and whitespace-only values as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a decimal number, accepting a comma as decimal separator.
pub fn parse_number(field: Field, raw: &str) -> CalcResult<f64> {
    let normalised = raw.trim().replace(',', ".");
    match normalised.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::validation(field, "not a finite number")),
    }
}

fn optional_number(field: Field, value: &Option<String>) -> CalcResult<Option<f64>> {
    present(value).map(|raw| parse_number(field, raw)).transpose()
}

fn required_number(field: Field, value: &Option<String>) -> CalcResult<f64> {
    optional_number(field, value)?.ok_or_else(|| CalcError::missing(field))
}

impl RawSubmission {
    pub fn into_input(self) -> CalcResult<CalculationInput> {
        let salary_period = match present(&self.salary_period) {
            Some(raw) => raw.parse::<SalaryPeriod>()?,
            None => SalaryPeriod::Monthly,
        };
        let mode = match present(&self.mode) {
            Some(raw) => raw.parse::<CalculationMode>()?,
            None => CalculationMode::TargetNetGain,
        };
        let profile = present(&self.profile)
            .ok_or_else(|| CalcError::missing(Field::Profile))?
            .parse::<Profile>()?;

        let custom_net_conversion_rate = match profile {
            Profile::Custom => Some(required_number(Field::CustomNetConversionRate, &self.custom_net_rate)?),
            _ => None,
        };

        let (target_net_monthly_gain, target_percent_increase) = match mode {
            CalculationMode::TargetNetGain => {
                (Some(required_number(Field::TargetNetMonthlyGain, &self.target_net)?), None)
            }
            CalculationMode::TargetPercentIncrease => {
                (None, Some(required_number(Field::TargetPercentIncrease, &self.target_percent)?))
            }
        };

        Ok(CalculationInput {
            current_gross: required_number(Field::CurrentGross, &self.salary_value)?,
            salary_period,
            mode,
            target_net_monthly_gain,
            target_percent_increase,
            withholding_tax_rate_percent: optional_number(Field::WithholdingTaxRatePercent, &self.tax_rate)?
                .unwrap_or(0.0),
            profile,
            custom_net_conversion_rate,
            employer_charge_rate: optional_number(Field::EmployerChargeRate, &self.employer_charge_rate)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> RawSubmission {
        RawSubmission {
            salary_value: Some("3000".into()),
            target_net: Some("200".into()),
            tax_rate: Some("10".into()),
            profile: Some("non-cadre".into()),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_submission_uses_form_defaults() {
        let input = submission().into_input().unwrap();
        assert_eq!(input, CalculationInput::target_net(3000.0, 200.0, 10.0, Profile::NonManagerDefault));
    }

    #[test]
    fn blank_tax_rate_means_zero() {
        let mut raw = submission();
        raw.tax_rate = Some("  ".into());
        assert_eq!(raw.into_input().unwrap().withholding_tax_rate_percent, 0.0);
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        let mut raw = submission();
        raw.profile = Some("custom".into());
        raw.custom_net_rate = Some("0,72".into());
        assert_eq!(raw.into_input().unwrap().custom_net_conversion_rate, Some(0.72));
    }

    #[test]
    fn custom_rate_is_ignored_for_default_profiles() {
        let mut raw = submission();
        raw.custom_net_rate = Some("abc".into());
        assert_eq!(raw.into_input().unwrap().custom_net_conversion_rate, None);
    }

    #[test]
    fn missing_and_malformed_fields_are_reported() {
        let mut raw = submission();
        raw.salary_value = None;
        assert_eq!(raw.into_input().unwrap_err(), CalcError::missing(Field::CurrentGross));

        let mut raw = submission();
        raw.target_net = Some("lots".into());
        assert_eq!(
            raw.into_input().unwrap_err(),
            CalcError::validation(Field::TargetNetMonthlyGain, "not a finite number")
        );

        let mut raw = submission();
        raw.salary_value = Some("inf".into());
        assert_eq!(raw.into_input().unwrap_err().field(), Some(Field::CurrentGross));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let mut raw = submission();
        raw.profile = Some("intern".into());
        assert_eq!(raw.into_input().unwrap_err().field(), Some(Field::Profile));

        let mut raw = submission();
        raw.salary_period = Some("weekly".into());
        assert_eq!(raw.into_input().unwrap_err().field(), Some(Field::SalaryPeriod));
    }

    #[test]
    fn percent_mode_reads_target_percent() {
        let mut raw = submission();
        raw.mode = Some("target-percent-increase".into());
        raw.target_net = None;
        raw.target_percent = Some("5".into());
        let input = raw.into_input().unwrap();
        assert_eq!(input.target_percent_increase, Some(5.0));
        assert_eq!(input.target_net_monthly_gain, None);
    }
}
