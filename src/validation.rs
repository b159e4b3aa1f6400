//! Bound checks for [`CalculationInput`].
//!
//! Out-of-range values are rejected with the field and the violated
//! bound; nothing is clamped.

use crate::error::{CalcError, CalcResult, Field};
use crate::models::{CalculationInput, CalculationMode, Profile};
use crate::rates::{is_valid_net_rate, RateTable};

/// Highest accepted withholding tax rate, in percent.
pub const MAX_TAX_RATE_PERCENT: f64 = 45.0;

/// Values checked and derived from a valid input, shared by both modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prepared {
    pub gross_monthly: f64,
    pub net_rate: f64,
    pub tax_fraction: f64,
}

fn positive(field: Field, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::validation(field, "not a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::validation(field, "must be greater than 0"));
    }
    Ok(value)
}

fn required_positive(field: Field, value: Option<f64>) -> CalcResult<f64> {
    positive(field, value.ok_or_else(|| CalcError::missing(field))?)
}

/// Validate `input` and resolve the values both calculation modes need.
///
/// The net-conversion rate is checked first so that an invalid custom
/// rate is reported whatever the other fields hold.  Table rates are
/// held to the same bounds as custom ones.
pub fn validate(input: &CalculationInput, rates: &RateTable) -> CalcResult<Prepared> {
    let net_rate = rates.resolve(input.profile, input.custom_net_conversion_rate)?;
    if !is_valid_net_rate(net_rate) {
        let field = match input.profile {
            Profile::Custom => Field::CustomNetConversionRate,
            _ => Field::Profile,
        };
        return Err(CalcError::validation(field, "out of [0.60,0.90]"));
    }

    let current_gross = positive(Field::CurrentGross, input.current_gross)?;

    match input.mode {
        CalculationMode::TargetNetGain => {
            required_positive(Field::TargetNetMonthlyGain, input.target_net_monthly_gain)?;
        }
        CalculationMode::TargetPercentIncrease => {
            required_positive(Field::TargetPercentIncrease, input.target_percent_increase)?;
        }
    }

    let tax = input.withholding_tax_rate_percent;
    if !(0.0..=MAX_TAX_RATE_PERCENT).contains(&tax) {
        return Err(CalcError::validation(
            Field::WithholdingTaxRatePercent,
            "out of [0,45]",
        ));
    }

    if let Some(charge) = input.employer_charge_rate {
        if !charge.is_finite() || charge < 0.0 {
            return Err(CalcError::validation(
                Field::EmployerChargeRate,
                "must be a finite number >= 0",
            ));
        }
    }

    Ok(Prepared {
        gross_monthly: input.salary_period.to_monthly(current_gross),
        net_rate,
        tax_fraction: tax / 100.0,
    })
}
