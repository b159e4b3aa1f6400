//! Error types for the calculator.
//!
//! Every failure is a rejected single computation: the caller shows the
//! message and waits for a corrected submission.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifies the input field an error refers to.  Names match the
/// camelCase keys of [`crate::models::CalculationInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CurrentGross,
    SalaryPeriod,
    Mode,
    TargetNetMonthlyGain,
    TargetPercentIncrease,
    WithholdingTaxRatePercent,
    Profile,
    CustomNetConversionRate,
    EmployerChargeRate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CurrentGross => "currentGross",
            Field::SalaryPeriod => "salaryPeriod",
            Field::Mode => "mode",
            Field::TargetNetMonthlyGain => "targetNetMonthlyGain",
            Field::TargetPercentIncrease => "targetPercentIncrease",
            Field::WithholdingTaxRatePercent => "withholdingTaxRatePercent",
            Field::Profile => "profile",
            Field::CustomNetConversionRate => "customNetConversionRate",
            Field::EmployerChargeRate => "employerChargeRate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// An input lies outside its domain (missing, non-finite or out of bounds).
    #[error("{field}: {reason}")]
    Validation { field: Field, reason: String },
    /// Inputs are individually valid but no gross increase can fund the target.
    #[error("the parameters produce an impossible calculation")]
    ImpossibleParameters,
}

impl CalcError {
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(field: Field) -> Self {
        Self::validation(field, "missing")
    }

    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            CalcError::Validation { field, .. } => Some(*field),
            CalcError::ImpossibleParameters => None,
        }
    }
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;
