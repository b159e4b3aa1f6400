//! Salary-adjustment computation engine.
//!
//! The `engine` module turns a [`CalculationInput`] into a
//! [`CalculationResult`].  Both calculation modes share the same
//! validation, normalisation and rate-resolution step
//! ([`crate::validation::validate`]) and differ only in the forward
//! formula.  Independent inputs may be computed in parallel with the
//! [`rayon`] crate; each computation is pure.

use crate::error::{CalcError, CalcResult, Field};
use crate::models::{CalculationInput, CalculationMode, CalculationResult, MONTHS_PER_YEAR};
use crate::rates::RateTable;
use crate::validation::{validate, Prepared};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Runs salary calculations against a fixed [`RateTable`].
///
/// The calculator holds no mutable state; share it by reference or
/// through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    rates: RateTable,
}

/// One point of a target-gain sweep, used to plot how the required
/// gross increase grows with the desired net gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub target_net_monthly_gain: f64,
    pub gross_monthly_increase: f64,
    pub percent_increase: f64,
}

impl Calculator {
    pub fn new(rates: RateTable) -> Self {
        Calculator { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Run the calculation selected by `input.mode`.
    pub fn compute(&self, input: &CalculationInput) -> CalcResult<CalculationResult> {
        match input.mode {
            CalculationMode::TargetNetGain => self.compute_from_target_net_gain(input),
            CalculationMode::TargetPercentIncrease => self.compute_from_percent_increase(input),
        }
    }

    /// Gross increase required to take home `target_net_monthly_gain`
    /// more per month after withholding.
    pub fn compute_from_target_net_gain(&self, input: &CalculationInput) -> CalcResult<CalculationResult> {
        let mut input = input.clone();
        input.mode = CalculationMode::TargetNetGain;
        let Prepared {
            gross_monthly,
            net_rate,
            tax_fraction,
        } = validate(&input, &self.rates)?;
        let target = input
            .target_net_monthly_gain
            .ok_or_else(|| CalcError::missing(Field::TargetNetMonthlyGain))?;

        let denominator = net_rate * (1.0 - tax_fraction);
        if denominator <= 0.0 {
            return Err(CalcError::ImpossibleParameters);
        }

        let gross_monthly_increase = target / denominator;
        let net_monthly_gain_after_tax = gross_monthly_increase * net_rate * (1.0 - tax_fraction);
        let new_gross_monthly = gross_monthly + gross_monthly_increase;
        let (employer_monthly_cost, employer_yearly_cost) =
            employer_cost(gross_monthly_increase, input.employer_charge_rate);

        tracing::debug!(gross_monthly, net_rate, tax_fraction, gross_monthly_increase, "target net gain computed");

        ensure_finite(CalculationResult {
            mode: CalculationMode::TargetNetGain,
            gross_monthly_increase,
            gross_yearly_increase: gross_monthly_increase * MONTHS_PER_YEAR,
            percent_increase: gross_monthly_increase / gross_monthly * 100.0,
            net_monthly_gain_before_tax: gross_monthly_increase * net_rate,
            net_monthly_gain_after_tax,
            net_yearly_gain_after_tax: net_monthly_gain_after_tax * MONTHS_PER_YEAR,
            new_gross_monthly,
            new_gross_yearly: new_gross_monthly * MONTHS_PER_YEAR,
            employer_monthly_cost,
            employer_yearly_cost,
            current_gross_monthly: gross_monthly,
            net_conversion_rate: net_rate,
            current_net_monthly_after_tax: gross_monthly * net_rate * (1.0 - tax_fraction),
            new_net_monthly_after_tax: new_gross_monthly * net_rate * (1.0 - tax_fraction),
        })
    }

    /// Net gain produced by raising gross salary by `target_percent_increase` percent.
    pub fn compute_from_percent_increase(&self, input: &CalculationInput) -> CalcResult<CalculationResult> {
        let mut input = input.clone();
        input.mode = CalculationMode::TargetPercentIncrease;
        let Prepared {
            gross_monthly,
            net_rate,
            tax_fraction,
        } = validate(&input, &self.rates)?;
        let percent = input
            .target_percent_increase
            .ok_or_else(|| CalcError::missing(Field::TargetPercentIncrease))?;

        let new_gross_monthly = gross_monthly * (1.0 + percent / 100.0);
        let gross_gain = new_gross_monthly - gross_monthly;

        let net_before_tax_old = gross_monthly * net_rate;
        let net_before_tax_new = new_gross_monthly * net_rate;
        let net_gain_before_tax = net_before_tax_new - net_before_tax_old;

        let pas_factor = 1.0 - tax_fraction;
        let net_after_tax_old = net_before_tax_old * pas_factor;
        let net_after_tax_new = net_before_tax_new * pas_factor;
        let net_gain_after_tax = net_after_tax_new - net_after_tax_old;

        let (employer_monthly_cost, employer_yearly_cost) =
            employer_cost(gross_gain, input.employer_charge_rate);

        tracing::debug!(gross_monthly, net_rate, tax_fraction, gross_gain, "percent increase computed");

        ensure_finite(CalculationResult {
            mode: CalculationMode::TargetPercentIncrease,
            gross_monthly_increase: gross_gain,
            gross_yearly_increase: gross_gain * MONTHS_PER_YEAR,
            percent_increase: percent,
            net_monthly_gain_before_tax: net_gain_before_tax,
            net_monthly_gain_after_tax: net_gain_after_tax,
            net_yearly_gain_after_tax: net_gain_after_tax * MONTHS_PER_YEAR,
            new_gross_monthly,
            new_gross_yearly: new_gross_monthly * MONTHS_PER_YEAR,
            employer_monthly_cost,
            employer_yearly_cost,
            current_gross_monthly: gross_monthly,
            net_conversion_rate: net_rate,
            current_net_monthly_after_tax: net_after_tax_old,
            new_net_monthly_after_tax: net_after_tax_new,
        })
    }

    /// Compute a batch of independent inputs in parallel.  Results keep
    /// the order of `inputs`; one failing input does not affect the others.
    pub fn run_batch(&self, inputs: &[CalculationInput]) -> Vec<CalcResult<CalculationResult>> {
        inputs.par_iter().map(|input| self.compute(input)).collect()
    }

    /// Required gross increase for each of `targets`, other parameters
    /// taken from `base`.  Any invalid target fails the whole sweep.
    pub fn sweep(&self, base: &CalculationInput, targets: &[f64]) -> CalcResult<Vec<SweepPoint>> {
        targets
            .par_iter()
            .map(|&target| {
                let input = CalculationInput {
                    mode: CalculationMode::TargetNetGain,
                    target_net_monthly_gain: Some(target),
                    ..base.clone()
                };
                let result = self.compute_from_target_net_gain(&input)?;
                Ok(SweepPoint {
                    target_net_monthly_gain: target,
                    gross_monthly_increase: result.gross_monthly_increase,
                    percent_increase: result.percent_increase,
                })
            })
            .collect()
    }
}

/// Reject results with a figure that overflowed `f64`; they cannot be
/// displayed or serialised.
fn ensure_finite(result: CalculationResult) -> CalcResult<CalculationResult> {
    let figures = [
        result.gross_monthly_increase,
        result.gross_yearly_increase,
        result.percent_increase,
        result.net_monthly_gain_before_tax,
        result.net_monthly_gain_after_tax,
        result.net_yearly_gain_after_tax,
        result.new_gross_monthly,
        result.new_gross_yearly,
        result.current_net_monthly_after_tax,
        result.new_net_monthly_after_tax,
    ];
    let employer = [result.employer_monthly_cost, result.employer_yearly_cost];
    if figures.iter().chain(employer.iter().flatten()).all(|v| v.is_finite()) {
        Ok(result)
    } else {
        Err(CalcError::ImpossibleParameters)
    }
}

/// Employer cost of a gross increase, when a charge rate was supplied.
fn employer_cost(gross_increase: f64, charge_rate: Option<f64>) -> (Option<f64>, Option<f64>) {
    match charge_rate {
        Some(rate) => {
            let monthly = gross_increase * (1.0 + rate);
            (Some(monthly), Some(monthly * MONTHS_PER_YEAR))
        }
        None => (None, None),
    }
}
