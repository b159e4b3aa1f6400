//! Display formatting and negotiation text.
//!
//! Amounts are shown the way a French browser formats euros
//! (`3 000,00 €`): a narrow no-break space between thousands and a
//! no-break space before the currency sign.
//!
//! Euros and percentages share one rounding rule: the exact binary
//! value of the `f64` is rounded to two decimals, half away from zero.
//! `1.005` is stored just below the midpoint and shows as `1,00`;
//! `0.125` is exact and shows as `0.13`.

use crate::models::{CalculationInput, CalculationMode, CalculationResult, SalaryPeriod};
use rust_decimal::{Decimal, RoundingStrategy};

const THOUSANDS_SEPARATOR: char = '\u{202f}';
const CURRENCY_SEPARATOR: char = '\u{a0}';

/// Round to two decimals, keeping the scale at exactly two.
/// `None` for values a `Decimal` cannot hold (non-finite or beyond ~7.9e28).
fn round_to_cents(value: f64) -> Option<Decimal> {
    let mut rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Some(rounded)
}

/// Format an amount in euros, fr-FR style.
pub fn format_euro(value: f64) -> String {
    let Some(rounded) = round_to_cents(value) else {
        return format!("{}{}€", value, CURRENCY_SEPARATOR);
    };

    let text = rounded.abs().to_string();
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{},{}{}€", sign, grouped, cents, CURRENCY_SEPARATOR)
}

/// Format a percentage with two decimals, e.g. `9.50 %`.
pub fn format_percent(value: f64) -> String {
    match round_to_cents(value) {
        Some(rounded) if rounded.is_zero() => "0.00 %".to_string(),
        Some(rounded) => format!("{} %", rounded),
        None => format!("{} %", value),
    }
}

/// Copyable text the user can bring to a salary negotiation.
pub fn negotiation_text(input: &CalculationInput, result: &CalculationResult) -> String {
    let current = match input.salary_period {
        SalaryPeriod::Monthly => format!("{} brut/mois", format_euro(input.current_gross)),
        SalaryPeriod::Yearly => format!("{} brut/an", format_euro(input.current_gross)),
    };

    let mut text = match result.mode {
        CalculationMode::TargetNetGain => format!(
            "Pour gagner +{} net/mois (après impôt), je dois demander environ +{} brut/mois, soit +{} (sur un brut actuel de {}).",
            format_euro(result.net_monthly_gain_after_tax),
            format_euro(result.gross_monthly_increase),
            format_percent(result.percent_increase),
            current,
        ),
        CalculationMode::TargetPercentIncrease => format!(
            "Avec une augmentation de +{} (+{} brut/mois), mon gain net serait d'environ +{} net/mois après impôt (sur un brut actuel de {}).",
            format_percent(result.percent_increase),
            format_euro(result.gross_monthly_increase),
            format_euro(result.net_monthly_gain_after_tax),
            current,
        ),
    };

    if let Some(cost) = result.employer_monthly_cost {
        text.push_str(&format!(" Coût employeur estimé : +{}/mois.", format_euro(cost)));
    }
    text
}
