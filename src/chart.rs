//! Chart-ready series.
//!
//! The calculator does not draw anything; it hands a renderer the
//! labels and the before/after values to plot.

use crate::models::{CalculationResult, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};

pub const LABEL_GROSS_MONTHLY: &str = "Brut mensuel";
pub const LABEL_NET_MONTHLY: &str = "Net mensuel après PAS";
pub const LABEL_GROSS_YEARLY: &str = "Brut annuel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonChart {
    pub labels: Vec<String>,
    pub before: Vec<f64>,
    pub after: Vec<f64>,
}

impl ComparisonChart {
    /// Current versus new salary, one bar pair per label.
    pub fn from_result(result: &CalculationResult) -> Self {
        ComparisonChart {
            labels: vec![
                LABEL_GROSS_MONTHLY.to_string(),
                LABEL_NET_MONTHLY.to_string(),
                LABEL_GROSS_YEARLY.to_string(),
            ],
            before: vec![
                result.current_gross_monthly,
                result.current_net_monthly_after_tax,
                result.current_gross_monthly * MONTHS_PER_YEAR,
            ],
            after: vec![
                result.new_gross_monthly,
                result.new_net_monthly_after_tax,
                result.new_gross_yearly,
            ],
        }
    }
}
