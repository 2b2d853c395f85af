//! Fair-value decoder lines

use dossier_types::{FairValue, PropertyRecord};

use crate::config::ValuationConfig;

const RUPEES_PER_LAKH: f64 = 100_000.0;

/// Amount in lakhs with two decimals, e.g. `13500000.0 -> "135.00"`.
pub fn format_lakhs(value: f64) -> String {
    format!("{:.2}", value / RUPEES_PER_LAKH)
}

/// The property's fair-value record, or the configured fallback benchmarked
/// at the listed price.
pub fn resolve_fair_value(property: &PropertyRecord, valuation: &ValuationConfig) -> FairValue {
    property.fair_value.unwrap_or(FairValue {
        market_average_per_area: valuation.fallback_market_average,
        project_premium_percent: valuation.fallback_project_premium_percent,
        fair_price: property.price,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationLine {
    pub label: &'static str,
    pub value: String,
    /// Drawn bold in the accent colour
    pub emphasis: bool,
}

pub fn valuation_lines(fair: &FairValue, valuation: &ValuationConfig) -> Vec<ValuationLine> {
    vec![
        ValuationLine {
            label: "Market Average (Regional Cluster)",
            value: format!("Rs. {:.0} /sqft", fair.market_average_per_area),
            emphasis: false,
        },
        ValuationLine {
            label: "Infrastructure Delta (Metro/Tech)",
            value: format!("+ {}% Premium", percent(valuation.infrastructure_premium_percent)),
            emphasis: false,
        },
        ValuationLine {
            label: "Developer/Amenity Tier Premium",
            value: format!("+ {}% Premium", percent(fair.project_premium_percent)),
            emphasis: false,
        },
        ValuationLine {
            label: "Propertyfie Fair-Valuation Benchmark",
            value: format!("Rs. {} Lakhs", format_lakhs(fair.fair_price)),
            emphasis: true,
        },
    ]
}

/// Whole percentages print without a fraction
fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
