//! Offering matrix tiers derived from a single listed unit

use dossier_types::PropertyRecord;
use serde::Serialize;

use crate::config::PricingConfig;
use crate::valuation::format_lakhs;

pub const MATRIX_HEADER: [&str; 3] = ["CONFIGURATION TYPE", "SIZE (SQ.FT)", "ESTIMATED ENTRY*"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingTier {
    pub label: String,
    pub area_sqft: f64,
    pub price: f64,
}

impl PricingTier {
    pub fn area_display(&self) -> String {
        format!("{:.0}", self.area_sqft.round())
    }

    pub fn price_display(&self) -> String {
        format!("Rs. {} Lakhs+", format_lakhs(self.price))
    }
}

/// Four ascending configurations around the listed unit.
///
/// Ratios must already be validated; see [`PricingConfig::validate`].
pub fn pricing_tiers(property: &PropertyRecord, pricing: &PricingConfig) -> Vec<PricingTier> {
    let beds = property.beds;
    let labels = [
        format!("{} BHK Executive", beds.saturating_sub(1).max(1)),
        format!("{} BHK Premium", beds),
        format!("{} BHK Luxury", beds),
        format!("{} BHK Zenith", beds + 1),
    ];

    labels
        .into_iter()
        .zip(pricing.area_ratios.iter().zip(&pricing.price_ratios))
        .map(|(label, (area, price))| PricingTier {
            label,
            area_sqft: property.sqft * area,
            price: property.price * price,
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::tests::listing;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: both columns strictly increase across the four tiers
        #[test]
        fn tiers_are_monotonic(
            beds in 0u32..8,
            sqft in 100.0f64..20_000.0,
            price in 100_000.0f64..1e9,
        ) {
            let tiers = pricing_tiers(&listing(beds, sqft, price), &PricingConfig::default());
            prop_assert_eq!(tiers.len(), 4);
            for pair in tiers.windows(2) {
                prop_assert!(pair[1].area_sqft > pair[0].area_sqft);
                prop_assert!(pair[1].price > pair[0].price);
            }
        }
    }
}
