use serde::{Deserialize, Serialize};

/// A listed property as supplied by the catalog.
///
/// `price` and `FairValue::fair_price` share one currency unit (rupees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub address: String,
    pub beds: u32,
    pub baths: u32,
    /// Super built-up area in square feet
    pub sqft: f64,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rera_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fair_value: Option<FairValue>,
}

/// Fair-value benchmark inputs for a property.
///
/// Serialized with the front end's keys (`marketAverage`, `projectPremium`,
/// `fairPrice`); the longer field names are still accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairValue {
    /// Regional market average, per square foot
    #[serde(rename = "marketAverage", alias = "marketAveragePerArea")]
    pub market_average_per_area: f64,
    /// Developer/amenity tier premium, whole percent
    #[serde(rename = "projectPremium", alias = "projectPremiumPercent")]
    pub project_premium_percent: f64,
    pub fair_price: f64,
}

impl PropertyRecord {
    /// Returns a non-empty developer name, if one is recorded.
    pub fn developer_name(&self) -> Option<&str> {
        non_blank(self.developer.as_deref())
    }

    pub fn rera(&self) -> Option<&str> {
        non_blank(self.rera_id.as_deref())
    }

    pub fn completion(&self) -> Option<&str> {
        non_blank(self.completion_year.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBASSY_VERDE: &str = r#"{
        "id": "9",
        "title": "Embassy Verde - Phase Two",
        "price": 12100000,
        "address": "Hebbal North, Bengaluru",
        "beds": 3,
        "baths": 3,
        "sqft": 1344,
        "type": "Apartment",
        "imageUrl": "https://example.com/verde.jpg",
        "description": "AN ELITE OPPORTUNITY.",
        "features": ["Elite Pet Park"],
        "coordinates": { "lat": 13.06, "lng": 77.59 },
        "developer": "Embassy Group",
        "completionYear": "2028 (Est)",
        "reraId": "PRM/KA/RERA/APPLYING/2025",
        "totalFloors": 18,
        "fairValue": { "marketAverage": 11000, "projectPremium": 5, "fairPrice": 13500000 }
    }"#;

    #[test]
    fn test_parses_front_end_export() {
        let record: PropertyRecord = serde_json::from_str(EMBASSY_VERDE).unwrap();
        assert_eq!(record.title, "Embassy Verde - Phase Two");
        assert_eq!(record.total_floors, Some(18));
        assert_eq!(record.completion_year.as_deref(), Some("2028 (Est)"));

        let fv = record.fair_value.unwrap();
        assert_eq!(fv.market_average_per_area, 11000.0);
        assert_eq!(fv.project_premium_percent, 5.0);
        assert_eq!(fv.fair_price, 13500000.0);
    }

    #[test]
    fn test_fair_value_keeps_front_end_keys() {
        let record: PropertyRecord = serde_json::from_str(EMBASSY_VERDE).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json["fairValue"],
            serde_json::json!({ "marketAverage": 11000.0, "projectPremium": 5.0, "fairPrice": 13500000.0 })
        );

        let long: FairValue = serde_json::from_str(
            r#"{ "marketAveragePerArea": 9500, "projectPremiumPercent": 10, "fairPrice": 1 }"#,
        )
        .unwrap();
        assert_eq!(long.market_average_per_area, 9500.0);
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{
            "id": "x", "title": "Plot", "price": 100000, "address": "Somewhere",
            "beds": 1, "baths": 1, "sqft": 400, "description": ""
        }"#;
        let record: PropertyRecord = serde_json::from_str(json).unwrap();
        assert!(record.features.is_empty());
        assert!(record.developer.is_none());
        assert!(record.fair_value.is_none());
    }

    #[test]
    fn test_blank_developer_treated_as_missing() {
        let mut record: PropertyRecord = serde_json::from_str(EMBASSY_VERDE).unwrap();
        record.developer = Some("   ".to_string());
        assert_eq!(record.developer_name(), None);
        record.developer = Some("Embassy Group".to_string());
        assert_eq!(record.developer_name(), Some("Embassy Group"));
    }
}
