//! Tests for the dossier server API
//!
//! Test categories:
//! - Phone validation properties
//! - HTTP endpoint integration via axum-test

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::api::is_valid_phone;

    proptest! {
        /// Property: ten or more digits always pass, with or without a plus
        #[test]
        fn long_digit_strings_are_valid(digits in "[0-9]{10,15}", plus in any::<bool>()) {
            let phone = if plus { format!("+{}", digits) } else { digits };
            prop_assert!(is_valid_phone(&phone));
        }

        /// Property: fewer than ten characters never pass
        #[test]
        fn short_numbers_are_rejected(digits in "[0-9]{1,9}") {
            prop_assert!(!is_valid_phone(&digits));
        }

        /// Property: letters anywhere are rejected
        #[test]
        fn letters_are_rejected(prefix in "[0-9]{5}", letter in "[a-zA-Z]", suffix in "[0-9]{5}") {
            let phone = format!("{}{}{}", prefix, letter, suffix);
            prop_assert!(!is_valid_phone(&phone));
        }
    }
}

#[cfg(test)]
mod http_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::sync::Arc;

    use axum_test::TestServer;
    use dossier_core::{get_page_count, DossierConfig, FAILURE_NOTICE};
    use dossier_types::Catalog;
    use pretty_assertions::assert_eq;
    use route_service::StaticRouteService;
    use serde_json::json;

    use crate::state::AppState;

    const CATALOG: &str = include_str!("../data/properties.json");

    fn create_state(config: DossierConfig) -> AppState {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        AppState::new(catalog, config, Arc::new(StaticRouteService))
    }

    /// Create a test server with the full router
    fn create_test_server() -> TestServer {
        TestServer::new(crate::build_router(create_state(DossierConfig::default()))).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "dossier-server");
    }

    #[tokio::test]
    async fn test_lists_catalog() {
        let server = create_test_server();
        let response = server.get("/api/properties").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 4);
        assert_eq!(json["properties"][0]["id"], "9");
    }

    #[tokio::test]
    async fn test_get_property() {
        let server = create_test_server();
        let response = server.get("/api/properties/godrej-woodscapes").await;
        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["title"], "Godrej Woodscapes");
        assert_eq!(json["fairValue"]["fairPrice"], 18200000.0);
    }

    #[tokio::test]
    async fn test_unknown_property_is_404() {
        let server = create_test_server();
        let response = server.get("/api/properties/nope").await;
        response.assert_status_not_found();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "PROPERTY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dossier_download() {
        let server = create_test_server();
        let response = server
            .post("/api/dossier")
            .json(&json!({
                "propertyId": "9",
                "userName": "Asha Rao",
                "userPhone": "9876543210",
                "userArea": "Yelahanka"
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"Propertyfie_Intel_Dossier_Embassy_Verde_-_Phase_Two.pdf\""
        );
        let bytes = response.as_bytes();
        assert_eq!(get_page_count(bytes).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_dossier_records_brochure_lead() {
        let server = create_test_server();
        server
            .post("/api/dossier")
            .json(&json!({
                "propertyId": "provident-flow",
                "userName": "Ravi",
                "userPhone": "9000000001"
            }))
            .await
            .assert_status_ok();

        let json = server.get("/api/leads").await.json::<serde_json::Value>();
        assert_eq!(json["count"], 1);
        assert_eq!(json["leads"][0]["type"], "Brochure");
        assert_eq!(json["leads"][0]["details"], "Asset: Provident Codename Flow");
        assert_eq!(json["leads"][0]["status"], "New");
    }

    #[tokio::test]
    async fn test_dossier_requires_viewer_name() {
        let server = create_test_server();
        let response = server
            .post("/api/dossier")
            .json(&json!({
                "propertyId": "9",
                "userName": "  ",
                "userPhone": "9876543210"
            }))
            .await;

        response.assert_status_bad_request();
        let leads = server.get("/api/leads").await.json::<serde_json::Value>();
        assert_eq!(leads["count"], 0);
    }

    #[tokio::test]
    async fn test_dossier_failure_returns_notice() {
        let mut config = DossierConfig::default();
        config.pricing.area_ratios = vec![1.0, 1.0, 1.0, 1.0];
        let server = TestServer::new(crate::build_router(create_state(config))).unwrap();

        let response = server
            .post("/api/dossier")
            .json(&json!({
                "propertyId": "9",
                "userName": "Asha",
                "userPhone": "9876543210"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], FAILURE_NOTICE);
        assert_eq!(json["code"], "DOSSIER_FAILED");
    }

    #[tokio::test]
    async fn test_enquiry_captured() {
        let server = create_test_server();
        let response = server
            .post("/api/enquiries")
            .json(&json!({
                "name": "Meera",
                "phone": "+91 98765 43210",
                "type": "Visit",
                "propertyName": "Godrej Woodscapes",
                "message": "Weekend slot"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["lead"]["type"], "Visit");
        assert_eq!(json["lead"]["details"], "Godrej Woodscapes - Weekend slot");
    }

    #[tokio::test]
    async fn test_enquiry_defaults_to_general_details() {
        let server = create_test_server();
        let response = server
            .post("/api/enquiries")
            .json(&json!({ "name": "Meera", "phone": "9876543210" }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["lead"]["type"], "Buy");
        assert_eq!(json["lead"]["details"], "General Enquiry");
    }

    #[tokio::test]
    async fn test_enquiry_rejects_bad_phone() {
        let server = create_test_server();
        let response = server
            .post("/api/enquiries")
            .json(&json!({ "name": "Meera", "phone": "12345" }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "Valid contact number required.");
    }

    #[tokio::test]
    async fn test_eoi_requires_amount() {
        let server = create_test_server();
        let response = server
            .post("/api/enquiries")
            .json(&json!({ "name": "Meera", "phone": "9876543210", "type": "EOI" }))
            .await;
        response.assert_status_bad_request();

        let response = server
            .post("/api/enquiries")
            .json(&json!({
                "name": "Meera",
                "phone": "9876543210",
                "type": "EOI",
                "propertyName": "Embassy Verde",
                "unitType": "3 BHK",
                "residentStatus": "NRI",
                "amount": "200000"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["lead"]["details"], "Embassy Verde | 3 BHK | NRI | Amt: 200000");
    }

    #[tokio::test]
    async fn test_visit_in_past_rejected() {
        let server = create_test_server();
        let response = server
            .post("/api/enquiries")
            .json(&json!({
                "name": "Meera",
                "phone": "9876543210",
                "type": "Visit",
                "date": "2020-01-01"
            }))
            .await;
        response.assert_status_bad_request();
    }
}
