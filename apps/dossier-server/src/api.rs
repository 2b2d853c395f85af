//! API handlers for the dossier server
//!
//! Provides REST endpoints for:
//! - Catalog listing and lookup
//! - Dossier download (captures a brochure lead)
//! - Enquiry capture and the lead log

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use dossier_core::{build_dossier, DossierRequest};
use dossier_types::{Lead, LeadKind, PropertyRecord, ViewerInfo};
use lazy_static::lazy_static;
use regex::Regex;
use route_service::resolve_route_steps;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::ServerError;
use crate::state::AppState;

lazy_static! {
    /// Contact number: optional leading +, then at least ten digits, spaces or dashes
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+?[\d\s-]{10,}$").unwrap();
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "dossier-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct PropertyListResponse {
    pub success: bool,
    pub properties: Vec<PropertyRecord>,
    pub count: usize,
}

/// Handler: GET /api/properties
pub async fn handle_list_properties(State(state): State<AppState>) -> Json<PropertyListResponse> {
    let properties = state.catalog.properties().to_vec();
    let count = properties.len();
    Json(PropertyListResponse {
        success: true,
        properties,
        count,
    })
}

/// Handler: GET /api/properties/:id
pub async fn handle_get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyRecord>, ServerError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ServerError::PropertyNotFound(id))
}

/// Dossier download request, as sent by the brochure form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierApiRequest {
    pub property_id: String,
    pub user_name: String,
    pub user_phone: String,
    #[serde(default)]
    pub user_area: Option<String>,
}

/// Handler: POST /api/dossier
///
/// Records a brochure lead, resolves commute steps when an origin area is
/// given, then responds with the PDF as an attachment.
pub async fn handle_generate_dossier(
    State(state): State<AppState>,
    Json(request): Json<DossierApiRequest>,
) -> Result<Response, ServerError> {
    let property = state
        .catalog
        .get(&request.property_id)
        .cloned()
        .ok_or_else(|| ServerError::PropertyNotFound(request.property_id.clone()))?;

    let mut viewer = ViewerInfo::new(request.user_name, request.user_phone);
    if let Some(area) = request.user_area {
        viewer = viewer.with_area(area);
    }
    viewer
        .validate()
        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;

    state
        .leads
        .record(Lead::brochure(&viewer, &property.title))
        .await;

    let route_steps = match viewer.origin() {
        Some(origin) => {
            Some(resolve_route_steps(state.routes.as_ref(), origin, &property.address).await)
        }
        None => None,
    };

    let mut dossier_request = DossierRequest::new(property, viewer);
    if let Some(steps) = route_steps {
        debug!("Resolved {} commute steps", steps.len());
        dossier_request = dossier_request.with_route_steps(steps);
    }

    let dossier = build_dossier(&dossier_request, &state.config).map_err(|e| {
        error!("Dossier generation failed: {}", e);
        ServerError::from(e)
    })?;
    info!(
        "Serving dossier {} ({} bytes)",
        dossier.file_name,
        dossier.bytes.len()
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        dossier.file_name.replace('"', "_")
    ))
    .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        dossier.bytes,
    )
        .into_response())
}

/// Enquiry form submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    pub name: String,
    pub phone: String,
    #[serde(rename = "type", default = "default_enquiry_kind")]
    pub kind: LeadKind,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Requested visit date, for site visits
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub resident_status: Option<String>,
    /// Expression-of-interest cheque amount
    #[serde(default)]
    pub amount: Option<String>,
}

fn default_enquiry_kind() -> LeadKind {
    LeadKind::Buy
}

#[derive(Serialize)]
pub struct EnquiryResponse {
    pub success: bool,
    pub lead: Lead,
}

/// Handler: POST /api/enquiries
pub async fn handle_create_enquiry(
    State(state): State<AppState>,
    Json(request): Json<EnquiryRequest>,
) -> Result<(StatusCode, Json<EnquiryResponse>), ServerError> {
    let details = enquiry_details(&request)?;
    let lead = Lead::new(
        request.kind,
        request.name.trim(),
        request.phone.trim(),
        details,
    );
    state.leads.record(lead.clone()).await;

    Ok((
        StatusCode::CREATED,
        Json(EnquiryResponse {
            success: true,
            lead,
        }),
    ))
}

pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&compact)
}

fn enquiry_details(request: &EnquiryRequest) -> Result<String, ServerError> {
    if request.name.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Name is required.".to_string()));
    }
    if !is_valid_phone(&request.phone) {
        return Err(ServerError::InvalidRequest(
            "Valid contact number required.".to_string(),
        ));
    }

    let property = request.property_name.as_deref().map(str::trim);
    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    match request.kind {
        LeadKind::Eoi => {
            let amount = request
                .amount
                .as_deref()
                .map(str::trim)
                .filter(|a| a.parse::<f64>().is_ok())
                .ok_or_else(|| {
                    ServerError::InvalidRequest("Required for EOI submission.".to_string())
                })?;
            Ok(format!(
                "{} | {} | {} | Amt: {}",
                property.unwrap_or("VERDE"),
                request.unit_type.as_deref().unwrap_or("2 BHK"),
                request.resident_status.as_deref().unwrap_or("Indian"),
                amount
            ))
        }
        kind => {
            if kind == LeadKind::Visit {
                if let Some(date) = request.date {
                    if date < Utc::now().date_naive() {
                        return Err(ServerError::InvalidRequest(
                            "Please select a future date.".to_string(),
                        ));
                    }
                }
            }
            Ok(match property {
                Some(p) => format!("{} - {}", p, message.unwrap_or_default()),
                None => message.unwrap_or("General Enquiry").to_string(),
            })
        }
    }
}

#[derive(Serialize)]
pub struct LeadListResponse {
    pub success: bool,
    pub leads: Vec<Lead>,
    pub count: usize,
}

/// Handler: GET /api/leads
pub async fn handle_list_leads(State(state): State<AppState>) -> Json<LeadListResponse> {
    let leads = state.leads.all().await;
    let count = leads.len();
    Json(LeadListResponse {
        success: true,
        leads,
        count,
    })
}
