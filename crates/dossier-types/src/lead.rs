//! Lead records captured from enquiry and brochure requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::viewer::ViewerInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadKind {
    Buy,
    Sell,
    Visit,
    General,
    #[serde(rename = "EOI")]
    Eoi,
    Brochure,
}

impl LeadKind {
    fn prefix(self) -> &'static str {
        match self {
            LeadKind::Buy => "BUY",
            LeadKind::Sell => "SELL",
            LeadKind::Visit => "V",
            LeadKind::General => "G",
            LeadKind::Eoi => "EOI",
            LeadKind::Brochure => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: LeadKind,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub status: LeadStatus,
}

impl Lead {
    pub fn new(
        kind: LeadKind,
        name: impl Into<String>,
        phone: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}-{}", kind.prefix(), Uuid::new_v4().simple()),
            name: name.into(),
            phone: phone.into(),
            kind,
            details: details.into(),
            timestamp: Utc::now(),
            status: LeadStatus::New,
        }
    }

    /// Lead recorded when a viewer downloads a property dossier
    pub fn brochure(viewer: &ViewerInfo, property_title: &str) -> Self {
        Self::new(
            LeadKind::Brochure,
            viewer.name.trim(),
            viewer.phone.trim(),
            format!("Asset: {}", property_title),
        )
    }
}
