use dossier_types::{PropertyRecord, RouteSteps, ViewerInfo};
use serde::{Deserialize, Serialize};

use crate::error::DossierError;

/// Everything the composer needs for one dossier.
///
/// Route steps must already be resolved; composition never waits on a remote
/// lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierRequest {
    pub property: PropertyRecord,
    pub viewer: ViewerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_steps: Option<RouteSteps>,
}

impl DossierRequest {
    pub fn new(property: PropertyRecord, viewer: ViewerInfo) -> Self {
        Self {
            property,
            viewer,
            route_steps: None,
        }
    }

    pub fn with_route_steps(mut self, steps: RouteSteps) -> Self {
        self.route_steps = Some(steps);
        self
    }

    /// Route steps worth a commute section, if any
    pub fn commute(&self) -> Option<&RouteSteps> {
        self.route_steps.as_ref().filter(|steps| !steps.is_empty())
    }
}

/// A fully rendered dossier, not yet saved anywhere.
#[derive(Debug, Clone)]
pub struct Dossier {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: u32,
}

#[derive(Debug)]
pub enum GenerationOutcome {
    Saved {
        file_name: String,
        location: String,
        page_count: u32,
    },
    Failed(DossierError),
}

impl GenerationOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, GenerationOutcome::Saved { .. })
    }
}
