use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewerError {
    #[error("Viewer name is required")]
    MissingName,

    #[error("Viewer phone is required")]
    MissingPhone,
}

/// The person a dossier is prepared for.
///
/// Phone format is not checked here; the enquiry surface validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerInfo {
    pub name: String,
    pub phone: String,
    /// Area of origin, used only to look up commute steps before composing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl ViewerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            area: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.name.trim().is_empty() {
            return Err(ViewerError::MissingName);
        }
        if self.phone.trim().is_empty() {
            return Err(ViewerError::MissingPhone);
        }
        Ok(())
    }

    /// Origin area with surrounding whitespace removed, if any was given.
    pub fn origin(&self) -> Option<&str> {
        self.area.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

/// Ordered, human-readable commute directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSteps(Vec<String>);

impl RouteSteps {
    pub fn new(steps: Vec<String>) -> Self {
        Self(steps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first `limit` steps. Anything beyond is dropped silently.
    pub fn rendered(&self, limit: usize) -> &[String] {
        &self.0[..self.0.len().min(limit)]
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for RouteSteps {
    fn from(steps: Vec<String>) -> Self {
        Self(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_phone() {
        assert_eq!(
            ViewerInfo::new("  ", "9876543210").validate(),
            Err(ViewerError::MissingName)
        );
        assert_eq!(
            ViewerInfo::new("Asha", "").validate(),
            Err(ViewerError::MissingPhone)
        );
        assert!(ViewerInfo::new("Asha", "98765 43210").validate().is_ok());
    }

    #[test]
    fn test_blank_area_is_no_origin() {
        let viewer = ViewerInfo::new("Asha", "9876543210").with_area("   ");
        assert_eq!(viewer.origin(), None);

        let viewer = ViewerInfo::new("Asha", "9876543210").with_area(" Yelahanka ");
        assert_eq!(viewer.origin(), Some("Yelahanka"));
    }

    #[test]
    fn test_rendered_truncates_excess_steps() {
        let steps: RouteSteps = (1..=12).map(|i| format!("Step {}", i)).collect::<Vec<_>>().into();
        assert_eq!(steps.len(), 12);
        let shown = steps.rendered(10);
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[9], "Step 10");
    }

    #[test]
    fn test_rendered_short_list_untouched() {
        let steps = RouteSteps::new(vec!["Head North".to_string()]);
        assert_eq!(steps.rendered(10), &["Head North".to_string()]);
        assert!(RouteSteps::default().rendered(10).is_empty());
    }

    #[test]
    fn test_route_steps_serialize_as_plain_array() {
        let steps = RouteSteps::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(serde_json::to_string(&steps).unwrap(), r#"["A","B"]"#);
    }
}
