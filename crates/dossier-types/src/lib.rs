//! Shared records for the property dossier workspace
//!
//! These types are read-only inputs to the dossier composer and the lead
//! capture surfaces. JSON field names follow the web front end's camelCase
//! export so catalog files load without conversion.

pub mod catalog;
pub mod lead;
pub mod property;
pub mod viewer;

pub use catalog::{Catalog, CatalogError};
pub use lead::{Lead, LeadKind, LeadStatus};
pub use property::{FairValue, PropertyRecord};
pub use viewer::{RouteSteps, ViewerError, ViewerInfo};
