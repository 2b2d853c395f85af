use dossier_types::ViewerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DossierError {
    #[error("Invalid viewer details: {0}")]
    InvalidViewer(#[from] ViewerError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Layout failed: {0}")]
    Layout(String),

    #[error("PDF serialization failed: {0}")]
    Render(String),

    #[error("Failed to save dossier: {0}")]
    Save(String),
}
