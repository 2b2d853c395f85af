use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    /// The API key was rejected; the operator should select another key
    #[error("Route service credential denied: {0}")]
    CredentialDenied(String),

    #[error("Route service request failed: {0}")]
    Transport(String),

    #[error("Malformed route service response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RouteError {
    fn from(e: reqwest::Error) -> Self {
        RouteError::Transport(e.to_string())
    }
}
