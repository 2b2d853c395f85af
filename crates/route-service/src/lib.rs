//! Commute directions for the dossier's pathfinder section
//!
//! Lookups may fail or come back empty; [`resolve_route_steps`] turns every
//! failure into fallback text so callers never see an error.

pub mod error;
pub mod gemini;
pub mod parse;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dossier_types::RouteSteps;
use tracing::{info, warn};

pub use error::RouteError;
pub use gemini::GeminiRouteService;
pub use parse::{parse_route_lines, MAX_ROUTE_STEPS};

/// Environment variable holding the Generative Language API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Optional model override
pub const MODEL_ENV: &str = "GEMINI_MODEL";
/// Optional lookup deadline in seconds
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

#[async_trait]
pub trait RouteService: Send + Sync {
    async fn route_steps(&self, origin: &str, destination: &str) -> Result<RouteSteps, RouteError>;
}

/// Canned directions used when no credential is configured.
#[derive(Debug, Default, Clone)]
pub struct StaticRouteService;

#[async_trait]
impl RouteService for StaticRouteService {
    async fn route_steps(&self, origin: &str, _destination: &str) -> Result<RouteSteps, RouteError> {
        Ok(RouteSteps::new(vec![
            format!("Start from {}", origin),
            "Head North on Airport Rd".to_string(),
            "Turn right at Hebbal Flyover".to_string(),
            "Reach destination".to_string(),
        ]))
    }
}

/// Look up steps, falling back to a single generic step on any failure.
pub async fn resolve_route_steps(
    service: &dyn RouteService,
    origin: &str,
    destination: &str,
) -> RouteSteps {
    match service.route_steps(origin, destination).await {
        Ok(steps) => steps,
        Err(e) => {
            if let RouteError::CredentialDenied(_) = e {
                warn!("Route lookup denied; select a different {} and retry", API_KEY_ENV);
            } else {
                warn!("Route lookup failed: {}", e);
            }
            RouteSteps::new(vec![format!(
                "Commute from {} to {} via main corridor.",
                origin, destination
            )])
        }
    }
}

/// Gemini when `GEMINI_API_KEY` is set and non-empty, canned steps otherwise.
pub fn route_service_from_env() -> Arc<dyn RouteService> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            let mut service = GeminiRouteService::new(key.trim());
            if let Ok(model) = std::env::var(MODEL_ENV) {
                if !model.trim().is_empty() {
                    service = service.with_model(model.trim());
                }
            }
            if let Some(timeout) = timeout_from_env() {
                service = service.with_timeout(timeout);
            }
            info!(
                "Route lookups use model {} with a {:?} deadline",
                service.model(),
                service.timeout()
            );
            Arc::new(service)
        }
        _ => {
            info!("{} not set; using static route steps", API_KEY_ENV);
            Arc::new(StaticRouteService)
        }
    }
}

fn timeout_from_env() -> Option<Duration> {
    let raw = std::env::var(TIMEOUT_ENV).ok()?;
    parse_timeout_secs(&raw)
}

/// Whole seconds greater than zero; anything else keeps the default.
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!("Ignoring {}={:?}", TIMEOUT_ENV, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct DeniedService;

    #[async_trait]
    impl RouteService for DeniedService {
        async fn route_steps(&self, _: &str, _: &str) -> Result<RouteSteps, RouteError> {
            Err(RouteError::CredentialDenied("PERMISSION_DENIED".to_string()))
        }
    }

    struct OfflineService;

    #[async_trait]
    impl RouteService for OfflineService {
        async fn route_steps(&self, _: &str, _: &str) -> Result<RouteSteps, RouteError> {
            Err(RouteError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_static_steps() {
        let steps = StaticRouteService
            .route_steps("Yelahanka", "Hebbal")
            .await
            .unwrap();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps.rendered(1), ["Start from Yelahanka".to_string()]);
    }

    #[tokio::test]
    async fn test_denied_credential_falls_back() {
        let steps = resolve_route_steps(&DeniedService, "Yelahanka", "Hebbal").await;
        assert_eq!(
            steps.into_inner(),
            vec!["Commute from Yelahanka to Hebbal via main corridor."]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let steps = resolve_route_steps(&OfflineService, "A", "B").await;
        assert_eq!(steps.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_gemini_falls_back() {
        let service = GeminiRouteService::new("test-key").with_base_url("http://127.0.0.1:9");
        let steps = resolve_route_steps(&service, "A", "B").await;
        assert_eq!(
            steps.into_inner(),
            vec!["Commute from A to B via main corridor."]
        );
    }

    #[tokio::test]
    async fn test_stalled_gemini_times_out_to_fallback() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and never answer
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let service = GeminiRouteService::new("test-key")
            .with_base_url(format!("http://{}", addr))
            .with_timeout(Duration::from_millis(200));
        let steps = tokio::time::timeout(
            Duration::from_secs(10),
            resolve_route_steps(&service, "Yelahanka", "Hebbal"),
        )
        .await
        .unwrap();
        assert_eq!(
            steps.into_inner(),
            vec!["Commute from Yelahanka to Hebbal via main corridor."]
        );
        server.abort();
    }

    #[test]
    fn test_timeout_setting() {
        assert_eq!(parse_timeout_secs(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
    }
}
