//! Property intelligence dossier composer
//!
//! Lays out a three-page A4 dossier for one listed property and one viewer,
//! then serializes it to PDF with lopdf.
//!
//! - [`compose`]: pure layout into a recorded [`DrawLog`]
//! - [`render_pdf`]: draw log to PDF bytes
//! - [`build_dossier`]: validate, compose and render in one step
//! - [`generate_dossier`]: build and save, with a single failure notice

pub mod canvas;
pub mod composer;
pub mod config;
pub mod draw;
pub mod error;
pub mod metrics;
pub mod naming;
pub mod pricing;
pub mod render;
pub mod request;
pub mod sink;
pub mod style;
pub mod valuation;

use tracing::{error, info, instrument};

pub use composer::compose;
pub use config::DossierConfig;
pub use draw::{DrawLog, DrawOp};
pub use error::DossierError;
pub use naming::dossier_file_name;
pub use pricing::{pricing_tiers, PricingTier};
pub use render::{render_pdf, render_pdf_with_title};
pub use request::{Dossier, DossierRequest, GenerationOutcome};
pub use sink::{
    CollectingNotifier, DossierSink, FailureNotifier, FsSink, LogNotifier, FAILURE_NOTICE,
};
pub use valuation::format_lakhs;

/// Compose and render a dossier without saving it.
pub fn build_dossier(
    request: &DossierRequest,
    config: &DossierConfig,
) -> Result<Dossier, DossierError> {
    let log = compose(request, config)?;
    let bytes = render_pdf_with_title(&log, &request.property.title)?;
    Ok(Dossier {
        file_name: dossier_file_name(&request.property.title, &config.output),
        bytes,
        page_count: log.page_count(),
    })
}

/// Build a dossier and hand it to `sink`.
///
/// The sink only sees a fully rendered document. Any failure is logged and
/// reported to `notifier` exactly once with [`FAILURE_NOTICE`]; nothing is
/// retried.
#[instrument(skip_all, fields(property = %request.property.id))]
pub fn generate_dossier(
    request: &DossierRequest,
    config: &DossierConfig,
    sink: &mut dyn DossierSink,
    notifier: &mut dyn FailureNotifier,
) -> GenerationOutcome {
    let saved = build_dossier(request, config).and_then(|dossier| {
        let location = sink.save(&dossier.file_name, &dossier.bytes)?;
        Ok((dossier, location))
    });

    match saved {
        Ok((dossier, location)) => {
            info!(
                "Dossier {} ({} pages, {} bytes) saved to {}",
                dossier.file_name,
                dossier.page_count,
                dossier.bytes.len(),
                location
            );
            GenerationOutcome::Saved {
                file_name: dossier.file_name,
                location,
                page_count: dossier.page_count,
            }
        }
        Err(e) => {
            error!("Dossier generation failed: {}", e);
            notifier.notify(FAILURE_NOTICE);
            GenerationOutcome::Failed(e)
        }
    }
}

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, DossierError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| DossierError::Render(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_types::{PropertyRecord, RouteSteps, ViewerInfo};
    use pretty_assertions::assert_eq;

    struct MemorySink {
        saved: Vec<(String, Vec<u8>)>,
    }

    impl DossierSink for MemorySink {
        fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, DossierError> {
            self.saved.push((file_name.to_string(), bytes.to_vec()));
            Ok(format!("memory://{}", file_name))
        }
    }

    struct FailingSink;

    impl DossierSink for FailingSink {
        fn save(&mut self, _file_name: &str, _bytes: &[u8]) -> Result<String, DossierError> {
            Err(DossierError::Save("disk full".to_string()))
        }
    }

    fn provident_flow() -> PropertyRecord {
        serde_json::from_str(
            r#"{
                "id": "provident-flow",
                "title": "Codename Flow by Provident",
                "price": 6100000,
                "address": "Bagalur Road, North Bengaluru",
                "beds": 2,
                "baths": 2,
                "sqft": 1050,
                "description": "Designed for the modern family.",
                "features": ["Clubhouse"],
                "developer": "Provident Housing"
            }"#,
        )
        .unwrap()
    }

    fn request() -> DossierRequest {
        DossierRequest::new(provident_flow(), ViewerInfo::new("Ravi Kumar", "9000000001"))
    }

    #[test]
    fn test_build_dossier() {
        let dossier = build_dossier(&request(), &DossierConfig::default()).unwrap();
        assert_eq!(
            dossier.file_name,
            "Propertyfie_Intel_Dossier_Codename_Flow_by_Provident.pdf"
        );
        assert_eq!(dossier.page_count, 3);
        assert_eq!(get_page_count(&dossier.bytes).unwrap(), 3);
    }

    #[test]
    fn test_generate_saves_once() {
        let mut sink = MemorySink { saved: Vec::new() };
        let mut notifier = CollectingNotifier::default();
        let req = request().with_route_steps(RouteSteps::new(vec![
            "Start from Hebbal".to_string(),
            "Reach destination".to_string(),
        ]));

        let outcome = generate_dossier(&req, &DossierConfig::default(), &mut sink, &mut notifier);

        assert!(outcome.is_saved());
        assert_eq!(sink.saved.len(), 1);
        assert!(sink.saved[0].1.starts_with(b"%PDF-"));
        assert!(notifier.notices.is_empty());
    }

    #[test]
    fn test_failing_sink_notifies_once() {
        let mut notifier = CollectingNotifier::default();
        let outcome = generate_dossier(
            &request(),
            &DossierConfig::default(),
            &mut FailingSink,
            &mut notifier,
        );

        assert!(matches!(outcome, GenerationOutcome::Failed(DossierError::Save(_))));
        assert_eq!(notifier.notices, vec![FAILURE_NOTICE.to_string()]);
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        let mut notifier = CollectingNotifier::default();
        let mut config = DossierConfig::default();
        config.pricing.area_ratios.pop();

        let outcome = generate_dossier(&request(), &config, &mut sink, &mut notifier);

        assert!(matches!(outcome, GenerationOutcome::Failed(DossierError::InvalidConfig(_))));
        assert_eq!(notifier.notices.len(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_viewer_writes_nothing() {
        let mut sink = MemorySink { saved: Vec::new() };
        let mut notifier = CollectingNotifier::default();
        let req = DossierRequest::new(provident_flow(), ViewerInfo::new("Ravi", ""));

        let outcome = generate_dossier(&req, &DossierConfig::default(), &mut sink, &mut notifier);

        assert!(!outcome.is_saved());
        assert!(sink.saved.is_empty());
        assert_eq!(notifier.notices.len(), 1);
    }

    #[test]
    fn test_fs_sink_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        let mut notifier = LogNotifier;

        let outcome = generate_dossier(&request(), &DossierConfig::default(), &mut sink, &mut notifier);

        match outcome {
            GenerationOutcome::Saved { file_name, .. } => {
                let bytes = std::fs::read(dir.path().join(file_name)).unwrap();
                assert_eq!(get_page_count(&bytes).unwrap(), 3);
            }
            GenerationOutcome::Failed(e) => panic!("unexpected failure: {}", e),
        }
    }
}
