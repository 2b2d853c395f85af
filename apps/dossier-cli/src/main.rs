//! Dossier CLI
//!
//! Composes a property dossier and writes it to a directory. Commute steps
//! are looked up first when an origin area is given.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dossier_core::{
    compose, generate_dossier, DossierConfig, DossierRequest, FailureNotifier, FsSink,
    GenerationOutcome,
};
use dossier_types::{Catalog, PropertyRecord, ViewerInfo};
use route_service::{resolve_route_steps, route_service_from_env};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "dossier-cli")]
#[command(version, about = "Compose a three-page property dossier PDF")]
struct Args {
    /// Property record (JSON object), or a catalog (JSON array) with --id
    #[arg(long)]
    property: PathBuf,

    /// Property id to pick when --property points at a catalog
    #[arg(long)]
    id: Option<String>,

    /// Name of the person the dossier is prepared for
    #[arg(long)]
    name: String,

    /// Contact number shown on the cover
    #[arg(long)]
    phone: String,

    /// Area of origin for the commute audit
    #[arg(long)]
    area: Option<String>,

    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Dossier configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the recorded draw operations as JSON
    #[arg(long)]
    dump_layout: bool,
}

/// Prints the failure notice for the user.
struct StderrNotifier;

impl FailureNotifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn load_property(path: &Path, id: Option<&str>) -> Result<PropertyRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read property file: {}", path.display()))?;

    match id {
        Some(id) => {
            let catalog = Catalog::from_json(&json)
                .with_context(|| format!("Invalid catalog: {}", path.display()))?;
            catalog
                .get(id)
                .cloned()
                .with_context(|| format!("Property '{}' not in {}", id, path.display()))
        }
        None => serde_json::from_str(&json)
            .with_context(|| format!("Invalid property record: {}", path.display())),
    }
}

fn layout_path(out_dir: &Path, file_name: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    out_dir.join(format!("{}.layout.json", stem))
}

fn write_layout(request: &DossierRequest, config: &DossierConfig, out_dir: &Path) -> Result<PathBuf> {
    let log = compose(request, config)?;
    let file_name = dossier_core::dossier_file_name(&request.property.title, &config.output);
    let path = layout_path(out_dir, &file_name);
    fs::create_dir_all(out_dir)?;
    fs::write(&path, log.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

async fn run(args: Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => DossierConfig::from_file(path)?,
        None => DossierConfig::default(),
    };
    let property = load_property(&args.property, args.id.as_deref())?;

    let mut viewer = ViewerInfo::new(args.name, args.phone);
    if let Some(area) = args.area {
        viewer = viewer.with_area(area);
    }

    let route_steps = match viewer.origin() {
        Some(origin) => {
            let service = route_service_from_env();
            Some(resolve_route_steps(service.as_ref(), origin, &property.address).await)
        }
        None => None,
    };

    let mut request = DossierRequest::new(property, viewer);
    if let Some(steps) = route_steps {
        request = request.with_route_steps(steps);
    }

    let mut sink = FsSink::new(&args.out_dir);
    match generate_dossier(&request, &config, &mut sink, &mut StderrNotifier) {
        GenerationOutcome::Saved {
            location,
            page_count,
            ..
        } => {
            println!("{}", location);
            info!("Wrote {} pages", page_count);
            // Only dump the layout of a dossier that was actually saved
            if args.dump_layout {
                match write_layout(&request, &config, &args.out_dir) {
                    Ok(path) => info!("Wrote layout to {}", path.display()),
                    Err(e) => warn!("Layout dump skipped: {:#}", e),
                }
            }
            Ok(true)
        }
        GenerationOutcome::Failed(_) => Ok(false),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries only the saved path
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
