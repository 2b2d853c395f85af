//! Where finished dossiers go, and who hears about failures

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::DossierError;

/// User-facing notice shown once when generation fails.
pub const FAILURE_NOTICE: &str =
    "Strategic Dossier generation failed. Technical systems being audited.";

/// Persists a rendered dossier. Returns a human-readable location.
pub trait DossierSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, DossierError>;
}

/// Receives the single failure notice for an invocation.
pub trait FailureNotifier {
    fn notify(&mut self, message: &str);
}

/// Writes dossiers into a directory.
///
/// Bytes go to a hidden temporary file first and are renamed into place, so
/// a failed write never leaves a partial dossier under the final name.
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name.replace(|c: char| c == '/' || c == '\\', "_"))
    }
}

impl DossierSink for FsSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<String, DossierError> {
        let target = self.target(file_name);
        let staging = self.dir.join(format!(
            ".{}.partial",
            target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ));

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let mut file = fs::File::create(&staging)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&staging, &target)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&staging);
            return Err(DossierError::Save(format!("{}: {}", target.display(), e)));
        }

        info!("Saved dossier to {}", target.display());
        Ok(target.display().to_string())
    }
}

/// Reports failures through the log only.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl FailureNotifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        error!("{}", message);
    }
}

/// Keeps every notice it receives.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    pub notices: Vec<String>,
}

impl FailureNotifier for CollectingNotifier {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
