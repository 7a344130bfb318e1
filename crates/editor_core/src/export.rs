//! Image export: engine bytes → staged artifact → delivered download.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use shared::EngineSession;
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::session::ActiveSession;

/// Platform side of a download. `stage` acquires a transient resource holding the
/// artifact, `trigger` hands it to the user and `revoke` releases the resource.
pub trait DownloadSink {
    type Staged;

    fn stage(&mut self, filename: &str, bytes: &[u8]) -> Result<Self::Staged, ExportError>;
    fn trigger(&mut self, staged: &Self::Staged) -> Result<(), ExportError>;
    fn revoke(&mut self, staged: Self::Staged);
}

/// Revokes the staged artifact when dropped, whether or not the trigger succeeded.
struct StagedDownload<'a, D: DownloadSink> {
    sink: &'a mut D,
    staged: Option<D::Staged>,
}

impl<'a, D: DownloadSink> StagedDownload<'a, D> {
    fn stage(sink: &'a mut D, filename: &str, bytes: &[u8]) -> Result<Self, ExportError> {
        let staged = sink.stage(filename, bytes)?;
        Ok(Self {
            sink,
            staged: Some(staged),
        })
    }

    fn trigger(&mut self) -> Result<(), ExportError> {
        match self.staged.as_ref() {
            Some(staged) => self.sink.trigger(staged),
            None => Ok(()),
        }
    }
}

impl<D: DownloadSink> Drop for StagedDownload<'_, D> {
    fn drop(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.sink.revoke(staged);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NoSession,
    Delivered { filename: String, byte_len: usize },
}

pub fn export_image<S: EngineSession, D: DownloadSink>(
    active: Option<&mut ActiveSession<S>>,
    sink: &mut D,
    filename: &str,
) -> Result<ExportOutcome, ExportError> {
    let Some(active) = active else {
        return Ok(ExportOutcome::NoSession);
    };

    let encoded = active.handle_mut().export_encoded_image()?;
    let mut download = StagedDownload::stage(sink, filename, &encoded)?;
    download.trigger()?;
    drop(download);

    tracing::info!(filename, bytes = encoded.len(), "exported image");
    Ok(ExportOutcome::Delivered {
        filename: filename.to_string(),
        byte_len: encoded.len(),
    })
}

/// Stages exports as temporary files and copies them to a destination path.
pub struct FileDownloadSink {
    staging_dir: PathBuf,
    destination: PathBuf,
}

impl FileDownloadSink {
    pub fn new(staging_dir: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl DownloadSink for FileDownloadSink {
    type Staged = NamedTempFile;

    fn stage(&mut self, filename: &str, bytes: &[u8]) -> Result<NamedTempFile, ExportError> {
        let stage_err = |source| ExportError::Stage {
            path: self.staging_dir.clone(),
            source,
        };
        let mut staged = tempfile::Builder::new()
            .prefix(filename)
            .suffix(".partial")
            .tempfile_in(&self.staging_dir)
            .map_err(stage_err)?;
        staged.write_all(bytes).map_err(stage_err)?;
        staged.flush().map_err(stage_err)?;
        Ok(staged)
    }

    fn trigger(&mut self, staged: &NamedTempFile) -> Result<(), ExportError> {
        fs::copy(staged.path(), &self.destination).map_err(|source| ExportError::Trigger {
            destination: self.destination.clone(),
            source,
        })?;
        Ok(())
    }

    fn revoke(&mut self, staged: NamedTempFile) {
        if let Err(err) = staged.close() {
            tracing::warn!(error = %err, "failed to remove staged export");
        }
    }
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
