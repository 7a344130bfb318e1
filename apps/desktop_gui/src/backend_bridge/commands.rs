//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

use editor_core::OpenTicket;

pub enum BackendCommand {
    /// Read a file's bytes for the open identified by `ticket`.
    ReadFile { ticket: OpenTicket, path: PathBuf },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ReadFile { .. } => "read_file",
        }
    }
}
