//! Runtime bridge between UI command queue and backend event intake.

use std::{path::Path, thread};

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ReadFile { ticket, path } => {
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match read_file(&path).await {
                                Ok(bytes) => UiEvent::FileRead {
                                    ticket,
                                    name: display_name(&path),
                                    bytes,
                                },
                                Err(err) => UiEvent::FileReadFailed {
                                    ticket,
                                    error: UiError::from_message(
                                        UiErrorContext::OpenFile,
                                        format!("{err:#}"),
                                    ),
                                },
                            };
                            if ui_tx.send(event).is_err() {
                                tracing::warn!("ui event channel closed before file read finished");
                            }
                        });
                    }
                }
            }
            tracing::debug!("backend command channel closed; worker exiting");
        });
    });
}

async fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
