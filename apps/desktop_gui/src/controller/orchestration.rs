//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command reached the backend queue.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "File read queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Background file reader stopped; restart the editor to open files"
                .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dispatch_backend_command;
    use crate::backend_bridge::commands::BackendCommand;
    use crossbeam_channel::bounded;
    use editor_core::{CodecLabels, EditorController};
    use raster_engine::RasterEngine;

    fn read_command() -> BackendCommand {
        let mut controller = EditorController::new(RasterEngine::default(), &CodecLabels::curated());
        BackendCommand::ReadFile {
            ticket: controller.begin_open(),
            path: "sprites.chr".into(),
        }
    }

    #[test]
    fn reports_full_queue_in_status() {
        let (tx, _rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, read_command(), &mut status));
        assert!(status.is_empty());

        assert!(!dispatch_backend_command(&tx, read_command(), &mut status));
        assert!(status.contains("full"));
    }

    #[test]
    fn unqueued_read_returns_currency_to_the_read_in_flight() {
        let (tx, _rx) = bounded::<BackendCommand>(1);
        let mut controller = EditorController::new(RasterEngine::default(), &CodecLabels::curated());
        let mut status = String::new();

        let in_flight = controller.begin_open();
        let queued = dispatch_backend_command(
            &tx,
            BackendCommand::ReadFile {
                ticket: in_flight,
                path: "first.chr".into(),
            },
            &mut status,
        );
        assert!(queued);

        let rejected = controller.begin_open();
        let queued = dispatch_backend_command(
            &tx,
            BackendCommand::ReadFile {
                ticket: rejected,
                path: "second.chr".into(),
            },
            &mut status,
        );
        assert!(!queued);
        assert!(controller.cancel_open(rejected));

        assert!(controller.lifecycle().is_current(in_flight));
        let outcome = controller
            .complete_open(in_flight, vec![0xAA; 32])
            .expect("first read");
        assert!(matches!(outcome, editor_core::OpenOutcome::Opened { .. }));
    }

    #[test]
    fn reports_stopped_worker_in_status() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(&tx, read_command(), &mut status));
        assert!(status.contains("stopped"));
    }
}
