use shared::{CodecIndex, EngineSession, GraphicsEngine, RenderedFrame};

use crate::dispatcher::{
    dispatch_intent, issue_command, Dispatch, EngineCommand, NavigationControls, NavigationMode,
    UiIntent,
};
use crate::error::{ExportError, OffsetInputError, SessionError};
use crate::export::{export_image, DownloadSink, ExportOutcome};
use crate::keymap::{resolve_key, KeyPress};
use crate::offset::{check_in_range, parse_offset};
use crate::registry::{CodecLabels, CodecRegistry};
use crate::session::{CodecSelection, OpenOutcome, OpenTicket, SessionLifecycle};

const DEFAULT_EXPORT_FILENAME: &str = "tile_export.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub dispatch: Dispatch,
    /// The platform's own handling of the key should be skipped.
    pub suppress_default: bool,
}

/// Front-end facing entry point tying the codec catalog to the session lifecycle.
pub struct EditorController<E: GraphicsEngine> {
    registry: CodecRegistry,
    lifecycle: SessionLifecycle<E>,
    export_filename: String,
}

impl<E: GraphicsEngine> EditorController<E> {
    pub fn new(engine: E, labels: &CodecLabels) -> Self {
        let registry = CodecRegistry::load(&engine, labels);
        Self {
            registry,
            lifecycle: SessionLifecycle::new(engine),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &SessionLifecycle<E> {
        &self.lifecycle
    }

    pub fn export_filename(&self) -> &str {
        &self.export_filename
    }

    pub fn has_session(&self) -> bool {
        self.lifecycle.has_session()
    }

    pub fn active_codec(&self) -> Option<CodecIndex> {
        self.lifecycle.active().map(|active| active.codec())
    }

    pub fn is_tiled(&self) -> Option<bool> {
        self.lifecycle.active().map(|active| active.is_tiled())
    }

    pub fn navigation_mode(&self) -> Option<NavigationMode> {
        self.lifecycle.active().map(|active| active.mode())
    }

    /// Controls for the live session's mode; before any file is loaded, for the
    /// codec a new session would start on.
    pub fn visible_controls(&self) -> NavigationControls {
        let mode = self.navigation_mode().or_else(|| {
            self.registry
                .get(CodecIndex(0))
                .map(|first| NavigationMode::from_tiled(first.is_tiled))
        });
        NavigationControls::for_mode(mode)
    }

    pub fn status_line(&self) -> Option<&str> {
        self.lifecycle.active().and_then(|active| active.status_line())
    }

    pub fn frame(&self) -> Option<&RenderedFrame> {
        self.lifecycle.active().and_then(|active| active.frame())
    }

    pub fn begin_open(&mut self) -> OpenTicket {
        self.lifecycle.begin_open()
    }

    pub fn cancel_open(&mut self, ticket: OpenTicket) -> bool {
        self.lifecycle.cancel_open(ticket)
    }

    pub fn complete_open(
        &mut self,
        ticket: OpenTicket,
        bytes: Vec<u8>,
    ) -> Result<OpenOutcome, SessionError> {
        self.lifecycle.complete_open(&self.registry, ticket, bytes)
    }

    pub fn open_file(&mut self, bytes: Vec<u8>) -> Result<OpenOutcome, SessionError> {
        self.lifecycle.open_file(&self.registry, bytes)
    }

    pub fn select_codec(&mut self, index: CodecIndex) -> Result<CodecSelection, SessionError> {
        self.lifecycle.select_codec(&self.registry, index)
    }

    pub fn close(&mut self) -> bool {
        self.lifecycle.close()
    }

    pub fn handle_intent(&mut self, intent: UiIntent) -> Dispatch {
        dispatch_intent(&mut self.lifecycle, intent)
    }

    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        if !self.has_session() {
            return KeyOutcome {
                dispatch: Dispatch::Ignored,
                suppress_default: false,
            };
        }
        match resolve_key(press) {
            Some(rule) => KeyOutcome {
                dispatch: self.handle_intent(rule.intent),
                suppress_default: true,
            },
            None => KeyOutcome {
                dispatch: Dispatch::Ignored,
                suppress_default: false,
            },
        }
    }

    /// Validates the offset field and jumps there. The input format is checked even
    /// without a session; the range needs the loaded file.
    pub fn submit_offset(&mut self, raw: &str) -> Result<Dispatch, OffsetInputError> {
        let offset = parse_offset(raw).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected offset input");
        })?;
        let Some(active) = self.lifecycle.active_mut() else {
            return Ok(Dispatch::Ignored);
        };
        let offset = check_in_range(offset, active.handle().data_len()).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected offset input");
        })?;
        Ok(issue_command(active, EngineCommand::JumpToOffset(offset)))
    }

    pub fn export_image<D: DownloadSink>(
        &mut self,
        sink: &mut D,
    ) -> Result<ExportOutcome, ExportError> {
        export_image(self.lifecycle.active_mut(), sink, &self.export_filename)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
