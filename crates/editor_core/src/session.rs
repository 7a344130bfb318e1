//! Ownership of the single live engine session.
//!
//! The handle lives in a `SessionSlot`. Releasing takes the handle out of the slot and
//! consumes it in one step, so a released handle is unreachable from the slot and
//! cannot be released twice.

use shared::{CodecIndex, EngineSession, GraphicsEngine, RenderedFrame};

use crate::dispatcher::{issue_command, EngineCommand, NavigationMode};
use crate::error::SessionError;
use crate::registry::CodecRegistry;

pub struct ActiveSession<S: EngineSession> {
    handle: S,
    codec: CodecIndex,
    is_tiled: bool,
}

impl<S: EngineSession> ActiveSession<S> {
    pub fn codec(&self) -> CodecIndex {
        self.codec
    }

    pub fn is_tiled(&self) -> bool {
        self.is_tiled
    }

    pub fn mode(&self) -> NavigationMode {
        NavigationMode::from_tiled(self.is_tiled)
    }

    pub fn handle(&self) -> &S {
        &self.handle
    }

    pub(crate) fn handle_mut(&mut self) -> &mut S {
        &mut self.handle
    }

    pub fn status_line(&self) -> Option<&str> {
        self.handle.status_line()
    }

    pub fn frame(&self) -> Option<&RenderedFrame> {
        self.handle.frame()
    }
}

struct SessionSlot<S: EngineSession> {
    current: Option<ActiveSession<S>>,
}

impl<S: EngineSession> SessionSlot<S> {
    fn empty() -> Self {
        Self { current: None }
    }

    /// Returns whether a handle was released.
    fn release(&mut self) -> bool {
        match self.current.take() {
            Some(active) => {
                active.handle.release();
                true
            }
            None => false,
        }
    }

    fn install(&mut self, active: ActiveSession<S>) {
        debug_assert!(self.current.is_none(), "slot must be released before install");
        self.current = Some(active);
    }
}

impl<S: EngineSession> Drop for SessionSlot<S> {
    fn drop(&mut self) {
        if self.release() {
            tracing::debug!("released session on shutdown");
        }
    }
}

/// Identifies one requested file open. Only the most recently issued ticket may
/// install a session; completions for older tickets are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened {
        codec: CodecIndex,
        mode: NavigationMode,
        replaced: bool,
    },
    /// A newer open was requested while this one was reading.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecSelection {
    Applied {
        index: CodecIndex,
        mode: NavigationMode,
        mode_changed: bool,
    },
    NoSession,
}

pub struct SessionLifecycle<E: GraphicsEngine> {
    engine: E,
    slot: SessionSlot<E::Session>,
    latest_open: u64,
}

impl<E: GraphicsEngine> SessionLifecycle<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            slot: SessionSlot::empty(),
            latest_open: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn active(&self) -> Option<&ActiveSession<E::Session>> {
        self.slot.current.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveSession<E::Session>> {
        self.slot.current.as_mut()
    }

    pub fn has_session(&self) -> bool {
        self.slot.current.is_some()
    }

    /// Starts an open; any open begun earlier becomes stale.
    pub fn begin_open(&mut self) -> OpenTicket {
        self.latest_open += 1;
        OpenTicket {
            generation: self.latest_open,
        }
    }

    pub fn is_current(&self, ticket: OpenTicket) -> bool {
        ticket.generation == self.latest_open
    }

    /// Withdraws a ticket whose read was never started, so the open it superseded
    /// becomes current again. Returns false if a newer open was begun since.
    pub fn cancel_open(&mut self, ticket: OpenTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.latest_open -= 1;
        tracing::debug!(ticket = ticket.generation, "withdrew unstarted file open");
        true
    }

    /// Finishes an open once its bytes are in memory.
    ///
    /// Rejections the engine reports from `probe` leave the current session untouched.
    /// Otherwise the current handle is released before the new one is constructed, and
    /// the new session is brought up with resize-to-fit, render and status refresh.
    pub fn complete_open(
        &mut self,
        registry: &CodecRegistry,
        ticket: OpenTicket,
        bytes: Vec<u8>,
    ) -> Result<OpenOutcome, SessionError> {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.generation,
                latest = self.latest_open,
                "discarding superseded file read"
            );
            return Ok(OpenOutcome::Superseded);
        }

        let first = registry
            .get(CodecIndex(0))
            .ok_or(SessionError::NoCodecsAvailable)?;
        self.engine
            .probe(&bytes)
            .map_err(SessionError::LoadFailure)?;

        let len = bytes.len();
        let replaced = self.slot.release();
        let mut handle = self
            .engine
            .construct(bytes)
            .map_err(SessionError::LoadFailure)?;
        handle.resize_to_fit();
        handle.render();
        handle.refresh_status();

        let active = ActiveSession {
            handle,
            codec: first.index,
            is_tiled: first.is_tiled,
        };
        let mode = active.mode();
        self.slot.install(active);
        tracing::info!(bytes = len, replaced, "opened session");

        Ok(OpenOutcome::Opened {
            codec: first.index,
            mode,
            replaced,
        })
    }

    pub fn open_file(
        &mut self,
        registry: &CodecRegistry,
        bytes: Vec<u8>,
    ) -> Result<OpenOutcome, SessionError> {
        let ticket = self.begin_open();
        self.complete_open(registry, ticket, bytes)
    }

    pub fn select_codec(
        &mut self,
        registry: &CodecRegistry,
        index: CodecIndex,
    ) -> Result<CodecSelection, SessionError> {
        let descriptor = registry.require(index)?;
        let Some(active) = self.slot.current.as_mut() else {
            return Ok(CodecSelection::NoSession);
        };

        let previous = active.mode();
        issue_command(active, EngineCommand::SelectCodec(index));
        active.codec = descriptor.index;
        active.is_tiled = descriptor.is_tiled;

        let mode = active.mode();
        if mode != previous {
            tracing::info!(?mode, codec = index.0, "navigation mode changed");
        }
        Ok(CodecSelection::Applied {
            index,
            mode,
            mode_changed: mode != previous,
        })
    }

    /// Releases the live session, if any. Safe to call repeatedly.
    pub fn close(&mut self) -> bool {
        let released = self.slot.release();
        if released {
            tracing::info!("closed session");
        }
        released
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
