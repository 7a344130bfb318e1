//! Translation of UI intents into engine commands against the active session.

use shared::{CodecIndex, EngineSession, GraphicsEngine, Step};

use crate::session::{ActiveSession, SessionLifecycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationMode {
    Tiled,
    Linear,
}

impl NavigationMode {
    pub fn from_tiled(is_tiled: bool) -> Self {
        if is_tiled {
            NavigationMode::Tiled
        } else {
            NavigationMode::Linear
        }
    }
}

/// Which mode-specific stepping controls the front end shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationControls {
    pub tile_stepping: bool,
    pub pixel_stepping: bool,
}

impl NavigationControls {
    pub fn for_mode(mode: Option<NavigationMode>) -> Self {
        match mode {
            Some(NavigationMode::Tiled) => Self {
                tile_stepping: true,
                pixel_stepping: false,
            },
            Some(NavigationMode::Linear) => Self {
                tile_stepping: false,
                pixel_stepping: true,
            },
            None => Self::default(),
        }
    }
}

/// A user intent coming from a button or a resolved key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiIntent {
    Width(Step),
    Height(Step),
    /// Tile step in tiled mode, pixel step in linear mode.
    Content(Step),
    Byte(Step),
    Bit(Step),
    Row { step: Step, fast: bool },
}

impl UiIntent {
    pub fn to_command(self, mode: NavigationMode) -> EngineCommand {
        match self {
            UiIntent::Width(step) => EngineCommand::StepWidth(step),
            UiIntent::Height(step) => EngineCommand::StepHeight(step),
            UiIntent::Content(step) => match mode {
                NavigationMode::Tiled => EngineCommand::StepTile(step),
                NavigationMode::Linear => EngineCommand::StepPixel(step),
            },
            UiIntent::Byte(step) => EngineCommand::StepByte(step),
            UiIntent::Bit(step) => EngineCommand::StepBit(step),
            UiIntent::Row { step, fast } => EngineCommand::StepRow { step, fast },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCommand {
    StepWidth(Step),
    StepHeight(Step),
    StepTile(Step),
    StepPixel(Step),
    StepByte(Step),
    StepBit(Step),
    StepRow { step: Step, fast: bool },
    JumpToOffset(u64),
    SelectCodec(CodecIndex),
}

impl EngineCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EngineCommand::StepWidth(_) => "step_width",
            EngineCommand::StepHeight(_) => "step_height",
            EngineCommand::StepTile(_) => "step_tile",
            EngineCommand::StepPixel(_) => "step_pixel",
            EngineCommand::StepByte(_) => "step_byte",
            EngineCommand::StepBit(_) => "step_bit",
            EngineCommand::StepRow { fast: false, .. } => "step_row",
            EngineCommand::StepRow { fast: true, .. } => "step_row_fast",
            EngineCommand::JumpToOffset(_) => "jump_to_offset",
            EngineCommand::SelectCodec(_) => "select_codec",
        }
    }

    pub fn apply<S: EngineSession>(&self, session: &mut S) {
        match *self {
            EngineCommand::StepWidth(step) => session.step_width(step),
            EngineCommand::StepHeight(step) => session.step_height(step),
            EngineCommand::StepTile(step) => session.step_tile(step),
            EngineCommand::StepPixel(step) => session.step_pixel(step),
            EngineCommand::StepByte(step) => session.step_byte(step),
            EngineCommand::StepBit(step) => session.step_bit(step),
            EngineCommand::StepRow { step, fast } => session.step_row(step, fast),
            EngineCommand::JumpToOffset(offset) => session.jump_to_offset(offset),
            EngineCommand::SelectCodec(index) => session.select_codec(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Issued(EngineCommand),
    /// No session is live; the intent was dropped.
    Ignored,
}

impl Dispatch {
    pub fn command(&self) -> Option<EngineCommand> {
        match self {
            Dispatch::Issued(command) => Some(*command),
            Dispatch::Ignored => None,
        }
    }
}

pub fn dispatch_intent<E: GraphicsEngine>(
    lifecycle: &mut SessionLifecycle<E>,
    intent: UiIntent,
) -> Dispatch {
    let Some(active) = lifecycle.active_mut() else {
        tracing::trace!(?intent, "no active session; intent ignored");
        return Dispatch::Ignored;
    };
    let command = intent.to_command(active.mode());
    issue_command(active, command)
}

/// Applies `command` and redraws: render, then status refresh.
pub(crate) fn issue_command<S: EngineSession>(
    active: &mut ActiveSession<S>,
    command: EngineCommand,
) -> Dispatch {
    let handle = active.handle_mut();
    command.apply(handle);
    handle.render();
    handle.refresh_status();
    tracing::debug!(command = command.name(), "issued engine command");
    Dispatch::Issued(command)
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
