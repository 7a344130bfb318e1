//! Editor session controller: owns the single live engine session and turns UI
//! intents into engine commands.

pub mod config;
mod controller;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod keymap;
pub mod offset;
pub mod registry;
pub mod session;

pub use config::{load_settings, EditorSettings};
pub use controller::{EditorController, KeyOutcome};
pub use dispatcher::{Dispatch, EngineCommand, NavigationControls, NavigationMode, UiIntent};
pub use error::{ExportError, OffsetInputError, SessionError};
pub use export::{DownloadSink, ExportOutcome, FileDownloadSink};
pub use keymap::{KeyPress, Modifiers, NavKey};
pub use registry::{CodecDescriptor, CodecLabels, CodecRegistry};
pub use session::{ActiveSession, CodecSelection, OpenOutcome, OpenTicket, SessionLifecycle};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
