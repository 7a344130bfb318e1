//! UI/backend events and error modeling for desktop GUI controller.

use editor_core::OpenTicket;

pub enum UiEvent {
    FileRead {
        ticket: OpenTicket,
        name: String,
        bytes: Vec<u8>,
    },
    FileReadFailed {
        ticket: OpenTicket,
        error: UiError,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    NotFound,
    Permission,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    OpenFile,
    Export,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("no such file")
            || message_lower.contains("not found")
            || message_lower.contains("cannot find")
        {
            UiErrorCategory::NotFound
        } else if message_lower.contains("permission denied")
            || message_lower.contains("access is denied")
            || message_lower.contains("read-only")
        {
            UiErrorCategory::Permission
        } else if message_lower.contains("empty")
            || message_lower.contains("exceeds")
            || message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("out of range")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line text for the status bar.
    pub fn status_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Background worker failed",
            UiErrorContext::OpenFile => "Could not open file",
            UiErrorContext::Export => "Export failed",
            UiErrorContext::General => "Error",
        };
        format!("{prefix}: {}", self.message)
    }
}
