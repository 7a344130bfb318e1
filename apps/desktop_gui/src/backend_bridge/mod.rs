//! Background worker that performs file reads off the UI thread.

pub mod commands;
pub mod runtime;
