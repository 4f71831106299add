//! Core traits that decouple wslabel from the concrete IPC transport.
//!
//! The [`LabelEngine`](crate::engine::LabelEngine) only talks to a
//! [`WindowManager`], and the driver loop only consumes [`Trigger`]s
//! produced by [`TriggerSource`]s.  The i3/sway implementations live in
//! [`i3`](crate::i3); tests use in-memory doubles.

use crate::model::{Trigger, Workspace};
use std::sync::mpsc;

/// Abstraction over a window manager whose workspaces can be listed and
/// renamed.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Fetch a fresh snapshot of every workspace with its leaf windows.
    ///
    /// Blocks until the manager replies.
    fn workspaces(&mut self) -> Result<Vec<Workspace>, Self::Error>;

    /// Submit a single textual command.
    ///
    /// An error is returned both when the transport fails and when the
    /// manager rejects the command.
    fn run_command(&mut self, command: &str) -> Result<(), Self::Error>;
}

/// A source of [`Trigger`]s.
///
/// # Contract
///
/// * [`run`](TriggerSource::run) **blocks** until the source is exhausted,
///   the sink is closed, or an unrecoverable error occurs.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait TriggerSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every trigger into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Self::Error>;
}
