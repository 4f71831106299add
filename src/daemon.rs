//! The driver loop.
//!
//! Consumes [`Trigger`]s on the calling thread and runs one full
//! reconciliation pass per lifecycle event or refresh request.  Triggers are
//! handled strictly one at a time; a pass always completes before the next
//! trigger is taken.

use crate::engine::{EngineError, LabelEngine};
use crate::model::Trigger;
use crate::traits::WindowManager;
use log::{debug, info};
use std::sync::mpsc;

/// Fatal driver errors.  Anything else is handled inside a pass.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("event stream lost: {0}")]
    Disconnected(String),
}

/// Process triggers until shutdown.
///
/// Returns `Ok(())` on [`Trigger::Shutdown`] or when every source has
/// hung up, and an error when the event stream is lost or a snapshot
/// cannot be fetched.
pub fn run<W: WindowManager>(
    engine: &mut LabelEngine<W>,
    triggers: mpsc::Receiver<Trigger>,
) -> Result<(), DaemonError> {
    for trigger in triggers {
        match trigger {
            Trigger::Event(event) => {
                debug!("pass triggered by {}", event.kind);
                engine.pass()?;
            }
            Trigger::Refresh => {
                info!("forced refresh");
                engine.pass()?;
            }
            Trigger::Shutdown => {
                info!("shutdown requested");
                return Ok(());
            }
            Trigger::Disconnected(reason) => return Err(DaemonError::Disconnected(reason)),
        }
    }
    info!("all trigger sources closed, exiting");
    Ok(())
}
