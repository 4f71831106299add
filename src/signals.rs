//! Unix signal [`TriggerSource`].
//!
//! * `SIGUSR2` forces a refresh pass.
//! * `SIGINT`, `SIGTERM` and `SIGHUP` request a clean shutdown.

use crate::model::Trigger;
use crate::traits::TriggerSource;
use log::{debug, info};
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM, SIGUSR2};
use signal_hook::iterator::Signals;
use std::sync::mpsc;

/// Forwards process signals as [`Trigger`]s.
pub struct SignalSource {
    signals: Signals,
}

impl SignalSource {
    /// Register the handlers.  From here on these signals no longer
    /// terminate the process; they only produce triggers.
    pub fn register() -> Result<Self, std::io::Error> {
        let signals = Signals::new([SIGUSR2, SIGINT, SIGTERM, SIGHUP])?;
        Ok(Self { signals })
    }
}

/// Map a signal number to the trigger it stands for.
pub fn trigger_for(signal: i32) -> Option<Trigger> {
    match signal {
        SIGUSR2 => Some(Trigger::Refresh),
        SIGINT | SIGTERM | SIGHUP => Some(Trigger::Shutdown),
        _ => None,
    }
}

impl TriggerSource for SignalSource {
    type Error = std::io::Error;

    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Self::Error> {
        for signal in self.signals.forever() {
            let Some(trigger) = trigger_for(signal) else {
                continue;
            };
            debug!("signal {} -> {:?}", signal, trigger);
            let stop = trigger == Trigger::Shutdown;
            if sink.send(trigger).is_err() || stop {
                info!("signal listener stopping");
                break;
            }
        }
        Ok(())
    }
}
