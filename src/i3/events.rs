//! Event subscription [`TriggerSource`].
//!
//! Opens a dedicated connection, subscribes to `window` and `workspace`
//! events, and forwards the lifecycle events wslabel cares about as
//! [`Trigger::Event`]s.  Everything else on the bus is ignored.

use super::protocol::{self, EVENT_WINDOW, EVENT_WORKSPACE, SUBSCRIBE};
use super::wm::Node;
use super::I3Error;
use crate::model::{Event, LifecycleEvent, Trigger};
use crate::traits::TriggerSource;
use log::{debug, info, warn};
use serde::Deserialize;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::mpsc;

/// Payload of a `window` event.
#[derive(Debug, Deserialize)]
struct WindowEventJson {
    change: String,
    /// Kept raw; a container that doesn't fit [`Node`] still counts as an
    /// event, just without a window payload.
    #[serde(default)]
    container: Option<serde_json::Value>,
}

/// Payload of a `workspace` event.
#[derive(Debug, Deserialize)]
struct WorkspaceEventJson {
    change: String,
    current: Option<WorkspaceRef>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceRef {
    #[serde(default)]
    num: Option<i64>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubscribeReply {
    success: bool,
}

/// A [`TriggerSource`] fed by the i3 event bus.
pub struct I3EventSource {
    stream: UnixStream,
    titles: bool,
}

impl I3EventSource {
    /// Connect to `path` and subscribe.
    ///
    /// With `titles` set, `window::title` events are forwarded as well.
    pub fn subscribe(path: &Path, titles: bool) -> Result<Self, I3Error> {
        let stream = UnixStream::connect(path)?;
        Self::subscribe_on(stream, titles)
    }

    /// Subscribe on an already connected stream.
    pub fn subscribe_on(mut stream: UnixStream, titles: bool) -> Result<Self, I3Error> {
        protocol::write_message(&mut stream, SUBSCRIBE, br#"["window","workspace"]"#)?;
        let (kind, reply) = protocol::read_message(&mut stream)?;
        if kind != SUBSCRIBE {
            return Err(I3Error::Protocol(format!(
                "expected subscribe reply, got type {}",
                kind
            )));
        }
        let reply: SubscribeReply = serde_json::from_slice(&reply)?;
        if !reply.success {
            return Err(I3Error::Rejected("subscribe".into()));
        }
        Ok(Self { stream, titles })
    }

    /// Map a raw event frame to a lifecycle event, if it is one we handle.
    fn decode(&self, kind: u32, payload: &[u8]) -> Result<Option<Event>, I3Error> {
        match kind {
            EVENT_WINDOW => {
                let ev: WindowEventJson = serde_json::from_slice(payload)?;
                let kind = match ev.change.as_str() {
                    "new" => LifecycleEvent::WindowNew,
                    "close" => LifecycleEvent::WindowClose,
                    "focus" => LifecycleEvent::WindowFocus,
                    "move" => LifecycleEvent::WindowMove,
                    "title" if self.titles => LifecycleEvent::WindowTitle,
                    _ => return Ok(None),
                };
                Ok(Some(Event {
                    kind,
                    window: ev
                        .container
                        .and_then(|c| serde_json::from_value::<Node>(c).ok())
                        .map(|node| node.to_window()),
                    workspace: None,
                }))
            }
            EVENT_WORKSPACE => {
                let ev: WorkspaceEventJson = serde_json::from_slice(payload)?;
                if ev.change != "focus" {
                    return Ok(None);
                }
                Ok(Some(Event {
                    kind: LifecycleEvent::WorkspaceFocus,
                    window: None,
                    workspace: ev.current.map(|ws| {
                        (ws.num.filter(|&n| n >= 0), ws.name.unwrap_or_default())
                    }),
                }))
            }
            _ => Ok(None),
        }
    }
}

impl TriggerSource for I3EventSource {
    type Error = I3Error;

    /// Read events until the connection drops or the sink closes.
    ///
    /// Frames whose payload can't be decoded are logged and skipped; only
    /// transport and framing errors end the loop.
    ///
    /// A connection that ends, even cleanly, is reported as an error: the
    /// manager went away.
    fn run(&mut self, sink: mpsc::Sender<Trigger>) -> Result<(), Self::Error> {
        info!("subscribed to window and workspace events");
        loop {
            let (kind, payload) = protocol::read_message(&mut self.stream)?;
            if !protocol::is_event(kind) {
                debug!("ignoring non-event frame of type {}", kind);
                continue;
            }
            let event = match self.decode(kind, &payload) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    warn!("event decode error: {}", e);
                    continue;
                }
            };
            debug!("event {}", event.kind);
            if sink.send(Trigger::Event(event)).is_err() {
                info!("sink closed, shutting down");
                return Ok(());
            }
        }
    }
}

//  Tests
