//! [`WindowManager`] implementation backed by i3 IPC.
//!
//! Holds one command connection for the lifetime of the process.  Tree
//! fetches and rename commands are plain request/reply exchanges on it;
//! events are consumed on a separate connection (see
//! [`events`](super::events)).

use super::protocol::{self, GET_TREE, RUN_COMMAND};
use super::I3Error;
use crate::model::{Rect, Window, Workspace};
use crate::traits::WindowManager;
use log::debug;
use serde::Deserialize;
use std::os::unix::net::UnixStream;
use std::path::Path;

/// i3-backed window manager.
pub struct I3Wm {
    stream: UnixStream,
}

impl I3Wm {
    /// Connect to the IPC socket at `path`.
    pub fn connect(path: &Path) -> Result<Self, I3Error> {
        let stream = UnixStream::connect(path).map_err(|e| {
            I3Error::Io(std::io::Error::new(
                e.kind(),
                format!("connect to {}: {}", path.display(), e),
            ))
        })?;
        debug!("command connection open on {}", path.display());
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Send a request and wait for its reply.  The command connection is
    /// never subscribed, so the next frame must be the reply.
    fn request(&mut self, kind: u32, payload: &[u8]) -> Result<Vec<u8>, I3Error> {
        protocol::write_message(&mut self.stream, kind, payload)?;
        let (reply_kind, reply) = protocol::read_message(&mut self.stream)?;
        if reply_kind != kind {
            return Err(I3Error::Protocol(format!(
                "expected reply type {}, got {}",
                kind, reply_kind
            )));
        }
        Ok(reply)
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of a node in the `GET_TREE` reply.
#[derive(Debug, Deserialize)]
pub(crate) struct Node {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    num: Option<i64>,
    #[serde(default)]
    rect: RectJson,
    #[serde(default)]
    window_properties: Option<WindowProperties>,
    /// sway only: Wayland application id.
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    floating_nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum NodeType {
    Root,
    Output,
    Con,
    FloatingCon,
    Workspace,
    Dockarea,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Deserialize)]
struct RectJson {
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Default, Deserialize)]
struct WindowProperties {
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    instance: Option<String>,
}

/// Name of i3's hidden output that owns the scratchpad workspace.
const INTERNAL_OUTPUT: &str = "__i3";

/// Subset of one entry in a `RUN_COMMAND` reply.
#[derive(Debug, Deserialize)]
struct CommandReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl Node {
    pub(crate) fn to_window(&self) -> Window {
        let props = self.window_properties.as_ref();
        Window {
            class: props
                .and_then(|p| p.class.clone())
                .or_else(|| self.app_id.clone()),
            instance: props.and_then(|p| p.instance.clone()),
            name: self.name.clone(),
            rect: Rect {
                x: self.rect.x,
                y: self.rect.y,
                width: self.rect.width,
                height: self.rect.height,
            },
        }
    }

    fn is_leaf(&self) -> bool {
        self.nodes.is_empty()
            && self.floating_nodes.is_empty()
            && matches!(self.node_type, NodeType::Con | NodeType::FloatingCon)
    }

    fn collect_leaves(&self, out: &mut Vec<Window>) {
        if self.is_leaf() {
            out.push(self.to_window());
            return;
        }
        if self.node_type == NodeType::Dockarea {
            return;
        }
        for child in self.nodes.iter().chain(self.floating_nodes.iter()) {
            child.collect_leaves(out);
        }
    }

    fn to_workspace(&self, scratchpad: bool) -> Workspace {
        let mut windows = Vec::new();
        for child in self.nodes.iter().chain(self.floating_nodes.iter()) {
            child.collect_leaves(&mut windows);
        }
        Workspace {
            num: self.num.filter(|&n| n >= 0),
            name: self.name.clone().unwrap_or_default(),
            windows,
            scratchpad,
        }
    }

    fn collect_workspaces(&self, on_internal_output: bool, out: &mut Vec<Workspace>) {
        match self.node_type {
            NodeType::Workspace => out.push(self.to_workspace(on_internal_output)),
            NodeType::Output => {
                let internal = self.name.as_deref() == Some(INTERNAL_OUTPUT);
                for child in &self.nodes {
                    child.collect_workspaces(internal, out);
                }
            }
            _ => {
                for child in &self.nodes {
                    child.collect_workspaces(on_internal_output, out);
                }
            }
        }
    }
}

/// Flatten a `GET_TREE` reply into workspace snapshots, in tree order.
pub(crate) fn workspaces_from_tree(root: &Node) -> Vec<Workspace> {
    let mut out = Vec::new();
    root.collect_workspaces(false, &mut out);
    out
}

/// Interpret a `RUN_COMMAND` reply; any failed entry is a rejection.
fn check_command_reply(reply: &[u8]) -> Result<(), I3Error> {
    let results: Vec<CommandReply> = serde_json::from_slice(reply)?;
    match results.into_iter().find(|r| !r.success) {
        Some(failed) => Err(I3Error::Rejected(
            failed.error.unwrap_or_else(|| "unknown error".into()),
        )),
        None => Ok(()),
    }
}

//  WindowManager implementation

impl WindowManager for I3Wm {
    type Error = I3Error;

    fn workspaces(&mut self) -> Result<Vec<Workspace>, Self::Error> {
        let reply = self.request(GET_TREE, b"")?;
        let root: Node = serde_json::from_slice(&reply)?;
        Ok(workspaces_from_tree(&root))
    }

    fn run_command(&mut self, command: &str) -> Result<(), Self::Error> {
        debug!("run_command: {}", command);
        let reply = self.request(RUN_COMMAND, command.as_bytes())?;
        check_command_reply(&reply)
    }
}

//  Tests
