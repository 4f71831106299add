//! i3/sway-specific implementations.
//!
//! This module provides concrete backends for the
//! [`WindowManager`](crate::traits::WindowManager) and
//! [`TriggerSource`](crate::traits::TriggerSource) traits, speaking the i3
//! IPC protocol directly over its Unix socket.  sway implements the same
//! protocol, so both managers are supported.
//!
//! Nothing outside this module should reference i3 directly.

pub mod events;
pub mod protocol;
pub mod wm;

use std::path::PathBuf;

/// Errors that can occur when talking to i3.
#[derive(Debug, thiserror::Error)]
pub enum I3Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("command rejected: {0}")]
    Rejected(String),
    #[error("socket not found: {0}")]
    SocketNotFound(String),
}

/// Locate the IPC socket.
///
/// Tries `$I3SOCK`, then `$SWAYSOCK`, then asks `i3 --get-socketpath`.
pub fn socket_path() -> Result<PathBuf, I3Error> {
    for var in ["I3SOCK", "SWAYSOCK"] {
        if let Some(path) = std::env::var_os(var).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
    }

    let output = std::process::Command::new("i3")
        .arg("--get-socketpath")
        .output()
        .map_err(|e| I3Error::SocketNotFound(format!("I3SOCK/SWAYSOCK unset, i3 --get-socketpath: {}", e)))?;
    if !output.status.success() {
        return Err(I3Error::SocketNotFound(format!(
            "i3 --get-socketpath exited with {}",
            output.status
        )));
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        return Err(I3Error::SocketNotFound(
            "i3 --get-socketpath printed nothing".into(),
        ));
    }
    Ok(PathBuf::from(path))
}
