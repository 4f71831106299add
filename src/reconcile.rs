//! Reconciliation of a computed label against a workspace's current name.
//!
//! [`reconcile`] is the only place that issues rename commands.  It does
//! nothing when the label already matches, so running it on every event is
//! safe.

use crate::model::Workspace;
use crate::traits::WindowManager;
use log::{error, info};
use std::fmt;

/// Result of reconciling one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Renamed,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unchanged => write!(f, "unchanged"),
            Outcome::Renamed => write!(f, "renamed"),
            Outcome::Failed => write!(f, "failed"),
        }
    }
}

/// Why a rename could not be carried out.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    /// The workspace has neither a name nor a number to match on.
    #[error("workspace has neither a name nor a number")]
    Unaddressable,
    /// The window manager failed or rejected the command.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

/// Backslash-escape every double quote in `s`.
pub fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Build the rename command for `workspace` → `label`.
///
/// The workspace is matched by its current name, or by number when the name
/// is empty.
pub fn rename_directive(workspace: &Workspace, label: &str) -> Result<String, RenameError> {
    let new = escape(label);
    if !workspace.name.is_empty() {
        Ok(format!(
            r#"rename workspace "{}" to "{}""#,
            escape(&workspace.name),
            new
        ))
    } else if let Some(n) = workspace.num {
        Ok(format!(r#"rename workspace number {} to "{}""#, n, new))
    } else {
        Err(RenameError::Unaddressable)
    }
}

fn submit<W: WindowManager>(
    wm: &mut W,
    workspace: &Workspace,
    label: &str,
) -> Result<(), RenameError> {
    let directive = rename_directive(workspace, label)?;
    wm.run_command(&directive)
        .map_err(|e| RenameError::WindowManager(e.to_string()))
}

/// Rename `workspace` to `label` if, and only if, they differ.
///
/// Failures are logged and reported as [`Outcome::Failed`]; they never
/// propagate, so the caller can carry on with other workspaces.
pub fn reconcile<W: WindowManager>(wm: &mut W, workspace: &Workspace, label: &str) -> Outcome {
    if workspace.name == label {
        return Outcome::Unchanged;
    }

    match submit(wm, workspace, label) {
        Ok(()) => {
            info!("renamed workspace: '{}' -> '{}'", workspace.name, label);
            Outcome::Renamed
        }
        Err(e) => {
            error!("rename error: {}", e);
            Outcome::Failed
        }
    }
}
