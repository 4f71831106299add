//! Types shared by every component of wslabel.
//!
//! [`Workspace`] and [`Window`] are plain snapshots of what the window
//! manager reported at the time of the last tree fetch.  Nothing here is
//! cached between passes; a fresh snapshot is built for every trigger.
//!
//! [`Trigger`] is the vocabulary of the driver loop: every background source
//! (the event subscription, the signal listener) talks to the main thread
//! exclusively through it.

use std::fmt;

/// Geometry of a window in output coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A leaf window as reported by the window manager.
///
/// Every field may be absent.  X11 windows usually carry a class and an
/// instance, Wayland-native windows on sway often carry neither and only
/// have a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    /// `WM_CLASS` class part (or the sway `app_id`).
    pub class: Option<String>,
    /// `WM_CLASS` instance part.
    pub instance: Option<String>,
    /// Window title.
    pub name: Option<String>,
    pub rect: Rect,
}

impl Window {
    /// Convenience constructor for a window that only has a class.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for a window that only has a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            name: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A workspace and its leaf windows, in the order the manager lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    /// Fixed ordinal, or `None` for a purely named workspace (i3 reports
    /// `num: -1` for those).
    pub num: Option<i64>,
    /// Current name.  May be empty.
    pub name: String,
    /// Leaf windows, tiling first then floating.
    pub windows: Vec<Window>,
    /// Whether this is i3's internal scratchpad workspace.
    pub scratchpad: bool,
}

impl Workspace {
    pub fn new(num: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            num,
            name: name.into(),
            windows: Vec::new(),
            scratchpad: false,
        }
    }

    /// Builder-style helper used heavily in tests.
    pub fn with_windows(mut self, windows: impl IntoIterator<Item = Window>) -> Self {
        self.windows.extend(windows);
        self
    }
}

/// Lifecycle events the driver subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    WindowNew,
    WindowClose,
    WindowFocus,
    WindowMove,
    WindowTitle,
    WorkspaceFocus,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::WindowNew => write!(f, "window::new"),
            LifecycleEvent::WindowClose => write!(f, "window::close"),
            LifecycleEvent::WindowFocus => write!(f, "window::focus"),
            LifecycleEvent::WindowMove => write!(f, "window::move"),
            LifecycleEvent::WindowTitle => write!(f, "window::title"),
            LifecycleEvent::WorkspaceFocus => write!(f, "workspace::focus"),
        }
    }
}

/// A lifecycle event together with its minimal payload.
///
/// The payload is only used for diagnostics; every event triggers a full
/// pass regardless of what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: LifecycleEvent,
    /// The window the event is about (window events only).
    pub window: Option<Window>,
    /// `(num, name)` of the workspace the event is about (workspace events
    /// only).
    pub workspace: Option<(Option<i64>, String)>,
}

/// Everything the driver loop can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A subscribed lifecycle event arrived.
    Event(Event),
    /// An explicit refresh was requested (SIGUSR2).
    Refresh,
    /// The process was asked to stop.
    Shutdown,
    /// The event subscription died; carries the reason.
    Disconnected(String),
}
