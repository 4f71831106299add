//! **wslabel** — keeps i3/sway workspace names in sync with their windows.
//!
//! Each workspace is named after the first application on it, prefixed with
//! the workspace number: `"2: firefox"`, or `"2: "` plus a glyph when the
//! application has an alias.  Names are recomputed from a fresh tree
//! snapshot on every relevant event and only pushed back when they differ.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowManager`] — lists workspaces and submits commands, so
//!   the labeling logic is not coupled to the i3 wire protocol.
//! * [`traits::TriggerSource`] — delivers reasons to run a pass (events,
//!   signals) to the driver loop over a channel.
//!
//! The pure parts ([`classify`], [`alias`], [`label`]) compute labels;
//! [`reconcile`] and [`engine`] apply them; [`daemon`] drives passes.
//! Concrete backends live in [`i3`] and [`signals`].

pub mod alias;
pub mod classify;
pub mod config;
pub mod daemon;
pub mod engine;
pub mod i3;
pub mod label;
pub mod model;
pub mod reconcile;
pub mod signals;
pub mod traits;
