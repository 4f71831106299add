//! Entry point for the **wslabel** daemon.
//!
//! Connects to i3 (or sway), runs one reconciliation pass, then spawns the
//! event subscription and the signal listener on background threads and
//! processes their triggers on the main thread until interrupted.

use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;
use wslabel::config::Config;
use wslabel::daemon::{self, DaemonError};
use wslabel::engine::LabelEngine;
use wslabel::i3::events::I3EventSource;
use wslabel::i3::wm::I3Wm;
use wslabel::i3::{self as i3ipc, I3Error};
use wslabel::model::Trigger;
use wslabel::signals::SignalSource;
use wslabel::traits::TriggerSource;

const USAGE: &str = "\
wslabel: names i3/sway workspaces after the applications on them

Usage:
  wslabel [--config <path>]

Options:
  -c, --config <path>  Config file (default: $XDG_CONFIG_HOME/wslabel/config.json)
  -h, --help           Show this help

Signals:
  SIGUSR2              Force a refresh of all workspace names
  SIGINT/SIGTERM       Exit";

/// Resolve the config directory (`$XDG_CONFIG_HOME/wslabel`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("wslabel")
}

/// Load the config from `explicit`, or from the default location, falling
/// back to compiled-in defaults.  A missing default file is normal; a file
/// that exists but fails to load is reported but not fatal.
fn load_config(explicit: Option<PathBuf>) -> Config {
    let is_explicit = explicit.is_some();
    let path = explicit.unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load_optional(&path) {
        Ok(Some(cfg)) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Ok(None) if is_explicit => {
            error!("config file {} does not exist, using defaults", path.display());
            Config::default()
        }
        Ok(None) => {
            info!("no config file at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

enum Args {
    Run { config: Option<PathBuf> },
    Help,
}

fn parse_args() -> Args {
    let mut config = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => warn!("--config requires a path, ignoring"),
            },
            "--help" | "-h" => return Args::Help,
            other => warn!("ignoring unknown argument '{}'", other),
        }
    }
    Args::Run { config }
}

//  Main

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args() {
        Args::Help => {
            println!("{}", USAGE);
            return;
        }
        Args::Run { config } => load_config(config),
    };

    if let Err(e) = run(config) {
        error!("wslabel error: {}", e);
        std::process::exit(1);
    }
}

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("{0}")]
    I3(#[from] I3Error),
    #[error("signal setup failed: {0}")]
    Signals(#[from] std::io::Error),
    #[error("{0}")]
    Daemon(#[from] DaemonError),
}

fn run(config: Config) -> Result<(), StartupError> {
    let socket = match config.socket_path.clone() {
        Some(path) => path,
        None => i3ipc::socket_path()?,
    };
    info!("using IPC socket {}", socket.display());

    let signals = SignalSource::register()?;

    let wm = I3Wm::connect(&socket)?;
    let mut engine = LabelEngine::new(wm, config.synthesizer());

    engine
        .repair_scratchpad()
        .map_err(DaemonError::from)?;
    let summary = engine.pass().map_err(DaemonError::from)?;
    info!(
        "initial pass: {} renamed, {} unchanged, {} failed",
        summary.renamed, summary.unchanged, summary.failed
    );

    let events = I3EventSource::subscribe(&socket, config.rename_on_title)?;

    let (tx, rx) = mpsc::channel::<Trigger>();
    spawn_trigger_sources(tx, events, signals);

    info!("wslabel running (pid={})", std::process::id());
    daemon::run(&mut engine, rx)?;
    Ok(())
}

//  Helpers

fn spawn_trigger_sources(tx: mpsc::Sender<Trigger>, mut events: I3EventSource, mut signals: SignalSource) {
    {
        let tx = tx.clone();
        std::thread::spawn(move || {
            let reason = match events.run(tx.clone()) {
                Ok(()) => return,
                Err(e) => e.to_string(),
            };
            error!("event subscription error: {}", reason);
            let _ = tx.send(Trigger::Disconnected(reason));
        });
    }

    std::thread::spawn(move || {
        if let Err(e) = signals.run(tx) {
            error!("signal listener error: {}", e);
        }
    });
}
