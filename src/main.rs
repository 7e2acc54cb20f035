// Chunk: docs/chunks/terminal_host - Terminal popup host
//!
//! tabfzf: pick a browser tab from a JSON snapshot in the terminal.
//!
//! Reads a JSON array of tabs (from `--tabs FILE` or stdin), shows the
//! switcher popup on the controlling terminal and prints the chosen tab as JSON
//! on stdout. Exits 0 when a tab was chosen, 1 when the popup was closed and
//! 2 on errors.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabfzf::app::{App, Exit};
use tabfzf::platform::SnapshotPlatform;
use tabfzf::terminal::{TerminalFocusHost, TerminalGuard};
use tabfzf_switcher::settings::now_millis;
use tabfzf_switcher::{
    config, FileStore, KeyValueStore, MemoryStore, Popup, SettingsPanel, SwitcherConfig, TabId,
    ThemeBook,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TABFZF_LOG";

const LOG_FILENAME: &str = "tabfzf.log";

#[derive(Debug, Parser)]
#[command(name = "tabfzf", version, about = "Keyboard-driven tab switcher")]
struct Cli {
    /// JSON file with the tabs to choose from (default: stdin)
    #[arg(long, value_name = "FILE")]
    tabs: Option<PathBuf>,

    /// Id of the active tab, which is left out of the list
    #[arg(long, value_name = "ID")]
    active: Option<i64>,

    /// Match the query against tab titles only, not URL hosts
    #[arg(long)]
    no_host_match: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(Exit::Activated(_)) => ExitCode::SUCCESS,
        Ok(Exit::Cancelled) => ExitCode::from(1),
        Err(err) => {
            eprintln!("tabfzf: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<Exit> {
    let cli = Cli::parse();
    init_logging();

    let mut config = SwitcherConfig::load().context("failed to load configuration")?;
    if cli.no_host_match {
        config.match_host = false;
    }

    let mut platform = match &cli.tabs {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            SnapshotPlatform::from_reader(BufReader::new(file))
        }
        None => SnapshotPlatform::from_reader(io::stdin().lock()),
    }
    .context("failed to parse tab list")?;
    if let Some(id) = cli.active {
        platform.set_active(TabId(id));
    }

    let store: Box<dyn KeyValueStore> = match config::data_dir() {
        Some(dir) => Box::new(FileStore::in_dir(&dir)),
        None => Box::new(MemoryStore::new()),
    };
    let settings = SettingsPanel::new(ThemeBook::load(store.as_ref(), now_millis()));

    let mut stderr = io::stderr();
    let exit = {
        let _guard = TerminalGuard::enter(&mut stderr).context("failed to set up the terminal")?;
        let mut host = TerminalFocusHost::new();
        let popup = Popup::open(&mut platform, &config, &mut host);
        let mut app = App::new(popup, settings, platform, host, store);
        app.run(&mut stderr).context("terminal I/O failed")?
    };

    if let Exit::Activated(tab) = &exit {
        info!(tab = %tab.id, "tab chosen");
        println!("{}", serde_json::to_string(tab)?);
    }
    Ok(exit)
}

/// Sends logs to `<data_dir>/tabfzf/tabfzf.log`, filtered by `TABFZF_LOG`
/// (default `warn`). Logging is skipped when the file cannot be opened.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let Some(dir) = config::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILENAME))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
