//! Command-line interface for muxpod.
//!
//! Subcommands list the session tree, capture or drive a single pane, and
//! mirror a pane live through the sync engine.

use crate::clock::SystemClock;
use crate::navigator::TmuxNavigator;
use crate::store::{SessionStore, TerminalStore};
use crate::sync::{PaneSync, SyncConfig};
use crate::transport::ProcessExecutor;
use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use muxpod_config::{Config, LogLevel};
use muxpod_tmux::{CaptureOptions, KeyInput, PaneTarget, SpecialKey, TmuxClient, TmuxSession};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// muxpod - mirror and drive tmux panes over a command channel
#[derive(Parser, Debug)]
#[command(name = "muxpod")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run tmux on a remote host through ssh (e.g. "-p 2222 user@host")
    #[arg(long, global = true, value_name = "DEST", allow_hyphen_values = true)]
    pub ssh: Option<String>,

    /// tmux binary on the target host
    #[arg(long = "tmux", global = true, value_name = "PATH")]
    pub tmux_path: Option<String>,

    /// Config file (default: ~/.config/muxpod/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug log level: off, error, warn, info, debug, trace (or 0-5)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List sessions with their windows and panes
    Sessions {
        /// Print the hierarchy as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a pane's content
    Capture {
        /// Pane target, `session:window.pane`
        target: String,

        /// First line; negative values reach into scrollback
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        /// Last line
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i64>,

        /// Drop colours and attributes
        #[arg(long)]
        plain: bool,
    },

    /// Send input to a pane
    Send {
        /// Pane target, `session:window.pane`
        target: String,

        #[command(flatten)]
        input: SendInput,
    },

    /// Mirror a pane until interrupted
    Watch {
        /// Pane target, `session:window.pane`
        target: String,

        /// Poll interval in milliseconds (overrides the config)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },
}

/// Exactly one kind of input per invocation
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SendInput {
    /// Literal text, typed verbatim
    #[arg(long, allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Named key: Enter, Escape, Tab, Up, PageDown, F5, ...
    #[arg(long)]
    pub key: Option<String>,

    /// Ctrl+KEY
    #[arg(long, value_name = "KEY")]
    pub ctrl: Option<String>,

    /// Alt+KEY
    #[arg(long, value_name = "KEY")]
    pub alt: Option<String>,
}

impl SendInput {
    fn to_key_input(&self) -> Result<KeyInput> {
        if let Some(text) = &self.text {
            return Ok(KeyInput::Literal(text.clone()));
        }
        if let Some(name) = &self.key {
            let key = SpecialKey::from_name(name).ok_or_else(|| anyhow!("unknown key '{name}'"))?;
            return Ok(KeyInput::Special(key));
        }
        if let Some(key) = &self.ctrl {
            return Ok(KeyInput::Ctrl(key.clone()));
        }
        if let Some(key) = &self.alt {
            return Ok(KeyInput::Alt(key.clone()));
        }
        bail!("one of --text, --key, --ctrl or --alt is required")
    }
}

impl Cli {
    /// Load the config file named by `--config`, or the default one
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load().context("failed to load config")?,
        };
        if let Some(ssh) = &self.ssh {
            config.ssh = Some(ssh.clone());
        }
        if let Some(tmux_path) = &self.tmux_path {
            config.tmux_path = tmux_path.clone();
        }
        if let Commands::Watch {
            interval_ms: Some(ms),
            ..
        } = &self.command
        {
            config.poll_interval_ms = *ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_target(target: &str) -> Result<PaneTarget> {
    PaneTarget::parse(target)
        .ok_or_else(|| anyhow!("invalid pane target '{target}' (expected session:window.pane)"))
}

/// Run the parsed command against the configured host
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let executor = ProcessExecutor::from_spec(config.ssh.as_deref())?;
    let client = TmuxClient::new(Arc::new(executor)).with_tmux_path(config.tmux_path.clone());

    match cli.command {
        Commands::Sessions { json } => list_sessions(client, &config, json).await,
        Commands::Capture {
            target,
            start,
            end,
            plain,
        } => {
            let target = parse_target(&target)?;
            let options = CaptureOptions {
                start,
                end,
                escapes: !plain,
            };
            let lines = client.capture_pane(&target, &options).await?;
            let mut out = io::stdout().lock();
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Commands::Send { target, input } => {
            let target = parse_target(&target)?;
            client.send_keys(&target, &input.to_key_input()?).await?;
            Ok(())
        }
        Commands::Watch { target, .. } => watch(client, &config, parse_target(&target)?).await,
    }
}

async fn list_sessions(
    client: TmuxClient<ProcessExecutor>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let scope = config.ssh.clone().unwrap_or_else(|| "local".to_string());
    let navigator = TmuxNavigator::new(
        client,
        Arc::new(SessionStore::new()),
        scope,
        config.listing_concurrency,
    );
    let sessions = navigator.refresh_sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }
    if sessions.is_empty() {
        println!("No tmux sessions");
        return Ok(());
    }
    let mut out = io::stdout().lock();
    for session in &sessions {
        write_session(&mut out, session)?;
    }
    Ok(())
}

fn write_session(out: &mut impl Write, session: &TmuxSession) -> io::Result<()> {
    let created = session
        .created_at()
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string());
    writeln!(
        out,
        "{}{} ({} windows, created {})",
        session.name,
        if session.attached { " [attached]" } else { "" },
        session.window_count,
        created
    )?;
    for window in &session.windows {
        writeln!(
            out,
            "  {}: {}{} ({} panes)",
            window.index,
            window.name,
            if window.active { "*" } else { "" },
            window.pane_count
        )?;
        for pane in &window.panes {
            writeln!(
                out,
                "    {}.{} {} {} {}x{}{}",
                window.index,
                pane.index,
                pane.id,
                pane.current_command,
                pane.width,
                pane.height,
                if pane.active { " *" } else { "" }
            )?;
        }
    }
    Ok(())
}

async fn watch(
    client: TmuxClient<ProcessExecutor>,
    config: &Config,
    target: PaneTarget,
) -> Result<()> {
    let store = Arc::new(TerminalStore::new(config.scrollback_lines));
    let sync = PaneSync::new(
        client,
        Arc::clone(&store),
        Arc::new(SystemClock),
        SyncConfig::from(config),
        target,
    );
    let mut published = store.subscribe();

    sync.start_polling().await;
    render(&store, sync.pane_id())?;

    loop {
        tokio::select! {
            changed = published.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&store, sync.pane_id())?;
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted; stopping sync");
                break;
            }
        }
    }

    sync.stop_polling();
    // Give in-flight captures a moment to land so they are discarded, not killed
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}

fn render(store: &TerminalStore, pane_id: &str) -> Result<()> {
    let Some(content) = store.content(pane_id) else {
        return Ok(());
    };
    let mut out = io::stdout().lock();
    write!(out, "\x1b[H\x1b[2J")?;
    for line in &content.lines {
        writeln!(out, "{}", line.to_ansi())?;
    }
    out.flush()?;
    Ok(())
}
