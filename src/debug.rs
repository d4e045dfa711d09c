//! Debug log file and `log` facade bridge
//!
//! Every `log::info!()`/`debug!()`/... from muxpod and its crates is written
//! to `muxpod_debug.log` in the temp directory (`/tmp` on Unix). Writing to a
//! file keeps diagnostics out of the terminal output being mirrored. When
//! `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `DEBUG_LEVEL`/`RUST_LOG`, then
//! the config file's `log_level` (applied with [`apply_config_level`]).

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use muxpod_config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Log file location
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/muxpod_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("muxpod_debug.log")
    }
}

struct DebugLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn open(mirror_stderr: bool) -> Self {
        // Silently fall back to no file; logging must never break the CLI
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        let logger = Self {
            file: Mutex::new(file),
            mirror_stderr,
        };
        logger.write_raw(&format!(
            "{}\nmuxpod debug session started at {}\n{}\n",
            "=".repeat(80),
            timestamp(),
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&self, msg: &str) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_raw(&line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

/// Set once the level came from the flag or the environment
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// `DEBUG_LEVEL` (0-5) or `RUST_LOG` (a level name) from the environment
fn env_level() -> Option<LevelFilter> {
    if let Ok(val) = std::env::var("DEBUG_LEVEL")
        && let Ok(level) = val.trim().parse::<LogLevel>()
    {
        return Some(level.to_level_filter());
    }
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|val| val.trim().parse::<LogLevel>().ok())
        .map(|level| level.to_level_filter())
}

/// Install the bridge as the global logger
///
/// Call once at startup. Later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let pinned = cli_level.or_else(env_level);
    LEVEL_PINNED.store(pinned.is_some(), Ordering::SeqCst);

    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();
    let logger = LOGGER.get_or_init(|| DebugLogger::open(mirror_stderr));
    if log::set_logger(logger).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(pinned.unwrap_or(LevelFilter::Off));
}

/// Apply the config file's level unless the flag or environment chose one
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_PINNED.load(Ordering::SeqCst) {
        return;
    }
    log::set_max_level(level.to_level_filter());
}
