//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields and by `Config::default`, so both paths agree.

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── tmux ───────────────────────────────────────────────────────────────────

pub fn tmux_path() -> String {
    "tmux".to_string()
}

// ── Synchronization ────────────────────────────────────────────────────────

pub fn poll_interval_ms() -> u64 {
    100
}

pub fn scrollback_lines() -> usize {
    1000
}

pub fn max_in_flight() -> usize {
    4
}

// ── Navigation ─────────────────────────────────────────────────────────────

pub fn listing_concurrency() -> usize {
    4
}
