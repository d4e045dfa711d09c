//! Parsers for tab-delimited tmux output
//!
//! Each line is validated on its own: exact field count, required fields
//! present, numbers numeric. A line that fails any check is skipped with a
//! reason, so one malformed row never sinks the rest of the batch.

use crate::commands::FIELD_SEPARATOR;
use crate::types::{CursorPosition, TmuxPane, TmuxSession, TmuxWindow};
use std::fmt;
use std::str::FromStr;

const SESSION_FIELDS: usize = 4;
const WINDOW_FIELDS: usize = 4;
const PANE_FIELDS: usize = 9;

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FieldCount { expected: usize, found: usize },
    MissingField(&'static str),
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::MissingField(field) => write!(f, "missing required field '{field}'"),
            Self::InvalidNumber { field, value } => {
                write!(f, "field '{field}' is not a number: {value:?}")
            }
        }
    }
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse<T> {
    Record(T),
    Skip(SkipReason),
}

impl<T> LineParse<T> {
    pub fn record(self) -> Option<T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Skip(_) => None,
        }
    }
}

/// One split line; accessors fail with the reason to skip it
struct Fields<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(line: &'a str, expected: usize) -> Result<Self, SkipReason> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != expected {
            return Err(SkipReason::FieldCount {
                expected,
                found: fields.len(),
            });
        }
        Ok(Self { fields })
    }

    fn required(&self, index: usize, name: &'static str) -> Result<String, SkipReason> {
        let value = self.fields[index];
        if value.is_empty() {
            return Err(SkipReason::MissingField(name));
        }
        Ok(value.to_string())
    }

    fn number<N: FromStr>(&self, index: usize, name: &'static str) -> Result<N, SkipReason> {
        let value = self.fields[index].trim();
        if value.is_empty() {
            return Err(SkipReason::MissingField(name));
        }
        value.parse().map_err(|_| SkipReason::InvalidNumber {
            field: name,
            value: value.to_string(),
        })
    }

    fn flag(&self, index: usize) -> bool {
        self.fields[index].trim() == "1"
    }
}

impl<T> From<Result<T, SkipReason>> for LineParse<T> {
    fn from(result: Result<T, SkipReason>) -> Self {
        match result {
            Ok(record) => Self::Record(record),
            Err(reason) => Self::Skip(reason),
        }
    }
}

/// Strip the line terminator tmux (or the transport) may leave behind
fn clean(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn session_record(line: &str) -> Result<TmuxSession, SkipReason> {
    let f = Fields::split(clean(line), SESSION_FIELDS)?;
    let name = f.required(0, "session_name")?;
    let created_secs: i64 = f.number(1, "session_created")?;
    Ok(TmuxSession {
        name,
        created_at_ms: created_secs.saturating_mul(1000),
        attached: f.flag(2),
        window_count: f.number(3, "session_windows")?,
        windows: Vec::new(),
    })
}

fn window_record(line: &str) -> Result<TmuxWindow, SkipReason> {
    let f = Fields::split(clean(line), WINDOW_FIELDS)?;
    Ok(TmuxWindow {
        index: f.number(0, "window_index")?,
        name: f.required(1, "window_name")?,
        active: f.flag(2),
        pane_count: f.number(3, "window_panes")?,
        panes: Vec::new(),
    })
}

fn pane_record(line: &str) -> Result<TmuxPane, SkipReason> {
    let f = Fields::split(clean(line), PANE_FIELDS)?;
    Ok(TmuxPane {
        index: f.number(0, "pane_index")?,
        id: f.required(1, "pane_id")?,
        active: f.flag(2),
        current_command: f.required(3, "pane_current_command")?,
        title: f.required(4, "pane_title")?,
        width: f.number(5, "pane_width")?,
        height: f.number(6, "pane_height")?,
        cursor_x: f.number(7, "cursor_x")?,
        cursor_y: f.number(8, "cursor_y")?,
    })
}

pub fn parse_session_line(line: &str) -> LineParse<TmuxSession> {
    session_record(line).into()
}

pub fn parse_window_line(line: &str) -> LineParse<TmuxWindow> {
    window_record(line).into()
}

pub fn parse_pane_line(line: &str) -> LineParse<TmuxPane> {
    pane_record(line).into()
}

fn parse_batch<T>(output: &str, kind: &str, parse: fn(&str) -> LineParse<T>) -> Vec<T> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse(line) {
            LineParse::Record(record) => Some(record),
            LineParse::Skip(reason) => {
                log::debug!("Skipping malformed {} line ({}): {:?}", kind, reason, line);
                None
            }
        })
        .collect()
}

/// Parse `list-sessions` output; malformed lines are dropped
pub fn parse_sessions(output: &str) -> Vec<TmuxSession> {
    parse_batch(output, "session", parse_session_line)
}

/// Parse `list-windows` output; malformed lines are dropped
pub fn parse_windows(output: &str) -> Vec<TmuxWindow> {
    parse_batch(output, "window", parse_window_line)
}

/// Parse `list-panes` output; malformed lines are dropped
pub fn parse_panes(output: &str) -> Vec<TmuxPane> {
    parse_batch(output, "pane", parse_pane_line)
}

/// Split `capture-pane -p` output into lines
///
/// Output that is empty or only whitespace yields no lines at all. Otherwise
/// the final newline tmux appends is dropped, so a pane whose last row is
/// blank still keeps that row.
pub fn parse_capture(output: &str) -> Vec<String> {
    if output.trim().is_empty() {
        return Vec::new();
    }
    let body = output.strip_suffix('\n').unwrap_or(output);
    body.split('\n').map(|line| clean(line).to_string()).collect()
}

/// Parse the cursor query reply (`x<TAB>y`)
pub fn parse_cursor(output: &str) -> Option<CursorPosition> {
    let line = output.lines().find(|l| !l.trim().is_empty())?;
    let (x, y) = clean(line).split_once(FIELD_SEPARATOR)?;
    Some(CursorPosition {
        x: x.trim().parse().ok()?,
        y: y.trim().parse().ok()?,
    })
}
