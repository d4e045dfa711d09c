//! Per-pane polling mirror
//!
//! A [`PaneSync`] is either idle or polling. While polling, every tick
//! captures the pane in its own task; the raw text is compared with the last
//! applied capture and only a change (or a cursor move) is parsed and
//! published to the [`TerminalStore`].
//!
//! Replies can arrive out of order when a round-trip outlasts the poll
//! interval. Each capture takes a sequence number and the generation current
//! at issue time, both under the state lock; a reply is applied only if its
//! generation is still current and its sequence number is newer than the last
//! one applied. `stop_polling` bumps the generation under the same lock, so no
//! reply issued before a stop can publish after it.

use super::poller::PollTask;
use crate::clock::Clock;
use crate::content::PaneContent;
use crate::store::TerminalStore;
use muxpod_ansi::parse_lines;
use muxpod_config::Config;
use muxpod_tmux::{
    CaptureOptions, CommandExecutor, CursorPosition, PaneTarget, SpecialKey, TmuxClient,
    TmuxError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Polling parameters for one pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub poll_interval: Duration,
    /// History lines requested per capture and kept in the mirror
    pub scrollback_lines: usize,
    pub preserve_escapes: bool,
    pub track_cursor: bool,
    /// Outstanding captures before further ticks are skipped
    pub max_in_flight: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SyncConfig {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            scrollback_lines: config.scrollback_lines,
            preserve_escapes: config.preserve_escapes,
            track_cursor: config.track_cursor,
            max_in_flight: config.max_in_flight,
        }
    }
}

/// What a single refresh did to the mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// New content was parsed and stored
    Published,
    /// Same text and cursor as the current mirror; nothing stored
    Unchanged,
    /// The reply was stale (newer reply already applied, or issued before a stop)
    Discarded,
}

#[derive(Default)]
struct MirrorState {
    polling: bool,
    generation: u64,
    issued_seq: u64,
    applied_seq: u64,
    last_raw: Option<String>,
    cursor: CursorPosition,
    poller: Option<PollTask>,
}

struct Shared<E> {
    client: TmuxClient<E>,
    store: Arc<TerminalStore>,
    clock: Arc<dyn Clock>,
    config: SyncConfig,
    target: PaneTarget,
    pane_id: String,
    in_flight: AtomicUsize,
    state: Mutex<MirrorState>,
}

/// Synchronizes one remote pane into a [`TerminalStore`]
///
/// Cloning yields another handle to the same engine.
pub struct PaneSync<E> {
    shared: Arc<Shared<E>>,
}

impl<E> Clone for PaneSync<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> PaneSync<E> {
    /// Seed the cursor published with content (usually from the pane listing)
    pub fn with_cursor(self, cursor: CursorPosition) -> Self {
        self.shared.state.lock().cursor = cursor;
        self
    }

    pub fn target(&self) -> &PaneTarget {
        &self.shared.target
    }

    /// Key of this pane's mirror in the store
    pub fn pane_id(&self) -> &str {
        &self.shared.pane_id
    }

    pub fn config(&self) -> &SyncConfig {
        &self.shared.config
    }

    pub fn is_polling(&self) -> bool {
        self.shared.state.lock().polling
    }

    /// Captures issued by ticks that have not completed yet
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Polling → idle
    ///
    /// Cancels the timer and destroys the pane's mirror. Safe to call from
    /// any thread; replies still in flight are discarded when they land.
    pub fn stop_polling(&self) {
        let mut state = self.shared.state.lock();
        if !state.polling {
            return;
        }
        state.polling = false;
        state.generation += 1;
        if let Some(poller) = state.poller.take() {
            poller.cancel();
        }
        state.last_raw = None;
        self.shared.store.clear_content(&self.shared.pane_id);
        log::debug!("Stopped sync for {}", self.shared.pane_id);
    }
}

impl<E: CommandExecutor> PaneSync<E> {
    pub fn new(
        client: TmuxClient<E>,
        store: Arc<TerminalStore>,
        clock: Arc<dyn Clock>,
        config: SyncConfig,
        target: PaneTarget,
    ) -> Self {
        let pane_id = target.to_string();
        Self {
            shared: Arc::new(Shared {
                client,
                store,
                clock,
                config,
                target,
                pane_id,
                in_flight: AtomicUsize::new(0),
                state: Mutex::new(MirrorState::default()),
            }),
        }
    }

    /// Capture once and publish if changed
    pub async fn refresh(&self) -> Result<SyncOutcome, TmuxError> {
        self.shared.refresh().await
    }

    /// Idle → polling: one refresh right away, then one per interval
    ///
    /// No-op when already polling. A failed first refresh is logged and
    /// polling continues.
    pub async fn start_polling(&self) {
        let generation = {
            let mut state = self.shared.state.lock();
            if state.polling {
                return;
            }
            state.polling = true;
            state.generation
        };
        log::debug!("Starting sync for {}", self.shared.pane_id);

        if let Err(e) = self.shared.refresh().await {
            log::warn!("Initial capture of {} failed: {}", self.shared.pane_id, e);
        }

        let mut state = self.shared.state.lock();
        if !state.polling || state.generation != generation {
            // Stopped while the first capture was in flight
            return;
        }
        let weak = Arc::downgrade(&self.shared);
        state.poller = Some(PollTask::spawn(self.shared.config.poll_interval, move || {
            tick(&weak)
        }));
    }

    // =========================================================================
    // Key forwarding (no local echo; the next capture shows the effect)
    // =========================================================================

    pub async fn send_keys(&self, text: &str) -> Result<(), TmuxError> {
        let shared = &self.shared;
        shared
            .client
            .send_literal(&shared.target, text)
            .await
            .inspect_err(|e| log::warn!("send-keys to {} failed: {}", shared.pane_id, e))
    }

    pub async fn send_special_key(&self, key: SpecialKey) -> Result<(), TmuxError> {
        let shared = &self.shared;
        shared
            .client
            .send_special(&shared.target, key)
            .await
            .inspect_err(|e| log::warn!("send {} to {} failed: {}", key, shared.pane_id, e))
    }

    pub async fn send_ctrl(&self, key: &str) -> Result<(), TmuxError> {
        let shared = &self.shared;
        shared
            .client
            .send_ctrl(&shared.target, key)
            .await
            .inspect_err(|e| log::warn!("send C-{} to {} failed: {}", key, shared.pane_id, e))
    }

    pub async fn send_alt(&self, key: &str) -> Result<(), TmuxError> {
        let shared = &self.shared;
        shared
            .client
            .send_alt(&shared.target, key)
            .await
            .inspect_err(|e| log::warn!("send M-{} to {} failed: {}", key, shared.pane_id, e))
    }
}

/// One timer tick; `false` once the engine is gone
fn tick<E: CommandExecutor>(weak: &Weak<Shared<E>>) -> bool {
    let Some(shared) = weak.upgrade() else {
        return false;
    };
    let in_flight = shared.in_flight.load(Ordering::SeqCst);
    if in_flight >= shared.config.max_in_flight {
        log::trace!(
            "Skipping tick for {}: {} captures in flight",
            shared.pane_id,
            in_flight
        );
        return true;
    }
    shared.in_flight.fetch_add(1, Ordering::SeqCst);
    tokio::spawn(async move {
        if let Err(e) = shared.refresh().await {
            log::debug!("Capture of {} failed: {}", shared.pane_id, e);
        }
        shared.in_flight.fetch_sub(1, Ordering::SeqCst);
    });
    true
}

impl<E: CommandExecutor> Shared<E> {
    async fn refresh(&self) -> Result<SyncOutcome, TmuxError> {
        let (seq, generation) = {
            let mut state = self.state.lock();
            state.issued_seq += 1;
            (state.issued_seq, state.generation)
        };

        let options = CaptureOptions {
            start: Some(-(self.config.scrollback_lines as i64)),
            end: None,
            escapes: self.config.preserve_escapes,
        };
        let raw = self.client.capture_pane(&self.target, &options).await?;

        let cursor = if self.config.track_cursor {
            match self.client.cursor_position(&self.target).await {
                Ok(cursor) => cursor,
                Err(e) => {
                    log::debug!("Cursor query for {} failed: {}", self.pane_id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(self.apply(seq, generation, &raw, cursor))
    }

    fn apply(
        &self,
        seq: u64,
        generation: u64,
        raw: &[String],
        cursor: Option<CursorPosition>,
    ) -> SyncOutcome {
        let mut state = self.state.lock();
        if generation != state.generation {
            log::trace!("Discarding capture {} of {}: stopped", seq, self.pane_id);
            return SyncOutcome::Discarded;
        }
        if seq <= state.applied_seq {
            log::trace!(
                "Discarding capture {} of {}: {} already applied",
                seq,
                self.pane_id,
                state.applied_seq
            );
            return SyncOutcome::Discarded;
        }
        state.applied_seq = seq;
        if let Some(cursor) = cursor {
            state.cursor = cursor;
        }

        let joined = raw.join("\n");
        let same_text = state.last_raw.as_deref() == Some(joined.as_str());
        let same_cursor = self
            .store
            .content(&self.pane_id)
            .is_some_and(|c| c.cursor() == state.cursor);
        if same_text && same_cursor {
            return SyncOutcome::Unchanged;
        }

        let content = PaneContent::new(
            self.pane_id.clone(),
            parse_lines(raw),
            self.config.scrollback_lines,
            state.cursor,
            self.clock.now_ms(),
        );
        self.store.set_content(content);
        state.last_raw = Some(joined);
        SyncOutcome::Published
    }
}
