//! The fixed-cadence poll loop that feeds input to the engine.

use std::time::Duration;

use hotkey_engine::{HotkeyEngine, InputSource, StereoParams, StoreNotification};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::params::SharedParams;

/// Poll loop settings.
#[derive(Clone, Copy, Debug)]
pub struct PollOptions {
    /// Time between ticks.
    pub period: Duration,
    /// Stop after this many ticks; `None` runs until cancelled.
    pub max_ticks: Option<u64>,
    /// When false, input is still sampled but no slot is evaluated.
    pub hotkeys_enabled: bool,
}

/// What a finished poll loop did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Ticks sampled.
    pub ticks: u64,
    /// Store notifications returned by the engine.
    pub stores: usize,
    /// The most recent store notification.
    pub last_store: Option<StoreNotification>,
    /// Parameters when the loop stopped, after held slots were released.
    pub final_params: StereoParams,
    /// The loop stopped because of the cancellation token.
    pub cancelled: bool,
}

/// Sample `input` and tick `engine` at a constant cadence.
///
/// Missed ticks are skipped rather than bursted. The backend lock is taken
/// once per tick. On exit every engaged hold is restored so no override
/// outlives the loop.
pub async fn run_poll_loop<I: InputSource>(
    engine: &mut HotkeyEngine,
    input: &mut I,
    params: &SharedParams,
    options: PollOptions,
    cancel: CancellationToken,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut interval = time::interval(options.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(
        period_ms = options.period.as_millis(),
        max_ticks = ?options.max_ticks,
        enabled = options.hotkeys_enabled,
        "poll_loop_start"
    );

    loop {
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                summary.cancelled = true;
                break;
            }
            _ = interval.tick() => {}
        }

        let snapshot = input.sample();
        summary.ticks += 1;
        if !options.hotkeys_enabled {
            continue;
        }
        let mut guard = params.lock();
        if let Some(note) = engine.tick(&snapshot, &mut *guard) {
            trace!(tick = summary.ticks, label = %note.slot_label, "store_returned");
            summary.stores += 1;
            summary.last_store = Some(note);
        }
    }

    let released = engine.release_held(&mut *params.lock());
    summary.final_params = params.get();
    info!(
        ticks = summary.ticks,
        stores = summary.stores,
        released,
        cancelled = summary.cancelled,
        params = %summary.final_params,
        "poll_loop_stopped"
    );
    summary
}
