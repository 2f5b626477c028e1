//! Implementations of the CLI subcommands.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::Profile;
use hotkey_engine::{HotkeyEngine, LogFeedback, StereoParams};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    params::SharedParams,
    runner::{PollOptions, RunSummary, run_poll_loop},
    trace::{TraceInput, TraceStep, load_trace},
};

/// Load and validate a profile. With `dump`, return it re-serialized as JSON.
pub fn check(path: Option<&Path>, dump: bool) -> Result<String> {
    let resolved = config::resolve_config_path(path)?;
    let profile = config::load_from_path(&resolved)?;
    if dump {
        Ok(config::to_json_string(&profile)?)
    } else {
        Ok("OK".to_string())
    }
}

/// Write the default profile into `dir` (or the per-user directory) unless present.
pub fn init(dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.map_or_else(config::config_dir, Path::to_path_buf);
    Ok(config::ensure_default_config(&dir)?)
}

/// Settings for [`replay`].
#[derive(Clone, Debug)]
pub struct ReplayArgs {
    /// Trace to play.
    pub trace: PathBuf,
    /// Profile to use; resolved with the default policy when absent.
    pub config: Option<PathBuf>,
    /// Poll rate in Hz; defaults to the profile's display frequency.
    pub rate: Option<f64>,
    /// Persist stored targets back to the profile.
    pub save: bool,
}

/// Poll period for `rate` Hz.
pub fn period_for_rate(rate: f64) -> Result<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::Rate(rate));
    }
    Ok(Duration::from_secs_f64(1.0 / rate))
}

/// Drive the engine from a recorded trace on a fixed cadence.
///
/// Stops at the end of the trace or on Ctrl-C.
pub fn replay(args: &ReplayArgs) -> Result<RunSummary> {
    let path = config::resolve_config_path(args.config.as_deref())?;
    let mut profile = config::load_from_path(&path)?;
    let steps = load_trace(&args.trace)?;
    let period = period_for_rate(args.rate.unwrap_or(f64::from(profile.display_frequency)))?;

    let rt = Runtime::new()?;
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    rt.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted");
            interrupt.cancel();
        }
    });

    let summary = rt.block_on(replay_profile(&mut profile, steps, period, cancel));

    if args.save {
        save_targets(&profile, &path, &summary)?;
    }
    Ok(summary)
}

/// Run a trace against `profile`, copying stored targets back into it.
pub async fn replay_profile(
    profile: &mut Profile,
    steps: Vec<TraceStep>,
    period: Duration,
    cancel: CancellationToken,
) -> RunSummary {
    if profile.disable_hotkeys {
        warn!("hotkeys disabled by profile; replaying without evaluation");
    }
    let params = SharedParams::new(StereoParams::new(profile.depth, profile.convergence));
    let mut engine = HotkeyEngine::from_profile(profile).with_feedback(Box::new(LogFeedback));
    let options = PollOptions {
        period,
        max_ticks: Some(steps.len() as u64),
        hotkeys_enabled: !profile.disable_hotkeys,
    };
    let mut input = TraceInput::new(steps, params.clone());

    let summary = run_poll_loop(&mut engine, &mut input, &params, options, cancel).await;
    engine.write_targets(profile);
    summary
}

/// Persist `profile` when the run stored anything.
fn save_targets(profile: &Profile, path: &Path, summary: &RunSummary) -> Result<()> {
    if summary.stores == 0 {
        debug!(path = %path.display(), "no stores; profile left untouched");
        return Ok(());
    }
    config::save_to_path(profile, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_must_be_positive() {
        assert!(period_for_rate(0.0).is_err());
        assert!(period_for_rate(-5.0).is_err());
        assert!(period_for_rate(f64::NAN).is_err());
        assert_eq!(period_for_rate(100.0).unwrap(), Duration::from_millis(10));
    }
}
