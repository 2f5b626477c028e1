//! Recorded input traces used by `replay`.
//!
//! A trace is a JSON list of frames. Each frame holds the keys down, the
//! controller state (or `null` when no controller is connected), how many
//! ticks it lasts, and an optional external write applied before its ticks:
//!
//! ```json
//! [
//!   { "keys": ["VK_NUMPAD3"], "repeat": 5 },
//!   { "keys": [], "pad": { "buttons": ["XINPUT_GAMEPAD_A"], "left_trigger": 200 } },
//!   { "keys": [], "set": { "depth": 0.09, "convergence": 1.2 } }
//! ]
//! ```

use std::{collections::VecDeque, fs, path::Path};

use hotkey_engine::{InputSnapshot, InputSource, Key, PadButtons, StereoParams};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    params::SharedParams,
};

/// Controller state for one frame.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadFrame {
    /// Named buttons held down.
    #[serde(default)]
    pub buttons: Vec<String>,
    /// Raw left trigger axis.
    #[serde(default)]
    pub left_trigger: u8,
    /// Raw right trigger axis.
    #[serde(default)]
    pub right_trigger: u8,
}

/// Values written by an external actor before a frame's ticks.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetFrame {
    /// New depth.
    pub depth: f32,
    /// New convergence.
    pub convergence: f32,
}

/// One entry of a trace file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceFrame {
    /// Keyboard keys held down.
    #[serde(default)]
    pub keys: Vec<Key>,
    /// Controller state, `None` when disconnected.
    #[serde(default)]
    pub pad: Option<PadFrame>,
    /// Number of ticks this frame lasts; at least 1.
    #[serde(default = "one")]
    pub repeat: u32,
    /// External write applied before the first tick of this frame.
    #[serde(default)]
    pub set: Option<SetFrame>,
}

/// Default `repeat`.
fn one() -> u32 {
    1
}

/// A single expanded tick of a trace.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceStep {
    /// Input for the tick.
    pub snapshot: InputSnapshot,
    /// External write to perform first.
    pub set: Option<StereoParams>,
}

/// Parse trace JSON and expand `repeat` into one step per tick.
pub fn parse_trace(source: &str, path: &Path) -> Result<Vec<TraceStep>> {
    let frames: Vec<TraceFrame> = serde_json::from_str(source).map_err(|e| Error::Trace {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut steps = Vec::new();
    for (index, frame) in frames.into_iter().enumerate() {
        if frame.repeat == 0 {
            return Err(Error::Trace {
                path: path.to_path_buf(),
                message: format!("frame {index}: repeat must be at least 1"),
            });
        }
        let mut snapshot = InputSnapshot::with_keys(frame.keys.iter().copied());
        if let Some(pad) = &frame.pad {
            snapshot.set_gamepad(Some(pad_buttons(index, pad)?));
        }
        let set = frame
            .set
            .map(|s| StereoParams::new(s.depth, s.convergence));
        for tick in 0..frame.repeat {
            steps.push(TraceStep {
                snapshot: snapshot.clone(),
                set: if tick == 0 { set } else { None },
            });
        }
    }
    Ok(steps)
}

/// Read and parse a trace file.
pub fn load_trace(path: &Path) -> Result<Vec<TraceStep>> {
    let source = fs::read_to_string(path).map_err(|e| Error::Trace {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let steps = parse_trace(&source, path)?;
    debug!(path = %path.display(), ticks = steps.len(), "trace_loaded");
    Ok(steps)
}

/// Fold a frame's named buttons and trigger axes into one mask.
fn pad_buttons(frame: usize, pad: &PadFrame) -> Result<PadButtons> {
    let mut mask = PadButtons::fold_triggers(0, pad.left_trigger, pad.right_trigger);
    for name in &pad.buttons {
        let button = PadButtons::from_name(name).ok_or_else(|| Error::UnknownButton {
            frame,
            name: name.clone(),
        })?;
        mask |= button;
    }
    Ok(mask)
}

/// Input source that plays back a trace.
///
/// Sampling a step performs its external write on `writer` first, so the
/// engine observes the write on the same tick.
pub struct TraceInput {
    /// Steps still to play.
    steps: VecDeque<TraceStep>,
    /// Target of `set` steps.
    writer: SharedParams,
}

impl TraceInput {
    /// Play `steps`, routing external writes to `writer`.
    pub fn new(steps: Vec<TraceStep>, writer: SharedParams) -> Self {
        Self {
            steps: steps.into(),
            writer,
        }
    }

    /// True once every step has been sampled.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps not yet sampled.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for TraceInput {
    fn sample(&mut self) -> InputSnapshot {
        let Some(step) = self.steps.pop_front() else {
            return InputSnapshot::new();
        };
        if let Some(params) = step.set {
            debug!(%params, "external_write");
            self.writer.set(params);
        }
        step.snapshot
    }
}
