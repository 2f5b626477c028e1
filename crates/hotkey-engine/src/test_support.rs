//! Test support utilities for hotkey-engine unit and integration tests.
//! These helpers are public so integration tests and the host crate can share them.

use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;

use crate::{
    AppliedEvent, FeedbackSink, InputSnapshot, InputSource, ParameterBackend, StereoParams,
    StoreNotification,
};

/// In-memory backend that records every write and applied hook.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    /// Current values.
    pub params: StereoParams,
    /// Every `set_depth` value, in order.
    pub depth_writes: Vec<f32>,
    /// Every `set_convergence` value, in order.
    pub convergence_writes: Vec<f32>,
    /// Number of `on_applied` calls.
    pub applied_calls: usize,
}

impl RecordingBackend {
    /// Start from `depth`/`convergence` with no recorded history.
    pub fn new(depth: f32, convergence: f32) -> Self {
        Self {
            params: StereoParams::new(depth, convergence),
            ..Self::default()
        }
    }

    /// Total number of setter calls.
    pub fn writes(&self) -> usize {
        self.depth_writes.len() + self.convergence_writes.len()
    }

    /// Forget recorded history, keeping the current values.
    pub fn clear_history(&mut self) {
        self.depth_writes.clear();
        self.convergence_writes.clear();
        self.applied_calls = 0;
    }
}

impl ParameterBackend for RecordingBackend {
    fn depth(&self) -> f32 {
        self.params.depth
    }

    fn convergence(&self) -> f32 {
        self.params.convergence
    }

    fn set_depth(&mut self, value: f32) {
        self.params.depth = value;
        self.depth_writes.push(value);
    }

    fn set_convergence(&mut self, value: f32) {
        self.params.convergence = value;
        self.convergence_writes.push(value);
    }

    fn on_applied(&mut self) {
        self.applied_calls += 1;
    }
}

/// Replays a fixed list of snapshots, then reports nothing pressed.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    /// Snapshots still to be returned.
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    /// Script that returns `frames` in order.
    pub fn new<I: IntoIterator<Item = InputSnapshot>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `snapshot` `count` times.
    pub fn push_repeated(&mut self, snapshot: &InputSnapshot, count: usize) {
        for _ in 0..count {
            self.frames.push_back(snapshot.clone());
        }
    }

    /// Snapshots not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Signals captured by [`RecordingFeedback`].
#[derive(Clone, Debug, Default)]
pub struct FeedbackLog {
    /// Applied events, in order.
    pub applied: Vec<AppliedEvent>,
    /// Store notifications, in order.
    pub stored: Vec<StoreNotification>,
}

/// Feedback sink that records into a shared log the test keeps a handle to.
#[derive(Clone, Debug, Default)]
pub struct RecordingFeedback {
    /// Shared log.
    log: Arc<Mutex<FeedbackLog>>,
}

impl RecordingFeedback {
    /// A sink with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> FeedbackLog {
        self.log.lock().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn applied(&mut self, event: &AppliedEvent) {
        self.log.lock().applied.push(event.clone());
    }

    fn stored(&mut self, note: &StoreNotification) {
        self.log.lock().stored.push(note.clone());
    }
}
