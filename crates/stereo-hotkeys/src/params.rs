//! Live stereo parameters shared between the poll loop and other writers.

use std::sync::Arc;

use hotkey_engine::{ParameterBackend, StereoParams};
use parking_lot::{Mutex, MutexGuard};
use tracing::trace;

/// Parameter values plus a counter bumped each time a hotkey applies values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParamState {
    /// Current values.
    pub params: StereoParams,
    /// Number of completed hotkey applies.
    pub generation: u64,
}

impl ParameterBackend for ParamState {
    fn depth(&self) -> f32 {
        self.params.depth
    }

    fn convergence(&self) -> f32 {
        self.params.convergence
    }

    fn set_depth(&mut self, value: f32) {
        self.params.depth = value;
    }

    fn set_convergence(&mut self, value: f32) {
        self.params.convergence = value;
    }

    fn on_applied(&mut self) {
        self.generation += 1;
        trace!(generation = self.generation, params = %self.params, "params_applied");
    }
}

/// Cloneable handle to one set of live parameters.
///
/// The poll loop locks once per tick so every slot in that tick sees a
/// consistent backend. Other actors (an external UI, a trace's `set` frames)
/// write through the same lock between ticks.
#[derive(Clone, Debug, Default)]
pub struct SharedParams {
    /// Guarded state.
    inner: Arc<Mutex<ParamState>>,
}

impl SharedParams {
    /// Start from `initial`.
    pub fn new(initial: StereoParams) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ParamState {
                params: initial,
                generation: 0,
            })),
        }
    }

    /// Lock for a whole evaluation pass.
    pub fn lock(&self) -> MutexGuard<'_, ParamState> {
        self.inner.lock()
    }

    /// Copy of the current values.
    pub fn get(&self) -> StereoParams {
        self.inner.lock().params
    }

    /// Overwrite both values as an external writer would.
    pub fn set(&self, params: StereoParams) {
        self.inner.lock().params = params;
    }

    /// Completed hotkey applies so far.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }
}

impl ParameterBackend for SharedParams {
    fn depth(&self) -> f32 {
        self.inner.lock().params.depth
    }

    fn convergence(&self) -> f32 {
        self.inner.lock().params.convergence
    }

    fn set_depth(&mut self, value: f32) {
        self.inner.lock().set_depth(value);
    }

    fn set_convergence(&mut self, value: f32) {
        self.inner.lock().set_convergence(value);
    }

    fn on_applied(&mut self) {
        self.inner.lock().on_applied();
    }
}
