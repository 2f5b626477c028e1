//! The live parameter store the engine reads and writes.

use std::fmt;

/// A depth/convergence pair. The engine always moves both together.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StereoParams {
    /// Eye separation.
    pub depth: f32,
    /// Convergence distance.
    pub convergence: f32,
}

impl StereoParams {
    /// Construct a pair.
    pub const fn new(depth: f32, convergence: f32) -> Self {
        Self { depth, convergence }
    }

    /// Read both values from a backend.
    pub fn read<B: ParameterBackend + ?Sized>(backend: &B) -> Self {
        Self {
            depth: backend.depth(),
            convergence: backend.convergence(),
        }
    }

    /// True when both values are within `tolerance` of `other` (inclusive).
    pub fn matches(&self, other: &Self, tolerance: f32) -> bool {
        (self.depth - other.depth).abs() <= tolerance
            && (self.convergence - other.convergence).abs() <= tolerance
    }
}

impl fmt::Display for StereoParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth={} convergence={}", self.depth, self.convergence)
    }
}

/// Live depth/convergence owned by the renderer.
///
/// Calls are assumed to succeed and to be cheap. A backend wrapping something
/// fallible absorbs its own failures.
pub trait ParameterBackend {
    /// Current depth.
    fn depth(&self) -> f32;
    /// Current convergence.
    fn convergence(&self) -> f32;
    /// Replace the depth.
    fn set_depth(&mut self, value: f32);
    /// Replace the convergence.
    fn set_convergence(&mut self, value: f32);
    /// Called once after every apply or restore, e.g. to flag a render-state refresh.
    fn on_applied(&mut self) {}
}

/// Write both values, then fire the backend's applied hook.
pub(crate) fn apply<B: ParameterBackend + ?Sized>(backend: &mut B, params: StereoParams) {
    backend.set_depth(params.depth);
    backend.set_convergence(params.convergence);
    backend.on_applied();
}

/// A plain pair is the simplest backend.
impl ParameterBackend for StereoParams {
    fn depth(&self) -> f32 {
        self.depth
    }

    fn convergence(&self) -> f32 {
        self.convergence
    }

    fn set_depth(&mut self, value: f32) {
        self.depth = value;
    }

    fn set_convergence(&mut self, value: f32) {
        self.convergence = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_inclusive_and_per_value() {
        let target = StereoParams::new(0.065, 1.0);
        assert!(StereoParams::new(0.0655, 1.0).matches(&target, 0.001));
        assert!(StereoParams::new(0.065, 1.0005).matches(&target, 0.001));
        assert!(!StereoParams::new(0.065, 1.01).matches(&target, 0.001));
        assert!(!StereoParams::new(0.1, 1.0).matches(&target, 0.001));
        assert!(StereoParams::new(0.5, 2.0).matches(&StereoParams::new(0.5, 2.0), 0.0));
    }

    #[test]
    fn apply_sets_both_values() {
        let mut p = StereoParams::new(0.1, 1.0);
        apply(&mut p, StereoParams::new(0.2, 3.0));
        assert_eq!(StereoParams::read(&p), StereoParams::new(0.2, 3.0));
    }
}
