use nalgebra::Vector3;

use crate::dynamics::state::Pose;

// ---------------------------------------------------------------------------
// Reward strategies
// ---------------------------------------------------------------------------

/// Scalar reward from the current pose and the task target.
///
/// Implementations should return a bounded value; unbounded penalties make
/// value targets blow up during learning. Any
/// `Fn(&Pose, &Vector3<f64>) -> f64` closure is a `RewardFn`.
pub trait RewardFn {
    fn compute(&self, pose: &Pose, target: &Vector3<f64>) -> f64;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> RewardFn for F
where
    F: Fn(&Pose, &Vector3<f64>) -> f64,
{
    fn compute(&self, pose: &Pose, target: &Vector3<f64>) -> f64 {
        self(pose, target)
    }
}

/// L1 distance between the pose position and the target.
pub fn position_error(pose: &Pose, target: &Vector3<f64>) -> f64 {
    (pose.position - target).abs().sum()
}

/// `tanh(1 - scale * |p - target|_1)`, bounded to (-1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TanhDistanceReward {
    pub scale: f64,
}

impl Default for TanhDistanceReward {
    fn default() -> Self {
        Self { scale: 0.0005 }
    }
}

impl RewardFn for TanhDistanceReward {
    fn compute(&self, pose: &Pose, target: &Vector3<f64>) -> f64 {
        (1.0 - self.scale * position_error(pose, target)).tanh()
    }

    fn name(&self) -> &str {
        "tanh-distance"
    }
}

/// `1 - scale * |p - target|_1`, clipped to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDistanceReward {
    pub scale: f64,
}

impl Default for LinearDistanceReward {
    fn default() -> Self {
        Self { scale: 0.3 }
    }
}

impl RewardFn for LinearDistanceReward {
    fn compute(&self, pose: &Pose, target: &Vector3<f64>) -> f64 {
        (1.0 - self.scale * position_error(pose, target)).clamp(-1.0, 1.0)
    }

    fn name(&self) -> &str {
        "linear-distance"
    }
}
