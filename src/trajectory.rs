//! The combined, time-parameterised output trajectory (SPEC_FULL.md §3, §4.9).

/// One sample of the combined 2-D trajectory.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub kappa: f64,
    pub v: f64,
    pub a: f64,
    pub relative_time: f64,
}

/// An ordered sequence of [`TrajectoryPoint`] sampled on the fixed `Δt` grid.
pub type DiscretizedTrajectory = Vec<TrajectoryPoint>;
