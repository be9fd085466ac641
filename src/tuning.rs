//! Auto-tuning hook (SPEC_FULL.md §4.6, §9): a side-channel the evaluator feeds so an
//! offline process can learn cost weights from recorded cycles. Disabled by default.

use crate::trajectory::TrajectoryPoint;

/// The per-candidate breakdown the evaluator computes internally, exposed here so a
/// tuning sink can see *why* a trajectory scored the way it did, not just the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CostComponents {
    pub travel: f64,
    pub jerk: f64,
    pub obstacle: f64,
    pub lateral: f64,
}

impl CostComponents {
    pub fn total(&self, weights: &crate::config::CostWeights) -> f64 {
        weights.w_travel * self.travel
            + weights.w_jerk * self.jerk
            + weights.w_obstacle * self.obstacle
            + weights.w_lateral * self.lateral
    }
}

/// Receives every evaluated candidate's cost breakdown alongside the realised future
/// trajectory points, when `PlannerConfig::auto_tuning_enabled` is set. The evaluator
/// calls this for every candidate it scores, selected or not, since the learning signal
/// needs negatives as well as the winner.
pub trait TuningSink {
    fn emit(&self, components: &CostComponents, future: &[TrajectoryPoint]);
}

/// The default, no-op sink used when auto-tuning is disabled.
pub struct NullTuningSink;

impl TuningSink for NullTuningSink {
    fn emit(&self, _components: &CostComponents, _future: &[TrajectoryPoint]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostWeights;

    #[test]
    fn total_is_weighted_sum_of_components() {
        let weights = CostWeights {
            w_travel: 1.0,
            w_jerk: 2.0,
            w_obstacle: 3.0,
            w_lateral: 4.0,
        };
        let components = CostComponents {
            travel: 1.0,
            jerk: 1.0,
            obstacle: 1.0,
            lateral: 1.0,
        };
        assert_eq!(components.total(&weights), 10.0);
    }

    #[test]
    fn null_sink_accepts_any_input_without_panicking() {
        let sink = NullTuningSink;
        sink.emit(&CostComponents::default(), &[]);
    }
}
