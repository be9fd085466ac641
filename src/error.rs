//! Error taxonomy for the planning core (see SPEC_FULL.md §7).

use thiserror::Error;

/// Counters describing how the selection loop's candidate pairs were disposed of.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FailureCounters {
    pub pairs_examined: u32,
    pub constraint_failures: u32,
    pub combined_constraint_failures: u32,
    pub collision_failures: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("invalid reference line: {reason}")]
    InvalidInput { reason: String },

    #[error("no feasible trajectory found after examining {} pairs ({:?})", counters.pairs_examined, counters)]
    NoFeasibleTrajectory { counters: FailureCounters },
}

pub type PlanningResult<T> = Result<T, PlanningError>;
