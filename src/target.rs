//! The high-level objective handed down from the (external) behavioural decider, and
//! the `Decider` collaborator interface itself (SPEC_FULL.md §3, §6).

use crate::frenet::FrenetState;
use crate::path_time_neighborhood::PathTimeNeighborhood;
use crate::reference_line::ReferenceLine;
use crate::trajectory::TrajectoryPoint;

/// Opaque-to-the-core objective; the bundle generator and evaluator are the only
/// components that interpret it. Modelled as a closed enum rather than a trait object
/// since both consumers need to match on it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlanningTarget {
    Cruise { target_speed: f64 },
    Stop { stop_s: f64 },
    Follow { leader_id: u64, gap: f64 },
    Yield { leader_id: u64, gap: f64 },
}

impl PlanningTarget {
    pub fn target_speed(&self) -> f64 {
        match self {
            PlanningTarget::Cruise { target_speed } => *target_speed,
            PlanningTarget::Stop { .. } => 0.0,
            PlanningTarget::Follow { .. } | PlanningTarget::Yield { .. } => 0.0,
        }
    }
}

/// The sibling subsystem that turns a [`PathTimeNeighborhood`] plus the current frame
/// into a [`PlanningTarget`]. Out of scope for this crate (§1); callers implement it or
/// use [`FixedTarget`] for tests and standalone use.
pub trait Decider {
    fn update_path_time_neighborhood(&mut self, ptn: &PathTimeNeighborhood);

    fn analyze(
        &mut self,
        init_point: &TrajectoryPoint,
        init_frenet: &FrenetState,
        ref_line: &ReferenceLine,
    ) -> PlanningTarget;
}

/// A deterministic decider that always returns the same, externally-configured
/// target. Used by the orchestrator's own tests and as the default when no
/// behavioural layer is wired in.
pub struct FixedTarget {
    pub target: PlanningTarget,
}

impl FixedTarget {
    pub fn new(target: PlanningTarget) -> Self {
        Self { target }
    }
}

impl Decider for FixedTarget {
    fn update_path_time_neighborhood(&mut self, _ptn: &PathTimeNeighborhood) {}

    fn analyze(
        &mut self,
        _init_point: &TrajectoryPoint,
        _init_frenet: &FrenetState,
        _ref_line: &ReferenceLine,
    ) -> PlanningTarget {
        self.target
    }
}
