//! External collaborator interfaces the orchestrator depends on but does not own
//! (SPEC_FULL.md §6). Kept as traits so the core can be driven in tests without a real
//! perception/routing stack.

use crate::obstacle::Obstacle;
use crate::trajectory::DiscretizedTrajectory;

/// A single planning cycle's perception snapshot.
pub trait Frame {
    fn obstacles(&self) -> &[Obstacle];
    fn timestamp(&self) -> f64;
}

/// One candidate reference line and the planning result the orchestrator deposits onto
/// it. A frame may carry several of these (e.g. lane-change candidates); this crate
/// only plans for the one it is handed.
pub trait ReferenceLineInfo {
    fn reference_line(&self) -> &crate::reference_line::ReferenceLine;
    fn priority_cost(&self) -> f64;

    fn set_trajectory(&mut self, trajectory: DiscretizedTrajectory);
    fn set_cost(&mut self, cost: f64);
    fn set_drivable(&mut self, drivable: bool);
    fn push_debug(&mut self, message: String);
}

/// A minimal in-memory [`Frame`] for tests and standalone use.
pub struct SimpleFrame {
    pub obstacles: Vec<Obstacle>,
    pub timestamp: f64,
}

impl Frame for SimpleFrame {
    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// A minimal in-memory [`ReferenceLineInfo`] for tests and standalone use.
pub struct SimpleReferenceLineInfo {
    pub reference_line: crate::reference_line::ReferenceLine,
    pub priority_cost: f64,
    pub trajectory: Option<DiscretizedTrajectory>,
    pub cost: Option<f64>,
    pub drivable: bool,
    pub debug_log: Vec<String>,
}

impl SimpleReferenceLineInfo {
    pub fn new(reference_line: crate::reference_line::ReferenceLine, priority_cost: f64) -> Self {
        Self {
            reference_line,
            priority_cost,
            trajectory: None,
            cost: None,
            drivable: true,
            debug_log: vec![],
        }
    }
}

impl ReferenceLineInfo for SimpleReferenceLineInfo {
    fn reference_line(&self) -> &crate::reference_line::ReferenceLine {
        &self.reference_line
    }

    fn priority_cost(&self) -> f64 {
        self.priority_cost
    }

    fn set_trajectory(&mut self, trajectory: DiscretizedTrajectory) {
        self.trajectory = Some(trajectory);
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = Some(cost);
    }

    fn set_drivable(&mut self, drivable: bool) {
        self.drivable = drivable;
    }

    fn push_debug(&mut self, message: String) {
        self.debug_log.push(message);
    }
}
