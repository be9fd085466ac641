//! The top-level planning cycle (SPEC_FULL.md §4.8): wires together reference-line
//! matching, path-time projection, bundle generation, evaluation and trajectory
//! selection into a single `plan()` call.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::constraints;
use crate::error::{FailureCounters, PlanningError, PlanningResult};
use crate::evaluator::TrajectoryEvaluator;
use crate::frame::{Frame, ReferenceLineInfo};
use crate::frenet::{cartesian_to_frenet, CartesianState};
use crate::instrumentation::{Clock, SystemClock, Timer};
use crate::path_time_neighborhood::PathTimeNeighborhood;
use crate::target::{Decider, PlanningTarget};
use crate::trajectory::TrajectoryPoint;
use crate::tuning::{NullTuningSink, TuningSink};
use crate::{bundle, collision, combine};

/// Timing and outcome counters for the most recently completed cycle. A field on the
/// orchestrator instance, not process-wide state, so running several orchestrators
/// (e.g. one per reference line candidate, or in parallel tests) never cross-contaminates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CycleStats {
    pub started_at: Option<DateTime<Utc>>,
    pub total_time_ms: f64,
    pub failures: FailureCounters,
    pub selected_cost: Option<f64>,
}

pub struct PlannerOrchestrator {
    config: PlannerConfig,
    last_cycle: CycleStats,
    clock: Box<dyn Clock>,
}

impl PlannerOrchestrator {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: PlannerConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            last_cycle: CycleStats::default(),
            clock,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn last_cycle(&self) -> CycleStats {
        self.last_cycle
    }

    /// Runs one planning cycle for a single reference line candidate: matches the
    /// initial state, projects obstacles, generates the lattice, evaluates and picks
    /// the cheapest feasible trajectory. Returns `Err(PlanningError::NoFeasibleTrajectory)`
    /// if none of the candidates clears both the constraint checker and the collision
    /// checker, leaving `rli` marked non-drivable.
    pub fn plan(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &dyn Frame,
        decider: &mut dyn Decider,
        rli: &mut dyn ReferenceLineInfo,
    ) -> PlanningResult<()> {
        let sink = NullTuningSink;
        self.plan_with_sink(init_point, frame, decider, rli, &sink)
    }

    /// Same as [`plan`](Self::plan), but forwards every evaluated candidate's cost
    /// breakdown to `tuning_sink` when `PlannerConfig::auto_tuning_enabled` is set.
    pub fn plan_with_sink(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &dyn Frame,
        decider: &mut dyn Decider,
        rli: &mut dyn ReferenceLineInfo,
        tuning_sink: &dyn TuningSink,
    ) -> PlanningResult<()> {
        let mut timer = Timer::default();
        let started_at = self.clock.now();
        let mut failures = FailureCounters::default();

        let init_cart = CartesianState {
            x: init_point.x,
            y: init_point.y,
            theta: init_point.theta,
            kappa: init_point.kappa,
            v: init_point.v,
            a: init_point.a,
        };

        let ref_line = rli.reference_line().clone();
        let init_ref_point = ref_line.match_by_position(init_cart.x, init_cart.y);
        let init_frenet = cartesian_to_frenet(&init_ref_point, &init_cart);

        let ptn = PathTimeNeighborhood::build(&ref_line, init_frenet.lon.s, frame.obstacles(), &self.config);
        decider.update_path_time_neighborhood(&ptn);

        let target: PlanningTarget = decider.analyze(init_point, &init_frenet, &ref_line);

        let (lon_bundle, lat_bundle) = bundle::generate_bundles(&init_frenet.lon, &init_frenet.lat, &target, &self.config);
        debug!(
            "generated {} longitudinal x {} lateral candidates for target {:?}",
            lon_bundle.len(),
            lat_bundle.len(),
            target
        );

        let mut evaluator = TrajectoryEvaluator::new(
            target,
            lon_bundle,
            lat_bundle,
            self.config.enable_constraint_prefilter,
            &ptn,
            &self.config,
            tuning_sink,
        );

        let checker = collision::CollisionChecker::new(frame.obstacles(), self.config.ego_footprint.clone());

        while evaluator.has_more() {
            failures.pairs_examined += 1;
            let cost = evaluator.peek_cost();
            let Some((lon, lat)) = evaluator.pop_next() else {
                break;
            };

            if !constraints::is_valid_pair(lon, lat, &self.config) {
                failures.constraint_failures += 1;
                continue;
            }

            let candidate_trajectory = combine::combine(
                lon,
                lat,
                &ref_line,
                self.config.trajectory_time_resolution,
                self.config.planned_trajectory_time,
                init_point.relative_time,
            );

            if !constraints::is_valid_trajectory(&candidate_trajectory, &self.config) {
                failures.combined_constraint_failures += 1;
                continue;
            }

            if checker.in_collision(&candidate_trajectory) {
                failures.collision_failures += 1;
                continue;
            }

            info!(
                "selected trajectory with cost {:.3} after examining {} pairs",
                cost.unwrap_or(f64::NAN),
                failures.pairs_examined
            );
            rli.set_trajectory(candidate_trajectory);
            rli.set_cost(cost.unwrap_or(f64::NAN));
            rli.set_drivable(true);

            self.last_cycle = CycleStats {
                started_at: Some(started_at),
                total_time_ms: timer.dur_ms(),
                failures,
                selected_cost: cost,
            };
            return Ok(());
        }

        warn!(
            "no feasible trajectory after examining {} pairs ({:?})",
            failures.pairs_examined, failures
        );
        rli.set_drivable(false);
        rli.push_debug(format!("no feasible trajectory found: {:?}", failures));

        self.last_cycle = CycleStats {
            started_at: Some(started_at),
            total_time_ms: timer.dur_ms(),
            failures,
            selected_cost: None,
        };
        Err(PlanningError::NoFeasibleTrajectory { counters: failures })
    }
}
