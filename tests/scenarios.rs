//! End-to-end regression scenarios driven entirely through the public API.

use lattice_planner::config::PlannerConfig;
use lattice_planner::frame::{SimpleFrame, SimpleReferenceLineInfo};
use lattice_planner::obstacle::Obstacle;
use lattice_planner::reference_line::{ReferenceLine, ReferencePoint};
use lattice_planner::target::{FixedTarget, PlanningTarget};
use lattice_planner::trajectory::TrajectoryPoint;
use lattice_planner::PlannerOrchestrator;

fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

fn straight_line(len: i64) -> ReferenceLine {
    let pts = (0..len)
        .map(|i| ReferencePoint {
            s: i as f64,
            x: i as f64,
            y: 0.0,
            theta: 0.0,
            kappa: 0.0,
            dkappa: 0.0,
        })
        .collect();
    ReferenceLine::new(pts).unwrap()
}

fn curved_line(len: i64, radius: f64) -> ReferenceLine {
    let step = 1.0;
    let pts = (0..len)
        .map(|i| {
            let s = i as f64 * step;
            let phi = s / radius;
            ReferencePoint {
                s,
                x: radius * phi.sin(),
                y: radius * (1.0 - phi.cos()),
                theta: phi,
                kappa: 1.0 / radius,
                dkappa: 0.0,
            }
        })
        .collect();
    ReferenceLine::new(pts).unwrap()
}

fn ego_state(v: f64) -> TrajectoryPoint {
    TrajectoryPoint {
        x: 0.0,
        y: 0.0,
        theta: 0.0,
        kappa: 0.0,
        v,
        a: 0.0,
        relative_time: 0.0,
    }
}

#[test]
fn cruise_on_straight_road_is_feasible() {
    init_logging();
    let mut config = PlannerConfig::default();
    config.constraints.v_max = 30.0;
    let mut orchestrator = PlannerOrchestrator::new(config);

    let frame = SimpleFrame { obstacles: vec![], timestamp: 0.0 };
    let mut decider = FixedTarget::new(PlanningTarget::Cruise { target_speed: 15.0 });
    let mut rli = SimpleReferenceLineInfo::new(straight_line(500), 0.0);

    orchestrator
        .plan(&ego_state(10.0), &frame, &mut decider, &mut rli)
        .expect("cruise on a clear straight road must be feasible");
    assert!(rli.drivable);
    assert!(rli.trajectory.unwrap().iter().all(|p| p.v <= 30.0 + 1e-6));
}

#[test]
fn stop_at_forty_meters_ends_near_the_stop_line() {
    init_logging();
    let config = PlannerConfig::default();
    let mut orchestrator = PlannerOrchestrator::new(config);

    let frame = SimpleFrame { obstacles: vec![], timestamp: 0.0 };
    let mut decider = FixedTarget::new(PlanningTarget::Stop { stop_s: 40.0 });
    let mut rli = SimpleReferenceLineInfo::new(straight_line(500), 0.0);

    orchestrator
        .plan(&ego_state(10.0), &frame, &mut decider, &mut rli)
        .expect("stopping for a clear stop line must be feasible");
    let last = rli.trajectory.unwrap().last().cloned().unwrap();
    assert!((last.x - 40.0).abs() < 5.0);
    assert!(last.v.abs() < 1.0);
}

#[test]
fn static_obstacle_ahead_forces_a_stop_or_lateral_deviation() {
    init_logging();
    let config = PlannerConfig::default();
    let mut orchestrator = PlannerOrchestrator::new(config);

    let obstacles = vec![Obstacle::stationary(1, 30.0, 0.0, 0.0, 4.0, 2.0)];
    let frame = SimpleFrame { obstacles, timestamp: 0.0 };
    let mut decider = FixedTarget::new(PlanningTarget::Stop { stop_s: 25.0 });
    let mut rli = SimpleReferenceLineInfo::new(straight_line(500), 0.0);

    orchestrator
        .plan(&ego_state(10.0), &frame, &mut decider, &mut rli)
        .expect("stopping short of a blocking obstacle must be feasible");
    let traj = rli.trajectory.unwrap();
    let last = traj.last().unwrap();
    assert!(last.x <= 30.0);
}

#[test]
fn obstacle_wall_across_every_lateral_offset_is_infeasible() {
    init_logging();
    let config = PlannerConfig::default();
    let lateral_offsets = config.lateral_offsets.clone();
    let mut orchestrator = PlannerOrchestrator::new(config);

    let obstacles: Vec<Obstacle> = lateral_offsets
        .iter()
        .enumerate()
        .map(|(i, &d)| Obstacle::stationary(i as u64, 15.0, d, 0.0, 6.0, 3.0))
        .collect();
    let frame = SimpleFrame { obstacles, timestamp: 0.0 };
    let mut decider = FixedTarget::new(PlanningTarget::Cruise { target_speed: 15.0 });
    let mut rli = SimpleReferenceLineInfo::new(straight_line(500), 0.0);

    let result = orchestrator.plan(&ego_state(10.0), &frame, &mut decider, &mut rli);
    assert!(result.is_err());
    assert!(!rli.drivable);
    assert!(!rli.debug_log.is_empty());
}

#[test]
fn curved_reference_line_round_trips_through_a_planning_cycle() {
    init_logging();
    let config = PlannerConfig::default();
    let mut orchestrator = PlannerOrchestrator::new(config);

    let frame = SimpleFrame { obstacles: vec![], timestamp: 0.0 };
    let mut decider = FixedTarget::new(PlanningTarget::Cruise { target_speed: 8.0 });
    let line = curved_line(400, 80.0);
    let start = *line.front();
    let mut rli = SimpleReferenceLineInfo::new(line, 0.0);

    let ego = TrajectoryPoint {
        x: start.x,
        y: start.y,
        theta: start.theta,
        kappa: start.kappa,
        v: 8.0,
        a: 0.0,
        relative_time: 0.0,
    };

    orchestrator
        .plan(&ego, &frame, &mut decider, &mut rli)
        .expect("cruising along a clear curved road must be feasible");
    let traj = rli.trajectory.unwrap();
    assert!(traj.len() > 1);
    assert!(traj.iter().all(|p| p.v.is_finite() && p.theta.is_finite()));
}

#[test]
fn replaying_the_same_cycle_is_bit_identical() {
    init_logging();
    let config = PlannerConfig::default();

    let run = || {
        let mut orchestrator = PlannerOrchestrator::new(config.clone());
        let frame = SimpleFrame { obstacles: vec![], timestamp: 0.0 };
        let mut decider = FixedTarget::new(PlanningTarget::Cruise { target_speed: 12.0 });
        let mut rli = SimpleReferenceLineInfo::new(straight_line(500), 0.0);
        orchestrator
            .plan(&ego_state(10.0), &frame, &mut decider, &mut rli)
            .unwrap();
        rli.trajectory.unwrap()
    };

    assert_eq!(run(), run());
}
