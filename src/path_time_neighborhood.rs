//! Projection of obstacle predictions into (s, t) space (SPEC_FULL.md §4.3).

use crate::config::PlannerConfig;
use crate::obstacle::Obstacle;
use crate::reference_line::ReferenceLine;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StBand {
    pub t: f64,
    pub s_low: f64,
    pub s_high: f64,
    pub d: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    Overtake,
    Follow,
    Yield,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CriticalCondition {
    pub obstacle_id: u64,
    pub s: f64,
    pub t: f64,
    pub kind: ConditionKind,
}

struct ObstacleBands {
    obstacle_id: u64,
    bands: Vec<StBand>,
}

/// Immutable per-cycle projection of every in-window obstacle into (s, t, d) space,
/// shared read-only between the external decider and the [`crate::evaluator::TrajectoryEvaluator`].
pub struct PathTimeNeighborhood {
    obstacles: Vec<ObstacleBands>,
    critical_conditions: Vec<CriticalCondition>,
}

impl PathTimeNeighborhood {
    pub fn build(
        ref_line: &ReferenceLine,
        ego_s: f64,
        obstacles: &[Obstacle],
        config: &PlannerConfig,
    ) -> Self {
        let horizon = config.planned_trajectory_time;
        let dt = config.ptn_time_step.max(1e-3);
        let mut steps = vec![];
        let mut t = 0.0;
        while t <= horizon + 1e-9 {
            steps.push(t);
            t += dt;
        }

        let mut projected = vec![];
        for obs in obstacles {
            let bands: Vec<StBand> = steps
                .iter()
                .map(|&t| {
                    let pose = obs.pose_at(t);
                    let corners = obs.corners_at(&pose);
                    let mut s_low = f64::MAX;
                    let mut s_high = f64::MIN;
                    let mut d_sum = 0.0;
                    for (cx, cy) in corners.iter() {
                        let rp = ref_line.match_by_position(*cx, *cy);
                        s_low = s_low.min(rp.s);
                        s_high = s_high.max(rp.s);
                        let dx = cx - rp.x;
                        let dy = cy - rp.y;
                        let cross = rp.theta.cos() * dy - rp.theta.sin() * dx;
                        d_sum += (dx * dx + dy * dy).sqrt().copysign(cross);
                    }
                    StBand {
                        t,
                        s_low,
                        s_high,
                        d: d_sum / corners.len() as f64,
                    }
                })
                .collect();

            let in_window = bands
                .iter()
                .any(|b| b.s_high >= ego_s - config.s_lookback && b.s_low <= ego_s + config.s_lookahead);
            if in_window {
                projected.push(ObstacleBands {
                    obstacle_id: obs.id,
                    bands,
                });
            }
        }

        let critical_conditions = projected
            .iter()
            .filter_map(|ob| classify(ob, ego_s))
            .collect();

        Self {
            obstacles: projected,
            critical_conditions,
        }
    }

    /// Returns the lateral offset of the nearest in-window obstacle occupying arc
    /// length `s` at time `t` (linearly interpolated between the discretised time
    /// samples), or `None` if no obstacle occupies that cell.
    pub fn occupancy_at(&self, s: f64, t: f64) -> Option<f64> {
        let mut nearest: Option<f64> = None;
        for ob in &self.obstacles {
            if let Some(d) = interpolate_occupancy(&ob.bands, s, t) {
                nearest = Some(match nearest {
                    Some(prev) if prev.abs() <= d.abs() => prev,
                    _ => d,
                });
            }
        }
        nearest
    }

    pub fn critical_conditions(&self) -> &[CriticalCondition] {
        &self.critical_conditions
    }
}

fn interpolate_occupancy(bands: &[StBand], s: f64, t: f64) -> Option<f64> {
    for w in bands.windows(2) {
        if t < w[0].t || t > w[1].t {
            continue;
        }
        let span = w[1].t - w[0].t;
        let ratio = if span.abs() < 1e-12 { 0.0 } else { (t - w[0].t) / span };
        let s_low = w[0].s_low + ratio * (w[1].s_low - w[0].s_low);
        let s_high = w[0].s_high + ratio * (w[1].s_high - w[0].s_high);
        if s >= s_low && s <= s_high {
            return Some(w[0].d + ratio * (w[1].d - w[0].d));
        }
    }
    None
}

/// Heuristic classification of the most relevant interaction with one obstacle, used
/// to seed a behavioural decider's end conditions. The core does not interpret these
/// itself beyond exposing them (the decider is an external collaborator, §6).
fn classify(ob: &ObstacleBands, ego_s: f64) -> Option<CriticalCondition> {
    let first = ob.bands.first()?;
    let last = ob.bands.last()?;
    let lane_half_width = 1.85; // half of a standard lane, used only for this heuristic
    let moving = (last.s_low - first.s_low).abs() > 0.5;
    let ahead = first.s_low >= ego_s;

    let kind = if first.d.abs() <= lane_half_width {
        if ahead && !moving {
            ConditionKind::Stop
        } else if ahead {
            ConditionKind::Follow
        } else {
            ConditionKind::Overtake
        }
    } else {
        ConditionKind::Yield
    };

    Some(CriticalCondition {
        obstacle_id: ob.obstacle_id,
        s: first.s_low,
        t: first.t,
        kind,
    })
}
