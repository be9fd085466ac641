//! Trajectory evaluator (SPEC_FULL.md §4.6): scores every `(longitudinal, lateral)`
//! pair in the bundle and exposes them in ascending-cost order through a min-heap
//! iterator. Cost evaluation is parallelised with rayon; the heap itself, and the
//! `(lon_idx, lat_idx)` tie-break within it, keep iteration order deterministic
//! regardless of thread scheduling.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::config::PlannerConfig;
use crate::constraints;
use crate::curve1d::Curve1D;
use crate::path_time_neighborhood::PathTimeNeighborhood;
use crate::target::PlanningTarget;
use crate::tuning::{CostComponents, TuningSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CandidateKey {
    cost: OrderedFloat<f64>,
    lon_idx: usize,
    lat_idx: usize,
}

impl Ord for CandidateKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.lon_idx.cmp(&other.lon_idx))
            .then_with(|| self.lat_idx.cmp(&other.lat_idx))
    }
}

impl PartialOrd for CandidateKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

struct Candidate {
    key: CandidateKey,
    components: CostComponents,
}

pub struct TrajectoryEvaluator {
    lon_bundle: Vec<Curve1D>,
    lat_bundle: Vec<Curve1D>,
    heap: BinaryHeap<Reverse<CandidateKey>>,
    components_by_key: Vec<Candidate>,
}

impl TrajectoryEvaluator {
    pub fn new(
        target: PlanningTarget,
        lon_bundle: Vec<Curve1D>,
        lat_bundle: Vec<Curve1D>,
        enable_constraint_prefilter: bool,
        ptn: &PathTimeNeighborhood,
        config: &PlannerConfig,
        tuning_sink: &dyn TuningSink,
    ) -> Self {
        let pairs: Vec<(usize, usize)> = (0..lon_bundle.len())
            .flat_map(|i| (0..lat_bundle.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| {
                !enable_constraint_prefilter
                    || constraints::is_valid_pair(&lon_bundle[i], &lat_bundle[j], config)
            })
            .collect();

        let mut candidates: Vec<Candidate> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let components = compute_components(&lon_bundle[i], &lat_bundle[j], &target, ptn, config);
                Candidate {
                    key: CandidateKey {
                        cost: OrderedFloat(components.total(&config.cost_weights)),
                        lon_idx: i,
                        lat_idx: j,
                    },
                    components,
                }
            })
            .collect();

        if config.auto_tuning_enabled {
            for candidate in &candidates {
                let lon = &lon_bundle[candidate.key.lon_idx];
                let future = sample_future(lon, config);
                tuning_sink.emit(&candidate.components, &future);
            }
        }

        candidates.sort_by(|a, b| a.key.cmp(&b.key));
        let heap = candidates.iter().map(|c| Reverse(c.key)).collect();

        Self {
            lon_bundle,
            lat_bundle,
            heap,
            components_by_key: candidates,
        }
    }

    pub fn has_more(&self) -> bool {
        !self.heap.is_empty()
    }

    pub fn peek_cost(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(k)| k.cost.into_inner())
    }

    pub fn peek_components(&self) -> Option<CostComponents> {
        let top = self.heap.peek()?;
        self.components_by_key
            .iter()
            .find(|c| c.key == top.0)
            .map(|c| c.components)
    }

    /// Pops the next-cheapest candidate, returning references into the owned bundles.
    pub fn pop_next(&mut self) -> Option<(&Curve1D, &Curve1D)> {
        let Reverse(key) = self.heap.pop()?;
        Some((&self.lon_bundle[key.lon_idx], &self.lat_bundle[key.lat_idx]))
    }

    /// Computes cost components directly from recorded `(s, d)` samples rather than a
    /// fitted [`Curve1D`] pair, for offline auto-tuning against replayed trajectories.
    /// Limited to the reference-line-independent part of the cost (no jerk, since the
    /// recorded samples carry no derivative information to reconstruct from).
    pub fn evaluate_per_lonlat(
        target: &PlanningTarget,
        s_samples: &[f64],
        d_samples: &[f64],
        config: &PlannerConfig,
    ) -> CostComponents {
        let target_speed = target.target_speed();
        let travel = travel_cost_from_samples(s_samples, target_speed, config);
        let lateral = d_samples.iter().map(|d| d * d).sum::<f64>() / d_samples.len().max(1) as f64;
        CostComponents {
            travel,
            jerk: 0.0,
            obstacle: 0.0,
            lateral,
        }
    }
}

fn compute_components(
    lon: &Curve1D,
    lat: &Curve1D,
    target: &PlanningTarget,
    ptn: &PathTimeNeighborhood,
    config: &PlannerConfig,
) -> CostComponents {
    let dt = config.trajectory_time_resolution;
    let target_speed = target.target_speed();

    let mut travel = 0.0;
    let mut jerk = 0.0;
    let mut obstacle = 0.0;
    let mut n = 0usize;
    let mut prev_a: Option<f64> = None;

    let mut t = 0.0;
    while t <= lon.target_time() + 1e-9 {
        let s = lon.evaluate(0, t);
        let v = lon.evaluate(1, t);
        let a = lon.evaluate(2, t);

        travel += (v - target_speed) * (v - target_speed);
        if let Some(prev) = prev_a {
            let j = (a - prev) / dt;
            jerk += j * j;
        }
        prev_a = Some(a);

        if let Some(d_obstacle) = ptn.occupancy_at(s, t) {
            let d_ego = lat.evaluate(0, s);
            let clearance = (d_ego - d_obstacle).abs();
            obstacle += 1.0 / (clearance + 0.1);
        }

        n += 1;
        t += dt;
    }
    let n = n.max(1) as f64;
    travel /= n;
    jerk /= n;

    let lateral = lateral_cost(lat);

    CostComponents {
        travel,
        jerk,
        obstacle,
        lateral,
    }
}

fn lateral_cost(lat: &Curve1D) -> f64 {
    let length = lat.param_length();
    let steps = 10usize;
    let mut sum = 0.0;
    for i in 0..=steps {
        let s = length * i as f64 / steps as f64;
        let d = lat.evaluate(0, s);
        sum += d * d;
    }
    sum / (steps as f64 + 1.0)
}

fn travel_cost_from_samples(s_samples: &[f64], target_speed: f64, config: &PlannerConfig) -> f64 {
    if s_samples.len() < 2 {
        return 0.0;
    }
    let dt = config.trajectory_time_resolution;
    let mut sum = 0.0;
    for w in s_samples.windows(2) {
        let v = (w[1] - w[0]) / dt;
        sum += (v - target_speed) * (v - target_speed);
    }
    sum / (s_samples.len() - 1) as f64
}

fn sample_future(lon: &Curve1D, config: &PlannerConfig) -> Vec<crate::trajectory::TrajectoryPoint> {
    let dt = config.trajectory_time_resolution;
    let mut out = vec![];
    let mut t = 0.0;
    while t <= lon.target_time() + 1e-9 {
        out.push(crate::trajectory::TrajectoryPoint {
            x: lon.evaluate(0, t),
            y: 0.0,
            theta: 0.0,
            kappa: 0.0,
            v: lon.evaluate(1, t),
            a: lon.evaluate(2, t),
            relative_time: t,
        });
        t += dt;
    }
    out
}
