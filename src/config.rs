//! Deserialisable configuration surface (see SPEC_FULL.md §6).
//!
//! Every numeric knob the pipeline reads lives here so a host process can load it
//! from `serde_json` (or any other `serde` format) instead of recompiling.

use serde::{Deserialize, Serialize};

/// Grid of candidate planning horizons, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TGrid {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl TGrid {
    pub fn values(&self) -> Vec<f64> {
        let mut out = vec![];
        let mut t = self.min;
        while t <= self.max + 1e-9 {
            out.push(t);
            t += self.step;
        }
        out
    }
}

/// Grid of candidate target longitudinal velocities, in m/s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VGrid {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl VGrid {
    pub fn values(&self) -> Vec<f64> {
        let mut out = vec![];
        let mut v = self.min;
        while v <= self.max + 1e-9 {
            out.push(v);
            v += self.step;
        }
        out
    }
}

/// Constraint thresholds enforced by the constraint checker (SPEC_FULL.md §4.5).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintLimits {
    pub v_max: f64,
    pub a_long_max: f64,
    pub a_long_min: f64,
    pub a_lat_max: f64,
    pub jerk_max: f64,
    pub kappa_max: f64,
}

impl Default for ConstraintLimits {
    fn default() -> Self {
        Self {
            v_max: 20.0,
            a_long_max: 3.0,
            a_long_min: -6.0,
            a_lat_max: 4.0,
            jerk_max: 4.0,
            kappa_max: 0.2,
        }
    }
}

/// Nonnegative weights combined into the scalar cost (SPEC_FULL.md §4.6).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    pub w_travel: f64,
    pub w_jerk: f64,
    pub w_obstacle: f64,
    pub w_lateral: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            w_travel: 10.0,
            w_jerk: 1.0,
            w_obstacle: 50.0,
            w_lateral: 5.0,
        }
    }
}

/// Oriented rectangle describing the ego vehicle footprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EgoFootprint {
    pub length: f64,
    pub width: f64,
    pub rear_axle_to_back: f64,
}

impl Default for EgoFootprint {
    fn default() -> Self {
        Self {
            length: 4.8,
            width: 2.0,
            rear_axle_to_back: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub planned_trajectory_time: f64,
    pub trajectory_time_resolution: f64,

    pub lon_t_grid: TGrid,
    pub lon_v_grid: VGrid,
    pub lateral_offsets: Vec<f64>,
    pub lateral_s_grid: TGrid,

    pub constraints: ConstraintLimits,
    pub cost_weights: CostWeights,
    pub ego_footprint: EgoFootprint,

    pub s_lookahead: f64,
    pub s_lookback: f64,
    pub ptn_time_step: f64,

    pub enable_constraint_prefilter: bool,
    pub auto_tuning_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            planned_trajectory_time: 8.0,
            trajectory_time_resolution: 0.1,

            lon_t_grid: TGrid {
                min: 1.0,
                max: 8.0,
                step: 1.0,
            },
            lon_v_grid: VGrid {
                min: 0.0,
                max: 20.0,
                step: 2.0,
            },
            lateral_offsets: vec![-3.5, 0.0, 3.5],
            lateral_s_grid: TGrid {
                min: 10.0,
                max: 40.0,
                step: 10.0,
            },

            constraints: ConstraintLimits::default(),
            cost_weights: CostWeights::default(),
            ego_footprint: EgoFootprint::default(),

            s_lookahead: 100.0,
            s_lookback: 20.0,
            ptn_time_step: 0.5,

            enable_constraint_prefilter: true,
            auto_tuning_enabled: false,
        }
    }
}
