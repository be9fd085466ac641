//! Point-wise kinematic/dynamic feasibility checks (SPEC_FULL.md §4.5).

use crate::config::PlannerConfig;
use crate::curve1d::Curve1D;
use crate::trajectory::DiscretizedTrajectory;

/// Checks a candidate `(lon, lat)` pair in isolation, before the expense of combining
/// them into a 2-D trajectory: per-axis `|v|`, `|a|`, `|jerk|` of the longitudinal
/// curve, sampled at `Δt` out to its own horizon.
pub fn is_valid_pair(lon: &Curve1D, lat: &Curve1D, config: &PlannerConfig) -> bool {
    let dt = config.trajectory_time_resolution;
    let limits = &config.constraints;

    let mut t = 0.0;
    let mut prev_a: Option<f64> = None;
    while t <= lon.param_length() + 1e-9 {
        let v = lon.evaluate(1, t);
        let a = lon.evaluate(2, t);
        if !v.is_finite() || !a.is_finite() {
            return false;
        }
        if v.abs() > limits.v_max + 1e-6 {
            return false;
        }
        if a > limits.a_long_max + 1e-6 || a < limits.a_long_min - 1e-6 {
            return false;
        }
        if let Some(prev) = prev_a {
            let jerk = (a - prev) / dt;
            if jerk.abs() > limits.jerk_max + 1e-6 {
                return false;
            }
        }
        prev_a = Some(a);
        t += dt;
    }

    let mut s = 0.0;
    while s <= lat.param_length() + 1e-9 {
        let d = lat.evaluate(0, s);
        let d_prime = lat.evaluate(1, s);
        if !d.is_finite() || !d_prime.is_finite() {
            return false;
        }
        s += dt.max(0.5);
    }

    true
}

/// Checks the reconstructed 2-D trajectory against the same limits, plus lateral
/// acceleration `v^2 * kappa` and curvature.
pub fn is_valid_trajectory(traj: &DiscretizedTrajectory, config: &PlannerConfig) -> bool {
    let limits = &config.constraints;
    let dt = config.trajectory_time_resolution;

    let mut prev_a: Option<f64> = None;
    for p in traj {
        if !p.x.is_finite()
            || !p.y.is_finite()
            || !p.theta.is_finite()
            || !p.kappa.is_finite()
            || !p.v.is_finite()
            || !p.a.is_finite()
        {
            return false;
        }
        if p.v.abs() > limits.v_max + 1e-6 {
            return false;
        }
        if p.a > limits.a_long_max + 1e-6 || p.a < limits.a_long_min - 1e-6 {
            return false;
        }
        if p.kappa.abs() > limits.kappa_max + 1e-6 {
            return false;
        }
        let a_lat = p.v * p.v * p.kappa;
        if a_lat.abs() > limits.a_lat_max + 1e-6 {
            return false;
        }
        if let Some(prev) = prev_a {
            let jerk = (p.a - prev) / dt;
            if jerk.abs() > limits.jerk_max + 1e-6 {
                return false;
            }
        }
        prev_a = Some(p.a);
    }

    true
}
