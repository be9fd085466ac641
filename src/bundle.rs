//! The 1-D trajectory bundle generator (SPEC_FULL.md §4.4).

use crate::config::PlannerConfig;
use crate::curve1d::Curve1D;
use crate::frenet::{LatCondition, LonCondition};
use crate::target::PlanningTarget;

pub type LonBundle = Vec<Curve1D>;
pub type LatBundle = Vec<Curve1D>;

/// Generates the longitudinal and lateral candidate bundles consistent with the
/// initial Frenet state and the decider's objective. Never returns an empty bundle
/// when the initial state is finite: every grid cell that fails to fit (degenerate
/// horizon, non-finite coefficients) is simply skipped, not propagated as an error.
pub fn generate_bundles(
    init_lon: &LonCondition,
    init_lat: &LatCondition,
    target: &PlanningTarget,
    config: &PlannerConfig,
) -> (LonBundle, LatBundle) {
    (
        generate_longitudinal(init_lon, target, config),
        generate_lateral(init_lat, config),
    )
}

fn generate_longitudinal(init: &LonCondition, target: &PlanningTarget, config: &PlannerConfig) -> LonBundle {
    let mut bundle = vec![];

    match target {
        PlanningTarget::Cruise { .. } => {
            for &big_t in &config.lon_t_grid.values() {
                for &v_t in &config.lon_v_grid.values() {
                    if let Some(curve) =
                        Curve1D::fit_quartic(init.s, init.ds, init.dds, v_t, 0.0, big_t, v_t, big_t)
                    {
                        bundle.push(curve);
                    }
                }
            }
        }
        PlanningTarget::Stop { stop_s } => {
            for &big_t in &config.lon_t_grid.values() {
                if let Some(curve) = Curve1D::fit_quintic(
                    init.s, init.ds, init.dds, *stop_s, 0.0, 0.0, big_t, *stop_s, 0.0, big_t,
                ) {
                    bundle.push(curve);
                }
            }
        }
        PlanningTarget::Follow { gap, .. } | PlanningTarget::Yield { gap, .. } => {
            let s_target = init.s + gap;
            for &big_t in &config.lon_t_grid.values() {
                if let Some(curve) = Curve1D::fit_quintic(
                    init.s, init.ds, init.dds, s_target, 0.0, 0.0, big_t, s_target, 0.0, big_t,
                ) {
                    bundle.push(curve);
                }
            }
        }
    }

    bundle
}

fn generate_lateral(init: &LatCondition, config: &PlannerConfig) -> LatBundle {
    let mut bundle = vec![];
    for &big_s in &config.lateral_s_grid.values() {
        for &d_target in &config.lateral_offsets {
            if let Some(curve) = Curve1D::fit_quintic(
                init.d, init.d_prime, init.d_prime2, d_target, 0.0, 0.0, big_s, d_target, 0.0, big_s,
            ) {
                bundle.push(curve);
            }
        }
    }
    bundle
}
