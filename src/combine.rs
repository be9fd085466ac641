//! Combines an independent longitudinal and lateral 1-D curve into a single Cartesian
//! trajectory (SPEC_FULL.md §4.9).

use crate::curve1d::Curve1D;
use crate::frenet::{frenet_to_cartesian, LatCondition, LonCondition};
use crate::reference_line::ReferenceLine;
use crate::trajectory::{DiscretizedTrajectory, TrajectoryPoint};

/// Walks `lon` out to `planned_trajectory_time`, re-expresses the matching point of
/// `lat` as a function of `s` rather than `t`, and maps the combined Frenet state back
/// to Cartesian coordinates via `ref_line`. `lon`/`lat` are sampled past their own
/// fitted horizon via `Curve1D::evaluate`'s linear extrapolation, so every candidate
/// fills the full planning horizon regardless of its own target time. Stops early if
/// `s` runs past the end of the reference line, since no reference point exists to
/// decode against beyond that. `t0` is the time origin (`init_point.relative_time`)
/// each sample's `relative_time` is offset by.
pub fn combine(
    lon: &Curve1D,
    lat: &Curve1D,
    ref_line: &ReferenceLine,
    time_resolution: f64,
    planned_trajectory_time: f64,
    t0: f64,
) -> DiscretizedTrajectory {
    let mut trajectory = vec![];
    let back_s = ref_line.back().s;

    let mut t = 0.0;
    while t <= planned_trajectory_time + 1e-9 {
        let s = lon.evaluate(0, t);
        if s > back_s {
            break;
        }

        let lon_condition = LonCondition {
            s,
            ds: lon.evaluate(1, t),
            dds: lon.evaluate(2, t),
        };
        let lat_condition = LatCondition {
            d: lat.evaluate(0, s),
            d_prime: lat.evaluate(1, s),
            d_prime2: lat.evaluate(2, s),
        };

        let ref_point = ref_line.match_by_arc_length(s);
        let cart = frenet_to_cartesian(&ref_point, &lon_condition, &lat_condition);

        trajectory.push(TrajectoryPoint {
            x: cart.x,
            y: cart.y,
            theta: cart.theta,
            kappa: cart.kappa,
            v: cart.v,
            a: cart.a,
            relative_time: t0 + t,
        });

        t += time_resolution;
    }

    trajectory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_line::ReferencePoint;

    fn straight_line() -> ReferenceLine {
        let pts = (0..200)
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

    #[test]
    fn straight_cruise_combines_to_a_monotonic_trajectory() {
        let line = straight_line();
        let lon = Curve1D::fit_quartic(0.0, 10.0, 0.0, 10.0, 0.0, 8.0, 10.0, 8.0).unwrap();
        let lat = Curve1D::fit_quintic(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 80.0, 0.0, 0.0, 80.0).unwrap();

        let traj = combine(&lon, &lat, &line, 0.5, 8.0, 0.0);
        assert!(traj.len() > 1);
        for w in traj.windows(2) {
            assert!(w[1].x > w[0].x);
            assert!(w[1].relative_time > w[0].relative_time);
        }
        for p in &traj {
            assert!((p.y).abs() < 1e-9);
        }
    }

    #[test]
    fn trajectory_stops_at_reference_line_end() {
        let pts: Vec<ReferencePoint> = (0..20)
            .map(|i| ReferencePoint {
                s: i as f64,
                x: i as f64,
                y: 0.0,
                theta: 0.0,
                kappa: 0.0,
                dkappa: 0.0,
            })
            .collect();
        let short_line = ReferenceLine::new(pts).unwrap();
        let lon = Curve1D::fit_quartic(0.0, 10.0, 0.0, 10.0, 0.0, 8.0, 10.0, 8.0).unwrap();
        let lat = Curve1D::fit_quintic(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 80.0, 0.0, 0.0, 80.0).unwrap();

        let traj = combine(&lon, &lat, &short_line, 0.5, 8.0, 0.0);
        for p in &traj {
            assert!(p.x <= 19.0);
        }
    }

    #[test]
    fn samples_past_the_curves_own_horizon_up_to_the_planning_horizon() {
        let line = straight_line();
        // Curve's own target_time is 3s; planned_trajectory_time extends to 8s, relying
        // on Curve1D::evaluate's linear extrapolation beyond param_length.
        let lon = Curve1D::fit_quartic(0.0, 10.0, 0.0, 10.0, 0.0, 3.0, 10.0, 3.0).unwrap();
        let lat = Curve1D::fit_quintic(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 3.0).unwrap();

        let traj = combine(&lon, &lat, &line, 0.5, 8.0, 0.0);
        let last = traj.last().unwrap();
        assert!(last.relative_time > lon.target_time());
    }

    #[test]
    fn relative_time_is_offset_by_t0() {
        let line = straight_line();
        let lon = Curve1D::fit_quartic(0.0, 10.0, 0.0, 10.0, 0.0, 8.0, 10.0, 8.0).unwrap();
        let lat = Curve1D::fit_quintic(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 80.0, 0.0, 0.0, 80.0).unwrap();

        let traj = combine(&lon, &lat, &line, 0.5, 8.0, 2.0);
        assert_eq!(traj.first().unwrap().relative_time, 2.0);
    }
}
