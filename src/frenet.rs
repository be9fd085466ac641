//! Bidirectional Cartesian <-> Frenet conversion (SPEC_FULL.md §4.1).
//!
//! Pure mathematics: no allocation, no fallible paths. Garbage in (NaN/Inf, or a
//! `ref_pt` that is not the true projection) silently degrades rather than panics;
//! callers that need to detect that run the result through the constraint checker.

use crate::reference_line::ReferencePoint;

/// Vehicle state in the world (Cartesian) frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CartesianState {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub kappa: f64,
    pub v: f64,
    pub a: f64,
}

/// Longitudinal condition `(s, s_dot, s_ddot)`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LonCondition {
    pub s: f64,
    pub ds: f64,
    pub dds: f64,
}

/// Lateral condition `(d, d', d'')`, derivatives taken with respect to `s`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatCondition {
    pub d: f64,
    pub d_prime: f64,
    pub d_prime2: f64,
}

/// The vehicle state split into independent longitudinal and lateral triples,
/// relative to the matched reference point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrenetState {
    pub lon: LonCondition,
    pub lat: LatCondition,
}

/// Converts a Cartesian state to Frenet coordinates relative to `ref_pt`, which the
/// caller guarantees is the projection of `(cart.x, cart.y)` onto the reference line.
pub fn cartesian_to_frenet(ref_pt: &ReferencePoint, cart: &CartesianState) -> FrenetState {
    let dx = cart.x - ref_pt.x;
    let dy = cart.y - ref_pt.y;

    let cos_theta_r = ref_pt.theta.cos();
    let sin_theta_r = ref_pt.theta.sin();

    let cross_rd_nd = cos_theta_r * dy - sin_theta_r * dx;
    let d = (dx * dx + dy * dy).sqrt().copysign(cross_rd_nd);

    let delta_theta = cart.theta - ref_pt.theta;
    let (sin_delta_theta, cos_delta_theta) = delta_theta.sin_cos();
    let tan_delta_theta = sin_delta_theta / cos_delta_theta;

    let one_minus_kappa_r_d = 1.0 - ref_pt.kappa * d;
    let d_prime = one_minus_kappa_r_d * tan_delta_theta;

    let kappa_r_d_prime = ref_pt.dkappa * d + ref_pt.kappa * d_prime;

    let d_prime2 = -kappa_r_d_prime * tan_delta_theta
        + one_minus_kappa_r_d / (cos_delta_theta * cos_delta_theta)
            * (cart.kappa * one_minus_kappa_r_d / cos_delta_theta - ref_pt.kappa);

    let s_dot = cart.v * cos_delta_theta / one_minus_kappa_r_d;

    let delta_theta_prime = one_minus_kappa_r_d / cos_delta_theta * cart.kappa - ref_pt.kappa;
    let s_ddot =
        (cart.a * cos_delta_theta - s_dot * s_dot * (d_prime * delta_theta_prime - kappa_r_d_prime))
            / one_minus_kappa_r_d;

    FrenetState {
        lon: LonCondition {
            s: ref_pt.s,
            ds: s_dot,
            dds: s_ddot,
        },
        lat: LatCondition {
            d,
            d_prime,
            d_prime2,
        },
    }
}

/// Converts Frenet coordinates back to a Cartesian state, given the reference point at
/// the longitudinal condition's arc length.
pub fn frenet_to_cartesian(
    ref_pt: &ReferencePoint,
    lon: &LonCondition,
    lat: &LatCondition,
) -> CartesianState {
    let cos_theta_r = ref_pt.theta.cos();
    let sin_theta_r = ref_pt.theta.sin();

    let x = ref_pt.x - sin_theta_r * lat.d;
    let y = ref_pt.y + cos_theta_r * lat.d;

    let one_minus_kappa_r_d = 1.0 - ref_pt.kappa * lat.d;

    let delta_theta = lat.d_prime.atan2(one_minus_kappa_r_d);
    let (sin_delta_theta, cos_delta_theta) = delta_theta.sin_cos();
    let tan_delta_theta = sin_delta_theta / cos_delta_theta;

    let theta = normalize_angle(delta_theta + ref_pt.theta);

    let kappa_r_d_prime = ref_pt.dkappa * lat.d + ref_pt.kappa * lat.d_prime;

    let kappa = ((lat.d_prime2 + kappa_r_d_prime * tan_delta_theta) * cos_delta_theta
        * cos_delta_theta
        / one_minus_kappa_r_d
        + ref_pt.kappa)
        * cos_delta_theta
        / one_minus_kappa_r_d;

    let d_dot = lat.d_prime * lon.ds;
    let v = (one_minus_kappa_r_d * one_minus_kappa_r_d * lon.ds * lon.ds + d_dot * d_dot)
        .max(0.0)
        .sqrt();

    let delta_theta_prime = one_minus_kappa_r_d / cos_delta_theta * kappa - ref_pt.kappa;
    let a = lon.dds * one_minus_kappa_r_d / cos_delta_theta
        + lon.ds * lon.ds / cos_delta_theta
            * (lat.d_prime * delta_theta_prime - kappa_r_d_prime);

    CartesianState {
        x,
        y,
        theta,
        kappa,
        v,
        a,
    }
}

fn normalize_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut a = theta % two_pi;
    if a > std::f64::consts::PI {
        a -= two_pi;
    } else if a < -std::f64::consts::PI {
        a += two_pi;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn straight_ref_pt(s: f64) -> ReferencePoint {
        ReferencePoint {
            s,
            x: s,
            y: 0.0,
            theta: 0.0,
            kappa: 0.0,
            dkappa: 0.0,
        }
    }

    #[test]
    fn round_trip_on_straight_line_with_zero_offset() {
        let ref_pt = straight_ref_pt(12.0);
        let cart = CartesianState {
            x: 12.0,
            y: 0.0,
            theta: 0.0,
            kappa: 0.0,
            v: 10.0,
            a: 1.0,
        };
        let frenet = cartesian_to_frenet(&ref_pt, &cart);
        assert_abs_diff_eq!(frenet.lat.d, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(frenet.lon.ds, 10.0, epsilon = 1e-9);

        let back = frenet_to_cartesian(&ref_pt, &frenet.lon, &frenet.lat);
        assert_abs_diff_eq!(back.x, cart.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, cart.y, epsilon = 1e-6);
        assert_abs_diff_eq!(back.theta, cart.theta, epsilon = 1e-6);
        assert_abs_diff_eq!(back.v, cart.v, epsilon = 1e-6);
        assert_abs_diff_eq!(back.a, cart.a, epsilon = 1e-6);
    }

    #[test]
    fn round_trip_with_lateral_offset() {
        let ref_pt = straight_ref_pt(5.0);
        let cart = CartesianState {
            x: 5.0,
            y: 1.5,
            theta: 0.05,
            kappa: 0.0,
            v: 7.0,
            a: -0.5,
        };
        let frenet = cartesian_to_frenet(&ref_pt, &cart);
        assert_abs_diff_eq!(frenet.lat.d, 1.5, epsilon = 1e-9);

        let back = frenet_to_cartesian(&ref_pt, &frenet.lon, &frenet.lat);
        assert_abs_diff_eq!(back.x, cart.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, cart.y, epsilon = 1e-6);
        assert_abs_diff_eq!(back.theta, cart.theta, epsilon = 1e-6);
        assert_abs_diff_eq!(back.v, cart.v, epsilon = 1e-6);
        assert_abs_diff_eq!(back.a, cart.a, epsilon = 1e-6);
    }

    #[test]
    fn round_trip_on_curved_arc() {
        // Arc of radius 50, curvature 0.02, ego exactly on the arc at s = 31.4.
        let radius = 50.0_f64;
        let kappa = 1.0 / radius;
        let s = 31.4;
        let phi = s / radius;
        let ref_pt = ReferencePoint {
            s,
            x: radius * phi.sin(),
            y: radius * (1.0 - phi.cos()),
            theta: phi,
            kappa,
            dkappa: 0.0,
        };
        let cart = CartesianState {
            x: ref_pt.x,
            y: ref_pt.y,
            theta: ref_pt.theta,
            kappa,
            v: 8.0,
            a: 0.0,
        };
        let frenet = cartesian_to_frenet(&ref_pt, &cart);
        assert_abs_diff_eq!(frenet.lat.d, 0.0, epsilon = 1e-6);

        let back = frenet_to_cartesian(&ref_pt, &frenet.lon, &frenet.lat);
        assert_abs_diff_eq!(back.x, cart.x, epsilon = 1e-5);
        assert_abs_diff_eq!(back.y, cart.y, epsilon = 1e-5);
        assert_abs_diff_eq!(back.theta, cart.theta, epsilon = 1e-5);
    }
}
