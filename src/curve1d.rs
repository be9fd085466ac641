//! One-dimensional lattice motion primitives (SPEC_FULL.md §3, §4.4, §9).
//!
//! The lattice mixes two polynomial families — a quartic when the end position is free
//! (cruise: only velocity/acceleration are pinned) and a quintic when it is fixed (stop,
//! follow). Both are closed under evaluation, so a tagged enum is used in place of a
//! trait object; matching on the tag also serves end-condition logging/debugging.

/// Coefficients and end-condition metadata for a single candidate 1-D primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve1D {
    Quartic {
        coefs: [f64; 5],
        param: f64,
        target_velocity: f64,
        target_time: f64,
    },
    Quintic {
        coefs: [f64; 6],
        param: f64,
        target_position: f64,
        target_velocity: f64,
        target_time: f64,
    },
}

impl Curve1D {
    /// Fits a quartic curve: boundary conditions `(x0, dx0, ddx0)` at 0 and
    /// `(dx1, ddx1)` at `param` (end position left free).
    pub fn fit_quartic(
        x0: f64,
        dx0: f64,
        ddx0: f64,
        dx1: f64,
        ddx1: f64,
        param: f64,
        target_velocity: f64,
        target_time: f64,
    ) -> Option<Curve1D> {
        if param <= 1e-6 {
            return None;
        }
        let p2 = param * param;

        let b0 = dx1 - ddx0 * param - dx0;
        let b1 = ddx1 - ddx0;

        let c3 = (3.0 * b0 - b1 * param) / (3.0 * p2);
        let c4 = (-2.0 * b0 + b1 * param) / (4.0 * p2 * param);

        let coefs = [x0, dx0, 0.5 * ddx0, c3, c4];
        if coefs.iter().any(|c| !c.is_finite()) {
            return None;
        }
        Some(Curve1D::Quartic {
            coefs,
            param,
            target_velocity,
            target_time,
        })
    }

    /// Fits a quintic curve: boundary conditions `(x0, dx0, ddx0)` at 0 and
    /// `(x1, dx1, ddx1)` at `param` (end position fixed).
    pub fn fit_quintic(
        x0: f64,
        dx0: f64,
        ddx0: f64,
        x1: f64,
        dx1: f64,
        ddx1: f64,
        param: f64,
        target_position: f64,
        target_velocity: f64,
        target_time: f64,
    ) -> Option<Curve1D> {
        if param <= 1e-6 {
            return None;
        }
        let p2 = param * param;
        let p3 = p2 * param;

        let c0 = (x1 - 0.5 * p2 * ddx0 - dx0 * param - x0) / p3;
        let c1 = (dx1 - ddx0 * param - dx0) / p2;
        let c2 = (ddx1 - ddx0) / param;

        let a3 = 0.5 * (20.0 * c0 - 8.0 * c1 + c2);
        let a4 = (-15.0 * c0 + 7.0 * c1 - c2) / param;
        let a5 = (6.0 * c0 - 3.0 * c1 + 0.5 * c2) / p2;

        let coefs = [x0, dx0, 0.5 * ddx0, a3, a4, a5];
        if coefs.iter().any(|c| !c.is_finite()) {
            return None;
        }
        Some(Curve1D::Quintic {
            coefs,
            param,
            target_position,
            target_velocity,
            target_time,
        })
    }

    pub fn param_length(&self) -> f64 {
        match self {
            Curve1D::Quartic { param, .. } => *param,
            Curve1D::Quintic { param, .. } => *param,
        }
    }

    pub fn target_time(&self) -> f64 {
        match self {
            Curve1D::Quartic { target_time, .. } => *target_time,
            Curve1D::Quintic { target_time, .. } => *target_time,
        }
    }

    pub fn target_velocity(&self) -> f64 {
        match self {
            Curve1D::Quartic { target_velocity, .. } => *target_velocity,
            Curve1D::Quintic { target_velocity, .. } => *target_velocity,
        }
    }

    /// `evaluate(0, t)` is position, `(1, t)` velocity, `(2, t)` acceleration.
    /// Defined for any `param >= 0`: extrapolation beyond the fitted length is
    /// linear, holding the boundary velocity/acceleration constant rather than
    /// leaving the tail of the curve undefined.
    pub fn evaluate(&self, order: usize, param: f64) -> f64 {
        let length = self.param_length();
        if param <= length {
            self.evaluate_polynomial(order, param)
        } else {
            let p0 = self.evaluate_polynomial(0, length);
            let p1 = self.evaluate_polynomial(1, length);
            let p2 = self.evaluate_polynomial(2, length);
            let dt = param - length;
            match order {
                0 => p0 + p1 * dt + 0.5 * p2 * dt * dt,
                1 => p1 + p2 * dt,
                2 => p2,
                _ => 0.0,
            }
        }
    }

    fn evaluate_polynomial(&self, order: usize, param: f64) -> f64 {
        match self {
            Curve1D::Quartic { coefs, .. } => eval_poly(coefs, order, param),
            Curve1D::Quintic { coefs, .. } => eval_poly(coefs, order, param),
        }
    }
}

fn eval_poly(coefs: &[f64], order: usize, t: f64) -> f64 {
    match order {
        0 => coefs.iter().enumerate().map(|(i, c)| c * t.powi(i as i32)).sum(),
        1 => coefs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| (i as f64) * c * t.powi(i as i32 - 1))
            .sum(),
        2 => coefs
            .iter()
            .enumerate()
            .skip(2)
            .map(|(i, c)| (i as f64) * (i as f64 - 1.0) * c * t.powi(i as i32 - 2))
            .sum(),
        _ => 0.0,
    }
}
