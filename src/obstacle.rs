//! Obstacle data model (SPEC_FULL.md §3). Perception and prediction are out of scope;
//! this is the shape the core expects those external collaborators to hand it.

/// One predicted pose of an obstacle at a future instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictedPose {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

/// An obstacle's identity, footprint and predicted future trajectory, already
/// materialised by the (out-of-scope) prediction module.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obstacle {
    pub id: u64,
    pub length: f64,
    pub width: f64,
    /// Predicted poses, ordered by strictly increasing `t`, covering at least the
    /// planning horizon. A single entry models a momentarily-static obstacle.
    pub predicted_trajectory: Vec<PredictedPose>,
}

impl Obstacle {
    pub fn stationary(id: u64, x: f64, y: f64, theta: f64, length: f64, width: f64) -> Self {
        Self {
            id,
            length,
            width,
            predicted_trajectory: vec![PredictedPose { t: 0.0, x, y, theta }],
        }
    }

    /// Linearly interpolates the predicted pose at time `t`, clamping to the first or
    /// last prediction when `t` falls outside the predicted horizon.
    pub fn pose_at(&self, t: f64) -> PredictedPose {
        let traj = &self.predicted_trajectory;
        if traj.is_empty() {
            return PredictedPose { t, x: 0.0, y: 0.0, theta: 0.0 };
        }
        if t <= traj[0].t {
            return traj[0];
        }
        if t >= traj[traj.len() - 1].t {
            return traj[traj.len() - 1];
        }
        for w in traj.windows(2) {
            if t >= w[0].t && t <= w[1].t {
                let span = w[1].t - w[0].t;
                let ratio = if span.abs() < 1e-12 { 0.0 } else { (t - w[0].t) / span };
                return PredictedPose {
                    t,
                    x: w[0].x + ratio * (w[1].x - w[0].x),
                    y: w[0].y + ratio * (w[1].y - w[0].y),
                    theta: w[0].theta + ratio * (w[1].theta - w[0].theta),
                };
            }
        }
        traj[traj.len() - 1]
    }

    /// Axis-aligned-in-its-own-frame corners of the footprint at pose `p`.
    pub fn corners_at(&self, p: &PredictedPose) -> [(f64, f64); 4] {
        let (hl, hw) = (self.length / 2.0, self.width / 2.0);
        let (sin_t, cos_t) = p.theta.sin_cos();
        let local = [(hl, hw), (hl, -hw), (-hl, -hw), (-hl, hw)];
        let mut out = [(0.0, 0.0); 4];
        for (i, (lx, ly)) in local.iter().enumerate() {
            out[i] = (
                p.x + lx * cos_t - ly * sin_t,
                p.y + lx * sin_t + ly * cos_t,
            );
        }
        out
    }
}
