//! Reference line storage and the position/arc-length matcher (SPEC_FULL.md §4.2).

use crate::error::{PlanningError, PlanningResult};

/// A single sample along the reference path: position, heading, curvature and its
/// derivative with respect to arc length, plus the arc length itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferencePoint {
    pub s: f64,
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub kappa: f64,
    pub dkappa: f64,
}

/// An ordered, strictly-increasing-in-`s` polyline. Immutable for the lifetime of one
/// planning cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    points: Vec<ReferencePoint>,
}

impl ReferenceLine {
    /// Validates the §3 invariants (at least two points, strictly increasing `s`).
    pub fn new(points: Vec<ReferencePoint>) -> PlanningResult<Self> {
        if points.len() < 2 {
            return Err(PlanningError::InvalidInput {
                reason: format!("reference line has {} points, need >= 2", points.len()),
            });
        }
        for w in points.windows(2) {
            if !(w[1].s > w[0].s) {
                return Err(PlanningError::InvalidInput {
                    reason: format!(
                        "reference line arc length is not strictly increasing at s={} -> s={}",
                        w[0].s, w[1].s
                    ),
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn front(&self) -> &ReferencePoint {
        &self.points[0]
    }

    pub fn back(&self) -> &ReferencePoint {
        self.points.last().expect("validated nonempty in new()")
    }

    /// Finds the reference point on the polyline closest to `(x, y)`, with linear
    /// interpolation between the two bracketing samples so `s` is continuous in `(x, y)`.
    /// Ties (equal distance) are broken by the smaller `s`.
    pub fn match_by_position(&self, x: f64, y: f64) -> ReferencePoint {
        let mut best: Option<(f64, ReferencePoint)> = None;

        for w in self.points.windows(2) {
            let candidate = project_onto_segment(&w[0], &w[1], x, y);
            let d = hypot(candidate.x - x, candidate.y - y);
            best = match best {
                None => Some((d, candidate)),
                Some((best_d, best_pt)) => {
                    if d < best_d - 1e-12 || ((d - best_d).abs() <= 1e-12 && candidate.s < best_pt.s)
                    {
                        Some((d, candidate))
                    } else {
                        Some((best_d, best_pt))
                    }
                }
            };
        }

        best.expect("validated >= 2 points in new()").1
    }

    /// Linearly interpolates the reference point at arc length `s`, clamping to the
    /// endpoints when `s` lies outside `[s_front, s_back]`.
    pub fn match_by_arc_length(&self, s: f64) -> ReferencePoint {
        if s <= self.front().s {
            return *self.front();
        }
        if s >= self.back().s {
            return *self.back();
        }
        // binary search for the bracketing segment
        let idx = match self
            .points
            .binary_search_by(|p| p.s.partial_cmp(&s).unwrap())
        {
            Ok(i) => return self.points[i],
            Err(i) => i,
        };
        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        interpolate(a, b, s)
    }
}

fn hypot(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

fn interpolate(a: &ReferencePoint, b: &ReferencePoint, s: f64) -> ReferencePoint {
    let span = b.s - a.s;
    let ratio = if span.abs() < 1e-12 { 0.0 } else { (s - a.s) / span };
    ReferencePoint {
        s,
        x: a.x + ratio * (b.x - a.x),
        y: a.y + ratio * (b.y - a.y),
        theta: a.theta + ratio * angle_diff(a.theta, b.theta),
        kappa: a.kappa + ratio * (b.kappa - a.kappa),
        dkappa: a.dkappa + ratio * (b.dkappa - a.dkappa),
    }
}

fn angle_diff(from: f64, to: f64) -> f64 {
    let mut d = to - from;
    while d > std::f64::consts::PI {
        d -= 2.0 * std::f64::consts::PI;
    }
    while d < -std::f64::consts::PI {
        d += 2.0 * std::f64::consts::PI;
    }
    d
}

/// Projects `(x, y)` onto the segment `[a, b]`, clamped to the segment, returning the
/// interpolated reference point (including its arc length) at the projection.
fn project_onto_segment(a: &ReferencePoint, b: &ReferencePoint, x: f64, y: f64) -> ReferencePoint {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq < 1e-12 {
        0.0
    } else {
        (((x - a.x) * dx + (y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let s = a.s + t * (b.s - a.s);
    interpolate(a, b, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_line() -> ReferenceLine {
        let pts = (0..100)
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
    fn rejects_too_few_points() {
        let err = ReferenceLine::new(vec![ReferencePoint {
            s: 0.0,
            x: 0.0,
            y: 0.0,
            theta: 0.0,
            kappa: 0.0,
            dkappa: 0.0,
        }]);
        assert!(matches!(err, Err(PlanningError::InvalidInput { .. })));
    }

    #[test]
    fn rejects_non_monotone_s() {
        let pts = vec![
            ReferencePoint {
                s: 1.0,
                x: 0.0,
                y: 0.0,
                theta: 0.0,
                kappa: 0.0,
                dkappa: 0.0,
            },
            ReferencePoint {
                s: 0.5,
                x: 1.0,
                y: 0.0,
                theta: 0.0,
                kappa: 0.0,
                dkappa: 0.0,
            },
        ];
        assert!(matches!(
            ReferenceLine::new(pts),
            Err(PlanningError::InvalidInput { .. })
        ));
    }

    #[test]
    fn match_by_position_is_continuous_along_straight_line() {
        let line = straight_line();
        let pt = line.match_by_position(10.3, 0.0);
        assert!((pt.s - 10.3).abs() < 1e-9);
        assert!((pt.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn match_by_position_projects_off_axis_points() {
        let line = straight_line();
        let pt = line.match_by_position(10.0, 2.0);
        assert!((pt.s - 10.0).abs() < 1e-9);
    }

    #[test]
    fn match_by_arc_length_clamps_to_endpoints() {
        let line = straight_line();
        let below = line.match_by_arc_length(-5.0);
        assert_eq!(below.s, line.front().s);
        let above = line.match_by_arc_length(1000.0);
        assert_eq!(above.s, line.back().s);
    }

    #[test]
    fn match_by_arc_length_interpolates() {
        let line = straight_line();
        let pt = line.match_by_arc_length(10.5);
        assert!((pt.x - 10.5).abs() < 1e-9);
    }
}
