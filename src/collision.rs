//! Swept-volume collision checking against obstacle predictions (SPEC_FULL.md §4.7).

use nalgebra::{Isometry2, Point2, Vector2};

use crate::config::EgoFootprint;
use crate::obstacle::Obstacle;
use crate::trajectory::DiscretizedTrajectory;

pub struct CollisionChecker<'a> {
    obstacles: &'a [Obstacle],
    footprint: EgoFootprint,
}

impl<'a> CollisionChecker<'a> {
    pub fn new(obstacles: &'a [Obstacle], footprint: EgoFootprint) -> Self {
        Self { obstacles, footprint }
    }

    /// Tests the ego footprint, transported along `trajectory`, against every
    /// obstacle's predicted footprint at the matching sample time. Early-outs on the
    /// first overlap found.
    pub fn in_collision(&self, trajectory: &DiscretizedTrajectory) -> bool {
        for point in trajectory {
            let ego_center_offset = self.footprint.length / 2.0 - self.footprint.rear_axle_to_back;
            let ego_pose = Isometry2::new(Vector2::new(point.x, point.y), point.theta)
                * Isometry2::new(Vector2::new(ego_center_offset, 0.0), 0.0);
            let ego_corners = oriented_rect_corners(&ego_pose, self.footprint.length, self.footprint.width);

            for obstacle in self.obstacles {
                let pose = obstacle.pose_at(point.relative_time);
                let obstacle_pose = Isometry2::new(Vector2::new(pose.x, pose.y), pose.theta);
                let obstacle_corners = oriented_rect_corners(&obstacle_pose, obstacle.length, obstacle.width);

                if polygons_overlap(&ego_corners, &obstacle_corners) {
                    return true;
                }
            }
        }
        false
    }
}

fn oriented_rect_corners(pose: &Isometry2<f64>, length: f64, width: f64) -> [Point2<f64>; 4] {
    let (hl, hw) = (length / 2.0, width / 2.0);
    [
        pose * Point2::new(hl, hw),
        pose * Point2::new(hl, -hw),
        pose * Point2::new(-hl, -hw),
        pose * Point2::new(-hl, hw),
    ]
}

/// Separating Axis Theorem test for two convex quadrilaterals.
fn polygons_overlap(a: &[Point2<f64>; 4], b: &[Point2<f64>; 4]) -> bool {
    for polygon in [a, b] {
        for i in 0..4 {
            let edge = polygon[(i + 1) % 4] - polygon[i];
            let axis = Vector2::new(-edge.y, edge.x);
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

fn project(polygon: &[Point2<f64>; 4], axis: Vector2<f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for p in polygon {
        let d = p.coords.dot(&axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}
