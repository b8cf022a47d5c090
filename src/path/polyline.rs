use kurbo::{Line, ParamCurveNearest};

use crate::foundation::{
    core::{Point, clamp_unit, is_finite_point},
    error::{GalleryError, GalleryResult},
};

const DEDUP_EPS: f64 = 1e-9;

/// Ordered 2D waypoints with precomputed cumulative arc length.
///
/// Sampling is arc-length parameterized: equal steps in `t` cover equal distance along the path,
/// whatever the waypoint spacing. A single-point path has zero length and samples to that point.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPolyline {
    points: Vec<Point>,
    cumulative: Vec<f64>, // cumulative[i] = length from points[0] to points[i]
    total_length: f64,
}

/// Shape of the circuit-trace route generated between two portals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RouteStyle {
    /// Height of the routing lane above the higher of the two endpoints.
    pub lane_offset: f64,
    /// Length of the 45° chamfer at each bend.
    pub chamfer: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            lane_offset: 1.5,
            chamfer: 0.75,
        }
    }
}

impl PathPolyline {
    pub fn new(points: Vec<Point>) -> GalleryResult<Self> {
        if points.is_empty() {
            return Err(GalleryError::validation(
                "path polyline needs at least one waypoint",
            ));
        }
        if let Some(idx) = points.iter().position(|p| !is_finite_point(*p)) {
            return Err(GalleryError::validation(format!(
                "path waypoint {idx} must be finite"
            )));
        }
        Ok(Self::build(points))
    }

    /// Route a trace from `from` to `to`: rise to a lane, bend 45°, run across, bend, descend.
    ///
    /// Coincident endpoints produce a single-point path.
    pub fn trace_route(from: Point, to: Point, style: RouteStyle) -> Self {
        let dx = to.x - from.x;
        let lane_y = from.y.max(to.y) + style.lane_offset.max(0.0);
        let mut pts = vec![from];

        if dx.abs() > DEDUP_EPS && lane_y > from.y.min(to.y) + DEDUP_EPS {
            let dir = dx.signum();
            let chamfer = style
                .chamfer
                .max(0.0)
                .min(dx.abs() / 2.0)
                .min(lane_y - from.y)
                .min(lane_y - to.y);
            pts.push(Point::new(from.x, lane_y - chamfer));
            pts.push(Point::new(from.x + dir * chamfer, lane_y));
            pts.push(Point::new(to.x - dir * chamfer, lane_y));
            pts.push(Point::new(to.x, lane_y - chamfer));
        }
        pts.push(to);

        pts.dedup_by(|b, a| a.distance(*b) <= DEDUP_EPS);
        Self::build(pts)
    }

    fn build(points: Vec<Point>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        cumulative.push(0.0);
        for w in points.windows(2) {
            acc += w[0].distance(w[1]);
            cumulative.push(acc);
        }
        Self {
            points,
            cumulative,
            total_length: acc,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Sample the point at arc-length fraction `t` (clamped to `[0, 1]`).
    pub fn point_at(&self, t: f64) -> Point {
        if self.points.len() == 1 || self.total_length <= 0.0 {
            return self.points[0];
        }

        let target = clamp_unit(t) * self.total_length;
        if target >= self.total_length {
            return self.end();
        }
        let idx = self.cumulative.partition_point(|&c| c <= target);
        let seg = idx.saturating_sub(1).min(self.points.len() - 2);

        let seg_len = self.cumulative[seg + 1] - self.cumulative[seg];
        let local = if seg_len > 0.0 {
            clamp_unit((target - self.cumulative[seg]) / seg_len)
        } else {
            0.0
        };
        self.points[seg].lerp(self.points[seg + 1], local)
    }

    /// Arc-length fraction of the point on the path closest to `p`.
    pub fn closest_t(&self, p: Point) -> f64 {
        if self.points.len() == 1 || self.total_length <= 0.0 {
            return 0.0;
        }

        let mut best_dist_sq = f64::INFINITY;
        let mut best_len = 0.0;
        for (i, w) in self.points.windows(2).enumerate() {
            let seg_len = self.cumulative[i + 1] - self.cumulative[i];
            let (dist_sq, local) = if seg_len > 0.0 {
                let nearest = Line::new(w[0], w[1]).nearest(p, 1e-9);
                (nearest.distance_sq, clamp_unit(nearest.t))
            } else {
                ((p - w[0]).hypot2(), 0.0)
            };
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best_len = self.cumulative[i] + local * seg_len;
            }
        }
        clamp_unit(best_len / self.total_length)
    }

    /// Waypoints of the part of the path revealed up to fraction `t`, ending exactly at
    /// [`point_at(t)`](Self::point_at).
    pub fn prefix(&self, t: f64) -> Vec<Point> {
        let target = clamp_unit(t) * self.total_length;
        let mut out: Vec<Point> = self
            .points
            .iter()
            .zip(&self.cumulative)
            .take_while(|(_, c)| **c < target)
            .map(|(p, _)| *p)
            .collect();
        let end = self.point_at(t);
        if out.last().is_none_or(|last| last.distance(end) > DEDUP_EPS) {
            out.push(end);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/polyline.rs"]
mod tests;
