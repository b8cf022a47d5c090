pub use glam::DVec3;
pub use kurbo::Point;

/// Index into the gallery's portal list.
pub type PortalIndex = usize;

/// Fixed camera facing: the camera always looks down -Z, toward the wall at `z = 0`.
pub const CAMERA_FORWARD: DVec3 = DVec3::NEG_Z;

/// Clamp a progress fraction into `[0, 1]`.
///
/// NaN maps to `0.0` so a misbehaving caller cannot poison easing or interpolation.
pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Lift a wall-plane point to 3D at depth `z`.
pub fn at_depth(p: Point, z: f64) -> DVec3 {
    DVec3::new(p.x, p.y, z)
}

/// Project a 3D position onto the wall plane.
pub fn lateral(v: DVec3) -> Point {
    Point::new(v.x, v.y)
}

pub(crate) fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
