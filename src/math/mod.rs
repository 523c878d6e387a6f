pub mod kdtree;
pub mod spherical;

pub use kdtree::KdTree;
pub use spherical::LatLonRadius;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix type, used for face and edge dyads.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Angle between two vectors, in degrees.
///
/// Returns `0.0` when either vector has zero length.
#[must_use]
pub fn angle_between_deg(a: &Vector3, b: &Vector3) -> f64 {
    a.angle(b).to_degrees()
}

/// Centroid of a triangle.
#[must_use]
pub fn triangle_centroid(a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    Point3::from((a.coords + b.coords + c.coords) / 3.0)
}

/// Non-normalized triangle normal `(b - a) x (c - a)`.
///
/// Its length is twice the triangle area.
#[must_use]
pub fn triangle_cross(a: &Point3, b: &Point3, c: &Point3) -> Vector3 {
    (b - a).cross(&(c - a))
}
