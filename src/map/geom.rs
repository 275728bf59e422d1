use std::fmt;
use std::ops::Deref;

/// Quake units per target unit.
pub const SCALE: f64 = 0.75;

/// A point in map space: Z up, Quake units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Moves the point into the target engine's space: Y up, scaled by [`SCALE`].
    ///
    /// `(x, y, z)` becomes `(x·s, z·s, −y·s)`.
    pub fn to_target_space(self) -> Self {
        to_target_space(self)
    }
}

impl fmt::Display for Point3 {
    /// Formats as `(x y z)` with six decimal places.
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({:.6} {:.6} {:.6})", self.x, self.y, self.z)
    }
}

/// Swaps Quake's Z-up axes for the target's Y-up axes and rescales.
pub fn to_target_space(point: Point3) -> Point3 {
    Point3 {
        x: positive_zero(point.x * SCALE),
        y: positive_zero(point.z * SCALE),
        z: positive_zero(-point.y * SCALE),
    }
}

/// Turns `-0.0` into `0.0` so no component prints as `-0.000000`. Other values are unchanged.
fn positive_zero(value: f64) -> f64 {
    value + 0.0
}

/// One face of a brush: three points whose winding picks the half-space, and a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    pub points: [Point3; 3],
    /// Lowercased texture reference with its `*` or `{` prefix intact.
    pub texture: String,
}

impl Plane {
    /// The three points in target space.
    pub fn target_points(&self) -> [Point3; 3] {
        let [p1, p2, p3] = self.points;
        [to_target_space(p1), to_target_space(p2), to_target_space(p3)]
    }
}

/// A convex solid, with its planes in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Brush(Vec<Plane>);

impl Brush {
    pub fn new(planes: Vec<Plane>) -> Self {
        Self(planes)
    }
}

impl Deref for Brush {
    type Target = Vec<Plane>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_space() {
        assert_eq!(
            Point3::new(-128.0, -128.0, 0.0).to_target_space(),
            Point3::new(-96.0, 0.0, 96.0)
        );
        assert_eq!(
            Point3::new(128.0, -128.0, 0.0).to_target_space(),
            Point3::new(96.0, 0.0, 96.0)
        );
        assert_eq!(
            Point3::new(8.0, 16.0, 32.0).to_target_space(),
            Point3::new(6.0, 24.0, -12.0)
        );
    }

    #[test]
    fn plane_points() {
        let plane = Plane {
            points: [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            texture: "wall".into(),
        };

        assert_eq!(
            plane.target_points(),
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, -3.0),
            ]
        );
    }

    #[test]
    fn no_negative_zero() {
        let point = Point3::new(0.0, 0.0, 0.0).to_target_space();
        assert_eq!(point.to_string(), "(0.000000 0.000000 0.000000)");

        let point = Point3::new(-0.0, -0.0, -0.0).to_target_space();
        assert_eq!(point.to_string(), "(0.000000 0.000000 0.000000)");
        assert!(!point.x.is_sign_negative());
        assert!(!point.y.is_sign_negative());
        assert!(!point.z.is_sign_negative());
    }

    #[test]
    fn display() {
        assert_eq!(
            Point3::new(-96.0, 0.0, 0.5).to_string(),
            "(-96.000000 0.000000 0.500000)"
        );
    }
}
