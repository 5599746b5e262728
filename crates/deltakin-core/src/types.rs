use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pose3
// ---------------------------------------------------------------------------

/// Cartesian end-effector position in the geometry's length unit (mm).
///
/// The origin sits at the center of the base plate; z grows upward, so
/// reachable poses are below the base at negative z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pose3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Pose on the vertical axis (x = y = 0).
    pub const fn on_axis(z: f64) -> Self {
        Self { x: 0.0, y: 0.0, z }
    }
}

impl std::ops::Sub for Pose3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// JointAngles3
// ---------------------------------------------------------------------------

/// Shoulder angles of the three arms, in degrees.
///
/// The arms sit 120° apart in the horizontal plane; 0° means the arm is
/// parallel to the floor, positive angles rotate the elbow downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles3 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl JointAngles3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Same angle applied to all three arms (symmetric, on-axis pose).
    pub const fn splat(t: f64) -> Self {
        Self { a: t, b: t, c: t }
    }
}

impl std::ops::Sub for JointAngles3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a - rhs.a, self.b - rhs.b, self.c - rhs.c)
    }
}

// ---------------------------------------------------------------------------
// AxisLimit / Envelope
// ---------------------------------------------------------------------------

/// Inclusive travel range of one Cartesian axis or one joint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLimit {
    pub min: f64,
    pub max: f64,
}

impl AxisLimit {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Symmetric limit around zero.
    pub const fn symmetric(magnitude: f64) -> Self {
        Self {
            min: -magnitude,
            max: magnitude,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Physical operating envelope discovered at calibration time.
///
/// Computed exactly once per engine, from geometry alone; deterministic.
/// Lengths are rounded to 3 decimals and angles to 2 before storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Cartesian travel limits. X and Y are symmetric around the axis.
    pub x_limit: AxisLimit,
    pub y_limit: AxisLimit,
    pub z_limit: AxisLimit,

    /// Joint travel limits observed over the reachable cube.
    pub a_limit: AxisLimit,
    pub b_limit: AxisLimit,
    pub c_limit: AxisLimit,

    /// Midpoint of the envelope relative to the base (x = y = 0).
    pub center: Pose3,

    /// Tool position when all arms are parallel to the floor (angles 0,0,0).
    pub home: Pose3,

    /// Cartesian displacement caused by one motor step at home, in mm.
    pub resolution: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pose_sub() {
        let d = Pose3::new(3.0, 5.0, -7.0) - Pose3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(d.x, 2.0);
        assert_relative_eq!(d.y, 4.0);
        assert_relative_eq!(d.z, -8.0);
    }

    #[test]
    fn pose_on_axis() {
        let p = Pose3::on_axis(-300.0);
        assert_eq!(p, Pose3::new(0.0, 0.0, -300.0));
    }

    #[test]
    fn angles_sub() {
        let d = JointAngles3::new(10.0, 20.0, 30.0) - JointAngles3::splat(5.0);
        assert_relative_eq!(d.a, 5.0);
        assert_relative_eq!(d.b, 15.0);
        assert_relative_eq!(d.c, 25.0);
    }

    #[test]
    fn angles_splat() {
        assert_eq!(JointAngles3::splat(7.5), JointAngles3::new(7.5, 7.5, 7.5));
    }

    #[test]
    fn axis_limit_contains() {
        let lim = AxisLimit::new(-10.0, 10.0);
        assert!(lim.contains(0.0));
        assert!(lim.contains(-10.0));
        assert!(lim.contains(10.0));
        assert!(!lim.contains(10.1));
        assert!(!lim.contains(-10.1));
    }

    #[test]
    fn axis_limit_symmetric() {
        let lim = AxisLimit::symmetric(42.0);
        assert_relative_eq!(lim.min, -42.0);
        assert_relative_eq!(lim.max, 42.0);
        assert_relative_eq!(lim.span(), 84.0);
    }

    #[test]
    fn pose_serialize_roundtrip() {
        let p = Pose3::new(1.5, -2.5, -300.125);
        let json = serde_json::to_string(&p).unwrap();
        let p2: Pose3 = serde_json::from_str(&json).unwrap();
        assert_eq!(p, p2);
    }

    #[test]
    fn envelope_serialize_roundtrip() {
        let env = Envelope {
            x_limit: AxisLimit::symmetric(120.0),
            y_limit: AxisLimit::symmetric(120.0),
            z_limit: AxisLimit::new(-420.0, -180.0),
            a_limit: AxisLimit::new(-30.0, 90.0),
            b_limit: AxisLimit::new(-30.0, 90.0),
            c_limit: AxisLimit::new(-30.0, 90.0),
            center: Pose3::on_axis(-300.0),
            home: Pose3::on_axis(-383.71),
            resolution: 0.144,
        };
        let json = serde_json::to_string(&env).unwrap();
        let env2: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(env, env2);
    }
}
