//! Inverse kinematics: end-effector position to shoulder angles.
//!
//! Each arm is solved independently. The target point is rotated into the
//! arm's local YZ half-plane (arm 1 needs no rotation; arms 2 and 3 are
//! reached by ∓120° rotations about the vertical axis) and a single-arm
//! solve intersects the feasible elbow line with the shoulder circle,
//! producing a quadratic.
//!
//! The "outer" intersection root is always selected. For the rotary delta
//! topology the other root corresponds to an elbow-up/crossed configuration
//! the linkage cannot take; this is an assumption about the geometry family,
//! not a proven invariant for arbitrary dimensions.

use nalgebra::{Rotation2, Vector2};

use deltakin_core::{Geometry, JointAngles3, KinError, Pose3};

use crate::TAN30;

/// Solve inverse kinematics for the given Cartesian target (mm).
///
/// Arms are attempted in order a, b, c; the first unreachable arm
/// short-circuits the solve.
///
/// # Errors
///
/// Returns [`KinError::Unreachable`] when any arm's discriminant is
/// negative: no shoulder angle places the elbow within forearm reach of the
/// target.
pub fn solve(geom: &Geometry, pose: Pose3) -> Result<JointAngles3, KinError> {
    let target = Vector2::new(pose.x, pose.y);
    // Arm 2 sees the target rotated by -120°, arm 3 by +120°.
    let into_arm2 = Rotation2::new((-120.0f64).to_radians());
    let into_arm3 = Rotation2::new(120.0f64.to_radians());

    let a = arm_angle(geom, target, pose.z)?;
    let b = arm_angle(geom, into_arm2 * target, pose.z)?;
    let c = arm_angle(geom, into_arm3 * target, pose.z)?;

    Ok(JointAngles3::new(a, b, c))
}

/// Single-arm solve in the arm's YZ half-plane.
///
/// Returns the shoulder angle (degrees) placing the elbow on the
/// shoulder-length circle such that the remaining segment to the target has
/// exactly forearm length.
fn arm_angle(geom: &Geometry, target: Vector2<f64>, z0: f64) -> Result<f64, KinError> {
    let rf = geom.shoulder_length;
    let re = geom.forearm_length;

    let x0 = target.x;
    // Shift the target from the effector center to its joint edge.
    let y0 = target.y - 0.5 * TAN30 * geom.effector_radius;
    // Shoulder pivot offset from the vertical axis.
    let y1 = -0.5 * TAN30 * geom.base_radius;

    // Feasible elbow line: z = a + b*y.
    let a = (x0 * x0 + y0 * y0 + z0 * z0 + rf * rf - re * re - y1 * y1) / (2.0 * z0);
    let b = (y1 - y0) / z0;

    let disc = -(a + b * y1) * (a + b * y1) + rf * (b * b * rf + rf);
    if disc < 0.0 {
        return Err(KinError::Unreachable);
    }

    // Outer intersection point.
    let yj = (y1 - a * b - disc.sqrt()) / (b * b + 1.0);
    let zj = a + b * yj;

    let mut theta = (-zj / (y1 - yj)).atan().to_degrees();
    if yj > y1 {
        theta += 180.0;
    }
    Ok(theta)
}
