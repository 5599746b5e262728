//! Forward kinematics: shoulder angles to end-effector position.
//!
//! For each of the three arms (0°, 120°, 240° around the vertical axis) the
//! shoulder angle fixes the elbow point in space. The end effector then lies
//! at forearm-length distance from all three elbows, so the solve reduces to
//! intersecting three spheres: the sphere equations give linear relations
//! `x = (a1*z + b1)/dnm` and `y = (a2*z + b2)/dnm`, and substituting back
//! yields a quadratic in z. The lower root is taken, consistent with the
//! effector hanging below the shoulders.

use deltakin_core::{Geometry, JointAngles3, KinError, Pose3};

use crate::{SIN30, TAN30, TAN60};

/// Solve forward kinematics for the given shoulder angles (degrees).
///
/// # Errors
///
/// Returns [`KinError::Unreachable`] when the quadratic discriminant is
/// negative: no Cartesian pose corresponds to this angle combination.
pub fn solve(geom: &Geometry, angles: JointAngles3) -> Result<Pose3, KinError> {
    let rf = geom.shoulder_length;
    let re = geom.forearm_length;
    // Horizontal offset between the base and effector joint circles.
    let t = (geom.base_radius - geom.effector_radius) * TAN30 / 2.0;

    let theta_a = angles.a.to_radians();
    let theta_b = angles.b.to_radians();
    let theta_c = angles.c.to_radians();

    // Elbow positions. Arm 1 lies in the YZ plane; arms 2 and 3 are its
    // ±120° rotations, expanded here into their planar components.
    let y1 = -(t + rf * theta_a.cos());
    let z1 = -rf * theta_a.sin();

    let y2 = (t + rf * theta_b.cos()) * SIN30;
    let x2 = y2 * TAN60;
    let z2 = -rf * theta_b.sin();

    let y3 = (t + rf * theta_c.cos()) * SIN30;
    let x3 = -y3 * TAN60;
    let z3 = -rf * theta_c.sin();

    let dnm = (y2 - y1) * x3 - (y3 - y1) * x2;

    let w1 = y1 * y1 + z1 * z1;
    let w2 = x2 * x2 + y2 * y2 + z2 * z2;
    let w3 = x3 * x3 + y3 * y3 + z3 * z3;

    // x = (a1*z + b1)/dnm
    let a1 = (z2 - z1) * (y3 - y1) - (z3 - z1) * (y2 - y1);
    let b1 = -((w2 - w1) * (y3 - y1) - (w3 - w1) * (y2 - y1)) / 2.0;

    // y = (a2*z + b2)/dnm
    let a2 = -(z2 - z1) * x3 + (z3 - z1) * x2;
    let b2 = ((w2 - w1) * x3 - (w3 - w1) * x2) / 2.0;

    // aq*z^2 + bq*z + cq = 0
    let aq = a1 * a1 + a2 * a2 + dnm * dnm;
    let bq = 2.0 * (a1 * b1 + a2 * (b2 - y1 * dnm) - z1 * dnm * dnm);
    let cq = (b2 - y1 * dnm) * (b2 - y1 * dnm) + b1 * b1 + dnm * dnm * (z1 * z1 - re * re);

    let disc = bq * bq - 4.0 * aq * cq;
    if disc < 0.0 {
        return Err(KinError::Unreachable);
    }

    let z = -0.5 * (bq + disc.sqrt()) / aq;
    let x = (a1 * z + b1) / dnm;
    let y = (a2 * z + b2) / dnm;

    Ok(Pose3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_geometry() -> Geometry {
        Geometry::new(500.0, 63.0, 130.0, 400.0, 35.0, 3200.0)
    }

    #[test]
    fn symmetric_angles_stay_on_axis() {
        let geom = demo_geometry();
        for t in [-20.0, 0.0, 15.0, 45.0, 90.0] {
            let pose = solve(&geom, JointAngles3::splat(t)).unwrap();
            assert_relative_eq!(pose.x, 0.0, epsilon = 1e-9);
            assert_relative_eq!(pose.y, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn home_pose_hangs_below_shoulders() {
        let geom = demo_geometry();
        let pose = solve(&geom, JointAngles3::ZERO).unwrap();
        // Elbow circle radius 138.083 mm, forearm 400 mm:
        // z = -sqrt(400^2 - 138.083^2)
        let radius = (geom.base_radius - geom.effector_radius) * TAN30 / 2.0 + geom.shoulder_length;
        let expected = -(geom.forearm_length.powi(2) - radius.powi(2)).sqrt();
        assert_relative_eq!(pose.z, expected, epsilon = 1e-9);
    }

    #[test]
    fn unequal_angles_leave_the_axis() {
        let geom = demo_geometry();
        let pose = solve(&geom, JointAngles3::new(5.0, 10.0, 15.0)).unwrap();
        assert!(pose.z < -300.0, "z = {}", pose.z);
        assert!(pose.x.abs() > 1e-3);
        assert!(pose.y.abs() > 1e-3);
    }

    #[test]
    fn short_forearm_is_unreachable() {
        // Elbow circle radius 138.083 mm exceeds a 100 mm forearm: the
        // spheres cannot meet on the axis.
        let geom = Geometry::new(500.0, 63.0, 130.0, 100.0, 35.0, 3200.0);
        assert_eq!(solve(&geom, JointAngles3::ZERO), Err(KinError::Unreachable));
    }

    #[test]
    fn deterministic() {
        let geom = demo_geometry();
        let angles = JointAngles3::new(12.5, -7.25, 33.0);
        let p1 = solve(&geom, angles).unwrap();
        let p2 = solve(&geom, angles).unwrap();
        assert_eq!(p1, p2);
    }
}
