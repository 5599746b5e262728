//! Envelope calibration: discover the reachable bounds of a geometry.
//!
//! Runs once per engine, driving the forward and inverse solvers:
//!
//! 1. **Vertical sweep** — one full symmetric shoulder revolution in
//!    steps-per-turn increments, tracking the z extent of successful solves.
//! 2. **Cube bisection** — grow a cube centered on the vertical midpoint of
//!    the sweep, probing its 8 corners with the inverse solver; any
//!    unreachable corner halves the growth step. The terminal half-side
//!    becomes the symmetric x/y bound, and the corner solutions accumulate
//!    the joint-angle bounds.
//! 3. **Home & resolution** — the forward solution at (0,0,0) and the
//!    Cartesian displacement of a single motor step away from it.
//!
//! Calibration never fails: internal unreachable results only steer the
//! search, and degenerate geometry simply converges to a degenerate
//! envelope.

use nalgebra::Vector3;
use tracing::{debug, trace};

use deltakin_core::{AxisLimit, CalibrationConfig, Envelope, Geometry, JointAngles3, KinError, Pose3};

use crate::{forward, inverse};

/// Calibrate the operating envelope for a geometry.
///
/// Deterministic: identical inputs always produce an identical envelope.
/// Lengths are rounded to 3 decimals and angles to 2 before storage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calibrate(geom: &Geometry, config: &CalibrationConfig) -> Envelope {
    let step = geom.step_angle();
    let reach = geom.base_to_floor
        + geom.base_radius
        + geom.shoulder_length
        + geom.forearm_length
        + geom.effector_radius;

    // Phase 1: symmetric sweep over one full revolution.
    let mut z_min = reach;
    let mut z_max = -reach;
    let steps = geom.steps_per_turn.max(1.0) as u32;
    for i in 0..steps {
        let t = f64::from(i) * step;
        if let Ok(pose) = forward::solve(geom, JointAngles3::splat(t)) {
            z_min = z_min.min(pose.z);
            z_max = z_max.max(pose.z);
        }
    }
    // The tool cannot travel below the floor.
    z_min = z_min.max(-geom.base_to_floor);
    z_max = z_max.max(-geom.base_to_floor);
    debug!(z_min, z_max, "vertical sweep complete");

    // Phase 2: grow a cube from the vertical midpoint, bisecting on failure.
    let z_middle = (z_max + z_min) * 0.5;
    let full_span = z_max - z_middle;
    let mut dist = full_span * 0.5;
    let mut sum = 0.0;

    let mut min_angles = JointAngles3::splat(360.0);
    let mut max_angles = JointAngles3::splat(-360.0);

    loop {
        sum += dist;

        let probes: [Result<JointAngles3, KinError>; 8] =
            cube_corners(sum, z_middle).map(|corner| inverse::solve(geom, corner));

        if probes.iter().any(Result::is_err) {
            sum -= dist;
            dist *= 0.5;
        } else {
            for angles in probes.into_iter().flatten() {
                min_angles.a = min_angles.a.min(angles.a);
                max_angles.a = max_angles.a.max(angles.a);
                min_angles.b = min_angles.b.min(angles.b);
                max_angles.b = max_angles.b.max(angles.b);
                min_angles.c = min_angles.c.min(angles.c);
                max_angles.c = max_angles.c.max(angles.c);
            }
        }
        trace!(sum, dist, "cube probe");

        if sum >= full_span || dist <= config.span_tolerance {
            break;
        }
    }
    debug!(half_side = sum, z_middle, "cube bisection converged");

    // Phase 3: home pose and resolution.
    let home = forward::solve(geom, JointAngles3::ZERO);
    let home_z = home.as_ref().map_or(0.0, |p| p.z);
    let resolution = home
        .and_then(|p0| {
            forward::solve(geom, JointAngles3::new(step, 0.0, 0.0))
                .map(|p1| (as_vector(p1) - as_vector(p0)).norm())
        })
        .unwrap_or(0.0);

    Envelope {
        x_limit: AxisLimit::symmetric(round_to(sum, 3)),
        y_limit: AxisLimit::symmetric(round_to(sum, 3)),
        z_limit: AxisLimit::new(round_to(z_middle - sum, 3), round_to(z_middle + sum, 3)),
        a_limit: AxisLimit::new(round_to(min_angles.a, 2), round_to(max_angles.a, 2)),
        b_limit: AxisLimit::new(round_to(min_angles.b, 2), round_to(max_angles.b, 2)),
        c_limit: AxisLimit::new(round_to(min_angles.c, 2), round_to(max_angles.c, 2)),
        center: Pose3::on_axis(round_to(z_middle, 3)),
        home: Pose3::on_axis(round_to(home_z, 3)),
        resolution: round_to(resolution, 3),
    }
}

/// The 8 corners of a cube of half-side `half` centered at (0, 0, `z_mid`).
fn cube_corners(half: f64, z_mid: f64) -> [Pose3; 8] {
    [
        Pose3::new(half, half, z_mid + half),
        Pose3::new(half, -half, z_mid + half),
        Pose3::new(-half, -half, z_mid + half),
        Pose3::new(-half, half, z_mid + half),
        Pose3::new(half, half, z_mid - half),
        Pose3::new(half, -half, z_mid - half),
        Pose3::new(-half, -half, z_mid - half),
        Pose3::new(-half, half, z_mid - half),
    ]
}

fn as_vector(pose: Pose3) -> Vector3<f64> {
    Vector3::new(pose.x, pose.y, pose.z)
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
