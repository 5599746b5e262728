//! Stateful engine: solvers plus "last pose" bookkeeping and the calibrated
//! envelope.
//!
//! Solve calls compute into local temporaries and commit to state only on
//! success; a failed solve leaves the engine exactly as it was. When
//! increment mode is enabled (the default), every successful solve snapshots
//! the previous pose/angles and records the per-axis delta, for consumers
//! that drive steppers by relative motion.

use deltakin_core::{CalibrationConfig, Envelope, Geometry, JointAngles3, KinError, Pose3};

use crate::{envelope, forward, inverse};

/// Mutable solver state. Updated only by [`Engine`] solve calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    /// Most recently solved Cartesian position.
    pub pose: Pose3,
    /// Most recently solved shoulder angles.
    pub angles: JointAngles3,
    /// Position before the latest successful solve.
    pub last_pose: Pose3,
    /// Angles before the latest successful solve.
    pub last_angles: JointAngles3,
    /// `pose - last_pose` at the latest successful solve.
    pub delta_pose: Pose3,
    /// `angles - last_angles` at the latest successful solve.
    pub delta_angles: JointAngles3,
    /// Whether last/delta bookkeeping is active.
    pub increment_mode: bool,
}

/// Rotary delta kinematics engine.
///
/// Construction calibrates the envelope synchronously and leaves the engine
/// at the home pose with zeroed deltas. Not safe for concurrent mutation;
/// use one engine per thread, or the stateless [`forward`]/[`inverse`]
/// modules.
#[derive(Debug, Clone)]
pub struct Engine {
    geometry: Geometry,
    envelope: Envelope,
    state: EngineState,
}

impl Engine {
    /// Build an engine with the default calibration tolerance.
    pub fn new(geometry: Geometry) -> Self {
        Self::with_config(geometry, CalibrationConfig::default())
    }

    /// Build an engine with an explicit calibration configuration.
    pub fn with_config(geometry: Geometry, config: CalibrationConfig) -> Self {
        let envelope = envelope::calibrate(&geometry, &config);
        // Seed the tracker at the (unrounded) home pose so the first delta
        // a consumer sees is relative to home.
        let home = forward::solve(&geometry, JointAngles3::ZERO).unwrap_or(Pose3::ZERO);
        let state = EngineState {
            pose: home,
            angles: JointAngles3::ZERO,
            last_pose: home,
            last_angles: JointAngles3::ZERO,
            delta_pose: Pose3::ZERO,
            delta_angles: JointAngles3::ZERO,
            increment_mode: true,
        };
        Self {
            geometry,
            envelope,
            state,
        }
    }

    /// Solve forward kinematics and commit the result.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Unreachable`] without touching state.
    pub fn forward(&mut self, angles: JointAngles3) -> Result<Pose3, KinError> {
        let pose = forward::solve(&self.geometry, angles)?;
        self.commit(pose, angles);
        Ok(pose)
    }

    /// Re-solve forward kinematics from the currently stored angles.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Unreachable`] without touching state.
    pub fn forward_current(&mut self) -> Result<Pose3, KinError> {
        self.forward(self.state.angles)
    }

    /// Solve inverse kinematics and commit the result.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Unreachable`] without touching state.
    pub fn inverse(&mut self, pose: Pose3) -> Result<JointAngles3, KinError> {
        let angles = inverse::solve(&self.geometry, pose)?;
        self.commit(pose, angles);
        Ok(angles)
    }

    /// Re-solve inverse kinematics from the currently stored position.
    ///
    /// # Errors
    ///
    /// Returns [`KinError::Unreachable`] without touching state.
    pub fn inverse_current(&mut self) -> Result<JointAngles3, KinError> {
        self.inverse(self.state.pose)
    }

    /// Enable or disable last/delta bookkeeping. Returns the new mode.
    pub fn set_increment_mode(&mut self, mode: bool) -> bool {
        self.state.increment_mode = mode;
        self.state.increment_mode
    }

    fn commit(&mut self, pose: Pose3, angles: JointAngles3) {
        if self.state.increment_mode {
            self.state.last_pose = self.state.pose;
            self.state.last_angles = self.state.angles;
            self.state.delta_pose = pose - self.state.last_pose;
            self.state.delta_angles = angles - self.state.last_angles;
        }
        self.state.pose = pose;
        self.state.angles = angles;
    }

    // ---- Read-only accessors ----

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn pose(&self) -> Pose3 {
        self.state.pose
    }

    pub fn angles(&self) -> JointAngles3 {
        self.state.angles
    }

    pub fn last_pose(&self) -> Pose3 {
        self.state.last_pose
    }

    pub fn last_angles(&self) -> JointAngles3 {
        self.state.last_angles
    }

    pub fn delta_pose(&self) -> Pose3 {
        self.state.delta_pose
    }

    pub fn delta_angles(&self) -> JointAngles3 {
        self.state.delta_angles
    }

    pub fn increment_mode(&self) -> bool {
        self.state.increment_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_engine() -> Engine {
        Engine::new(Geometry::new(500.0, 63.0, 130.0, 400.0, 35.0, 3200.0))
    }

    #[test]
    fn construction_ends_at_home() {
        let engine = demo_engine();
        assert_eq!(engine.angles(), JointAngles3::ZERO);
        assert_relative_eq!(engine.pose().z, engine.envelope().home.z, epsilon = 1e-3);
        assert_eq!(engine.pose(), engine.last_pose());
        assert_eq!(engine.delta_pose(), Pose3::ZERO);
        assert_eq!(engine.delta_angles(), JointAngles3::ZERO);
        assert!(engine.increment_mode());
    }

    #[test]
    fn forward_commits_pose_and_angles() {
        let mut engine = demo_engine();
        let angles = JointAngles3::new(5.0, 10.0, 15.0);
        let pose = engine.forward(angles).unwrap();
        assert_eq!(engine.pose(), pose);
        assert_eq!(engine.angles(), angles);
    }

    #[test]
    fn failed_solve_leaves_state_untouched() {
        let mut engine = demo_engine();
        engine.forward(JointAngles3::splat(10.0)).unwrap();
        let before = *engine.state();

        assert_eq!(
            engine.inverse(Pose3::on_axis(-1100.0)),
            Err(KinError::Unreachable)
        );
        assert_eq!(*engine.state(), before);
    }

    #[test]
    fn increment_mode_tracks_last_and_delta() {
        let mut engine = demo_engine();
        let home = engine.pose();

        let pose = engine.forward(JointAngles3::splat(20.0)).unwrap();
        assert_eq!(engine.last_pose(), home);
        assert_eq!(engine.last_angles(), JointAngles3::ZERO);
        assert_eq!(engine.delta_pose(), pose - home);
        assert_eq!(engine.delta_angles(), JointAngles3::splat(20.0));
    }

    #[test]
    fn disabled_increment_mode_freezes_last_and_delta() {
        let mut engine = demo_engine();
        engine.forward(JointAngles3::splat(10.0)).unwrap();
        let last = engine.last_pose();
        let delta = engine.delta_pose();

        assert!(!engine.set_increment_mode(false));
        engine.forward(JointAngles3::splat(30.0)).unwrap();
        assert_eq!(engine.last_pose(), last);
        assert_eq!(engine.delta_pose(), delta);
        assert_eq!(engine.angles(), JointAngles3::splat(30.0));
    }

    #[test]
    fn forward_current_resolves_stored_angles() {
        let mut engine = demo_engine();
        let pose = engine.forward(JointAngles3::new(5.0, 10.0, 15.0)).unwrap();
        let again = engine.forward_current().unwrap();
        assert_eq!(pose, again);
        assert_eq!(engine.delta_pose(), Pose3::ZERO);
    }

    #[test]
    fn inverse_current_resolves_stored_pose() {
        let mut engine = demo_engine();
        let angles = engine.inverse(Pose3::new(30.0, 30.0, -300.0)).unwrap();
        let again = engine.inverse_current().unwrap();
        assert_eq!(angles, again);
    }

    #[test]
    fn identical_engines_agree_bit_for_bit() {
        let mut e1 = demo_engine();
        let mut e2 = demo_engine();
        assert_eq!(e1.envelope(), e2.envelope());

        let angles = JointAngles3::new(12.0, -3.5, 41.25);
        assert_eq!(e1.forward(angles), e2.forward(angles));
        assert_eq!(*e1.state(), *e2.state());
    }
}
