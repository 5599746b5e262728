use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_span_tolerance() -> f64 {
    0.1
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Physical dimensions of a rotary delta robot. Immutable after construction.
///
/// All lengths share one unit (mm by convention). Construction does not
/// validate feasibility; an impossible geometry simply yields an envelope
/// the calibrator converges to (possibly degenerate). Callers that want an
/// up-front check run [`Geometry::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Vertical distance from the base plate to the floor. The tool cannot
    /// travel below `-base_to_floor`.
    pub base_to_floor: f64,

    /// Radius of the base plate (shoulder pivot circle).
    pub base_radius: f64,

    /// Length of the driven shoulder arm (pivot to elbow).
    pub shoulder_length: f64,

    /// Length of the passive forearm (elbow to effector joint).
    pub forearm_length: f64,

    /// Radius of the end-effector plate.
    pub effector_radius: f64,

    /// Motor steps per full shoulder revolution. Sets the angular increment
    /// used by the calibration sweep and the resolution estimate.
    pub steps_per_turn: f64,
}

impl Geometry {
    pub const fn new(
        base_to_floor: f64,
        base_radius: f64,
        shoulder_length: f64,
        forearm_length: f64,
        effector_radius: f64,
        steps_per_turn: f64,
    ) -> Self {
        Self {
            base_to_floor,
            base_radius,
            shoulder_length,
            forearm_length,
            effector_radius,
            steps_per_turn,
        }
    }

    /// Smallest representable angular step, in degrees.
    pub fn step_angle(&self) -> f64 {
        360.0 / self.steps_per_turn
    }

    /// Validate that every dimension is strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("base_to_floor", self.base_to_floor),
            ("base_radius", self.base_radius),
            ("shoulder_length", self.shoulder_length),
            ("forearm_length", self.forearm_length),
            ("effector_radius", self.effector_radius),
            ("steps_per_turn", self.steps_per_turn),
        ];
        for (field, value) in fields {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CalibrationConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for envelope calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Bisection terminates once the growth step drops below this length
    /// (default: 0.1 units).
    #[serde(default = "default_span_tolerance")]
    pub span_tolerance: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            span_tolerance: default_span_tolerance(),
        }
    }
}

impl CalibrationConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.span_tolerance <= 0.0 {
            return Err(ConfigError::InvalidSpanTolerance(self.span_tolerance));
        }
        Ok(())
    }
}
