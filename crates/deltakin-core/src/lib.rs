// deltakin-core: Types, errors, and configuration for rotary delta kinematics.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CalibrationConfig, Geometry};
pub use error::{ConfigError, KinError};
pub use types::{AxisLimit, Envelope, JointAngles3, Pose3};
