//! Kinematics engine for rotary delta (parallel) robot manipulators.
//!
//! Converts between the Cartesian position of the end effector and the three
//! shoulder angles, and derives the robot's physical operating envelope once
//! at construction time.
//!
//! # Architecture
//!
//! ```text
//! Geometry ──► forward / inverse (stateless) ──► envelope::calibrate ──► Engine
//! ```
//!
//! The [`forward`] and [`inverse`] modules are pure functions over a
//! [`Geometry`](deltakin_core::Geometry); they carry no state and can be
//! called from any thread. [`Engine`] wraps them with "last pose" bookkeeping
//! for incremental-motion consumers and owns the calibrated
//! [`Envelope`](deltakin_core::Envelope). One engine instance is not safe for
//! concurrent mutation; use one per thread or the stateless layer.

pub mod engine;
pub mod envelope;
pub mod forward;
pub mod inverse;

pub use engine::{Engine, EngineState};

const SQRT3: f64 = 1.732_050_807_568_877_2;
pub(crate) const SIN30: f64 = 0.5;
pub(crate) const TAN30: f64 = 1.0 / SQRT3;
pub(crate) const TAN60: f64 = SQRT3;
