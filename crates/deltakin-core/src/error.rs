use thiserror::Error;

/// Solve errors.
///
/// Copy + static message for cheap propagation in hot paths: the envelope
/// calibrator issues thousands of solves and only inspects Ok/Err.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KinError {
    /// The quadratic discriminant is negative: the requested angles or
    /// position has no corresponding real pose.
    #[error("pose unreachable: quadratic discriminant is negative")]
    Unreachable,
}

/// Geometry/configuration validation errors.
///
/// Engine construction never validates geometry (garbage in, garbage out);
/// callers that want a check run `Geometry::validate` explicitly.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} (must be > 0)")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Invalid span_tolerance: {0} (must be > 0)")]
    InvalidSpanTolerance(f64),
}
