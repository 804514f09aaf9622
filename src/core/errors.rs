use thiserror::Error;

/// Raised when a parameter file describes something that cannot be rendered.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("image resolution must be positive along both axes, got {0}x{1}")]
    EmptyResolution(u32, u32),
    #[error("plane limits must span a non-zero, finite interval: x = {x:?}, y = {y:?}")]
    DegenerateLimits { x: [f64; 2], y: [f64; 2] },
    #[error("symmetry order must be at least one")]
    ZeroSymmetryOrder,
    #[error("expected {expected} root colors, found {found}")]
    RootColorCount { expected: usize, found: usize },
    #[error("angle series must contain at least one frame")]
    EmptyAngleSeries,
    #[error("iteration limit must be at least two, got {0}")]
    IterationLimit(u32),
    #[error("critical distance must be finite and positive, got {0}")]
    CriticalDistance(f64),
    #[error("match tolerance must be finite and non-negative: relative = {relative}, absolute = {absolute}")]
    MatchTolerance { relative: f64, absolute: f64 },
}
