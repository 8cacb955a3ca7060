//! Error type for shape and mesh construction
//!
//! Every failure names the shape kind and the parameter that was rejected,
//! so a misconfigured scene reports exactly which value to fix.

/// Rejected geometric parameters
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{shape}: {parameter} must be at least {min}, got {value}")]
    TooFewSegments {
        shape: &'static str,
        parameter: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{shape}: {parameter} must be positive and finite, got {value}")]
    InvalidDimension {
        shape: &'static str,
        parameter: &'static str,
        value: f64,
    },

    #[error("{shape}: center must be finite, got ({x}, {y}, {z})")]
    NonFiniteCenter {
        shape: &'static str,
        x: f64,
        y: f64,
        z: f64,
    },
}

impl GeometryError {
    /// Name of the shape kind that failed validation
    pub fn shape(&self) -> &'static str {
        match self {
            GeometryError::TooFewSegments { shape, .. }
            | GeometryError::InvalidDimension { shape, .. }
            | GeometryError::NonFiniteCenter { shape, .. } => shape,
        }
    }
}

/// Result type alias for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
