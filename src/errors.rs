use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum GravityError {
    /// Indicates an invalid mass value (e.g., negative, zero, or non-finite mass).
    InvalidMass,
    /// Indicates an invalid time step (e.g., negative, zero, or non-finite dt).
    InvalidTimeStep,
    /// Indicates an invalid opening-angle threshold (negative or non-finite theta).
    InvalidTheta,
    /// Indicates an invalid softening length (negative or non-finite).
    InvalidSoftening,
    /// Indicates a leaf capacity of zero, which would make every subdivision loop forever.
    InvalidLeafCapacity,
    /// Indicates a spatial region with zero, negative, or non-finite extent.
    DegenerateRegion,
    /// Indicates that a body lies outside the region a tree was built over.
    BodyOutOfBounds,
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for GravityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GravityError::InvalidMass => write!(f, "Invalid mass value"),
            GravityError::InvalidTimeStep => write!(f, "Invalid time step"),
            GravityError::InvalidTheta => write!(f, "Invalid opening-angle threshold"),
            GravityError::InvalidSoftening => write!(f, "Invalid softening length"),
            GravityError::InvalidLeafCapacity => write!(f, "Leaf capacity must be at least one body"),
            GravityError::DegenerateRegion => write!(f, "Degenerate spatial region"),
            GravityError::BodyOutOfBounds => write!(f, "Body lies outside the tree's bounding region"),
            GravityError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for GravityError {}
