use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures of the plane fitting and projection operations. Operand type mismatches between
/// vectors are not represented here, they are rejected by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneError {
    /// A vector component could not be represented as a finite `f64`
    InvalidArgument(String),

    /// A plane was requested from a number of points other than the expected count
    InvalidSelectionCount { expected: usize, found: usize },

    /// The points defining a plane were collinear or coincident
    DegeneratePlane,

    /// A zero length vector was normalized
    DegenerateVector,

    /// A projection was requested before any plane was defined
    UndefinedPlane,
}

impl PlaneError {
    /// Returns true for the errors which are an expected outcome of a user action (a bad
    /// selection, or acting in the wrong order) rather than a fault in the calling code.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PlaneError::InvalidSelectionCount { .. }
                | PlaneError::DegeneratePlane
                | PlaneError::UndefinedPlane
        )
    }
}

impl Display for PlaneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaneError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PlaneError::InvalidSelectionCount { expected, found } => write!(
                f,
                "please select exactly {expected} vertices ({found} selected)"
            ),
            PlaneError::DegeneratePlane => write!(
                f,
                "the selected vertices are collinear or coincident and do not define a plane"
            ),
            PlaneError::DegenerateVector => write!(f, "zero length vector, did not normalize"),
            PlaneError::UndefinedPlane => write!(f, "please define the plane first"),
        }
    }
}

impl Error for PlaneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_kinds() {
        assert!(PlaneError::DegeneratePlane.is_user_facing());
        assert!(PlaneError::UndefinedPlane.is_user_facing());
        assert!(
            PlaneError::InvalidSelectionCount {
                expected: 3,
                found: 2
            }
            .is_user_facing()
        );
        assert!(!PlaneError::DegenerateVector.is_user_facing());
        assert!(!PlaneError::InvalidArgument("x".to_string()).is_user_facing());
    }

    #[test]
    fn selection_count_message() {
        let e = PlaneError::InvalidSelectionCount {
            expected: 3,
            found: 4,
        };
        assert_eq!(e.to_string(), "please select exactly 3 vertices (4 selected)");
    }
}
