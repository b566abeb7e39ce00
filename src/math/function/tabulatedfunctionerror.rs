use thiserror::Error;

/// The four failure categories a tabulated function can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid bounds or too few samples; nothing was constructed.
    Construction,
    /// Index outside `[0, size - 1]`.
    Index,
    /// A mutation would break the strictly ascending order of abscissas.
    Ordering,
    /// The structure is too small for the requested removal.
    State
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TabulatedFunctionError {
    #[error("left border {left_x} must be strictly less than right border {right_x}")]
    InvalidBounds { left_x: f64, right_x: f64 },

    #[error("at least 2 points are required, got {count}")]
    TooFewPoints { count: usize },

    #[error("index {index} is out of bounds [0, {}]", .size.saturating_sub(1))]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("abscissa {x} must be strictly greater than the previous abscissa {previous}")]
    NotAfterPrevious { x: f64, previous: f64 },

    #[error("abscissa {x} must be strictly less than the next abscissa {next}")]
    NotBeforeNext { x: f64, next: f64 },

    #[error("abscissa {x} is not a finite number")]
    NonFiniteAbscissa { x: f64 },

    #[error("a point with abscissa {x} already exists")]
    DuplicateAbscissa { x: f64 },

    #[error("cannot delete a point from a function of {size} points, at least 3 are required")]
    TooFewPointsToDelete { size: usize }
}

impl TabulatedFunctionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TabulatedFunctionError::InvalidBounds { .. }
            | TabulatedFunctionError::TooFewPoints { .. } => ErrorKind::Construction,
            TabulatedFunctionError::IndexOutOfBounds { .. } => ErrorKind::Index,
            TabulatedFunctionError::NotAfterPrevious { .. }
            | TabulatedFunctionError::NotBeforeNext { .. }
            | TabulatedFunctionError::NonFiniteAbscissa { .. }
            | TabulatedFunctionError::DuplicateAbscissa { .. } => ErrorKind::Ordering,
            TabulatedFunctionError::TooFewPointsToDelete { .. } => ErrorKind::State
        }
    }
}

pub type Result<T> = std::result::Result<T, TabulatedFunctionError>;
