use serde::{
    Deserialize,
    Serialize
};

use crate::math::function::functionpoint::FunctionPoint;
use crate::math::function::tabulatedfunctionerror::{
    Result,
    TabulatedFunctionError
};

/// Two abscissas closer than this are treated as the same abscissa.
pub const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    Array,
    LinkedList
}

/// A function known only at a finite, strictly ascending set of samples and
/// evaluated in between by linear interpolation.
///
/// Implementations keep at least two points, with abscissas separated by more
/// than [`EPSILON`]. A failing operation leaves the function untouched.
pub trait TabulatedFunction {
    fn storage_type(&self) -> StorageType;

    fn left_border(&self) -> f64;

    fn right_border(&self) -> f64;

    fn points_count(&self) -> usize;

    /// `NaN` outside `[left_border, right_border]`.
    fn value_at(&self, x: f64) -> f64;

    fn point(&self, index: usize) -> Result<FunctionPoint>;

    fn point_x(&self, index: usize) -> Result<f64>;

    fn point_y(&self, index: usize) -> Result<f64>;

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<()>;

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<()>;

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<()>;

    /// Refused while the function holds 2 points or fewer.
    fn delete_point(&mut self, index: usize) -> Result<()>;

    /// Inserts at the sorted position; may extend the domain on either side.
    fn add_point(&mut self, point: FunctionPoint) -> Result<()>;

    fn points(&self) -> Vec<FunctionPoint> {
        (0..self.points_count())
            .filter_map(|i| self.point(i).ok())
            .collect()
    }
}

// ─────────────────────────────────────────────
// Helpers shared by both storages
// ─────────────────────────────────────────────

pub(crate) fn validate_domain(left_x: f64, right_x: f64, count: usize) -> Result<f64> {
    if !(left_x.is_finite() && right_x.is_finite() && left_x < right_x) {
        return Err(TabulatedFunctionError::InvalidBounds { left_x, right_x });
    }
    if count < 2 {
        return Err(TabulatedFunctionError::TooFewPoints { count });
    }
    Ok((right_x - left_x) / (count - 1) as f64)
}

pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(TabulatedFunctionError::IndexOutOfBounds { index, size })
    } else {
        Ok(())
    }
}

/// NaN and infinities have no place in the ascending order.
pub(crate) fn check_finite(x: f64) -> Result<()> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(TabulatedFunctionError::NonFiniteAbscissa { x })
    }
}

/// `x` has to clear each present neighbour by at least [`EPSILON`].
pub(crate) fn check_abscissa(x: f64, previous: Option<f64>, next: Option<f64>) -> Result<()> {
    check_finite(x)?;
    if let Some(previous) = previous {
        if x < previous + EPSILON {
            return Err(TabulatedFunctionError::NotAfterPrevious { x, previous });
        }
    }
    if let Some(next) = next {
        if x > next - EPSILON {
            return Err(TabulatedFunctionError::NotBeforeNext { x, next });
        }
    }
    Ok(())
}

pub(crate) fn is_out_of_domain(x: f64, left_x: f64, right_x: f64) -> bool {
    // NaN falls through both comparisons; treat it as outside as well.
    !(x >= left_x && x <= right_x)
}

pub(crate) fn brackets(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint, x: f64) -> bool {
    x >= lhs_pt.x() && x <= rhs_pt.x() + EPSILON
}

pub(crate) fn interpolate(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint, x: f64) -> f64 {
    if (rhs_pt.x() - lhs_pt.x()).abs() < EPSILON {
        return lhs_pt.y();
    }
    lhs_pt.y() + FunctionPoint::slope(lhs_pt, rhs_pt) * (x - lhs_pt.x())
}
