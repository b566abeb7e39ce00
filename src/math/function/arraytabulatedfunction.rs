use tracing::debug;

use crate::math::function::functionpoint::FunctionPoint;
use crate::math::function::tabulatedfunction::{
    brackets,
    check_abscissa,
    check_finite,
    check_index,
    interpolate,
    is_out_of_domain,
    validate_domain,
    StorageType,
    TabulatedFunction,
    EPSILON
};
use crate::math::function::tabulatedfunctionerror::{
    Result,
    TabulatedFunctionError
};

// ─────────────────────────────────────────────
// ArrayTabulatedFunction
// ─────────────────────────────────────────────
//
// 連續儲存：`points` 的長度即為容量，`size` 為實際點數。
// 刪除不縮減容量，插入時若仍有空位則就地右移，否則重新配置 size + 1。
// 取值 O(1)；插入、刪除 O(n)；value_at 為線性掃描。

#[derive(Clone, Debug)]
pub struct ArrayTabulatedFunction {
    points: Vec<FunctionPoint>,
    size: usize
}

impl ArrayTabulatedFunction {
    /// `points_count` evenly spaced samples over `[left_x, right_x]`, all with y = 0.
    pub fn new(left_x: f64, right_x: f64, points_count: usize) -> Result<ArrayTabulatedFunction> {
        let step = validate_domain(left_x, right_x, points_count)?;
        let points = (0..points_count)
            .map(|i| FunctionPoint::new(left_x + i as f64 * step, 0.0))
            .collect();
        Ok(Self::from_storage(points, points_count))
    }

    /// One evenly spaced sample per entry of `values`.
    pub fn with_values(left_x: f64, right_x: f64, values: &[f64]) -> Result<ArrayTabulatedFunction> {
        let step = validate_domain(left_x, right_x, values.len())?;
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &y)| FunctionPoint::new(left_x + i as f64 * step, y))
            .collect();
        Ok(Self::from_storage(points, values.len()))
    }

    fn from_storage(points: Vec<FunctionPoint>, size: usize) -> ArrayTabulatedFunction {
        let function = ArrayTabulatedFunction { points, size };
        debug!(
            size,
            left = function.left_border(),
            right = function.right_border(),
            "array tabulated function constructed"
        );
        function
    }

    /// Number of slots currently allocated, occupied or not.
    pub fn capacity(&self) -> usize {
        self.points.len()
    }

    fn samples(&self) -> &[FunctionPoint] {
        &self.points[..self.size]
    }

    fn check_neighbours(&self, index: usize, x: f64) -> Result<()> {
        let previous = index.checked_sub(1).map(|i| self.points[i].x());
        let next = if index + 1 < self.size {
            Some(self.points[index + 1].x())
        } else {
            None
        };
        check_abscissa(x, previous, next)
    }

    fn insertion_position(&self, x: f64) -> Result<usize> {
        check_finite(x)?;
        for (pos, pt) in self.samples().iter().enumerate() {
            if (pt.x() - x).abs() < EPSILON {
                return Err(TabulatedFunctionError::DuplicateAbscissa { x });
            }
            if pt.x() > x {
                return Ok(pos);
            }
        }
        Ok(self.size)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn storage_type(&self) -> StorageType {
        StorageType::Array
    }

    fn left_border(&self) -> f64 {
        self.points[0].x()
    }

    fn right_border(&self) -> f64 {
        self.points[self.size - 1].x()
    }

    fn points_count(&self) -> usize {
        self.size
    }

    fn value_at(&self, x: f64) -> f64 {
        if is_out_of_domain(x, self.left_border(), self.right_border()) {
            return f64::NAN;
        }
        self.samples()
            .windows(2)
            .find(|segment| brackets(&segment[0], &segment[1], x))
            .map_or(f64::NAN, |segment| interpolate(&segment[0], &segment[1], x))
    }

    fn point(&self, index: usize) -> Result<FunctionPoint> {
        check_index(index, self.size)?;
        Ok(self.points[index])
    }

    fn point_x(&self, index: usize) -> Result<f64> {
        check_index(index, self.size)?;
        Ok(self.points[index].x())
    }

    fn point_y(&self, index: usize) -> Result<f64> {
        check_index(index, self.size)?;
        Ok(self.points[index].y())
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<()> {
        check_index(index, self.size)?;
        self.check_neighbours(index, point.x())?;
        self.points[index] = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<()> {
        check_index(index, self.size)?;
        self.check_neighbours(index, x)?;
        self.points[index].set_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<()> {
        check_index(index, self.size)?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<()> {
        if self.size <= 2 {
            return Err(TabulatedFunctionError::TooFewPointsToDelete { size: self.size });
        }
        check_index(index, self.size)?;

        self.points.copy_within(index + 1..self.size, index);
        self.size -= 1;
        self.points[self.size] = FunctionPoint::default();
        debug!(index, size = self.size, "point deleted");
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<()> {
        let pos = self.insertion_position(point.x())?;

        if self.size == self.points.len() {
            let mut grown = Vec::with_capacity(self.size + 1);
            grown.extend_from_slice(&self.points[..pos]);
            grown.push(point);
            grown.extend_from_slice(&self.points[pos..self.size]);
            self.points = grown;
            debug!(capacity = self.points.len(), "storage reallocated");
        } else {
            self.points.copy_within(pos..self.size, pos + 1);
            self.points[pos] = point;
        }
        self.size += 1;
        debug!(pos, size = self.size, "point added");
        Ok(())
    }
}
