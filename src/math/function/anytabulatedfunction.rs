use crate::math::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::math::function::functionpoint::FunctionPoint;
use crate::math::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::math::function::tabulatedfunction::{
    StorageType,
    TabulatedFunction
};
use crate::math::function::tabulatedfunctionerror::Result;

/// The storage is chosen once, at construction; both variants answer the same
/// [`TabulatedFunction`] contract.
#[derive(Clone, Debug)]
pub enum AnyTabulatedFunction {
    Array(ArrayTabulatedFunction),
    LinkedList(LinkedListTabulatedFunction)
}

impl AnyTabulatedFunction {
    pub fn new(
        storage_type: StorageType,
        left_x: f64,
        right_x: f64,
        points_count: usize
    ) -> Result<AnyTabulatedFunction> {
        match storage_type {
            StorageType::Array => {
                ArrayTabulatedFunction::new(left_x, right_x, points_count).map(AnyTabulatedFunction::Array)
            },
            StorageType::LinkedList => {
                LinkedListTabulatedFunction::new(left_x, right_x, points_count).map(AnyTabulatedFunction::LinkedList)
            }
        }
    }

    pub fn with_values(
        storage_type: StorageType,
        left_x: f64,
        right_x: f64,
        values: &[f64]
    ) -> Result<AnyTabulatedFunction> {
        match storage_type {
            StorageType::Array => {
                ArrayTabulatedFunction::with_values(left_x, right_x, values).map(AnyTabulatedFunction::Array)
            },
            StorageType::LinkedList => {
                LinkedListTabulatedFunction::with_values(left_x, right_x, values).map(AnyTabulatedFunction::LinkedList)
            }
        }
    }

    fn inner(&self) -> &dyn TabulatedFunction {
        match self {
            AnyTabulatedFunction::Array(function) => function,
            AnyTabulatedFunction::LinkedList(function) => function
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TabulatedFunction {
        match self {
            AnyTabulatedFunction::Array(function) => function,
            AnyTabulatedFunction::LinkedList(function) => function
        }
    }
}

impl From<ArrayTabulatedFunction> for AnyTabulatedFunction {
    fn from(function: ArrayTabulatedFunction) -> Self {
        AnyTabulatedFunction::Array(function)
    }
}

impl From<LinkedListTabulatedFunction> for AnyTabulatedFunction {
    fn from(function: LinkedListTabulatedFunction) -> Self {
        AnyTabulatedFunction::LinkedList(function)
    }
}

impl TabulatedFunction for AnyTabulatedFunction {
    fn storage_type(&self) -> StorageType {
        self.inner().storage_type()
    }

    fn left_border(&self) -> f64 {
        self.inner().left_border()
    }

    fn right_border(&self) -> f64 {
        self.inner().right_border()
    }

    fn points_count(&self) -> usize {
        self.inner().points_count()
    }

    fn value_at(&self, x: f64) -> f64 {
        self.inner().value_at(x)
    }

    fn point(&self, index: usize) -> Result<FunctionPoint> {
        self.inner().point(index)
    }

    fn point_x(&self, index: usize) -> Result<f64> {
        self.inner().point_x(index)
    }

    fn point_y(&self, index: usize) -> Result<f64> {
        self.inner().point_y(index)
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<()> {
        self.inner_mut().set_point(index, point)
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<()> {
        self.inner_mut().set_point_x(index, x)
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<()> {
        self.inner_mut().set_point_y(index, y)
    }

    fn delete_point(&mut self, index: usize) -> Result<()> {
        self.inner_mut().delete_point(index)
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<()> {
        self.inner_mut().add_point(point)
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.inner().points()
    }
}
