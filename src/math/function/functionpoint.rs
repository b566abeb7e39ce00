use serde::{
    Deserialize,
    Serialize
};

/// One (x, y) sample of a tabulated function.
///
/// `FunctionPoint` is `Copy`: every accessor of a tabulated function hands out
/// its own copy and every mutator stores its own copy, so a point held by the
/// caller never aliases the function's storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionPoint {
    x: f64,
    y: f64
}

impl FunctionPoint {
    pub fn new(x: f64, y: f64) -> FunctionPoint {
        FunctionPoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn slope(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}
