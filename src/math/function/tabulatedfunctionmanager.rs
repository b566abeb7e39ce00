use std::rc::Rc;

use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::math::function::anytabulatedfunction::AnyTabulatedFunction;
use crate::math::function::tabulatedfunction::{
    validate_domain,
    StorageType
};
use crate::math::function::tabulatedfunctionerror::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    Count(usize),
    Values(Vec<f64>)
}

impl Samples {
    pub fn points_count(&self) -> usize {
        match self {
            Samples::Count(count) => *count,
            Samples::Values(values) => values.len()
        }
    }
}

/// A validated recipe for a tabulated function; every call to
/// [`generate`](TabulatedFunctionGenerator::generate) builds a fresh,
/// independent function.
#[derive(Clone, Debug, PartialEq)]
pub struct TabulatedFunctionGenerator {
    storage_type: StorageType,
    left_x: f64,
    right_x: f64,
    samples: Samples
}

impl TabulatedFunctionGenerator {
    pub fn new(storage_type: StorageType, left_x: f64, right_x: f64, samples: Samples) -> Result<TabulatedFunctionGenerator> {
        validate_domain(left_x, right_x, samples.points_count())?;
        Ok(TabulatedFunctionGenerator { storage_type, left_x, right_x, samples })
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    pub fn left_x(&self) -> f64 {
        self.left_x
    }

    pub fn right_x(&self) -> f64 {
        self.right_x
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn generate(&self) -> Result<AnyTabulatedFunction> {
        match &self.samples {
            Samples::Count(count) => {
                AnyTabulatedFunction::new(self.storage_type, self.left_x, self.right_x, *count)
            },
            Samples::Values(values) => {
                AnyTabulatedFunction::with_values(self.storage_type, self.left_x, self.right_x, values)
            }
        }
    }
}


#[derive(Deserialize)]
struct TabulatedFunctionJsonProp {
    storage: StorageType,
    left_x: f64,
    right_x: f64,
    points_count: Option<usize>,
    values: Option<Vec<f64>>
}


fn get_tabulated_function_generator_from_json(name: &str, json_value: serde_json::Value) -> std::result::Result<Rc<TabulatedFunctionGenerator>, ManagerError> {
    let json_prop: TabulatedFunctionJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let samples = match (json_prop.points_count, json_prop.values) {
        (Some(count), None) => Samples::Count(count),
        (None, Some(values)) => Samples::Values(values),
        (None, None) => return Err(ManagerError::json_missing_field("values")),
        (Some(count), Some(_)) => {
            return Err(ManagerError::json_invalid_value(
                serde::de::Unexpected::Unsigned(count as u64),
                &"either points_count or values, not both"
            ));
        }
    };
    TabulatedFunctionGenerator::new(json_prop.storage, json_prop.left_x, json_prop.right_x, samples)
        .map(Rc::new)
        .map_err(|source| ManagerError::TabulatedFunctionError { name: name.to_owned(), source })
}


pub struct TabulatedFunctionManager;


impl TabulatedFunctionManager {
    pub fn new() -> Manager<Rc<TabulatedFunctionGenerator>> {
        Manager::new(get_tabulated_function_generator_from_json)
    }
}
