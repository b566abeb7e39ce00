use std::cell::{
    Ref,
    RefCell
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use tracing::info;

use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::math::function::tabulatedfunctionmanager::{
    TabulatedFunctionGenerator,
    TabulatedFunctionManager
};


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    tabulated_function: Vec<serde_json::Value>
}

/// Named tabulated function definitions loaded from a JSON document of the form
/// `{ "tabulated_function": [ { "name": ..., "storage": ..., ... } ] }`.
pub struct Configuration {
    tabulated_function_manager_cell: RefCell<Manager<Rc<TabulatedFunctionGenerator>>>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            tabulated_function_manager_cell: RefCell::new(TabulatedFunctionManager::new())
        }
    }

    /// Registration only needs a shared borrow, so a handle kept from here does
    /// not block a later load.
    pub fn tabulated_function_manager(&self) -> Ref<'_, Manager<Rc<TabulatedFunctionGenerator>>> {
        self.tabulated_function_manager_cell.borrow()
    }

    pub fn from_reader(&self, file_path: impl AsRef<Path>) -> Result<(), ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.load(json_prop)?;
        info!(path = %file_path.as_ref().display(), "configuration loaded");
        Ok(())
    }

    pub fn from_json_str(&self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        let manager = self.tabulated_function_manager_cell.borrow();
        manager.insert_obj_from_json_vec(&json_prop.tabulated_function)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
