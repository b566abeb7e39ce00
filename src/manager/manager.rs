use std::cell::{
    Ref,
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;

/// Registry of named objects parsed from JSON definitions.
pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> Ref<'_, HashMap<String, V>>;

    fn map_mut(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// Accepts either one definition or an array of them.
    fn insert_obj_from_json_value(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }

    fn from_reader(&self, file_path: impl AsRef<Path>) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.insert_obj_from_json_value(json_value)
    }
}


pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(&str, serde_json::Value) -> Result<V, ManagerError>
}


impl<V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(&str, serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }
}

impl<V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> Ref<'_, HashMap<String, V>> {
        self.map_cell.borrow()
    }

    fn map_mut(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let v = (self.get_obj_from_json)(named_object.name(), json_value)?;
        debug!(name = named_object.name(), "definition registered");
        self.map_mut().insert(named_object.name().to_owned(), v);
        Ok(())
    }
}
