//! Loading named tabulated function definitions from JSON.

use std::io::Write;

use approx::assert_relative_eq;

use tabulated::configuration::Configuration;
use tabulated::manager::manager::IManager;
use tabulated::manager::managererror::ManagerError;
use tabulated::math::function::functionpoint::FunctionPoint;
use tabulated::math::function::tabulatedfunction::{
    StorageType,
    TabulatedFunction
};
use tabulated::math::function::tabulatedfunctionerror::ErrorKind;
use tabulated::math::function::tabulatedfunctionmanager::{
    Samples,
    TabulatedFunctionManager
};

const CONFIG: &str = r#"{
    "tabulated_function": [
        {
            "name": "ramp",
            "storage": "Array",
            "left_x": 0.0,
            "right_x": 4.0,
            "values": [10.0, 20.0, 30.0, 40.0, 50.0]
        },
        {
            "name": "flat",
            "storage": "LinkedList",
            "left_x": -1.0,
            "right_x": 1.0,
            "points_count": 3
        }
    ]
}"#;

#[test]
fn test_definitions_are_registered_by_name() {
    let config = Configuration::new();
    config.from_json_str(CONFIG).unwrap();

    let manager = config.tabulated_function_manager();
    assert_eq!(manager.names(), vec!["flat".to_owned(), "ramp".to_owned()]);

    let ramp = manager.get("ramp").unwrap();
    assert_eq!(ramp.storage_type(), StorageType::Array);
    assert_eq!(ramp.samples(), &Samples::Values(vec![10.0, 20.0, 30.0, 40.0, 50.0]));

    let f = ramp.generate().unwrap();
    assert_eq!(f.storage_type(), StorageType::Array);
    assert_relative_eq!(f.value_at(1.5), 25.0, epsilon = 1e-12);

    let flat = manager.get("flat").unwrap().generate().unwrap();
    assert_eq!(flat.storage_type(), StorageType::LinkedList);
    assert_eq!(
        flat.points(),
        vec![
            FunctionPoint::new(-1.0, 0.0),
            FunctionPoint::new(0.0, 0.0),
            FunctionPoint::new(1.0, 0.0)
        ]
    );
}

#[test]
fn test_generated_functions_are_independent() {
    let config = Configuration::new();
    config.from_json_str(CONFIG).unwrap();
    let generator = config.tabulated_function_manager().get("ramp").unwrap();

    let mut first = generator.generate().unwrap();
    first.add_point(FunctionPoint::new(5.0, 0.0)).unwrap();
    let second = generator.generate().unwrap();
    assert_eq!(first.points_count(), 6);
    assert_eq!(second.points_count(), 5);
}

#[test]
fn test_loading_while_a_manager_handle_is_held() {
    let config = Configuration::new();
    config.from_json_str(CONFIG).unwrap();
    let manager = config.tabulated_function_manager();
    let reader = config.tabulated_function_manager();

    config
        .from_json_str(r#"{"tabulated_function": [
            {"name": "late", "storage": "LinkedList", "left_x": 0.0, "right_x": 2.0, "values": [0.0, 2.0, 0.0]}
        ]}"#)
        .unwrap();

    assert!(manager.contains("late"));
    assert_eq!(reader.names().len(), 3);
    let late = manager.get("late").unwrap();
    assert_eq!(late.samples().points_count(), 3);
    assert_relative_eq!(late.generate().unwrap().value_at(1.5), 1.0);
}

#[test]
fn test_unknown_name() {
    let config = Configuration::new();
    config.from_json_str(CONFIG).unwrap();
    let err = config.tabulated_function_manager().get("missing").unwrap_err();
    assert!(matches!(err, ManagerError::NameNotFoundError(ref name) if name == "missing"));
    assert_eq!(err.to_string(), "key 'missing' not found");
}

#[test]
fn test_invalid_domain_is_rejected_on_load() {
    let config = Configuration::new();
    let err = config
        .from_json_str(r#"{"tabulated_function": [
            {"name": "bad", "storage": "Array", "left_x": 1.0, "right_x": 0.0, "points_count": 3}
        ]}"#)
        .unwrap_err();
    match err {
        ManagerError::TabulatedFunctionError { name, source } => {
            assert_eq!(name, "bad");
            assert_eq!(source.kind(), ErrorKind::Construction);
        },
        other => panic!("unexpected error: {other}")
    }
    assert!(!config.tabulated_function_manager().contains("bad"));
}

#[test]
fn test_samples_must_be_given_exactly_once() {
    let manager = TabulatedFunctionManager::new();
    let neither = serde_json::json!({
        "name": "neither", "storage": "Array", "left_x": 0.0, "right_x": 1.0
    });
    assert!(matches!(
        manager.insert_obj_from_json(neither),
        Err(ManagerError::JsonParseError(_))
    ));

    let both = serde_json::json!({
        "name": "both", "storage": "Array", "left_x": 0.0, "right_x": 1.0,
        "points_count": 2, "values": [1.0, 2.0]
    });
    assert!(matches!(
        manager.insert_obj_from_json(both),
        Err(ManagerError::JsonParseError(_))
    ));
    assert!(manager.names().is_empty());
}

#[test]
fn test_unknown_storage_is_a_parse_error() {
    let config = Configuration::new();
    let err = config
        .from_json_str(r#"{"tabulated_function": [
            {"name": "x", "storage": "Tree", "left_x": 0.0, "right_x": 1.0, "points_count": 3}
        ]}"#)
        .unwrap_err();
    assert!(matches!(err, ManagerError::JsonParseError(_)));
}

#[test]
fn test_from_reader() {
    let path = std::env::temp_dir().join(format!("tabulated_config_{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
    }

    let config = Configuration::new();
    config.from_reader(&path).unwrap();
    assert!(config.tabulated_function_manager().contains("ramp"));
    std::fs::remove_file(&path).unwrap();

    let err = config.from_reader(&path).unwrap_err();
    assert!(matches!(err, ManagerError::IOError(_)));
}

#[test]
fn test_manager_accepts_a_bare_array() {
    let manager = TabulatedFunctionManager::new();
    let defs = serde_json::json!([
        {"name": "a", "storage": "Array", "left_x": 0.0, "right_x": 1.0, "points_count": 2},
        {"name": "b", "storage": "LinkedList", "left_x": 0.0, "right_x": 1.0, "values": [3.0, 4.0]}
    ]);
    manager.insert_obj_from_json_value(defs).unwrap();
    let b = manager.get("b").unwrap().generate().unwrap();
    assert_relative_eq!(b.value_at(0.5), 3.5);
}

#[test]
fn test_points_round_trip_through_json() {
    let config = Configuration::new();
    config.from_json_str(CONFIG).unwrap();
    let f = config.tabulated_function_manager().get("ramp").unwrap().generate().unwrap();

    let json = serde_json::to_string(&f.points()).unwrap();
    let points: Vec<FunctionPoint> = serde_json::from_str(&json).unwrap();
    assert_eq!(points, f.points());
}
