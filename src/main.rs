use std::env;

use tracing::warn;
use tracing_subscriber::{
    EnvFilter,
    FmtSubscriber
};

use tabulated::configuration::Configuration;
use tabulated::manager::manager::IManager;
use tabulated::math::function::anytabulatedfunction::AnyTabulatedFunction;
use tabulated::math::function::functionpoint::FunctionPoint;
use tabulated::math::function::tabulatedfunction::{
    StorageType,
    TabulatedFunction
};
use tabulated::math::function::tabulatedfunctionerror::TabulatedFunctionError;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn report<T>(label: &str, result: Result<T, TabulatedFunctionError>) {
    match result {
        Ok(_) => println!("{label}: no error raised"),
        Err(error) => println!("{label} ({:?}): {error}", error.kind())
    }
}

fn exercise_errors(function: &mut AnyTabulatedFunction, name: &str) {
    println!("\n--- error handling: {name} ---");

    report("constructor", AnyTabulatedFunction::new(function.storage_type(), 10.0, 0.0, 5));

    report(
        "delete_point",
        AnyTabulatedFunction::with_values(function.storage_type(), 0.0, 1.0, &[1.0, 2.0])
            .and_then(|mut short| short.delete_point(0))
    );

    report("point", function.point(100));

    report(
        "add_point",
        function
            .point_x(1)
            .and_then(|x| function.add_point(FunctionPoint::new(x, 50.0)))
    );

    report(
        "set_point_x",
        function
            .point_x(0)
            .and_then(|x| function.set_point_x(1, x - 1.0))
    );
}

fn exercise_first_point(mut function: AnyTabulatedFunction, name: &str) -> Result<(), TabulatedFunctionError> {
    println!("\n--- first point operations: {name} ---");

    let old_point = function.point(0)?;
    function.set_point(0, FunctionPoint::new(old_point.x(), old_point.y() + 100.0))?;
    println!("set_point(0): y = {}", function.point_y(0)?);

    let before = function.points_count();
    function.delete_point(0)?;
    println!("delete_point(0): {before} -> {}", function.points_count());
    println!("new first point: x = {}", function.point_x(0)?);

    let new_x = function.left_border() - 1.0;
    function.add_point(FunctionPoint::new(new_x, 999.0))?;
    println!("add_point(new first): x = {}", function.point_x(0)?);
    Ok(())
}

fn exercise_configuration(path: &str) {
    let config = Configuration::new();
    if let Err(error) = config.from_reader(path) {
        warn!(%path, %error, "configuration not loaded");
        return;
    }
    let manager = config.tabulated_function_manager();
    for name in manager.names() {
        let function = manager
            .get(&name)
            .map_err(|error| error.to_string())
            .and_then(|generator| generator.generate().map_err(|error| error.to_string()));
        match function {
            Ok(function) => {
                let mid = (function.left_border() + function.right_border()) / 2.0;
                println!(
                    "{name}: {:?}, {} points, f({mid}) = {}",
                    function.storage_type(),
                    function.points_count(),
                    function.value_at(mid)
                );
            },
            Err(error) => println!("{name}: {error}")
        }
    }
}

fn main() -> Result<(), TabulatedFunctionError> {
    setup_logging();

    let values = [10.0, 20.0, 30.0, 40.0, 50.0];
    let mut array_function = AnyTabulatedFunction::with_values(StorageType::Array, 0.0, 4.0, &values)?;
    let mut linked_function = AnyTabulatedFunction::with_values(StorageType::LinkedList, 0.0, 4.0, &values)?;

    println!("--- array storage ---");
    println!("f(1.5) = {}", array_function.value_at(1.5));

    println!("\n--- linked list storage ---");
    println!("points: {}", linked_function.points_count());
    println!("right border: {}", linked_function.right_border());
    println!("f(2.5) = {}", linked_function.value_at(2.5));

    exercise_errors(&mut array_function, "array");
    exercise_errors(&mut linked_function, "linked list");

    let four = [10.0, 20.0, 30.0, 40.0];
    for (storage_type, name) in [(StorageType::Array, "array"), (StorageType::LinkedList, "linked list")] {
        let function = AnyTabulatedFunction::with_values(storage_type, 0.0, 4.0, &four)?;
        if let Err(error) = exercise_first_point(function, name) {
            println!("{name}: {error}");
        }
    }

    if let Some(path) = env::args().nth(1) {
        exercise_configuration(&path);
    }
    Ok(())
}
