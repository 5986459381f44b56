//! Using the foam! macro for dynamic dictionary construction.
//!
//! Run with: cargo run --example macro

use serde_foam::{foam, format_value, to_string, FoamValue};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Scalars:");
    println!("  bool:   {}", format_value(&foam!(true))?);
    println!("  int:    {}", format_value(&foam!(20))?);
    println!("  float:  {}", format_value(&foam!(0.005))?);
    println!("  string: {}\n", format_value(&foam!("uniform (0 0 0)"))?);

    println!("Lists:");
    println!("  {}", format_value(&foam!(["(0 0 0)", "(1 0 0)", "(1 1 0)"]))?);
    println!("  {}\n", format_value(&foam!([]))?);

    let control = foam!({
        "application": "simpleFoam",
        "startFrom": "latestTime",
        "endTime": 2000,
        "deltaT": 1,
        "writeControl": "timeStep",
        "writeInterval": 100,
        "runTimeModifiable": true
    });
    println!("controlDict:");
    println!("{}\n", to_string(&control)?);

    let patches: Vec<FoamValue> = ["inlet", "outlet"]
        .iter()
        .map(|name| {
            let mut patch = foam!({ "type": "patch" });
            if let FoamValue::Object(map) = &mut patch {
                map.insert(name.to_string(), FoamValue::Null);
            }
            patch
        })
        .collect();
    let block_mesh = foam!({
        "convertToMeters": 1,
        "boundary": patches
    });
    println!("Dynamic construction:");
    println!("{}\n", to_string(&block_mesh)?);

    if let Some(end) = control.pointer(&["endTime"]).and_then(FoamValue::as_f64) {
        println!("Accessing values:");
        println!("  endTime: {}", end);
    }

    Ok(())
}
