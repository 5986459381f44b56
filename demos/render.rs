//! Rendering dictionary entries from plain structs and YAML.
//!
//! Run with: cargo run --example render

use serde::Serialize;
use serde_foam::{from_yaml_str, to_lines, to_string};
use std::error::Error;

#[derive(Serialize)]
struct TransportProperties {
    #[serde(rename = "transportModel")]
    transport_model: String,
    nu: String,
}

#[derive(Serialize)]
struct Patch {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

#[derive(Serialize)]
struct BoundaryField {
    inlet: Patch,
    outlet: Patch,
}

fn main() -> Result<(), Box<dyn Error>> {
    let transport = TransportProperties {
        transport_model: "Newtonian".to_string(),
        nu: "[0 2 -1 0 0 0 0] 1e-05".to_string(),
    };
    println!("transportProperties:");
    println!("{}\n", to_string(&transport)?);

    let boundary = BoundaryField {
        inlet: Patch {
            kind: "fixedValue".to_string(),
            value: "uniform (10 0 0)".to_string(),
        },
        outlet: Patch {
            kind: "inletOutlet".to_string(),
            value: "$internalField".to_string(),
        },
    };
    println!("boundaryField:");
    for line in to_lines(&serde_foam::foam!({ "boundaryField": boundary }))? {
        println!("{}", line);
    }
    println!();

    let docs = from_yaml_str(
        r#"
divSchemes:
  default: none
  div(phi, U): bounded Gauss linearUpwind grad(U)
  div((nuEff*dev2(T(grad(U))))): Gauss linear
blocks:
  - hex (0 1 2 3 4 5 6 7) (20 20 1) simpleGrading (1 1 1)
boundary:
  - inlet:
    type: patch
    faces: ['(0 4 7 3)']
  - outlet:
    type: patch
    faces: ['(1 2 6 5)']
"#,
    )?;
    println!("From YAML:");
    for line in to_lines(&docs[0])? {
        println!("{}", line);
    }

    Ok(())
}
