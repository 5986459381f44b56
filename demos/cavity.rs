//! Writing the lid-driven cavity case to disk.
//!
//! Run with: cargo run --example cavity [destination]

use serde_foam::{Case, CaseOptions};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/cavity.yaml");
    let dest = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("serde_foam-cavity"));

    let mut case = Case::from_path(&source)?;
    println!("application: {}", case.application()?);
    println!("fields:      {}", case.fields().join(", "));
    println!("time range:  {:?} .. {:?}\n", case.start_time(), case.end_time());

    case.save(&dest, &CaseOptions::default())?;
    println!("Saved to {}:", dest.display());
    for (keys, _) in case.extract_files() {
        println!("  {}", keys.join("/"));
    }

    println!("\nsystem/controlDict:");
    println!("{}", std::fs::read_to_string(dest.join("system/controlDict"))?);
    Ok(())
}
