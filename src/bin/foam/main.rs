//! foam CLI: convert case descriptions to OpenFOAM cases and run them.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_foam::{Case, CaseOptions, Format, DOCUMENT_VERSION};
use std::path::{Component, Path, PathBuf};
use std::process;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Debug, Parser)]
#[command(name = "foam")]
#[command(about = "Convert YAML/JSON case descriptions into OpenFOAM cases", long_about = None)]
#[command(version = DOCUMENT_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert description files, or every YAML file under a directory
    Convert(Convert),
    /// Print the dictionary text of one file of a case
    Render(Render),
    /// Run `./Allrun` in every converted case, stopping at the first failure
    Run(Run),
}

#[derive(Debug, Parser)]
struct Convert {
    /// Description files or directories
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Destination directory
    #[arg(short, long, default_value = "test")]
    directory: PathBuf,

    /// OpenFOAM version; only descriptions listing it under `meta.openfoam` are converted
    #[arg(short, long, default_value = "7")]
    version: String,

    /// Write into case directories that already exist
    #[arg(short = 'o', long)]
    exist_ok: bool,
}

#[derive(Debug, Parser)]
struct Render {
    /// Description file
    path: PathBuf,

    /// Key path of the file inside the `foam` section, e.g. `system controlDict`
    #[arg(required = true)]
    keys: Vec<String>,

    /// Leave `FoamFile` headers exactly as written
    #[arg(long)]
    no_header_defaults: bool,
}

#[derive(Debug, Parser)]
struct Run {
    /// Directory holding converted cases
    #[arg(short, long, default_value = "test")]
    directory: PathBuf,

    /// OpenFOAM version the cases were converted for
    #[arg(short, long, default_value = "7")]
    version: String,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("serde_foam=info,foam=info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert(args),
        Command::Render(args) => render(args),
        Command::Run(args) => run(args),
    }
}

fn convert(args: Convert) -> Result<()> {
    let dst = args.directory.join(&args.version);
    for path in &args.paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && is_yaml(entry.path()) {
                    convert_one(entry.path(), &dst, &args.version, args.exist_ok)?;
                }
            }
        } else if path.is_file() {
            convert_one(path, &dst, &args.version, args.exist_ok)?;
        } else {
            bail!(
                "Path \"{}\" does not exist, or is neither a file nor a directory",
                path.display()
            );
        }
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(Format::from_path(path), Ok(Format::Yaml))
}

fn convert_one(src: &Path, dst: &Path, version: &str, exist_ok: bool) -> Result<()> {
    let mut case = Case::from_path(src).with_context(|| format!("Failed to load {}", src.display()))?;
    if !case.openfoam_versions().iter().any(|v| v == version) {
        info!("Skipping {}: not written for OpenFOAM {}", src.display(), version);
        return Ok(());
    }

    let target = dst.join(case_directory_name(src));
    if target.exists() && !exist_ok {
        warn!("Skipping {}: {} already exists", src.display(), target.display());
        return Ok(());
    }
    case.save(&target, &CaseOptions::default())
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Converted {} -> {}", src.display(), target.display());
    Ok(())
}

// `tutorials/cavity.yaml` becomes `tutorials-cavity.yaml`.
fn case_directory_name(src: &Path) -> String {
    src.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn render(args: Render) -> Result<()> {
    let case = Case::from_path(&args.path)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;
    let options = CaseOptions::new().with_header_defaults(!args.no_header_defaults);
    let text = case
        .render_file(&args.keys, &options)
        .with_context(|| format!("Failed to render {}", args.keys.join("/")))?;
    println!("{}", text);
    Ok(())
}

fn run(args: Run) -> Result<()> {
    let dst = args.directory.join(&args.version);
    let mut cases: Vec<PathBuf> = std::fs::read_dir(&dst)
        .with_context(|| format!("Failed to read {}", dst.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    cases.sort();

    for (index, case) in cases.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, cases.len(), case.display());
        let output = process::Command::new("sh")
            .arg("-c")
            .arg("./Allrun")
            .current_dir(case)
            .output()
            .with_context(|| format!("Failed to start ./Allrun in {}", case.display()))?;
        if !output.status.success() {
            bail!(
                "./Allrun failed in {}: {}",
                case.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_directory_name() {
        assert_eq!(case_directory_name(Path::new("tutorials/cavity.yaml")), "tutorials-cavity.yaml");
        assert_eq!(case_directory_name(Path::new("./cavity.yaml")), "cavity.yaml");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["foam", "convert", "a.yaml", "-d", "out", "-v", "8", "-o"]).unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.version, "8");
                assert!(args.exist_ok);
                assert_eq!(args.directory, PathBuf::from("out"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
