//! Running OpenFOAM applications on a saved case.
//!
//! [`Command`] executes pipeline entries inside the case directory, the way
//! the `runApplication`/`runParallel` helpers of OpenFOAM tutorials do:
//! each command's stdout goes to `log.<program>` and a command whose log
//! already exists is not run again.
//!
//! Commands may use three macros:
//!
//! - `__app__`: the solver from `system/controlDict`
//! - `__procs__`: `numberOfSubdomains` from `system/decomposeParDict`
//! - `__pwd__`: the absolute case directory
//!
//! With parallel runs enabled and more than one processor configured, a
//! command mentioning `__app__` becomes `mpirun -np __procs__ <command> -parallel`.

use crate::progress::Tracker;
use crate::{Case, CaseOptions, Error, FoamValue, Result, RunOptions};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{self, Stdio};
use std::time::{Duration, Instant};

/// Result of [`Command::raw`].
#[derive(Clone, Debug)]
pub struct Process {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub elapsed: Duration,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Process {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// One entry of a pipeline with its effective options.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineItem {
    pub command: String,
    pub options: RunOptions,
}

impl PipelineItem {
    /// Reads a pipeline entry: either a command string or a mapping
    /// `{command, suffix?, overwrite?, exception?, parallel?, shell?}` whose
    /// keys override `defaults`.
    pub fn from_value(value: &FoamValue, defaults: &RunOptions) -> Result<Self> {
        let map = match value {
            FoamValue::String(command) => {
                return Ok(PipelineItem {
                    command: command.clone(),
                    options: defaults.clone(),
                })
            }
            FoamValue::Object(map) => map,
            other => {
                return Err(Error::command(
                    &other.scalar_text().unwrap_or_default(),
                    &format!("pipeline entries must be strings or mappings, found {}", other.kind()),
                ))
            }
        };

        let command = map
            .get("command")
            .and_then(FoamValue::scalar_text)
            .ok_or_else(|| Error::command("", "pipeline mapping without `command`"))?;
        let flag = |key: &str, default: bool| map.get(key).and_then(FoamValue::as_bool).unwrap_or(default);

        Ok(PipelineItem {
            options: RunOptions {
                suffix: map
                    .get("suffix")
                    .and_then(FoamValue::scalar_text)
                    .unwrap_or_else(|| defaults.suffix.clone()),
                overwrite: flag("overwrite", defaults.overwrite),
                exception: flag("exception", defaults.exception),
                parallel: flag("parallel", defaults.parallel),
                shell: flag("shell", defaults.shell),
            },
            command,
        })
    }
}

/// Command runner bound to a saved case.
///
/// Created by [`Case::command`].
pub struct Command<'a> {
    case: &'a Case,
    directory: &'a Path,
    macros: Vec<(&'static str, String)>,
}

impl<'a> Command<'a> {
    pub(crate) fn new(case: &'a Case, directory: &'a Path) -> Self {
        let mut macros = Vec::with_capacity(3);
        if let Ok(application) = case.application() {
            macros.push(("__app__", application));
        }
        macros.push(("__procs__", case.number_of_processors().to_string()));
        let pwd = directory
            .canonicalize()
            .unwrap_or_else(|_| directory.to_path_buf());
        macros.push(("__pwd__", pwd.to_string_lossy().into_owned()));
        Command {
            case,
            directory,
            macros,
        }
    }

    pub fn directory(&self) -> &Path {
        self.directory
    }

    /// Macro names and their values.
    pub fn macros(&self) -> &[(&'static str, String)] {
        &self.macros
    }

    /// Substitutes every macro in `command`.
    ///
    /// # Errors
    ///
    /// Fails when `command` uses `__app__` but the case names no application.
    pub fn replace(&self, command: &str) -> Result<String> {
        if command.contains("__app__") && !self.macros.iter().any(|(name, _)| *name == "__app__") {
            return Err(Error::missing("system/controlDict/application"));
        }
        Ok(self
            .macros
            .iter()
            .fold(command.to_string(), |command, (name, value)| command.replace(name, value)))
    }

    /// Macro-expanded command line, wrapped in `mpirun` when `parallel` is
    /// set and the command mentions `__app__`.
    pub fn expand(&self, command: &str, parallel: bool) -> Result<String> {
        if parallel && command.contains("__app__") {
            self.replace(&format!("mpirun -np __procs__ {} -parallel", command))
        } else {
            self.replace(command)
        }
    }

    /// Runs every command in order, returning one exit code per command.
    ///
    /// A skipped command, or one killed by a signal, has no exit code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRun`] for a command whose log exists when
    /// neither `overwrite` nor skipping applies, and [`Error::Command`] when
    /// a process cannot be started.
    pub fn run(&self, commands: &[FoamValue], options: &RunOptions) -> Result<Vec<Option<i32>>> {
        let mut codes = Vec::with_capacity(commands.len());
        for value in commands {
            let item = PipelineItem::from_value(value, options)?;
            codes.push(self.run_one(&item)?);
        }
        Ok(codes)
    }

    /// Like [`Command::run`] for plain command strings.
    pub fn run_commands<S: AsRef<str>>(&self, commands: &[S], options: &RunOptions) -> Result<Vec<Option<i32>>> {
        let commands: Vec<FoamValue> = commands.iter().map(|c| FoamValue::from(c.as_ref())).collect();
        self.run(&commands, options)
    }

    fn run_one(&self, item: &PipelineItem) -> Result<Option<i32>> {
        let processors = self.case.number_of_processors();
        let raws = split(&item.command, &self.replace(&item.command)?)?;
        let program = raws[0].clone();
        let line = self.expand(&item.command, item.options.parallel && processors > 1)?;
        let args = split(&item.command, &line)?;

        let log_name = format!("log.{}{}", program.replace("./", ""), item.options.suffix);
        let log = self.directory.join(&log_name);
        if !item.options.overwrite && log.exists() {
            let err = Error::AlreadyRun {
                program,
                directory: self.absolute_directory(),
                log: log_name,
            };
            if item.options.exception {
                return Err(err);
            }
            tracing::warn!("{}", err);
            return Ok(None);
        }

        tracing::info!(
            "Running {} on {} using {} processes if in parallel",
            program,
            self.absolute_directory(),
            processors
        );

        let mut file = File::create(&log)
            .map_err(|e| Error::io(&format!("{}: {}", log.display(), e)))?;
        let mut cmd = if item.options.shell {
            let mut cmd = process::Command::new("sh");
            cmd.arg("-c").arg(&line);
            cmd
        } else {
            let mut cmd = process::Command::new(&args[0]);
            cmd.args(&args[1..]);
            cmd
        };
        let mut child = cmd
            .current_dir(self.directory)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::command(&line, &e.to_string()))?;

        let mut tracker = Tracker::for_case(&program, self.case);
        if let Err(err) = stream_log(&mut child, &mut file, &mut tracker) {
            // The child must not outlive a failed run.
            let _ = child.kill();
            let _ = child.wait();
            return Err(err);
        }
        tracker.finish();

        let status = child
            .wait()
            .map_err(|e| Error::command(&line, &e.to_string()))?;
        tracing::debug!(program = %program, code = ?status.code(), log = %log.display(), "command finished");
        Ok(status.code())
    }

    /// Runs the case's `other.pipeline`, or `./Allrun` when it has none.
    pub fn all_run(&self, options: &RunOptions) -> Result<Vec<Option<i32>>> {
        let pipeline = self.case.pipeline();
        if pipeline.is_empty() {
            if !self.directory.join("Allrun").exists() {
                return Err(Error::missing("Allrun script or other/pipeline"));
            }
            return Ok(vec![self.raw("./Allrun")?.code]);
        }
        self.run(&pipeline, options)
    }

    /// Removes the case directory and writes the case into it again, which
    /// drops logs, time directories and anything else the runs produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the directory cannot be removed, and any
    /// error of writing the case.
    pub fn all_clean(&self, options: &CaseOptions) -> Result<()> {
        if self.directory.exists() {
            fs::remove_dir_all(self.directory)
                .map_err(|e| Error::io(&format!("{}: {}", self.directory.display(), e)))?;
        }
        tracing::info!(directory = %self.absolute_directory(), "cleaned case");
        self.case.write_to(self.directory, options)
    }

    /// Looks `program` up on `PATH` from the case directory, the way the
    /// shell would resolve it.
    ///
    /// Returns `None` when nothing is found.
    pub fn which(&self, program: &str) -> Result<Option<String>> {
        let output = process::Command::new("sh")
            .args(["-c", "command -v \"$1\"", "sh", program])
            .current_dir(self.directory)
            .output()
            .map_err(|e| Error::command(program, &e.to_string()))?;
        let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(found).filter(|found| output.status.success() && !found.is_empty()))
    }

    /// Executes `command` once in the case directory, capturing its output.
    pub fn raw(&self, command: &str) -> Result<Process> {
        let args = split(command, command)?;
        let started = Instant::now();
        let output = process::Command::new(&args[0])
            .args(&args[1..])
            .current_dir(self.directory)
            .output()
            .map_err(|e| Error::command(command, &e.to_string()))?;
        Ok(Process {
            code: output.status.code(),
            elapsed: started.elapsed(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Time directories of the case, ascending.
    pub fn times(&self) -> Result<Vec<f64>> {
        let mut times: Vec<f64> = fs::read_dir(self.directory)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str()?.parse::<f64>().ok())
            .filter(|time| time.is_finite())
            .collect();
        times.sort_by(f64::total_cmp);
        Ok(times)
    }

    /// Log files (`log.*`) of the case, sorted by name.
    pub fn logs(&self) -> Result<Vec<PathBuf>> {
        let mut logs: Vec<PathBuf> = fs::read_dir(self.directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .map_or(false, |name| name.starts_with("log."))
            })
            .collect();
        logs.sort();
        Ok(logs)
    }

    fn absolute_directory(&self) -> String {
        self.macros
            .iter()
            .find(|(name, _)| *name == "__pwd__")
            .map(|(_, pwd)| pwd.clone())
            .unwrap_or_else(|| self.directory.display().to_string())
    }
}

// Copies the child's stdout into `file` line by line, feeding the tracker.
fn stream_log(child: &mut process::Child, file: &mut File, tracker: &mut Tracker) -> Result<()> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::io("stdout was not captured"))?;
    let mut reader = BufReader::new(stdout);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(());
        }
        file.write_all(&buffer)?;
        tracker.step(&buffer);
    }
}

// Never returns an empty list.
fn split(command: &str, line: &str) -> Result<Vec<String>> {
    match shlex::split(line) {
        Some(args) if !args.is_empty() => Ok(args),
        Some(_) => Err(Error::command(command, "empty command")),
        None => Err(Error::command(command, "unbalanced quotes")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foam;

    fn case_with(processors: i64) -> Case {
        let foam = foam!({
            "system": {
                "controlDict": { "FoamFile": null, "application": "icoFoam" },
                "decomposeParDict": { "FoamFile": null, "numberOfSubdomains": processors }
            }
        });
        Case::new(vec![foam!({ "order": ["meta", "foam"], "version": "0.13.4" }), foam], ".").unwrap()
    }

    #[test]
    fn test_macros_replaced() {
        let case = case_with(4);
        let command = Command::new(&case, Path::new("."));
        assert_eq!(command.replace("__app__ -case x").unwrap(), "icoFoam -case x");
        assert_eq!(command.replace("decomposePar -n __procs__").unwrap(), "decomposePar -n 4");
        assert!(!command.replace("echo __pwd__").unwrap().contains("__pwd__"));
    }

    #[test]
    fn test_parallel_wrapping_only_for_app() {
        let case = case_with(4);
        let command = Command::new(&case, Path::new("."));
        assert_eq!(command.expand("__app__", true).unwrap(), "mpirun -np 4 icoFoam -parallel");
        assert_eq!(command.expand("blockMesh", true).unwrap(), "blockMesh");
        assert_eq!(command.expand("__app__", false).unwrap(), "icoFoam");
    }

    #[test]
    fn test_missing_application() {
        let case = Case::new(vec![foam!({ "order": ["meta"], "version": "0.13.4" })], ".").unwrap();
        let command = Command::new(&case, Path::new("."));
        assert!(command.replace("__app__").is_err());
        assert_eq!(command.replace("blockMesh").unwrap(), "blockMesh");
    }

    #[test]
    fn test_pipeline_item_overrides() {
        let defaults = RunOptions::new();
        let item = PipelineItem::from_value(
            &foam!({ "command": "blockMesh", "suffix": ".1", "overwrite": true }),
            &defaults,
        )
        .unwrap();
        assert_eq!(item.command, "blockMesh");
        assert_eq!(item.options.suffix, ".1");
        assert!(item.options.overwrite);
        assert!(item.options.exception);

        assert!(PipelineItem::from_value(&foam!(1), &defaults).is_err());
        assert!(PipelineItem::from_value(&foam!({ "suffix": ".1" }), &defaults).is_err());
    }

    #[test]
    fn test_split_rejects_empty() {
        assert!(split("", "").is_err());
        assert!(split("a", "echo 'open").is_err());
        assert_eq!(split("a", "echo 'a b'").unwrap(), vec!["echo", "a b"]);
    }
}
