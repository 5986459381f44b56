//! Configuration options for writing cases and running commands.
//!
//! This module provides two builders:
//!
//! - [`CaseOptions`]: how [`Case::save`](crate::Case::save) writes a case
//! - [`RunOptions`]: how [`Command::run`](crate::Command::run) treats each
//!   pipeline entry
//!
//! ## Examples
//!
//! ```rust
//! use serde_foam::{CaseOptions, RunOptions};
//!
//! // Skip the ParaView marker file
//! let options = CaseOptions::new().with_paraview(false);
//! assert!(!options.paraview);
//!
//! // Re-run commands even when their log file exists
//! let run = RunOptions::new().with_overwrite(true).with_suffix(".2");
//! assert!(run.overwrite);
//! ```

/// Options for [`Case::save`](crate::Case::save).
///
/// # Examples
///
/// ```rust
/// use serde_foam::CaseOptions;
///
/// let options = CaseOptions::default();
/// assert!(options.paraview);
/// assert!(options.header_defaults);
/// assert!(options.overwrite);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseOptions {
    /// Write an empty `paraview.foam` marker after the case files.
    pub paraview: bool,
    /// Fill in missing `version`, `format` and `object` header entries.
    pub header_defaults: bool,
    /// Allow writing into a directory that already holds files.
    pub overwrite: bool,
}

impl Default for CaseOptions {
    fn default() -> Self {
        CaseOptions {
            paraview: true,
            header_defaults: true,
            overwrite: true,
        }
    }
}

impl CaseOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the `paraview.foam` marker is written.
    #[must_use]
    pub fn with_paraview(mut self, paraview: bool) -> Self {
        self.paraview = paraview;
        self
    }

    /// Sets whether `FoamFile` headers get their default entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::CaseOptions;
    ///
    /// let options = CaseOptions::new().with_header_defaults(false);
    /// assert!(!options.header_defaults);
    /// ```
    #[must_use]
    pub fn with_header_defaults(mut self, header_defaults: bool) -> Self {
        self.header_defaults = header_defaults;
        self
    }

    /// Sets whether saving into a non-empty directory is allowed.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Options for [`Command::run`](crate::Command::run).
///
/// Every field can be overridden per pipeline entry by writing the entry as
/// a mapping, e.g. `{command: blockMesh, overwrite: true}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Appended to the log file name: `log.<program><suffix>`.
    pub suffix: String,
    /// Run even if the log file exists.
    pub overwrite: bool,
    /// Fail with [`Error::AlreadyRun`](crate::Error::AlreadyRun) instead of
    /// skipping when the log file exists.
    pub exception: bool,
    /// Wrap `__app__` commands with `mpirun` when more than one processor
    /// is configured.
    pub parallel: bool,
    /// Hand the command line to `sh -c` instead of executing it directly.
    pub shell: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            suffix: String::new(),
            overwrite: false,
            exception: true,
            parallel: true,
            shell: false,
        }
    }
}

impl RunOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::RunOptions;
    ///
    /// let options = RunOptions::new();
    /// assert!(options.exception);
    /// assert!(options.parallel);
    /// assert!(!options.shell);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used by [`Command::all_run`](crate::Command::all_run): skip
    /// commands that already ran and go through the shell.
    #[must_use]
    pub fn all_run() -> Self {
        RunOptions {
            exception: false,
            shell: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: bool) -> Self {
        self.exception = exception;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }
}
