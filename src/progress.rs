//! Solver progress parsing.
//!
//! OpenFOAM applications print their position in the run in a handful of
//! ways (`Time = 0.005`, `Iteration: 12`, `Processor 3`). [`Progress`] picks
//! the right parser for an application name and [`Tracker`] turns a stream
//! of output lines into `tracing` events with the completed fraction.

use crate::Case;

/// Line format an application reports progress in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// `Time = <t>`
    TimeEquals,
    /// `Time: <t>`
    TimeColon,
    /// `Iteration = <n>`
    IterationEquals,
    /// `Iteration: <n>`
    IterationColon,
    /// `Processor <n>`
    Processor,
}

const BY_TIME_EQUALS: &[&str] = &[
    "DPMFoam",
    "PDRFoam",
    "SRFPimpleFoam",
    "SRFSimpleFoam",
    "XiFoam",
    "adjointShapeOptimizationFoam",
    "boundaryFoam",
    "buoyantPimpleFoam",
    "buoyantSimpleFoam",
    "cavitatingFoam",
    "chemFoam",
    "chtMultiRegionFoam",
    "coalChemistryFoam",
    "compressibleInterFilmFoam",
    "compressibleInterFoam",
    "compressibleMultiphaseInterFoam",
    "dnsFoam",
    "driftFluxFoam",
    "dsmcFoam",
    "fireFoam",
    "icoFoam",
    "icoUncoupledKinematicParcelFoam",
    "interFoam",
    "interMixingFoam",
    "interPhaseChangeFoam",
    "laplacianFoam",
    "mdEquilibrationFoam",
    "mdFoam",
    "mhdFoam",
    "multiphaseEulerFoam",
    "multiphaseInterFoam",
    "nonNewtonianIcoFoam",
    "pimpleFoam",
    "pisoFoam",
    "porousSimpleFoam",
    "postProcess",
    "potentialFreeSurfaceFoam",
    "reactingFoam",
    "reactingMultiphaseEulerFoam",
    "reactingParcelFoam",
    "reactingTwoPhaseEulerFoam",
    "reconstructPar",
    "reconstructParMesh",
    "rhoCentralFoam",
    "rhoPimpleFoam",
    "rhoPorousSimpleFoam",
    "rhoReactingBuoyantFoam",
    "rhoReactingFoam",
    "rhoSimpleFoam",
    "scalarTransportFoam",
    "shallowWaterFoam",
    "simpleFoam",
    "simpleReactingParcelFoam",
    "sprayFoam",
    "thermoFoam",
    "twoLiquidMixingFoam",
    "twoPhaseEulerFoam",
    "uncoupledKinematicParcelFoam",
];

const BY_TIME_COLON: &[&str] = &["foamToVTK"];

const BY_ITERATION_EQUALS: &[&str] = &["electrostaticFoam"];

const BY_ITERATION_COLON: &[&str] = &["solidDisplacementFoam", "solidEquilibriumDisplacementFoam"];

const BY_PROCESSOR: &[&str] = &["decomposePar", "redistributePar"];

impl Progress {
    /// Parser registered for `application`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_foam::Progress;
    ///
    /// assert_eq!(Progress::for_application("icoFoam"), Some(Progress::TimeEquals));
    /// assert_eq!(Progress::for_application("decomposePar"), Some(Progress::Processor));
    /// assert_eq!(Progress::for_application("blockMesh"), None);
    /// ```
    pub fn for_application(application: &str) -> Option<Self> {
        let registry = [
            (BY_TIME_EQUALS, Progress::TimeEquals),
            (BY_TIME_COLON, Progress::TimeColon),
            (BY_ITERATION_EQUALS, Progress::IterationEquals),
            (BY_ITERATION_COLON, Progress::IterationColon),
            (BY_PROCESSOR, Progress::Processor),
        ];
        registry
            .iter()
            .find(|(names, _)| names.contains(&application))
            .map(|(_, progress)| *progress)
    }

    fn prefix(&self) -> &'static str {
        match self {
            Progress::TimeEquals => "Time = ",
            Progress::TimeColon => "Time: ",
            Progress::IterationEquals => "Iteration = ",
            Progress::IterationColon => "Iteration: ",
            Progress::Processor => "Processor ",
        }
    }

    /// Position reported by one output line, if it carries one.
    ///
    /// ```rust
    /// use serde_foam::Progress;
    ///
    /// assert_eq!(Progress::TimeEquals.parse(b"Time = 0.005\n"), Some(0.005));
    /// assert_eq!(Progress::TimeEquals.parse(b"ExecutionTime = 0.01 s"), None);
    /// ```
    pub fn parse(&self, line: &[u8]) -> Option<f64> {
        let line = std::str::from_utf8(line).ok()?.trim();
        let rest = line.strip_prefix(self.prefix())?;
        match self {
            Progress::Processor => {
                if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                rest.parse::<u64>().ok().map(|n| n as f64)
            }
            _ => rest.trim().parse().ok(),
        }
    }
}

/// Follows one command's output and reports how far it got.
///
/// Applications without a registered parser, or whose range cannot be read
/// from the case, get a tracker that ignores every line.
#[derive(Clone, Debug)]
pub struct Tracker {
    program: String,
    parser: Option<Progress>,
    start: f64,
    end: f64,
    current: f64,
    reported: u32,
}

impl Tracker {
    /// Tracker for `program` with an explicit range.
    pub fn new(program: &str, parser: Option<Progress>, start: f64, end: f64) -> Self {
        Tracker {
            program: program.to_string(),
            parser,
            start,
            end,
            current: start,
            reported: 0,
        }
    }

    /// Tracker for `program` with its range taken from `case`.
    ///
    /// Time and iteration parsers run from `startTime` to `endTime` of
    /// `system/controlDict`; the processor parser runs over the subdomains.
    pub fn for_case(program: &str, case: &Case) -> Self {
        let parser = Progress::for_application(program);
        let range = match parser {
            Some(Progress::Processor) => Some((0.0, case.number_of_processors() as f64 - 1.0)),
            Some(_) => case.start_time().zip(case.end_time()),
            None => None,
        };
        match range {
            Some((start, end)) => Tracker::new(program, parser, start, end),
            None => {
                if parser.is_some() {
                    tracing::debug!(program, "no progress range in case, output not tracked");
                }
                Tracker::new(program, None, 0.0, 0.0)
            }
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Completed share of the range, `None` when nothing is tracked.
    pub fn fraction(&self) -> Option<f64> {
        self.parser?;
        let total = self.end - self.start;
        if total <= 0.0 {
            return Some(1.0);
        }
        Some(((self.current - self.start) / total).clamp(0.0, 1.0))
    }

    /// Feeds one output line and returns how far the position moved.
    pub fn step(&mut self, line: &[u8]) -> f64 {
        let Some(now) = self.parser.and_then(|parser| parser.parse(line)) else {
            return 0.0;
        };
        let delta = now - self.current;
        self.current = now;

        if let Some(fraction) = self.fraction() {
            let percent = (fraction * 100.0).floor() as u32;
            tracing::trace!(program = %self.program, now, percent, "progress");
            if percent / 10 > self.reported / 10 {
                self.reported = percent;
                tracing::info!(program = %self.program, now, "{}% done", percent);
            }
        }
        delta
    }

    pub fn finish(&self) {
        if let Some(fraction) = self.fraction() {
            tracing::debug!(program = %self.program, now = self.current, percent = (fraction * 100.0).round(), "finished");
        }
    }
}
