//! Roster input: the line-oriented roster file and command-line overrides.
//!
//! File format, one entry per line:
//!
//! ```text
//! alice senior
//! bob regular
//! -min-days-off 2
//! -max-consec-days-off 3
//! -min-daily-staff 2
//! -min-daily-seniors 1
//! -conflict alice bob
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{RosterConfig, RosterOverrides};
use crate::error::RosterError;
use crate::models::Seniority;
use crate::scheduler::ScheduleState;

/// Usage text printed by the `roster` binary on argument errors.
pub const USAGE: &str = "Usage: roster <input_file> [-o <output_file>] [-min-days-off <value>]
              [-max-consec-days-off <value>] [-min-daily-staff <value>]
              [-min-daily-seniors <value>] [-conflict <worker_id> <worker_id> ...]
              [-verbosity <0-3>]";

/// A parsed roster file, before it is turned into a search board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterInput {
    /// Declared workers in file order
    pub workers: Vec<(String, Seniority)>,
    pub config: RosterConfig,
    pub conflict_groups: Vec<Vec<String>>,
}

/// Threshold directive names shared by the file format and the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Threshold {
    MinDaysOff,
    MaxConsecDaysOff,
    MinDailyStaff,
    MinDailySeniors,
}

impl Threshold {
    fn from_directive(directive: &str) -> Option<Self> {
        match directive {
            "-min-days-off" => Some(Threshold::MinDaysOff),
            "-max-consec-days-off" => Some(Threshold::MaxConsecDaysOff),
            "-min-daily-staff" => Some(Threshold::MinDailyStaff),
            "-min-daily-seniors" => Some(Threshold::MinDailySeniors),
            _ => None,
        }
    }

    fn set(self, config: &mut RosterConfig, value: u32) {
        match self {
            Threshold::MinDaysOff => config.min_days_off = value,
            Threshold::MaxConsecDaysOff => config.max_consec_days_off = value,
            Threshold::MinDailyStaff => config.min_daily_staff = value,
            Threshold::MinDailySeniors => config.min_daily_seniors = value,
        }
    }

    fn set_override(self, overrides: &mut RosterOverrides, value: u32) {
        let slot = match self {
            Threshold::MinDaysOff => &mut overrides.min_days_off,
            Threshold::MaxConsecDaysOff => &mut overrides.max_consec_days_off,
            Threshold::MinDailyStaff => &mut overrides.min_daily_staff,
            Threshold::MinDailySeniors => &mut overrides.min_daily_seniors,
        };
        *slot = Some(value);
    }
}

impl RosterInput {
    /// Parse roster file contents.
    pub fn parse(text: &str) -> Result<Self, RosterError> {
        let mut input = RosterInput::default();

        for (line_no, line) in text.lines().enumerate() {
            let line_no = line_no + 1;
            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };

            if !head.starts_with('-') {
                let seniority = tokens.next().map(Seniority::from_label).unwrap_or_default();
                input.workers.push((head.to_string(), seniority));
                continue;
            }

            if head == "-conflict" {
                input
                    .conflict_groups
                    .push(tokens.map(str::to_string).collect());
                continue;
            }

            let Some(threshold) = Threshold::from_directive(head) else {
                return Err(RosterError::UnknownDirective {
                    line: line_no,
                    directive: head.to_string(),
                });
            };
            let raw = tokens.next().ok_or_else(|| RosterError::MissingValue {
                line: line_no,
                directive: head.to_string(),
            })?;
            let value = raw.parse::<u32>().map_err(|_| RosterError::InvalidValue {
                line: line_no,
                directive: head.to_string(),
                value: raw.to_string(),
            })?;
            threshold.set(&mut input.config, value);
        }

        Ok(input)
    }

    /// Read and parse a roster file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Apply command-line overrides: thresholds replace file values,
    /// conflict groups are added to the file's.
    pub fn apply(&mut self, overrides: &RosterOverrides) {
        self.config.apply(overrides);
        self.conflict_groups
            .extend(overrides.conflict_groups.iter().cloned());
    }

    /// Validate the roster and build the initial search board.
    pub fn into_state(self) -> Result<ScheduleState, RosterError> {
        ScheduleState::new(self.workers, &self.conflict_groups, self.config)
    }
}

/// Parsed command line of the `roster` binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub overrides: RosterOverrides,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    ///
    /// `-conflict` takes every following argument up to the next one
    /// starting with `-`.
    pub fn parse<I>(args: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().peekable();
        let input = match args.next() {
            Some(arg) if !arg.starts_with('-') => PathBuf::from(arg),
            Some(arg) => {
                return Err(RosterError::Usage(format!(
                    "expected input file before {}",
                    arg
                )))
            }
            None => return Err(RosterError::Usage("missing input file".to_string())),
        };

        let mut output = None;
        let mut overrides = RosterOverrides::default();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-o" => {
                    let path = args
                        .next()
                        .ok_or_else(|| RosterError::Usage("-o needs a file name".to_string()))?;
                    output = Some(PathBuf::from(path));
                }
                "-conflict" => {
                    let mut group = Vec::new();
                    while let Some(id) = args.next_if(|arg| !arg.starts_with('-')) {
                        group.push(id);
                    }
                    overrides.conflict_groups.push(group);
                }
                "-verbosity" => {
                    let raw = args.next().ok_or_else(|| {
                        RosterError::Usage("-verbosity needs a value".to_string())
                    })?;
                    let level = raw.parse::<u8>().map_err(|_| {
                        RosterError::Usage(format!("invalid value {:?} for -verbosity", raw))
                    })?;
                    overrides.verbosity = Some(level);
                }
                other => {
                    let threshold = Threshold::from_directive(other)
                        .ok_or_else(|| RosterError::Usage(format!("unknown option {}", other)))?;
                    let raw = args.next().ok_or_else(|| {
                        RosterError::Usage(format!("{} needs a value", other))
                    })?;
                    let value = raw.parse::<u32>().map_err(|_| {
                        RosterError::Usage(format!("invalid value {:?} for {}", raw, other))
                    })?;
                    threshold.set_override(&mut overrides, value);
                }
            }
        }

        Ok(Self {
            input,
            output,
            overrides,
        })
    }
}
