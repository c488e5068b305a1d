//! Configuration types for the roster solver.

/// Constraint thresholds plus logging verbosity.
///
/// All thresholds are unsigned, so a configuration can never carry a
/// negative bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterConfig {
    /// Minimum number of off-duty days per worker per week
    pub min_days_off: u32,
    /// A run of consecutive off-duty days must stay strictly below this
    pub max_consec_days_off: u32,
    /// Minimum number of on-duty workers per day
    pub min_daily_staff: u32,
    /// Minimum number of on-duty seniors per day
    pub min_daily_seniors: u32,
    /// Verbosity level: 0=silent, 1=decisions, 2=probes, 3=trace.
    pub verbosity: u8,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            min_days_off: 2,
            max_consec_days_off: 3,
            min_daily_staff: 3,
            min_daily_seniors: 1,
            verbosity: 0,
        }
    }
}

impl RosterConfig {
    /// Apply any values present in `overrides` on top of this configuration.
    pub fn apply(&mut self, overrides: &RosterOverrides) {
        if let Some(v) = overrides.min_days_off {
            self.min_days_off = v;
        }
        if let Some(v) = overrides.max_consec_days_off {
            self.max_consec_days_off = v;
        }
        if let Some(v) = overrides.min_daily_staff {
            self.min_daily_staff = v;
        }
        if let Some(v) = overrides.min_daily_seniors {
            self.min_daily_seniors = v;
        }
        if let Some(v) = overrides.verbosity {
            self.verbosity = v;
        }
    }
}

/// Values supplied on the command line that take precedence over the input file.
///
/// Conflict groups are not overrides: they are unioned with the file's groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterOverrides {
    pub min_days_off: Option<u32>,
    pub max_consec_days_off: Option<u32>,
    pub min_daily_staff: Option<u32>,
    pub min_daily_seniors: Option<u32>,
    pub verbosity: Option<u8>,
    pub conflict_groups: Vec<Vec<String>>,
}
