//! Core data types for the roster: days, duties, seniority, domains and workers.

use chrono::Weekday;
use std::fmt;

/// Number of days in a roster week.
pub const DAYS_PER_WEEK: usize = 7;

/// Day index within the week, `0..DAYS_PER_WEEK`. Day 0 is Monday.
///
/// Days are adjacent only within the week: day 6 does not wrap to day 0.
pub type Day = usize;

/// Calendar label for a day index, used in log output.
pub fn weekday(day: Day) -> Weekday {
    match day % DAYS_PER_WEEK {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// The value a (worker, day) variable takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Duty {
    On,
    Off,
}

impl Duty {
    /// Exploration order for a single day: on before off.
    pub const ORDER: [Duty; 2] = [Duty::On, Duty::Off];

    pub fn opposite(self) -> Duty {
        match self {
            Duty::On => Duty::Off,
            Duty::Off => Duty::On,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Duty::On => "on",
            Duty::Off => "off",
        }
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staffing tier of a worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Seniority {
    Senior,
    #[default]
    Regular,
}

impl Seniority {
    /// Parse a tier label. Only `senior` (any ASCII case) is senior;
    /// every other label is regular.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("senior") {
            Seniority::Senior
        } else {
            Seniority::Regular
        }
    }

    pub fn is_senior(self) -> bool {
        self == Seniority::Senior
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seniority::Senior => f.write_str("senior"),
            Seniority::Regular => f.write_str("regular"),
        }
    }
}

/// Remaining options for one worker across the week.
///
/// A fresh domain has every option live. Committing a day clears both bits;
/// forcing a day clears exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub available_on: [bool; DAYS_PER_WEEK],
    pub available_off: [bool; DAYS_PER_WEEK],
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            available_on: [true; DAYS_PER_WEEK],
            available_off: [true; DAYS_PER_WEEK],
        }
    }
}

impl Domain {
    /// Total live options across both duties. Only used for MRV ordering.
    pub fn option_count(&self) -> usize {
        self.live_count(Duty::On) + self.live_count(Duty::Off)
    }

    /// Number of days on which `duty` is still live.
    pub fn live_count(&self, duty: Duty) -> usize {
        self.bits(duty).iter().filter(|&&live| live).count()
    }

    #[inline]
    pub fn is_live(&self, day: Day, duty: Duty) -> bool {
        self.bits(duty)[day]
    }

    /// Neither option remains for `day`.
    #[inline]
    pub fn is_exhausted(&self, day: Day) -> bool {
        !self.available_on[day] && !self.available_off[day]
    }

    #[inline]
    pub(crate) fn set(&mut self, day: Day, duty: Duty, live: bool) {
        match duty {
            Duty::On => self.available_on[day] = live,
            Duty::Off => self.available_off[day] = live,
        }
    }

    #[inline]
    fn bits(&self, duty: Duty) -> &[bool; DAYS_PER_WEEK] {
        match duty {
            Duty::On => &self.available_on,
            Duty::Off => &self.available_off,
        }
    }
}

/// A worker: one CSP variable per day of the week.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Worker {
    pub id: String,
    pub seniority: Seniority,
    pub domain: Domain,
}

impl Worker {
    pub fn new(id: impl Into<String>, seniority: Seniority) -> Self {
        Self {
            id: id.into(),
            seniority,
            domain: Domain::default(),
        }
    }
}
