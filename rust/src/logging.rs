//! Search tracing on stderr, gated by verbosity.
//!
//! Verbosity levels:
//! - 0: SILENT (nothing)
//! - 1: DECISIONS (moves that survive propagation, backtracks, outcome)
//! - 2: PROBES (evaluator rejections, the propagation pass that failed)
//! - 3: TRACE (every option removed by propagation)
//!
//! Decision and probe lines can carry the search depth; they are then
//! indented by `INDENT_PER_DEPTH` spaces per level so the output reads as
//! the search tree.

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_DECISIONS: u8 = 1;
pub const VERBOSITY_PROBES: u8 = 2;
pub const VERBOSITY_TRACE: u8 = 3;

pub const INDENT_PER_DEPTH: usize = 2;

/// Leading spaces for a line logged at search `depth`.
#[inline]
pub fn indent_width(depth: usize) -> usize {
    depth * INDENT_PER_DEPTH
}

/// Log at DECISIONS level (verbosity >= 1).
///
/// `log_decisions!(v, depth = d, ...)` indents the line under the search
/// node at depth `d`.
#[macro_export]
macro_rules! log_decisions {
    ($verbosity:expr, depth = $depth:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DECISIONS {
            eprintln!(
                "{:indent$}{}",
                "",
                format_args!($($arg)*),
                indent = $crate::logging::indent_width($depth)
            );
        }
    };
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DECISIONS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at PROBES level (verbosity >= 2). Accepts `depth = d` like
/// `log_decisions!`.
#[macro_export]
macro_rules! log_probes {
    ($verbosity:expr, depth = $depth:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PROBES {
            eprintln!(
                "{:indent$}{}",
                "",
                format_args!($($arg)*),
                indent = $crate::logging::indent_width($depth)
            );
        }
    };
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PROBES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at TRACE level (verbosity >= 3).
#[macro_export]
macro_rules! log_trace {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TRACE {
            eprintln!($($arg)*);
        }
    };
}
