//! Command-line front end: load a roster file, apply overrides, solve, print.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use duty_roster::{log_decisions, CliArgs, RosterError, RosterInput, RosterSolver, ScheduleState, USAGE};

fn load() -> Result<(CliArgs, ScheduleState), RosterError> {
    let cli = CliArgs::parse(std::env::args().skip(1))?;
    let mut input = RosterInput::from_file(&cli.input)?;
    input.apply(&cli.overrides);
    let state = input.into_state()?;
    Ok((cli, state))
}

fn print_constraints(state: &ScheduleState) {
    let config = state.config();
    println!("Min days off: {}", config.min_days_off);
    println!("Max consec days off: {}", config.max_consec_days_off);
    println!("Min daily staff: {}", config.min_daily_staff);
    println!("Min daily seniors: {}", config.min_daily_seniors);
    println!("Conflicts: ");
    for idx in state.worker_indices() {
        let partners = state.conflicts_of(idx);
        if partners.is_empty() {
            continue;
        }
        let names: Vec<&str> = partners
            .iter()
            .map(|&p| state.worker(p).id.as_str())
            .collect();
        println!("{}: {} ", state.worker(idx).id, names.join(" "));
    }
    println!();
}

fn open_output(cli: &CliArgs) -> Result<Box<dyn Write>, RosterError> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| RosterError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn main() -> ExitCode {
    let (cli, mut state) = match load() {
        Ok(loaded) => loaded,
        Err(err) => {
            println!("{}", err);
            println!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    print_constraints(&state);

    let mut out = match open_output(&cli) {
        Ok(out) => out,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let verbosity = state.config().verbosity;
    let mut solver = RosterSolver::new(verbosity);
    let start = Instant::now();
    let solved = solver.solve(&mut state);
    let elapsed = start.elapsed();

    let written = if solved {
        write!(out, "{}", state.render_grid())
    } else {
        writeln!(out, "No solution found.")
    };
    if let Err(err) = written.and_then(|_| out.flush()) {
        eprintln!("Failed to write roster: {}", err);
        return ExitCode::FAILURE;
    }

    let stats = solver.stats();
    log_decisions!(
        verbosity,
        "nodes={} moves={} rejected={} propagation_failures={} backtracks={}",
        stats.nodes,
        stats.moves_tried,
        stats.rejected,
        stats.propagation_failures,
        stats.backtracks
    );
    println!("{}ms", elapsed.as_millis());
    ExitCode::SUCCESS
}
