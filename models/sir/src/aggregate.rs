use std::panic;
use std::thread;

use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::error::SirError;
use crate::parameters::{ModelParameters, RunOptions};
use crate::simulation::{SimulationRun, simulate_once};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatePoint {
    pub mean_susceptible: f64,
    pub mean_infectious: f64,
    pub mean_recovered: f64,
    /// `mean_infectious` over the population size the runs were started with.
    pub fraction_infectious: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub params: ModelParameters,
    pub num_runs: usize,
    pub points: Vec<AggregatePoint>,
}

/// Seed of the stream used by run `run`. Runs never share a stream, and the
/// mapping does not depend on whether runs execute in parallel.
pub fn run_seed(base_seed: u64, run: usize) -> u64 {
    base_seed.wrapping_add((run as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn seeded_run(
    params: &ModelParameters,
    base_seed: u64,
    run: usize,
) -> Result<SimulationRun, SirError> {
    let mut rng = StdRng::seed_from_u64(run_seed(base_seed, run));
    let result = simulate_once(params, &mut rng)?;
    debug!(
        "run {run}: simulated {} of {} days, final state {:?}",
        result.simulated_days,
        params.num_days,
        result.days.last()
    );
    Ok(result)
}

pub fn simulate_averaged(
    params: &ModelParameters,
    options: &RunOptions,
) -> Result<AggregateResult, SirError> {
    params.validate()?;
    options.validate()?;

    let runs = if options.parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = (0..options.num_runs)
                .map(|run| scope.spawn(move || seeded_run(params, options.seed, run)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        (0..options.num_runs)
            .map(|run| seeded_run(params, options.seed, run))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(AggregateResult {
        params: *params,
        num_runs: runs.len(),
        points: average_runs(&runs, params.num_people)?,
    })
}

/// Averages equally long runs day by day. The infectious fraction is taken
/// against `num_people`, not against the recomputed daily total.
pub fn average_runs(
    runs: &[SimulationRun],
    num_people: usize,
) -> Result<Vec<AggregatePoint>, SirError> {
    let Some(first) = runs.first() else {
        return Err(SirError::InvalidRunCount);
    };
    let num_days = first.days.len();
    if let Some(run) = runs.iter().find(|run| run.days.len() != num_days) {
        return Err(SirError::MismatchedRunLength {
            expected: num_days,
            got: run.days.len(),
        });
    }

    let mut totals = vec![(0usize, 0usize, 0usize); num_days];
    for run in runs {
        for (total, stats) in totals.iter_mut().zip(&run.days) {
            total.0 += stats.susceptible;
            total.1 += stats.infectious;
            total.2 += stats.recovered;
        }
    }

    let num_runs = runs.len() as f64;
    Ok(totals
        .into_iter()
        .map(|(susceptible, infectious, recovered)| {
            let mean_infectious = infectious as f64 / num_runs;
            AggregatePoint {
                mean_susceptible: susceptible as f64 / num_runs,
                mean_infectious,
                mean_recovered: recovered as f64 / num_runs,
                fraction_infectious: mean_infectious / num_people as f64,
            }
        })
        .collect())
}
