use log::trace;
use rand::Rng;

use crate::error::SirError;
use crate::parameters::ModelParameters;
use crate::population::{DailyStats, Population};
use crate::transition::{infect_step, recover_step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    pub days: Vec<DailyStats>,
    /// Number of days actually simulated before the epidemic reached a
    /// terminal state; the remaining entries repeat the last one.
    pub simulated_days: usize,
}

impl SimulationRun {
    pub fn terminated_early(&self) -> bool {
        self.simulated_days < self.days.len()
    }
}

pub fn simulate_once<R: Rng + ?Sized>(
    params: &ModelParameters,
    rng: &mut R,
) -> Result<SimulationRun, SirError> {
    params.validate()?;

    let mut population = Population::new(params.num_people)?;
    let mut days = Vec::with_capacity(params.num_days);
    for day in 1..=params.num_days {
        population = recover_step(&population, params.recover_prob, rng)?;
        population = infect_step(&population, params.contact_rate, rng)?;
        let stats = population.stats();
        days.push(stats);
        if stats.is_terminal() {
            trace!("epidemic reached a terminal state on day {day}: {stats:?}");
            break;
        }
    }

    let simulated_days = days.len();
    if let Some(&last) = days.last() {
        days.resize(params.num_days, last);
    }
    Ok(SimulationRun {
        days,
        simulated_days,
    })
}
