pub mod aggregate;
pub mod error;
pub mod output;
pub mod parameters;
pub mod population;
pub mod scenario;
pub mod simulation;
pub mod transition;

pub use aggregate::{AggregatePoint, AggregateResult, average_runs, simulate_averaged};
pub use error::SirError;
pub use parameters::{DEFAULT_NUM_RUNS, ModelParameters, Parameters, RunOptions};
pub use population::{DailyStats, INITIAL_INFECTIOUS, InfectionStatus, Population};
pub use scenario::{Scenario, ScenarioOutcome};
pub use simulation::{SimulationRun, simulate_once};
pub use transition::{infect_step, recover_step};
