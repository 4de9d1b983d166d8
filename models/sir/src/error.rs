use thiserror::Error;

use crate::population::INITIAL_INFECTIOUS;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SirError {
    #[error(
        "population size {num_people} is below the {} initially infectious people",
        INITIAL_INFECTIOUS
    )]
    InvalidPopulationSize { num_people: usize },
    #[error("number of runs must be positive")]
    InvalidRunCount,
    #[error("run lengths differ: expected {expected} days, got {got}")]
    MismatchedRunLength { expected: usize, got: usize },
    #[error("number of days must be positive")]
    InvalidDayCount,
    #[error("{name} must be in {range}, got {value}")]
    ValueOutOfRange {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
}
