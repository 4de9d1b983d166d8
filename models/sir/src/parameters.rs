use serde::{Deserialize, Serialize};

use crate::error::SirError;
use crate::scenario::Scenario;

pub const DEFAULT_NUM_RUNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub num_days: usize,
    pub num_people: usize,
    pub recover_prob: f64,
    pub contact_rate: f64,
}

impl ModelParameters {
    pub fn validate(&self) -> Result<(), SirError> {
        if self.num_days == 0 {
            return Err(SirError::InvalidDayCount);
        }
        if self.num_people < crate::population::INITIAL_INFECTIOUS {
            return Err(SirError::InvalidPopulationSize {
                num_people: self.num_people,
            });
        }
        check_unit_interval("recovery probability", self.recover_prob)?;
        check_unit_interval("contact rate", self.contact_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub num_runs: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            num_runs: DEFAULT_NUM_RUNS,
            seed: 0,
            parallel: false,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> Result<(), SirError> {
        if self.num_runs == 0 {
            return Err(SirError::InvalidRunCount);
        }
        Ok(())
    }
}

/// Request input as read from the run environment. Unknown keys are
/// rejected so that a misspelt option cannot fall back to its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    pub num_days: usize,
    pub num_people: usize,
    pub recover_prob: f64,
    pub contact_rate: f64,
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub scenario: Scenario,
}

fn default_num_runs() -> usize {
    DEFAULT_NUM_RUNS
}

impl Parameters {
    pub fn model(&self) -> ModelParameters {
        ModelParameters {
            num_days: self.num_days,
            num_people: self.num_people,
            recover_prob: self.recover_prob,
            contact_rate: self.contact_rate,
        }
    }

    pub fn run_options(&self, seed: u64) -> RunOptions {
        RunOptions {
            num_runs: self.num_runs,
            seed,
            parallel: self.parallel,
        }
    }
}

pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<f64, SirError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SirError::ValueOutOfRange {
            name,
            range: "[0, 1]",
            value,
        })
    }
}
