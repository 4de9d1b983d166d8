use serde::Serialize;

use crate::error::SirError;

/// Number of people seeded as infectious at the start of every run.
pub const INITIAL_INFECTIOUS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InfectionStatus {
    Susceptible,
    Infectious,
    Recovered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub susceptible: usize,
    pub infectious: usize,
    pub recovered: usize,
}

impl DailyStats {
    pub fn total(&self) -> usize {
        self.susceptible + self.infectious + self.recovered
    }

    /// No further transitions can change the counts once either
    /// compartment is empty.
    pub fn is_terminal(&self) -> bool {
        self.susceptible == 0 || self.infectious == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    people: Vec<InfectionStatus>,
}

impl Population {
    /// Seeds `INITIAL_INFECTIOUS` infectious people followed by susceptibles.
    pub fn new(num_people: usize) -> Result<Self, SirError> {
        if num_people < INITIAL_INFECTIOUS {
            return Err(SirError::InvalidPopulationSize { num_people });
        }
        let mut people = vec![InfectionStatus::Infectious; INITIAL_INFECTIOUS];
        people.resize(num_people, InfectionStatus::Susceptible);
        Ok(Self { people })
    }

    pub fn from_statuses(people: Vec<InfectionStatus>) -> Self {
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn statuses(&self) -> &[InfectionStatus] {
        &self.people
    }

    pub fn count(&self, status: InfectionStatus) -> usize {
        self.people.iter().filter(|&&s| s == status).count()
    }

    pub fn stats(&self) -> DailyStats {
        let mut stats = DailyStats::default();
        for status in &self.people {
            match status {
                InfectionStatus::Susceptible => stats.susceptible += 1,
                InfectionStatus::Infectious => stats.infectious += 1,
                InfectionStatus::Recovered => stats.recovered += 1,
            }
        }
        stats
    }

    pub(crate) fn map<F>(&self, f: F) -> Population
    where
        F: FnMut(InfectionStatus) -> InfectionStatus,
    {
        Population {
            people: self.people.iter().copied().map(f).collect(),
        }
    }
}
