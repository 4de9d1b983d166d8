use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::error::SirError;
use crate::population::{InfectionStatus, Population};

pub fn recover_step<R: Rng + ?Sized>(
    population: &Population,
    recover_prob: f64,
    rng: &mut R,
) -> Result<Population, SirError> {
    let recovery = Bernoulli::new(recover_prob).map_err(|_| SirError::ValueOutOfRange {
        name: "recovery probability",
        range: "[0, 1]",
        value: recover_prob,
    })?;

    Ok(population.map(|status| match status {
        InfectionStatus::Infectious if recovery.sample(rng) => InfectionStatus::Recovered,
        other => other,
    }))
}

/// Each susceptible individual becomes infectious with probability
/// `contact_rate * infectious / len`, capped at 1.
pub fn infect_step<R: Rng + ?Sized>(
    population: &Population,
    contact_rate: f64,
    rng: &mut R,
) -> Result<Population, SirError> {
    if !(contact_rate.is_finite() && contact_rate >= 0.0) {
        return Err(SirError::ValueOutOfRange {
            name: "contact rate",
            range: "[0, inf)",
            value: contact_rate,
        });
    }
    if population.is_empty() {
        return Ok(population.clone());
    }

    let num_infectious = population.count(InfectionStatus::Infectious);
    let force_of_infection =
        f64::min(contact_rate * num_infectious as f64 / population.len() as f64, 1.0);
    let infection = Bernoulli::new(force_of_infection).map_err(|_| SirError::ValueOutOfRange {
        name: "force of infection",
        range: "[0, 1]",
        value: force_of_infection,
    })?;

    Ok(population.map(|status| match status {
        InfectionStatus::Susceptible if infection.sample(rng) => InfectionStatus::Infectious,
        other => other,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    use InfectionStatus::{Infectious, Recovered, Susceptible};

    fn mixed() -> Population {
        Population::from_statuses(vec![
            Infectious,
            Susceptible,
            Recovered,
            Infectious,
            Susceptible,
            Susceptible,
        ])
    }

    #[test]
    fn test_certain_recovery() {
        let mut rng = StdRng::seed_from_u64(1);
        let next = recover_step(&mixed(), 1.0, &mut rng).unwrap();
        assert_eq!(
            next.statuses(),
            &[
                Recovered,
                Susceptible,
                Recovered,
                Recovered,
                Susceptible,
                Susceptible
            ]
        );
    }

    #[test]
    fn test_no_recovery() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = mixed();
        let next = recover_step(&population, 0.0, &mut rng).unwrap();
        assert_eq!(next, population);
    }

    #[test]
    fn test_recovery_only_touches_infectious() {
        let mut rng = StdRng::seed_from_u64(99);
        let population = Population::new(500).unwrap();
        let next = recover_step(&population, 0.5, &mut rng).unwrap();
        assert_eq!(next.len(), population.len());
        assert_eq!(next.count(Susceptible), 495);
        assert_eq!(next.count(Infectious) + next.count(Recovered), 5);
    }

    #[test]
    fn test_recovery_rejects_invalid_probability() {
        let mut rng = StdRng::seed_from_u64(1);
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                recover_step(&mixed(), p, &mut rng),
                Err(SirError::ValueOutOfRange {
                    name: "recovery probability",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_contact_rate_infects_nobody() {
        let mut rng = StdRng::seed_from_u64(5);
        let population = mixed();
        let next = infect_step(&population, 0.0, &mut rng).unwrap();
        assert_eq!(next, population);
    }

    #[test]
    fn test_no_infectious_infects_nobody() {
        let mut rng = StdRng::seed_from_u64(5);
        let population = Population::from_statuses(vec![Susceptible, Recovered, Susceptible]);
        let next = infect_step(&population, 1.0, &mut rng).unwrap();
        assert_eq!(next, population);
    }

    #[test]
    fn test_force_of_infection_is_capped() {
        let mut rng = StdRng::seed_from_u64(5);
        let next = infect_step(&mixed(), 50.0, &mut rng).unwrap();
        assert_eq!(
            next.statuses(),
            &[
                Infectious,
                Infectious,
                Recovered,
                Infectious,
                Infectious,
                Infectious
            ]
        );
    }

    #[test]
    fn test_low_force_of_infection() {
        let mut rng = StdRng::seed_from_u64(11);
        let population = Population::new(1000).unwrap();
        let next = infect_step(&population, 0.2, &mut rng).unwrap();
        let newly_infected = next.count(Infectious) - 5;
        // p = 0.2 * 5 / 1000 = 0.001 over 995 trials
        assert!(newly_infected < 10, "{newly_infected} new infections");
        assert_eq!(next.count(Recovered), 0);
    }

    #[test]
    fn test_infection_rejects_invalid_contact_rate() {
        let mut rng = StdRng::seed_from_u64(1);
        for rate in [-0.5, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                infect_step(&mixed(), rate, &mut rng),
                Err(SirError::ValueOutOfRange {
                    name: "contact rate",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_steps_are_deterministic_given_seed() {
        let population = Population::new(200).unwrap();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let recovered = recover_step(&population, 0.3, &mut rng).unwrap();
            infect_step(&recovered, 0.9, &mut rng).unwrap()
        };
        assert_eq!(run(42), run(42));
    }
}
