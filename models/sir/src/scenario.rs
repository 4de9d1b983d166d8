use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateResult, simulate_averaged};
use crate::error::SirError;
use crate::parameters::{ModelParameters, RunOptions};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case", deny_unknown_fields)]
pub enum Scenario {
    #[default]
    Normal,
    Strategy1 { new_contact_rate: f64 },
    Strategy2 { new_recover_prob: f64 },
    Strategy3 { new_num_people: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub tag: &'static str,
    pub baseline: AggregateResult,
    pub variant: Option<AggregateResult>,
}

impl Scenario {
    pub fn tag(&self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Strategy1 { .. } => "strategy1",
            Scenario::Strategy2 { .. } => "strategy2",
            Scenario::Strategy3 { .. } => "strategy3",
        }
    }

    /// Checks the new value the way requests are screened before a
    /// comparison is run: rates strictly inside (0, 1), sizes positive.
    pub fn validate(&self) -> Result<(), SirError> {
        match *self {
            Scenario::Normal => Ok(()),
            Scenario::Strategy1 { new_contact_rate } => {
                check_open_unit_interval("new contact rate", new_contact_rate)
            }
            Scenario::Strategy2 { new_recover_prob } => {
                check_open_unit_interval("new recovery probability", new_recover_prob)
            }
            Scenario::Strategy3 { new_num_people } => {
                if new_num_people == 0 {
                    Err(SirError::InvalidPopulationSize { num_people: 0 })
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn variant(&self, baseline: &ModelParameters) -> Option<ModelParameters> {
        match *self {
            Scenario::Normal => None,
            Scenario::Strategy1 { new_contact_rate } => Some(ModelParameters {
                contact_rate: new_contact_rate,
                ..*baseline
            }),
            Scenario::Strategy2 { new_recover_prob } => Some(ModelParameters {
                recover_prob: new_recover_prob,
                ..*baseline
            }),
            Scenario::Strategy3 { new_num_people } => Some(ModelParameters {
                num_people: new_num_people,
                ..*baseline
            }),
        }
    }

    /// Runs the baseline and, if any, the variant. Both share the base seed
    /// so that differences come from the changed parameter.
    pub fn run(
        &self,
        baseline: &ModelParameters,
        options: &RunOptions,
    ) -> Result<ScenarioOutcome, SirError> {
        self.validate()?;
        let variant_params = self.variant(baseline);
        if let Some(params) = &variant_params {
            params.validate()?;
        }

        let baseline_result = simulate_averaged(baseline, options)?;
        let variant_result = variant_params
            .map(|params| simulate_averaged(&params, options))
            .transpose()?;

        info!(
            "{}: baseline peak infectious fraction {:.4}{}",
            self.tag(),
            peak_fraction(&baseline_result),
            variant_result
                .as_ref()
                .map(|v| format!(", variant {:.4}", peak_fraction(v)))
                .unwrap_or_default()
        );

        Ok(ScenarioOutcome {
            tag: self.tag(),
            baseline: baseline_result,
            variant: variant_result,
        })
    }
}

fn peak_fraction(result: &AggregateResult) -> f64 {
    result
        .points
        .iter()
        .map(|point| point.fraction_infectious)
        .fold(0.0, f64::max)
}

fn check_open_unit_interval(name: &'static str, value: f64) -> Result<(), SirError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SirError::ValueOutOfRange {
            name,
            range: "(0, 1)",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn baseline() -> ModelParameters {
        ModelParameters {
            num_days: 50,
            num_people: 200,
            recover_prob: 0.1,
            contact_rate: 0.4,
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(Scenario::Normal.tag(), "normal");
        assert_eq!(
            Scenario::Strategy1 {
                new_contact_rate: 0.1
            }
            .tag(),
            "strategy1"
        );
        assert_eq!(
            Scenario::Strategy2 {
                new_recover_prob: 0.5
            }
            .tag(),
            "strategy2"
        );
        assert_eq!(
            Scenario::Strategy3 { new_num_people: 80 }.tag(),
            "strategy3"
        );
    }

    #[test]
    fn test_variant_changes_one_parameter() {
        let base = baseline();
        assert_eq!(Scenario::Normal.variant(&base), None);
        assert_eq!(
            Scenario::Strategy1 {
                new_contact_rate: 0.1
            }
            .variant(&base),
            Some(ModelParameters {
                contact_rate: 0.1,
                ..base
            })
        );
        assert_eq!(
            Scenario::Strategy2 {
                new_recover_prob: 0.6
            }
            .variant(&base),
            Some(ModelParameters {
                recover_prob: 0.6,
                ..base
            })
        );
        assert_eq!(
            Scenario::Strategy3 { new_num_people: 80 }.variant(&base),
            Some(ModelParameters {
                num_people: 80,
                ..base
            })
        );
    }

    #[test]
    fn test_normal_has_no_variant() {
        let outcome = Scenario::Normal
            .run(&baseline(), &RunOptions::default())
            .unwrap();
        assert_eq!(outcome.tag, "normal");
        assert!(outcome.variant.is_none());
        assert_eq!(outcome.baseline.points.len(), 50);
    }

    #[test]
    fn test_unchanged_variant_reproduces_baseline() {
        let outcome = Scenario::Strategy1 {
            new_contact_rate: 0.4,
        }
        .run(&baseline(), &RunOptions::default())
        .unwrap();
        assert_eq!(outcome.variant.as_ref().unwrap().points, outcome.baseline.points);
    }

    #[test]
    fn test_strategy3_normalises_each_series_separately() {
        let outcome = Scenario::Strategy3 { new_num_people: 50 }
            .run(&baseline(), &RunOptions::default())
            .unwrap();
        let variant = outcome.variant.unwrap();
        assert_eq!(variant.params.num_people, 50);
        for point in &outcome.baseline.points {
            assert_abs_diff_eq!(point.fraction_infectious, point.mean_infectious / 200.0);
        }
        for point in &variant.points {
            assert_abs_diff_eq!(point.fraction_infectious, point.mean_infectious / 50.0);
        }
    }

    #[test]
    fn test_lower_contact_rate_slows_spread() {
        let base = ModelParameters {
            num_days: 60,
            num_people: 1000,
            recover_prob: 0.05,
            contact_rate: 0.9,
        };
        let options = RunOptions {
            num_runs: 10,
            ..RunOptions::default()
        };
        let outcome = Scenario::Strategy1 {
            new_contact_rate: 0.05,
        }
        .run(&base, &options)
        .unwrap();
        let variant = outcome.variant.unwrap();
        let final_recovered = |result: &AggregateResult| result.points[59].mean_recovered;
        assert!(final_recovered(&variant) < final_recovered(&outcome.baseline));
    }

    #[test]
    fn test_validation() {
        let base = baseline();
        let options = RunOptions::default();
        for rate in [0.0, 1.0, -0.2, 3.0] {
            assert!(matches!(
                Scenario::Strategy1 {
                    new_contact_rate: rate
                }
                .run(&base, &options),
                Err(SirError::ValueOutOfRange {
                    name: "new contact rate",
                    ..
                })
            ));
        }
        assert!(matches!(
            Scenario::Strategy2 {
                new_recover_prob: 1.0
            }
            .validate(),
            Err(SirError::ValueOutOfRange {
                name: "new recovery probability",
                ..
            })
        ));
        assert_eq!(
            Scenario::Strategy3 { new_num_people: 0 }.run(&base, &options),
            Err(SirError::InvalidPopulationSize { num_people: 0 })
        );
        // Positive but too small to seed the initial infections.
        assert_eq!(
            Scenario::Strategy3 { new_num_people: 3 }.run(&base, &options),
            Err(SirError::InvalidPopulationSize { num_people: 3 })
        );
    }
}
