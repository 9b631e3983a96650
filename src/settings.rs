//! Numeric configuration of a [`Task`](crate::Task).

use crate::task::TaskError;

/// A settings object holding the numeric knobs of a run.
///
/// You should usually start from the default and reassign fields:
/// ```
/// let mut settings = geneloop::Settings::default();
/// settings.population_size = 50;
/// settings.minimize = true;
/// assert!(settings.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Whether lower scores are better.
    pub minimize: bool,
    /// Probability that a child's second parent is drawn uniformly instead of
    /// reusing the roulette-selected parent.
    pub crossover_probability: f64,
    /// Probability that a freshly bred child is mutated.
    pub mutation_probability: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population_size: 10,
            minimize: false,
            crossover_probability: 0.0,
            mutation_probability: 0.0,
        }
    }
}

impl Settings {
    /// Checks that the settings describe a runnable task.
    ///
    /// # Errors
    /// Returns [`TaskError::InvalidPopulationSize`] for an empty population and
    /// [`TaskError::InvalidProbability`] for probabilities that are NaN or
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.population_size == 0 {
            return Err(TaskError::InvalidPopulationSize(self.population_size));
        }
        check_probability("crossover_probability", self.crossover_probability)?;
        check_probability("mutation_probability", self.mutation_probability)?;
        Ok(())
    }
}

fn check_probability(parameter: &'static str, value: f64) -> Result<(), TaskError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TaskError::InvalidProbability { parameter, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.population_size, 10);
        assert!(!settings.minimize);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_population_is_rejected() {
        let settings = Settings {
            population_size: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(TaskError::InvalidPopulationSize(0))
        ));
    }

    #[test]
    fn probabilities_must_be_in_unit_interval() {
        for value in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let settings = Settings {
                mutation_probability: value,
                ..Settings::default()
            };
            let err = settings.validate().unwrap_err();
            assert!(matches!(
                err,
                TaskError::InvalidProbability {
                    parameter: "mutation_probability",
                    ..
                }
            ));
        }
        let boundary = Settings {
            crossover_probability: 1.0,
            mutation_probability: 0.0,
            ..Settings::default()
        };
        assert!(boundary.validate().is_ok());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_input_falls_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"population_size": 40, "minimize": true}"#).unwrap();
        assert_eq!(settings.population_size, 40);
        assert!(settings.minimize);
        assert_eq!(settings.crossover_probability, 0.0);
        assert_eq!(settings.mutation_probability, 0.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings {
            population_size: 12,
            minimize: true,
            crossover_probability: 0.75,
            mutation_probability: 0.25,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }
}
