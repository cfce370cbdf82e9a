//! Autoregressive forecasting over a transition mapping
//!
//! Each step looks up the current window in the mapping, emits the expected
//! value (or repeats the last window value when the pattern was never seen)
//! and slides the window forward over its own output.

use crate::pattern::Pattern;
use crate::transitions::TransitionMap;
use crate::{validate_order, CoreError, Result};
use std::collections::VecDeque;

/// Stateful forecaster holding the working window
#[derive(Debug, Clone)]
pub struct AutoregressiveForecaster {
    window: VecDeque<f64>,
}

impl AutoregressiveForecaster {
    /// Seed the window with the last `order` values of `seed`
    pub fn new(seed: &[f64], order: usize) -> Result<Self> {
        validate_order(order)?;

        if seed.len() < order {
            return Err(CoreError::InsufficientHistory {
                needed: order,
                got: seed.len(),
            });
        }

        let window: VecDeque<f64> = seed[seed.len() - order..].iter().copied().collect();
        Ok(Self { window })
    }

    /// The pattern the next step will look up
    pub fn current_pattern(&self) -> Pattern {
        Pattern::new(self.window.iter().copied().collect())
    }

    /// Produce one forecast and feed it back into the window
    pub fn step(&mut self, transitions: &TransitionMap) -> f64 {
        let pattern = self.current_pattern();
        let next_value = match transitions.get(&pattern) {
            Some(mean) => mean,
            None => {
                tracing::trace!(%pattern, "unseen pattern, repeating last value");
                // Persistence fallback
                self.window.back().copied().unwrap_or_default()
            }
        };

        self.window.pop_front();
        self.window.push_back(next_value);

        next_value
    }
}

/// Forecast `steps` values ahead of `seed`.
///
/// Only the last `order` values of `seed` are read. Every later step is
/// driven by previously forecast values, never by observed data.
pub fn forecast(
    seed: &[f64],
    transitions: &TransitionMap,
    order: usize,
    steps: usize,
) -> Result<Vec<f64>> {
    let mut forecaster = AutoregressiveForecaster::new(seed, order)?;
    let values: Vec<f64> = (0..steps).map(|_| forecaster.step(transitions)).collect();

    tracing::debug!(order, steps, patterns = transitions.len(), "forecast complete");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::extract_pairs;
    use crate::transitions::build_transitions;

    fn transitions_for(series: &[f64], order: usize) -> TransitionMap {
        build_transitions(&extract_pairs(series, order).unwrap())
    }

    #[test]
    fn test_unseen_pattern_persists() {
        let map = transitions_for(&[10.0, 12.0, 14.0, 16.0], 2);
        let values = forecast(&[14.0, 16.0], &map, 2, 2).unwrap();
        assert_eq!(values, vec![16.0, 16.0]);
    }

    #[test]
    fn test_forecast_feeds_back_output() {
        // 1 -> 2 -> 3 -> 1 cycle, order 1
        let map = transitions_for(&[1.0, 2.0, 3.0, 1.0, 2.0, 3.0], 1);
        let values = forecast(&[3.0], &map, 1, 5).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_window_slides_over_forecasts() {
        let map = transitions_for(&[1.0, 2.0, 3.0, 4.0], 2);
        let mut forecaster = AutoregressiveForecaster::new(&[0.0, 1.0, 2.0], 2).unwrap();

        assert_eq!(forecaster.current_pattern().values(), &[1.0, 2.0]);
        assert_eq!(forecaster.step(&map), 3.0);
        assert_eq!(forecaster.current_pattern().values(), &[2.0, 3.0]);
        assert_eq!(forecaster.step(&map), 4.0);
        assert_eq!(forecaster.current_pattern().values(), &[3.0, 4.0]);
        // (3, 4) never had a successor
        assert_eq!(forecaster.step(&map), 4.0);
        assert_eq!(forecaster.current_pattern().values(), &[4.0, 4.0]);
    }

    #[test]
    fn test_zero_steps() {
        let map = TransitionMap::default();
        let values = forecast(&[1.0, 2.0], &map, 2, 0).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_insufficient_history() {
        let map = TransitionMap::default();
        let err = forecast(&[1.0], &map, 3, 2).unwrap_err();
        assert_eq!(err, CoreError::InsufficientHistory { needed: 3, got: 1 });
    }

    #[test]
    fn test_seed_is_not_mutated() {
        let seed = vec![5.0, 6.0, 7.0];
        let map = transitions_for(&[6.0, 7.0, 9.0], 2);
        let values = forecast(&seed, &map, 2, 3).unwrap();

        assert_eq!(values, vec![9.0, 9.0, 9.0]);
        assert_eq!(seed, vec![5.0, 6.0, 7.0]);
    }
}
