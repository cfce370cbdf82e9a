//! Fuzzy time series model with Markov-style averaged transitions

use crate::data::CleanSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use fts_core::{build_transitions, extract_pairs, FuzzyRelationship, TransitionMap};

/// Fuzzy Markov chain model
#[derive(Debug, Clone)]
pub struct FuzzyMarkovModel {
    /// Name of the model
    name: String,
    /// Lag window size
    order: usize,
}

/// Trained fuzzy Markov chain model
#[derive(Debug, Clone)]
pub struct TrainedFuzzyMarkov {
    /// Name of the model
    name: String,
    /// Lag window size
    order: usize,
    /// Relationships observed in the training data
    relationships: Vec<FuzzyRelationship>,
    /// Averaged transitions
    transitions: TransitionMap,
    /// Training values, the last `order` of which seed the forecast
    history: Vec<f64>,
}

impl FuzzyMarkovModel {
    /// Create a new fuzzy Markov chain model
    pub fn new(order: usize) -> Result<Self> {
        if order == 0 {
            return Err(ForecastError::InvalidParameter(
                "Order must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Fuzzy Markov Chain (order={})", order),
            order,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

impl ForecastModel for FuzzyMarkovModel {
    type Trained = TrainedFuzzyMarkov;

    fn train(&self, data: &CleanSeries) -> Result<Self::Trained> {
        let history = data.values().to_vec();
        let relationships = extract_pairs(&history, self.order)?;
        let transitions = build_transitions(&relationships);

        tracing::debug!(
            model = %self.name,
            observations = history.len(),
            relationships = relationships.len(),
            patterns = transitions.len(),
            "trained model"
        );

        Ok(TrainedFuzzyMarkov {
            name: self.name.clone(),
            order: self.order,
            relationships,
            transitions,
            history,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedFuzzyMarkov {
    pub fn order(&self) -> usize {
        self.order
    }

    /// Relationships in the order they occur in the training data
    pub fn relationships(&self) -> &[FuzzyRelationship] {
        &self.relationships
    }

    pub fn transitions(&self) -> &TransitionMap {
        &self.transitions
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

impl TrainedForecastModel for TrainedFuzzyMarkov {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = fts_core::forecast(&self.history, &self.transitions, self.order, horizon)?;
        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
