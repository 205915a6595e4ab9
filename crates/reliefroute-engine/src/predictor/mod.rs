//! Demand prediction with a linear model trained by stochastic gradient descent.
//!
//! The predictor maps a feature vector to a demand scalar. Training reads only
//! the last observation of each area's history as the target, paired by
//! position with the feature vectors. This is a simplification, not a
//! time-series fit.
//!
//! Logging levels:
//! - **INFO**: Training start/end with row count and final loss
//! - **DEBUG**: Per-epoch mean squared error
//! - **TRACE**: Individual predictions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use reliefroute_config::{EngineConfig, PredictorConfig};
use reliefroute_core::{AreaId, ReliefError, Result};


/// Historical demand observations per area, in insertion order.
///
/// # Examples
///
/// ```
/// use reliefroute_engine::TrainingSet;
///
/// let mut set = TrainingSet::new();
/// set.insert("area1", vec![100.0, 120.0, 102.0]);
/// set.insert("area2", vec![150.0, 158.0]);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.targets(), vec![102.0, 158.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    histories: Vec<(AreaId, Vec<f64>)>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(area, observations)` pairs.
    pub fn from_histories<I, K>(histories: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<AreaId>,
    {
        let mut set = Self::new();
        for (area, observations) in histories {
            set.insert(area, observations);
        }
        set
    }

    /// Sets the history of an area.
    ///
    /// Replacing an existing area keeps its original position.
    pub fn insert(&mut self, area: impl Into<AreaId>, observations: Vec<f64>) {
        let area = area.into();
        match self.histories.iter_mut().find(|(id, _)| *id == area) {
            Some((_, existing)) => *existing = observations,
            None => self.histories.push((area, observations)),
        }
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Returns the history of an area.
    pub fn history(&self, area: &str) -> Option<&[f64]> {
        self.histories
            .iter()
            .find(|(id, _)| id.as_str() == area)
            .map(|(_, observations)| observations.as_slice())
    }

    /// Iterates `(area, observations)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AreaId, &[f64])> + '_ {
        self.histories
            .iter()
            .map(|(id, observations)| (id, observations.as_slice()))
    }

    /// Last observation of every non-empty history, in insertion order.
    pub fn targets(&self) -> Vec<f64> {
        self.histories
            .iter()
            .filter_map(|(_, observations)| observations.last().copied())
            .collect()
    }
}

/// Weights (one per feature) plus a bias.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearModel {
    /// Creates a model from explicit parameters.
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self> {
        if weights.is_empty() {
            return Err(ReliefError::validation("model needs at least one weight"));
        }
        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ReliefError::Domain("model parameters must be finite".into()));
        }
        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of features the model was trained on.
    pub fn arity(&self) -> usize {
        self.weights.len()
    }

    /// `bias + Σ weight·feature`, without flooring or buffering.
    ///
    /// Callers must check the arity first.
    #[inline]
    pub fn predict_raw(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .fold(self.bias, |acc, (w, x)| acc + w * x)
    }

    fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}

/// Summary of one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrainingReport {
    /// Epochs run.
    pub epochs: usize,
    /// Training rows per epoch.
    pub rows: usize,
    /// Feature arity.
    pub arity: usize,
    /// Mean squared error observed during the last epoch.
    pub final_mse: f64,
}

/// Linear demand predictor.
///
/// Starts untrained; [`train`](Self::train) replaces the model wholesale.
/// `train` takes `&mut self` and `predict` takes `&self`, so concurrent use
/// of one instance must go through the caller's own synchronization.
///
/// # Examples
///
/// ```
/// use reliefroute_engine::{DemandPredictor, TrainingSet};
///
/// let mut predictor = DemandPredictor::with_seed(42);
/// assert!(predictor.predict(&[1.0, 26.0]).is_err());
///
/// let set = TrainingSet::from_histories([
///     ("area1", vec![100.0, 102.0]),
///     ("area2", vec![150.0, 158.0]),
/// ]);
/// let features = vec![vec![1.0, 25.0], vec![2.0, 26.0]];
/// predictor.train(&set, &features).unwrap();
///
/// assert!(predictor.predict(&[1.0, 26.0]).unwrap() >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DemandPredictor {
    config: PredictorConfig,
    rng: ChaCha8Rng,
    model: Option<LinearModel>,
}

impl Default for DemandPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandPredictor {
    /// Creates an untrained predictor with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::build(PredictorConfig::default(), None)
    }

    /// Creates an untrained predictor whose weight initialization is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(PredictorConfig::default(), Some(seed))
    }

    /// Creates an untrained predictor from engine configuration.
    ///
    /// # Errors
    ///
    /// `Validation` if the predictor settings are out of range.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::with_config(config.predictor.clone(), config.effective_seed())
    }

    /// Creates an untrained predictor with explicit settings.
    ///
    /// # Errors
    ///
    /// `Validation` if `epochs` is zero, the learning rate is not positive,
    /// or the safety buffer is negative or non-finite.
    pub fn with_config(config: PredictorConfig, seed: Option<u64>) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self::build(config, seed))
    }

    /// Creates a trained predictor from an existing model.
    ///
    /// # Errors
    ///
    /// `Validation` if the settings are out of range, as for
    /// [`with_config`](Self::with_config).
    pub fn from_model(model: LinearModel, config: PredictorConfig) -> Result<Self> {
        let mut predictor = Self::with_config(config, None)?;
        predictor.model = Some(model);
        Ok(predictor)
    }

    fn build(config: PredictorConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut StdRng::from_os_rng()),
        };
        Self {
            config,
            rng,
            model: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&LinearModel> {
        self.model.as_ref()
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Trains a fresh model.
    ///
    /// Row `i` pairs `features[i]` with the last observation of the i-th area
    /// in `set`. Weights and bias start uniformly in `[-1, 1]`; then
    /// `epochs` passes of plain SGD run over the rows in order.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty inputs, ragged or zero-width feature vectors,
    ///   empty histories, or mismatched row counts.
    /// - `Domain` for non-finite inputs or if the parameters diverge. The
    ///   previous model, if any, is kept.
    pub fn train(&mut self, set: &TrainingSet, features: &[Vec<f64>]) -> Result<TrainingReport> {
        let targets = validate_training_input(set, features)?;
        let arity = features[0].len();
        let rows = features.len();
        let epochs = self.config.epochs;
        let learning_rate = self.config.learning_rate;

        info!(
            event = "training_start",
            rows = rows as u64,
            arity = arity as u64,
            epochs = epochs as u64,
        );

        let mut weights: Vec<f64> = (0..arity)
            .map(|_| self.rng.random_range(-1.0..=1.0))
            .collect();
        let mut bias: f64 = self.rng.random_range(-1.0..=1.0);

        let mut final_mse = 0.0;
        for epoch in 0..epochs {
            let mut squared_error = 0.0;
            for (row, &target) in features.iter().zip(&targets) {
                let prediction = row.iter().zip(&weights).fold(bias, |acc, (x, w)| acc + w * x);
                let error = prediction - target;
                squared_error += error * error;

                for (w, x) in weights.iter_mut().zip(row) {
                    *w -= learning_rate * error * x;
                }
                bias -= learning_rate * error;
            }
            final_mse = squared_error / rows as f64;
            debug!(event = "epoch", epoch = epoch as u64, mse = final_mse);
        }

        let model = LinearModel { weights, bias };
        if !model.is_finite() || !final_mse.is_finite() {
            return Err(ReliefError::Domain(
                "training diverged to non-finite parameters; lower the learning rate".into(),
            ));
        }
        self.model = Some(model);

        info!(event = "training_end", rows = rows as u64, mse = final_mse);

        Ok(TrainingReport {
            epochs,
            rows,
            arity,
            final_mse,
        })
    }

    /// Predicts demand: `max(0, bias + Σ w·x) × safety_buffer`.
    ///
    /// # Errors
    ///
    /// `NotReady` before training, `ArityMismatch` if the feature count
    /// differs from the trained weights, `Domain` for non-finite features.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let model = self.model.as_ref().ok_or(ReliefError::NotReady)?;
        if features.len() != model.arity() {
            return Err(ReliefError::ArityMismatch {
                expected: model.arity(),
                found: features.len(),
            });
        }
        if let Some(bad) = features.iter().find(|x| !x.is_finite()) {
            return Err(ReliefError::Domain(format!(
                "features must be finite, got {bad}"
            )));
        }

        let raw = model.predict_raw(features);
        let prediction = raw.max(0.0) * self.config.safety_buffer;
        trace!(event = "prediction", raw, prediction);
        Ok(prediction)
    }
}

// Checks shapes and finiteness, returning the per-row targets.
fn validate_config(config: &PredictorConfig) -> Result<()> {
    config
        .validate()
        .map_err(|err| ReliefError::validation(err.to_string()))
}

fn validate_training_input(set: &TrainingSet, features: &[Vec<f64>]) -> Result<Vec<f64>> {
    let Some(first) = features.first() else {
        return Err(ReliefError::validation("feature vectors must not be empty"));
    };
    let arity = first.len();
    if arity == 0 {
        return Err(ReliefError::validation(
            "feature vectors need at least one dimension",
        ));
    }
    if let Some((i, row)) = features.iter().enumerate().find(|(_, row)| row.len() != arity) {
        return Err(ReliefError::validation(format!(
            "feature vector {i} has {} dimensions, expected {arity}",
            row.len()
        )));
    }
    if features.iter().flatten().any(|x| !x.is_finite()) {
        return Err(ReliefError::Domain("feature values must be finite".into()));
    }

    if set.is_empty() {
        return Err(ReliefError::validation("training set must not be empty"));
    }
    if let Some((area, _)) = set.iter().find(|(_, observations)| observations.is_empty()) {
        return Err(ReliefError::validation(format!(
            "history of area {area} is empty"
        )));
    }
    if set.len() != features.len() {
        return Err(ReliefError::validation(format!(
            "training set has {} areas but {} feature vectors were given",
            set.len(),
            features.len()
        )));
    }

    let targets = set.targets();
    if targets.iter().any(|y| !y.is_finite()) {
        return Err(ReliefError::Domain("observations must be finite".into()));
    }
    Ok(targets)
}
