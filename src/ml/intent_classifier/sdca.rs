//! Multiclass maximum-entropy trainer using stochastic dual coordinate ascent.
//!
//! Minimises the L2-regularised softmax cross-entropy
//!
//! ```text
//! P(W) = λ/2 ‖W‖² + 1/n Σᵢ ℓ(Wᵀxᵢ, yᵢ),    ℓ(z, y) = logsumexp(z) - z_y
//! ```
//!
//! through its dual. Each example owns a dual vector `αᵢ = e_y - qᵢ` where
//! `qᵢ` is a probability distribution over classes, and the primal weights are
//! kept in sync as `W = 1/(λn) Σᵢ xᵢ αᵢᵀ`. One coordinate step moves `αᵢ`
//! towards `e_y - softmax(Wᵀxᵢ)` by
//!
//! ```text
//! s = λn / (λn + ‖xᵢ‖²)
//! ```
//!
//! which is the safe step for a 1-smooth loss. `qᵢ` stays a distribution
//! because every step is a convex combination of two distributions, so the
//! dual objective `D = -λ/2 ‖W‖² - 1/n Σᵢ Σₖ qᵢₖ ln qᵢₖ` is always defined and
//! the duality gap `P - D` gives a stopping criterion.
//!
//! The model has no intercept: an input without any known feature scores
//! exactly uniform over the classes.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{IntentError, Result};
use crate::ml::intent_classifier::featurizer::SparseVector;

/// Options for [`SdcaMaximumEntropy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdcaOptions {
    /// L2 regularisation strength. `None` picks `max(1e-6, 0.1 / n)`.
    pub l2: Option<f32>,
    /// Maximum number of passes over the training set.
    pub max_iterations: usize,
    /// Stop once `(P - D) / P` drops below this value.
    pub convergence_tolerance: f64,
    /// Seed for the per-epoch shuffle. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SdcaOptions {
    fn default() -> Self {
        Self {
            l2: None,
            max_iterations: 100,
            convergence_tolerance: 0.01,
            seed: None,
        }
    }
}

impl SdcaOptions {
    /// Set an explicit L2 regularisation strength.
    pub fn with_l2(mut self, l2: f32) -> Self {
        self.l2 = Some(l2);
        self
    }

    /// Set the maximum number of epochs.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative duality gap at which training stops.
    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    /// Make training reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(l2) = self.l2
            && !(l2 > 0.0 && l2.is_finite())
        {
            return Err(IntentError::invalid_config(format!(
                "l2 must be a positive finite number, got {l2}"
            )));
        }
        if self.max_iterations == 0 {
            return Err(IntentError::invalid_config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of one training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Epochs actually run.
    pub iterations: usize,
    /// Primal objective at the end of training.
    pub primal: f64,
    /// Dual objective at the end of training.
    pub dual: f64,
    /// Whether the convergence tolerance was reached.
    pub converged: bool,
    /// Regularisation strength that was used.
    pub l2: f32,
}

impl TrainingSummary {
    /// Duality gap `P - D`; non-negative up to rounding.
    pub fn duality_gap(&self) -> f64 {
        self.primal - self.dual
    }
}

/// Fitted linear multiclass model. Weights are stored feature-major:
/// `weights[feature * num_classes + class]`.
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: Vec<f32>,
    num_features: usize,
    num_classes: usize,
    summary: TrainingSummary,
}

impl LinearModel {
    /// Raw class margins `Wᵀx`.
    pub fn margins(&self, x: &SparseVector) -> Vec<f32> {
        let mut margins = vec![0.0f32; self.num_classes];
        for (feature, value) in x.iter() {
            // Features unknown to the model cannot occur with a shared
            // featurizer, but a stray index must not panic.
            if feature >= self.num_features {
                continue;
            }
            let row = &self.weights[feature * self.num_classes..(feature + 1) * self.num_classes];
            for (margin, weight) in margins.iter_mut().zip(row) {
                *margin += weight * value;
            }
        }
        margins
    }

    /// Class probabilities `softmax(Wᵀx)`.
    pub fn probabilities(&self, x: &SparseVector) -> Vec<f32> {
        let margins = self.margins(x);
        let mut probabilities = vec![0.0f32; margins.len()];
        softmax(&margins, &mut probabilities);
        probabilities
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Number of input features.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Training statistics.
    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }
}

/// Index of the first maximum. Returns 0 for an empty slice.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = idx;
        }
    }
    best
}

/// Numerically stable softmax.
fn softmax(input: &[f32], output: &mut [f32]) {
    debug_assert_eq!(input.len(), output.len());

    if input.is_empty() {
        return;
    }

    let max_val = input.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let mut sum = 0.0f32;
    for (inp, out) in input.iter().zip(output.iter_mut()) {
        *out = (*inp - max_val).exp();
        sum += *out;
    }

    if sum > 0.0 {
        for out in output.iter_mut() {
            *out /= sum;
        }
    }
}

/// Softmax cross-entropy `logsumexp(z) - z_y`.
fn cross_entropy(margins: &[f32], label: usize) -> f64 {
    let max_val = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let sum: f64 = margins.iter().map(|&m| (m as f64 - max_val).exp()).sum();
    max_val + sum.ln() - margins[label] as f64
}

/// SDCA trainer for multiclass maximum-entropy models.
#[derive(Debug, Clone, Default)]
pub struct SdcaMaximumEntropy {
    options: SdcaOptions,
}

impl SdcaMaximumEntropy {
    /// Create a trainer with the given options.
    pub fn new(options: SdcaOptions) -> Self {
        Self { options }
    }

    /// Trainer options.
    pub fn options(&self) -> &SdcaOptions {
        &self.options
    }

    /// Fit a model on `(features, label key)` pairs.
    ///
    /// Examples with an empty feature vector carry no information and are
    /// skipped; training fails if nothing is left.
    pub fn fit(
        &self,
        examples: &[(SparseVector, usize)],
        num_features: usize,
        num_classes: usize,
    ) -> Result<LinearModel> {
        self.options.validate()?;

        if num_classes < 2 {
            return Err(IntentError::training(format!(
                "a classifier needs at least 2 distinct intents, found {num_classes}"
            )));
        }
        if let Some((_, label)) = examples.iter().find(|(_, label)| *label >= num_classes) {
            return Err(IntentError::training(format!(
                "label key {label} is outside 0..{num_classes}"
            )));
        }

        let active: Vec<usize> = examples
            .iter()
            .enumerate()
            .filter(|(_, (x, _))| !x.is_empty())
            .map(|(idx, _)| idx)
            .collect();
        if active.is_empty() {
            return Err(IntentError::training(
                "every training example featurized to an empty vector",
            ));
        }
        if active.len() < examples.len() {
            log::warn!(
                "Skipping {} training examples with no features",
                examples.len() - active.len()
            );
        }

        let n = active.len();
        let k = num_classes;
        let l2 = self
            .options
            .l2
            .unwrap_or_else(|| (0.1 / n as f32).max(1e-6));
        let lambda_n = l2 * n as f32;

        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut weights = vec![0.0f32; num_features * k];
        // Dual variables, one row of k per active example. Start at αᵢ = 0.
        let mut alpha = vec![0.0f32; n * k];
        let mut order: Vec<usize> = (0..n).collect();
        let mut margins = vec![0.0f32; k];
        let mut probabilities = vec![0.0f32; k];

        let mut summary = TrainingSummary {
            iterations: 0,
            primal: f64::INFINITY,
            dual: f64::NEG_INFINITY,
            converged: false,
            l2,
        };

        for epoch in 0..self.options.max_iterations {
            order.shuffle(&mut rng);

            for &slot in &order {
                let (x, label) = &examples[active[slot]];
                compute_margins(&weights, k, x, &mut margins);
                softmax(&margins, &mut probabilities);

                let step = lambda_n / (lambda_n + x.squared_norm());
                let alpha_i = &mut alpha[slot * k..(slot + 1) * k];

                let mut delta = vec![0.0f32; k];
                for class in 0..k {
                    let indicator = if class == *label { 1.0 } else { 0.0 };
                    let target = indicator - probabilities[class];
                    delta[class] = step * (target - alpha_i[class]);
                    alpha_i[class] += delta[class];
                }

                for (feature, value) in x.iter() {
                    let row = &mut weights[feature * k..(feature + 1) * k];
                    for (weight, d) in row.iter_mut().zip(&delta) {
                        *weight += value * d / lambda_n;
                    }
                }
            }

            let (primal, dual) = objectives(&weights, &alpha, examples, &active, k, l2);
            summary.iterations = epoch + 1;
            summary.primal = primal;
            summary.dual = dual;

            let gap = primal - dual;
            log::debug!(
                "SDCA epoch {}: primal {:.6}, dual {:.6}, gap {:.3e}",
                epoch + 1,
                primal,
                dual,
                gap
            );

            if gap <= self.options.convergence_tolerance * primal.abs().max(f64::EPSILON) {
                summary.converged = true;
                break;
            }
        }

        if summary.converged {
            log::info!(
                "SDCA converged after {} epochs (gap {:.3e})",
                summary.iterations,
                summary.duality_gap()
            );
        } else {
            log::warn!(
                "SDCA stopped after {} epochs without reaching tolerance (gap {:.3e})",
                summary.iterations,
                summary.duality_gap()
            );
        }

        Ok(LinearModel {
            weights,
            num_features,
            num_classes: k,
            summary,
        })
    }
}

fn compute_margins(weights: &[f32], k: usize, x: &SparseVector, margins: &mut [f32]) {
    margins.iter_mut().for_each(|m| *m = 0.0);
    for (feature, value) in x.iter() {
        for (margin, weight) in margins.iter_mut().zip(&weights[feature * k..(feature + 1) * k]) {
            *margin += weight * value;
        }
    }
}

/// Primal and dual objectives for the current weights and dual variables.
fn objectives(
    weights: &[f32],
    alpha: &[f32],
    examples: &[(SparseVector, usize)],
    active: &[usize],
    k: usize,
    l2: f32,
) -> (f64, f64) {
    let n = active.len() as f64;
    let regularizer = 0.5 * l2 as f64 * weights.iter().map(|&w| (w as f64).powi(2)).sum::<f64>();

    let mut margins = vec![0.0f32; k];
    let mut loss = 0.0f64;
    let mut neg_entropy = 0.0f64;

    for (slot, &idx) in active.iter().enumerate() {
        let (x, label) = &examples[idx];
        compute_margins(weights, k, x, &mut margins);
        loss += cross_entropy(&margins, *label);

        for (class, &a) in alpha[slot * k..(slot + 1) * k].iter().enumerate() {
            let indicator = if class == *label { 1.0 } else { 0.0 };
            let q = (indicator - a as f64).max(0.0);
            if q > 0.0 {
                neg_entropy += q * q.ln();
            }
        }
    }

    let primal = regularizer + loss / n;
    let dual = -regularizer - neg_entropy / n;
    (primal, dual)
}
