//! Claim-success scoring.
//!
//! A logistic regression fitted on the current claim history predicts how
//! likely a new claim against a listing with given characteristics is to end
//! up `Completed`. The model is never stored; callers refit it from the
//! database whenever they need one.

mod encoder;
use encoder::Encoder;

mod logistic;
use logistic::Logistic;

mod split;

use crate::Db;

use foodshare_core::{err, Error, Result};

use std::fmt;

/// L2 regularization strength; smaller means stronger regularization.
const C: f64 = 1.0;

/// Newton iterations allowed when fitting.
const MAX_ITERATIONS: usize = 200;

/// Percentage of the history held out for measuring accuracy.
const TEST_PERCENT: usize = 20;

/// Seed for the train/test shuffle, so fits are reproducible.
const SEED: u64 = 42;

/// Quantity assumed when a caller has none to offer.
pub const DEFAULT_QUANTITY: u64 = 50;

/// The listing characteristics the model scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub quantity: u64,
    pub provider_type: Option<String>,
    pub location: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

/// One historical claim.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub candidate: Candidate,
    pub completed: bool,
}

/// Every claim joined with the listing it was made against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimHistory {
    pub samples: Vec<Sample>,
}

impl ClaimHistory {
    /// Reads the history from `db`. Claims whose listing no longer exists
    /// are kept with empty features.
    pub fn load(db: &Db) -> Result<ClaimHistory> {
        let samples = db
            .query(
                "SELECT c.status, f.quantity, f.provider_type, f.location, f.food_type, \
                 f.meal_type FROM claims c LEFT JOIN food_listings f ON f.food_id = c.food_id \
                 ORDER BY c.claim_id",
                &[],
            )?
            .map_rows(|row| {
                let status: Option<String> = row.get("status")?;
                let quantity = match row.get::<Option<i64>>("quantity")? {
                    Some(q) => u64::try_from(q).map_err(|_| Error::negative_quantity(q))?,
                    None => 0,
                };
                Ok(Sample {
                    candidate: Candidate {
                        quantity,
                        provider_type: row.get("provider_type")?,
                        location: row.get("location")?,
                        food_type: row.get("food_type")?,
                        meal_type: row.get("meal_type")?,
                    },
                    completed: status.is_some_and(|s| s.trim().eq_ignore_ascii_case("completed")),
                })
            })?;

        Ok(ClaimHistory { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of completed claims.
    pub fn completed(&self) -> usize {
        self.samples.iter().filter(|s| s.completed).count()
    }
}

/// Fits a model on `history`.
///
/// Fails with an insufficient-data error unless both outcomes appear at least
/// twice, which the stratified train/test split needs.
pub fn fit(history: &ClaimHistory) -> Result<Model> {
    let labels: Vec<bool> = history.samples.iter().map(|s| s.completed).collect();
    let (train, test) = split::stratified(&labels, TEST_PERCENT, SEED)?;

    let encoder = Encoder::fit(train.iter().map(|&i| &history.samples[i].candidate));
    let encode = |indices: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
        indices
            .iter()
            .map(|&i| {
                let sample = &history.samples[i];
                (
                    encoder.encode(&sample.candidate),
                    if sample.completed { 1.0 } else { 0.0 },
                )
            })
            .unzip()
    };

    let (train_x, train_y) = encode(&train);
    let classifier = Logistic::train(&train_x, &train_y, C, MAX_ITERATIONS);

    let (test_x, test_y) = encode(&test);
    let correct = test_x
        .iter()
        .zip(&test_y)
        .filter(|&(x, &y)| (classifier.probability(x) > 0.5) == (y == 1.0))
        .count();

    let summary = ModelSummary {
        train_size: train.len(),
        test_size: test.len(),
        accuracy: correct as f64 / test.len() as f64,
        positive_rate: history.completed() as f64 / history.len() as f64,
        iterations: classifier.iterations,
    };

    log::info!(
        "fitted claim-success model; train={} test={} accuracy={:.3} iterations={}",
        summary.train_size,
        summary.test_size,
        summary.accuracy,
        summary.iterations
    );

    Ok(Model {
        encoder,
        classifier,
        summary,
    })
}

/// A fitted claim-success model.
#[derive(Debug, Clone)]
pub struct Model {
    encoder: Encoder,
    classifier: Logistic,
    summary: ModelSummary,
}

impl Model {
    /// Loads the claim history from `db` and fits on it.
    pub fn fit_from(db: &Db) -> Result<Model> {
        let history = ClaimHistory::load(db)?;
        fit(&history).map_err(|err| {
            err.context(err!(
                "cannot fit claim-success model on {} claims",
                history.len()
            ))
        })
    }

    pub fn predict(&self, candidate: &Candidate) -> Prediction {
        let probability = self
            .classifier
            .probability(&self.encoder.encode(candidate))
            .clamp(0.0, 1.0);
        Prediction::new(probability)
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    /// Fitted weight of each feature, strongest influence first.
    ///
    /// Categorical features are named `column=value`; a missing value is
    /// shown as `column=<none>`.
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        let mut coefficients: Vec<_> = self
            .encoder
            .feature_names()
            .into_iter()
            .zip(self.classifier.weights.iter().copied())
            .collect();
        coefficients.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        coefficients
    }
}

/// How a model was fitted and how well it did on held-out claims.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub train_size: usize,
    pub test_size: usize,
    /// Share of held-out claims classified correctly
    pub accuracy: f64,
    /// Share of all claims that completed
    pub positive_rate: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Probability that the claim completes
    pub probability: f64,
    /// `max(p, 1 - p)`
    pub confidence: f64,
    pub outlook: Outlook,
}

impl Prediction {
    fn new(probability: f64) -> Prediction {
        Prediction {
            probability,
            confidence: probability.max(1.0 - probability),
            outlook: Outlook::from_probability(probability),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outlook {
    High,
    Moderate,
    Low,
}

impl Outlook {
    pub fn from_probability(p: f64) -> Outlook {
        if p > 0.7 {
            Outlook::High
        } else if p > 0.4 {
            Outlook::Moderate
        } else {
            Outlook::Low
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outlook::High => "high",
            Outlook::Moderate => "moderate",
            Outlook::Low => "low",
        })
    }
}
