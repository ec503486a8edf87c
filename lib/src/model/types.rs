use std::time::Duration;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::Rbm;

pub const DEFAULT_HIDDEN_UNITS: usize = 20;
pub const DEFAULT_EPOCHS: usize = 5;
pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_CONTRASTIVE_STEPS: usize = 1;
pub const DEFAULT_LEARNING_RATE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
  pub hidden_units: usize,
  pub epochs: usize,
  /// Rows per batch. Batches only chunk the iteration; updates are applied after every row.
  pub batch_size: usize,
  /// Gibbs rounds (K) per row.
  pub contrastive_steps: usize,
  pub learning_rate: f32,
}

impl Default for Hyperparameters {
  fn default() -> Self {
    Self {
      hidden_units: DEFAULT_HIDDEN_UNITS,
      epochs: DEFAULT_EPOCHS,
      batch_size: DEFAULT_BATCH_SIZE,
      contrastive_steps: DEFAULT_CONTRASTIVE_STEPS,
      learning_rate: DEFAULT_LEARNING_RATE,
    }
  }
}

pub struct TrainParams<'a> {
  /// Users x movies, normalized ratings in [0, 1].
  pub data: ArrayView2<'a, f32>,
  pub hyper: Hyperparameters,
  /// Keep a copy of the weight matrix after every batch.
  pub snapshot_weights: bool,
}

/// Diagnostics recorded after the last row of each batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
  pub epoch: usize,
  pub batch: usize,
  /// Index of the row inside its batch.
  pub sample: usize,
  pub reconstruction_error: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TrainReport {
  pub batches: Vec<BatchRecord>,
  /// Filled only when `TrainParams::snapshot_weights` is set.
  pub weight_snapshots: Vec<Array2<f32>>,
  /// Rows processed over all epochs.
  pub iterations: usize,
  pub elapsed: Duration,
  /// Bias-corrected running average of the batch reconstruction errors.
  pub smoothed_error: f32,
}

impl TrainReport {
  pub fn last_error(&self) -> Option<f32> {
    self.batches.last().map(|r| r.reconstruction_error)
  }
}

#[derive(Debug, Clone)]
pub struct TrainedRbm {
  pub rbm: Rbm,
  pub report: TrainReport,
}
