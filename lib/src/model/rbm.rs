use std::time::Instant;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;
use tracing::{debug, info};

use super::{
  mean_squared_error, sigmoid, stochastic_threshold, BatchRecord, ExponentialAverage, TrainParams,
  TrainReport,
};
use crate::{Error, Result};

/// Restricted Boltzmann Machine over binary hidden units.
///
/// `weights` is `n_visible x n_hidden`. All parameters start at zero and keep their shape for the
/// lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rbm {
  weights: Array2<f32>,
  visible_bias: Array1<f32>,
  hidden_bias: Array1<f32>,
}

impl Rbm {
  pub fn new(n_visible: usize, n_hidden: usize) -> Self {
    Self {
      weights: Array2::zeros((n_visible, n_hidden)),
      visible_bias: Array1::zeros(n_visible),
      hidden_bias: Array1::zeros(n_hidden),
    }
  }

  pub fn n_visible(&self) -> usize {
    self.visible_bias.len()
  }

  pub fn n_hidden(&self) -> usize {
    self.hidden_bias.len()
  }

  pub fn weights(&self) -> &Array2<f32> {
    &self.weights
  }

  pub fn visible_bias(&self) -> &Array1<f32> {
    &self.visible_bias
  }

  pub fn hidden_bias(&self) -> &Array1<f32> {
    &self.hidden_bias
  }

  /// sigmoid(v · W + hb)
  pub fn hidden_probabilities(&self, visible: ArrayView1<f32>) -> Array1<f32> {
    (visible.dot(&self.weights) + &self.hidden_bias).mapv_into(sigmoid)
  }

  /// sigmoid(h · Wᵀ + vb)
  pub fn visible_probabilities(&self, hidden: ArrayView1<f32>) -> Array1<f32> {
    (self.weights.dot(&hidden) + &self.visible_bias).mapv_into(sigmoid)
  }

  /// Binary hidden state sampled from `visible`. Consumes one draw per hidden unit.
  pub fn sample_hidden<R: Rng + ?Sized>(&self, visible: ArrayView1<f32>, rng: &mut R) -> Array1<f32> {
    stochastic_threshold(self.hidden_probabilities(visible).view(), rng)
  }

  /// Binary visible state reconstructed from `hidden`. Consumes one draw per visible unit.
  pub fn reconstruct_visible<R: Rng + ?Sized>(
    &self,
    hidden: ArrayView1<f32>,
    rng: &mut R,
  ) -> Array1<f32> {
    stochastic_threshold(self.visible_probabilities(hidden).view(), rng)
  }

  /// Runs `steps` contrastive-divergence rounds starting from `row`, updating the parameters after
  /// each round. Every round starts from the previous round's reconstruction. Returns the last
  /// reconstruction.
  pub fn contrastive_divergence<R: Rng + ?Sized>(
    &mut self,
    row: ArrayView1<f32>,
    steps: usize,
    learning_rate: f32,
    rng: &mut R,
  ) -> Array1<f32> {
    let mut v0 = row.to_owned();
    for _ in 0..steps {
      let h0 = self.sample_hidden(v0.view(), rng);
      let v1 = self.reconstruct_visible(h0.view(), rng);
      let h1 = self.sample_hidden(v1.view(), rng);

      let positive = outer(v0.view(), h0.view());
      let negative = outer(v1.view(), h1.view());
      self.weights.scaled_add(learning_rate, &(positive - negative));

      // batch of one row: the mean over the batch axis is the plain difference
      self.visible_bias.scaled_add(learning_rate, &(&v0 - &v1));
      self.hidden_bias.scaled_add(learning_rate, &(&h0 - &h1));

      v0 = v1;
    }
    v0
  }

  /// Trains in place over `params.data` and reports per-batch diagnostics.
  #[tracing::instrument(level = "debug", skip_all)]
  pub fn train<R: Rng + ?Sized>(&mut self, params: &TrainParams, rng: &mut R) -> Result<TrainReport> {
    let data = params.data;
    let hyper = &params.hyper;
    let (n_rows, n_cols) = data.dim();
    if n_rows == 0 {
      return Err(Error::EmptyInput("rating matrix has no users"));
    }
    if n_cols == 0 {
      return Err(Error::EmptyInput("rating matrix has no movies"));
    }
    if n_cols != self.n_visible() {
      return Err(Error::ShapeMismatch {
        what: "rating matrix columns",
        got: n_cols,
        expected: self.n_visible(),
      });
    }
    if hyper.hidden_units != self.n_hidden() {
      return Err(Error::ShapeMismatch {
        what: "hidden units",
        got: hyper.hidden_units,
        expected: self.n_hidden(),
      });
    }
    if hyper.batch_size == 0 {
      return Err(Error::InvalidParameter("batch size must be at least 1"));
    }
    if hyper.contrastive_steps == 0 {
      return Err(Error::InvalidParameter("contrastive steps must be at least 1"));
    }

    let n_batches = n_rows.div_ceil(hyper.batch_size);
    info!(
      "Training on {n_rows} users x {n_cols} movies: {} epochs, {n_batches} batches of {}, K={}, lr={}",
      hyper.epochs, hyper.batch_size, hyper.contrastive_steps, hyper.learning_rate
    );

    let mut report = TrainReport::default();
    let mut error_avg = ExponentialAverage::new(0.0);
    let start = Instant::now();

    for epoch in 0..hyper.epochs {
      for (batch, rows) in data.axis_chunks_iter(Axis(0), hyper.batch_size).enumerate() {
        let last = rows.nrows() - 1;
        for (sample, row) in rows.axis_iter(Axis(0)).enumerate() {
          let v1 =
            self.contrastive_divergence(row, hyper.contrastive_steps, hyper.learning_rate, rng);
          report.iterations += 1;

          if sample == last {
            let reconstruction_error = mean_squared_error(row, v1.view());
            error_avg.update(reconstruction_error);
            info!(
              "Epoch: {} batch #: {batch} of {n_batches} sample #: {sample} reconstruction error: {reconstruction_error:.6}",
              epoch + 1
            );
            report.batches.push(BatchRecord {
              epoch,
              batch,
              sample,
              reconstruction_error,
            });
            if params.snapshot_weights {
              report.weight_snapshots.push(self.weights.clone());
            }
          }
        }
      }
      debug!("epoch {} done, smoothed error {:.6}", epoch + 1, error_avg.value);
    }

    report.elapsed = start.elapsed();
    report.smoothed_error = error_avg.value;
    if report.iterations > 0 {
      info!("Finished in {} iterations", report.iterations);
      info!(
        "Took {:.2}s, {:.2}µs / iter",
        report.elapsed.as_secs_f32(),
        report.elapsed.as_micros() / report.iterations as u128
      );
    }
    Ok(report)
  }

  /// Deterministic reconstruction of `user`: hidden probabilities are propagated back without
  /// sampling. The result holds one affinity in (0, 1) per visible unit.
  pub fn score(&self, user: ArrayView1<f32>) -> Result<Array1<f32>> {
    if user.len() != self.n_visible() {
      return Err(Error::ShapeMismatch {
        what: "user vector",
        got: user.len(),
        expected: self.n_visible(),
      });
    }
    let hidden = self.hidden_probabilities(user);
    Ok(self.visible_probabilities(hidden.view()))
  }
}

fn outer(a: ArrayView1<f32>, b: ArrayView1<f32>) -> Array2<f32> {
  let a = a.insert_axis(Axis(1));
  let b = b.insert_axis(Axis(0));
  a.dot(&b)
}
