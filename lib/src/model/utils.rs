use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

pub fn sigmoid(x: f32) -> f32 {
  1.0 / (1.0 + (-x).exp())
}

/// Turns each probability into a binary unit: 1 iff it exceeds a fresh uniform draw in [0, 1).
/// A tie gives 0. Draws are taken in index order, one per unit.
pub fn stochastic_threshold<R: Rng + ?Sized>(probs: ArrayView1<f32>, rng: &mut R) -> Array1<f32> {
  probs.mapv(|p| {
    let draw: f32 = rng.gen();
    if p > draw {
      1.0
    } else {
      0.0
    }
  })
}

/// Mean of the squared elementwise differences.
pub fn mean_squared_error(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
  debug_assert_eq!(a.len(), b.len());
  if a.is_empty() {
    return 0.0;
  }
  let sum = Zip::from(&a)
    .and(&b)
    .fold(0.0f32, |acc, x, y| acc + (x - y) * (x - y));
  sum / a.len() as f32
}

pub struct ExponentialAverage {
  beta: f32,
  moment: f32,
  pub value: f32,
  t: i32,
}

impl ExponentialAverage {
  pub fn new(initial: f32) -> Self {
    ExponentialAverage {
      beta: 0.999,
      moment: 0.,
      value: initial,
      t: 0,
    }
  }

  pub fn update(&mut self, value: f32) {
    self.t += 1;
    self.moment = self.beta * self.moment + (1. - self.beta) * value;
    // bias correction
    self.value = self.moment / (1. - f32::powi(self.beta, self.t));
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;
  use rand::rngs::mock::StepRng;

  use super::*;

  #[test]
  fn sigmoid_of_zero_is_half() {
    assert_eq!(sigmoid(0.0), 0.5);
    assert!(sigmoid(20.0) > 0.99);
    assert!(sigmoid(-20.0) < 0.01);
  }

  #[test]
  fn threshold_with_zero_draws_fires_every_positive_unit() {
    let mut rng = StepRng::new(0, 0);
    let out = stochastic_threshold(array![0.5, 1e-6, 0.0].view(), &mut rng);
    // 0.0 > 0.0 is false, so a zero probability never fires
    assert_eq!(out, array![1.0f32, 1.0, 0.0]);
  }

  #[test]
  fn threshold_with_maximal_draws_never_fires_below_one() {
    let mut rng = StepRng::new(u64::MAX, 0);
    let out = stochastic_threshold(array![0.5, 0.99, 1.0].view(), &mut rng);
    assert_eq!(out, array![0.0f32, 0.0, 1.0]);
  }

  #[test]
  fn mse_matches_hand_computation() {
    let a = array![1.0, 0.0, 0.5, 0.0];
    let b = array![0.0, 0.0, 1.0, 1.0];
    assert!((mean_squared_error(a.view(), b.view()) - 0.5625).abs() < 1e-7);
  }

  #[test]
  fn exponential_average_of_constant_is_constant() {
    let mut avg = ExponentialAverage::new(1.0);
    for _ in 0..10 {
      avg.update(0.25);
    }
    assert!((avg.value - 0.25).abs() < 1e-4);
  }
}
