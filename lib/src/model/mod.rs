pub mod rbm;
pub mod types;
pub mod utils;

use rand::Rng;
use tracing::info;

pub use rbm::*;
pub use types::*;
pub use utils::*;

use crate::Result;

/// Builds a zeroed RBM sized to the rating matrix and trains it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_model<R: Rng + ?Sized>(params: &TrainParams, rng: &mut R) -> Result<TrainedRbm> {
  let mut rbm = Rbm::new(params.data.ncols(), params.hyper.hidden_units);
  let report = rbm.train(params, rng)?;
  if let Some(err) = report.last_error() {
    info!(
      "Final reconstruction error {:.6} (smoothed {:.6})",
      err, report.smoothed_error
    );
  }
  Ok(TrainedRbm { rbm, report })
}
