use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
  dataset::{read_ratings, RatingMatrix},
  model::{run_model, Hyperparameters, TrainParams, TrainReport, TrainedRbm},
  utils::{make_rng, serialize_to_file},
  Result,
};

/// Trains on a ratings file and reports the reconstruction error per batch.
pub struct Train {
  ratings_path: PathBuf,
  hyper: Hyperparameters,
  seed: Option<u64>,
  diagnostics_path: Option<PathBuf>,
}

impl Train {
  pub fn new(
    ratings_path: &Path,
    hyper: Hyperparameters,
    seed: Option<u64>,
    diagnostics_path: Option<&Path>,
  ) -> Self {
    Self {
      ratings_path: PathBuf::from(ratings_path),
      hyper,
      seed,
      diagnostics_path: diagnostics_path.map(PathBuf::from),
    }
  }

  #[tracing::instrument(skip_all, fields(ratings = %self.ratings_path.display()))]
  pub fn run(self) -> Result<TrainReport> {
    let matrix = RatingMatrix::pivot(&read_ratings(&self.ratings_path)?)?;
    let trained = fit(&matrix, self.hyper, self.seed)?;

    if let Some(path) = &self.diagnostics_path {
      serialize_to_file(path, &trained.report.batches)?;
      info!("Wrote {} batch records to {}", trained.report.batches.len(), path.display());
    }
    Ok(trained.report)
  }
}

pub(crate) fn fit(matrix: &RatingMatrix, hyper: Hyperparameters, seed: Option<u64>) -> Result<TrainedRbm> {
  info!(
    "Loaded {} users x {} movies",
    matrix.n_users(),
    matrix.n_movies()
  );
  let mut rng = make_rng(seed);
  let params = TrainParams {
    data: matrix.values(),
    hyper,
    snapshot_weights: false,
  };
  run_model(&params, &mut rng)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{model::BatchRecord, utils::init_logging_tests};

  fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rbmrec-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
  }

  #[test]
  fn trains_from_a_ratings_file_and_writes_diagnostics() {
    let _scope = init_logging_tests();
    let ratings = write_temp(
      "train-ratings.dat",
      "1::10::5::0\n1::20::3::0\n2::20::4::0\n3::30::1::0\n3::10::2::0\n",
    );
    let diagnostics = std::env::temp_dir().join(format!("rbmrec-{}-diag.json", std::process::id()));
    let hyper = Hyperparameters {
      hidden_units: 2,
      epochs: 2,
      batch_size: 2,
      ..Hyperparameters::default()
    };

    let report = Train::new(&ratings, hyper, Some(9), Some(&diagnostics)).run().unwrap();
    assert_eq!(report.batches.len(), 4);
    assert_eq!(report.iterations, 6);

    let written: Vec<BatchRecord> =
      serde_json::from_str(&std::fs::read_to_string(&diagnostics).unwrap()).unwrap();
    assert_eq!(written, report.batches);

    std::fs::remove_file(ratings).unwrap();
    std::fs::remove_file(diagnostics).unwrap();
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let err = Train::new(
      Path::new("/nonexistent/ratings.dat"),
      Hyperparameters::default(),
      Some(1),
      None,
    )
    .run()
    .unwrap_err();
    assert!(matches!(err, crate::Error::Io(_)));
  }
}
