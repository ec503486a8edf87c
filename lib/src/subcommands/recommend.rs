use std::path::{Path, PathBuf};

use tracing::info;

use super::train::fit;
use crate::{
  dataset::{read_movies, read_ratings, RatingMatrix},
  model::Hyperparameters,
  recommend::{rank, Recommendation},
  Error, Result,
};

pub const DEFAULT_USER_ID: u32 = 175;

/// Trains on every user, then scores and ranks movies for one of them.
pub struct Recommend {
  ratings_path: PathBuf,
  movies_path: PathBuf,
  user_id: u32,
  top_n: usize,
  unseen_only: bool,
  hyper: Hyperparameters,
  seed: Option<u64>,
}

impl Recommend {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    ratings_path: &Path,
    movies_path: &Path,
    user_id: u32,
    top_n: usize,
    unseen_only: bool,
    hyper: Hyperparameters,
    seed: Option<u64>,
  ) -> Self {
    Self {
      ratings_path: PathBuf::from(ratings_path),
      movies_path: PathBuf::from(movies_path),
      user_id,
      top_n,
      unseen_only,
      hyper,
      seed,
    }
  }

  #[tracing::instrument(skip_all, fields(user_id = self.user_id))]
  pub fn run(self) -> Result<Vec<Recommendation>> {
    let matrix = RatingMatrix::pivot(&read_ratings(&self.ratings_path)?)?;
    let movies = read_movies(&self.movies_path)?;
    // fail before spending time on training
    if matrix.user_row(self.user_id).is_none() {
      return Err(Error::UnknownUser(self.user_id));
    }

    let trained = fit(&matrix, self.hyper, self.seed)?;
    let user = matrix
      .user_row(self.user_id)
      .ok_or(Error::UnknownUser(self.user_id))?;
    let scores = trained.rbm.score(user)?;

    let ranked = rank(
      scores.view(),
      &matrix,
      &movies,
      self.user_id,
      self.top_n,
      self.unseen_only,
    )?;
    info!("Ranked {} recommendations for user {}", ranked.len(), self.user_id);
    Ok(ranked)
  }
}
