use std::collections::HashMap;

use itertools::Itertools;
use ndarray::{Array2, ArrayView1, ArrayView2};

use super::{Rating, MAX_RATING};
use crate::{Error, Result};

/// Dense users x movies matrix of ratings scaled to [0, 1], with 0 for "not rated".
///
/// Rows follow ascending user id and columns ascending movie id; only movies that received at
/// least one rating get a column.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
  values: Array2<f32>,
  user_ids: Vec<u32>,
  movie_ids: Vec<u32>,
  user_rows: HashMap<u32, usize>,
  movie_columns: HashMap<u32, usize>,
}

impl RatingMatrix {
  #[tracing::instrument(level = "debug", skip_all, fields(ratings = ratings.len()))]
  pub fn pivot(ratings: &[Rating]) -> Result<Self> {
    if ratings.is_empty() {
      return Err(Error::EmptyInput("no ratings to pivot"));
    }
    let user_ids: Vec<u32> = ratings.iter().map(|r| r.user_id).sorted().dedup().collect();
    let movie_ids: Vec<u32> = ratings.iter().map(|r| r.movie_id).sorted().dedup().collect();
    let user_rows = index_of(&user_ids);
    let movie_columns = index_of(&movie_ids);

    let mut values = Array2::<f32>::zeros((user_ids.len(), movie_ids.len()));
    for r in ratings {
      let cell = &mut values[[user_rows[&r.user_id], movie_columns[&r.movie_id]]];
      if *cell != 0.0 {
        return Err(Error::DuplicateRating {
          user_id: r.user_id,
          movie_id: r.movie_id,
        });
      }
      *cell = f32::from(r.rating) / f32::from(MAX_RATING);
    }
    tracing::debug!("pivoted into {} users x {} movies", user_ids.len(), movie_ids.len());

    Ok(Self {
      values,
      user_ids,
      movie_ids,
      user_rows,
      movie_columns,
    })
  }

  pub fn values(&self) -> ArrayView2<'_, f32> {
    self.values.view()
  }

  pub fn n_users(&self) -> usize {
    self.user_ids.len()
  }

  pub fn n_movies(&self) -> usize {
    self.movie_ids.len()
  }

  pub fn user_ids(&self) -> &[u32] {
    &self.user_ids
  }

  /// Movie id of every column, in column order.
  pub fn movie_ids(&self) -> &[u32] {
    &self.movie_ids
  }

  pub fn user_row(&self, user_id: u32) -> Option<ArrayView1<'_, f32>> {
    self.user_rows.get(&user_id).map(|&i| self.values.row(i))
  }

  pub fn movie_column(&self, movie_id: u32) -> Option<usize> {
    self.movie_columns.get(&movie_id).copied()
  }

  /// The star rating `user_id` gave the movie in `column`, if any.
  pub fn raw_rating(&self, user_id: u32, column: usize) -> Option<u8> {
    let row = *self.user_rows.get(&user_id)?;
    let value = *self.values.get([row, column])?;
    (value > 0.0).then(|| (value * f32::from(MAX_RATING)).round() as u8)
  }
}

fn index_of(ids: &[u32]) -> HashMap<u32, usize> {
  ids.iter().enumerate().map(|(i, &id)| (id, i)).collect()
}
