use std::{collections::HashMap, fmt};

use ndarray::ArrayView1;
use serde::Serialize;

use crate::{
  dataset::{Movie, RatingMatrix},
  Error, Result,
};

pub const DEFAULT_TOP_N: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
  pub movie_id: u32,
  /// Empty when the movie is missing from the movie list.
  pub title: String,
  pub genres: Vec<String>,
  pub score: f32,
  /// Stars the user already gave this movie.
  pub user_rating: Option<u8>,
}

impl fmt::Display for Recommendation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:>6}  {:.6}  ", self.movie_id, self.score)?;
    match self.user_rating {
      Some(r) => write!(f, "{r}")?,
      None => write!(f, "-")?,
    }
    write!(f, "  {}", self.title)?;
    if !self.genres.is_empty() {
      write!(f, " [{}]", self.genres.join("|"))?;
    }
    Ok(())
  }
}

/// Joins a score vector (one entry per matrix column) with titles and the user's own ratings, and
/// keeps the `top_n` highest scores. Equal scores keep column order.
pub fn rank(
  scores: ArrayView1<f32>,
  matrix: &RatingMatrix,
  movies: &[Movie],
  user_id: u32,
  top_n: usize,
  unseen_only: bool,
) -> Result<Vec<Recommendation>> {
  if scores.len() != matrix.n_movies() {
    return Err(Error::ShapeMismatch {
      what: "score vector",
      got: scores.len(),
      expected: matrix.n_movies(),
    });
  }
  let by_id: HashMap<u32, &Movie> = movies.iter().map(|m| (m.movie_id, m)).collect();

  let mut ranked: Vec<Recommendation> = matrix
    .movie_ids()
    .iter()
    .zip(scores.iter())
    .enumerate()
    .map(|(column, (&movie_id, &score))| {
      let movie = by_id.get(&movie_id);
      Recommendation {
        movie_id,
        title: movie.map(|m| m.title.clone()).unwrap_or_default(),
        genres: movie.map(|m| m.genres.clone()).unwrap_or_default(),
        score,
        user_rating: matrix.raw_rating(user_id, column),
      }
    })
    .filter(|r| !unseen_only || r.user_rating.is_none())
    .collect();

  ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
  ranked.truncate(top_n);
  Ok(ranked)
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;
  use crate::dataset::Rating;

  fn fixture() -> (RatingMatrix, Vec<Movie>) {
    let ratings: Vec<Rating> = [(1, 10, 4), (1, 20, 2), (2, 30, 5), (2, 40, 3)]
      .into_iter()
      .map(|(user_id, movie_id, rating)| Rating {
        user_id,
        movie_id,
        rating,
        timestamp: 0,
      })
      .collect();
    let movies = vec![
      Movie {
        movie_id: 10,
        title: "Heat (1995)".to_string(),
        genres: vec!["Action".to_string()],
      },
      Movie {
        movie_id: 30,
        title: "Casino (1995)".to_string(),
        genres: vec![],
      },
    ];
    (RatingMatrix::pivot(&ratings).unwrap(), movies)
  }

  #[test]
  fn ranks_by_descending_score() {
    let (matrix, movies) = fixture();
    let scores = array![0.2, 0.9, 0.5, 0.9];
    let ranked = rank(scores.view(), &matrix, &movies, 1, 3, false).unwrap();

    let ids: Vec<u32> = ranked.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![20, 40, 30]);
    assert_eq!(ranked[0].user_rating, Some(2));
    assert_eq!(ranked[1].user_rating, None);
    assert_eq!(ranked[2].title, "Casino (1995)");
    assert!(ranked[0].title.is_empty());
  }

  #[test]
  fn unseen_only_drops_rated_movies() {
    let (matrix, movies) = fixture();
    let scores = array![0.2, 0.9, 0.5, 0.8];
    let ranked = rank(scores.view(), &matrix, &movies, 1, 10, true).unwrap();
    let ids: Vec<u32> = ranked.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![40, 30]);
  }

  #[test]
  fn score_length_must_match_columns() {
    let (matrix, movies) = fixture();
    let err = rank(array![0.1, 0.2].view(), &matrix, &movies, 1, 3, false).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { got: 2, expected: 4, .. }));
  }

  #[test]
  fn display_shows_rating_and_genres() {
    let (matrix, movies) = fixture();
    let ranked = rank(array![0.7, 0.1, 0.1, 0.1].view(), &matrix, &movies, 1, 1, false).unwrap();
    let line = ranked[0].to_string();
    assert!(line.contains("0.700000"), "{line}");
    assert!(line.contains("  4  Heat (1995) [Action]"), "{line}");
  }
}
