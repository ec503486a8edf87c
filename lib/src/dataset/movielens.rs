use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const SEPARATOR: &str = "::";
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
  pub user_id: u32,
  pub movie_id: u32,
  /// Stars, 1 to 5.
  pub rating: u8,
  pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub movie_id: u32,
  pub title: String,
  pub genres: Vec<String>,
}

/// MovieLens files are Latin-1; every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
  bytes.iter().map(|&b| b as char).collect()
}

fn read_latin1(path: &Path) -> Result<String> {
  Ok(decode_latin1(&std::fs::read(path)?))
}

fn field<T: std::str::FromStr>(raw: &str, name: &str, line: usize) -> Result<T> {
  raw.trim().parse::<T>().map_err(|_| Error::Parse {
    line,
    reason: format!("invalid {name} {raw:?}"),
  })
}

/// Parses `UserID::MovieID::Rating::Timestamp` lines. Blank lines are skipped.
pub fn parse_ratings(content: &str) -> Result<Vec<Rating>> {
  let mut ratings = Vec::new();
  for (idx, line) in content.lines().enumerate() {
    let line_no = idx + 1;
    if line.trim().is_empty() {
      continue;
    }
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() != 4 {
      return Err(Error::Parse {
        line: line_no,
        reason: format!("expected 4 fields, found {}", parts.len()),
      });
    }
    let rating: u8 = field(parts[2], "rating", line_no)?;
    if !(1..=MAX_RATING).contains(&rating) {
      return Err(Error::Parse {
        line: line_no,
        reason: format!("rating {rating} outside 1..={MAX_RATING}"),
      });
    }
    ratings.push(Rating {
      user_id: field(parts[0], "user id", line_no)?,
      movie_id: field(parts[1], "movie id", line_no)?,
      rating,
      timestamp: field(parts[3], "timestamp", line_no)?,
    });
  }
  Ok(ratings)
}

/// Parses `MovieID::Title::Genres` lines; genres are `|`-separated.
pub fn parse_movies(content: &str) -> Result<Vec<Movie>> {
  let mut movies = Vec::new();
  for (idx, line) in content.lines().enumerate() {
    let line_no = idx + 1;
    if line.trim().is_empty() {
      continue;
    }
    let mut parts = line.splitn(2, SEPARATOR);
    let movie_id = field(parts.next().unwrap_or_default(), "movie id", line_no)?;
    // titles never contain the separator, so the genres are whatever follows the last one
    let rest = parts.next().ok_or_else(|| Error::Parse {
      line: line_no,
      reason: "missing title".to_string(),
    })?;
    let (title, genres) = rest.rsplit_once(SEPARATOR).ok_or_else(|| Error::Parse {
      line: line_no,
      reason: "missing genres".to_string(),
    })?;
    movies.push(Movie {
      movie_id,
      title: title.to_string(),
      genres: genres
        .split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect(),
    });
  }
  Ok(movies)
}

pub fn read_ratings(path: &Path) -> Result<Vec<Rating>> {
  parse_ratings(&read_latin1(path)?)
}

pub fn read_movies(path: &Path) -> Result<Vec<Movie>> {
  parse_movies(&read_latin1(path)?)
}
