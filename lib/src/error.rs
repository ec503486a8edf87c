use std::fmt;

/// Errors produced while loading ratings, training or scoring.
#[derive(Debug)]
pub enum Error {
  /// Zero users or zero movies where at least one is required.
  EmptyInput(&'static str),

  /// A dimension did not match the one the model was built for.
  ShapeMismatch {
    /// What was being checked (e.g. "rating matrix columns").
    what: &'static str,
    got: usize,
    expected: usize,
  },

  /// A hyperparameter is outside its valid range.
  InvalidParameter(&'static str),

  /// A line of a `::`-delimited data file could not be parsed.
  Parse { line: usize, reason: String },

  /// The same user rated the same movie more than once.
  DuplicateRating { user_id: u32, movie_id: u32 },

  /// The requested user has no row in the rating matrix.
  UnknownUser(u32),

  Io(std::io::Error),
  Json(serde_json::Error),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::EmptyInput(what) => write!(f, "empty input: {what}"),
      Error::ShapeMismatch { what, got, expected } => {
        write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
      }
      Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
      Error::Parse { line, reason } => write!(f, "line {line}: {reason}"),
      Error::DuplicateRating { user_id, movie_id } => {
        write!(f, "user {user_id} rated movie {movie_id} more than once")
      }
      Error::UnknownUser(user_id) => write!(f, "user {user_id} has no ratings"),
      Error::Io(e) => write!(f, "io error: {e}"),
      Error::Json(e) => write!(f, "json error: {e}"),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Io(e) => Some(e),
      Error::Json(e) => Some(e),
      _ => None,
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Error::Io(e)
  }
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self {
    Error::Json(e)
  }
}

pub type Result<T> = std::result::Result<T, Error>;
