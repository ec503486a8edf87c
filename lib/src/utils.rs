use serde::Serialize;
use std::path::Path;

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;
use rand::{rngs::StdRng, SeedableRng};
use tracing::subscriber::{DefaultGuard, SetGlobalDefaultError};

#[cfg(debug_assertions)]
extern crate better_panic;

use crate::Result;

fn subscriber() -> impl tracing::Subscriber + Send + Sync {
  let builder = tracing_subscriber::fmt().compact();

  #[cfg(debug_assertions)]
  let builder = builder.with_max_level(tracing::Level::DEBUG);
  #[cfg(not(debug_assertions))]
  let builder = builder.with_max_level(tracing::Level::INFO);

  builder.finish()
}

pub fn install_logger() -> std::result::Result<(), SetGlobalDefaultError> {
  tracing::subscriber::set_global_default(subscriber())
}

pub fn init_logging() -> std::result::Result<(), SetGlobalDefaultError> {
  // Human Panic. Only enabled when *not* debugging.
  #[cfg(not(debug_assertions))]
  {
    setup_panic!();
  }

  // Better Panic. Only enabled *when* debugging.
  #[cfg(debug_assertions)]
  {
    better_panic::Settings::debug()
      .most_recent_first(false)
      .lineno_suffix(true)
      .verbosity(better_panic::Verbosity::Full)
      .install();
  }

  install_logger()?;

  Ok(())
}

/// Thread-local subscriber for tests; logging stops when the guard is dropped.
pub fn init_logging_tests() -> DefaultGuard {
  tracing::subscriber::set_default(subscriber())
}

/// A seeded generator when `seed` is given, otherwise one seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(seed) => {
      tracing::info!("Seeding the sampler with {seed}");
      StdRng::seed_from_u64(seed)
    }
    None => {
      tracing::info!("Seeding the sampler from entropy");
      StdRng::from_entropy()
    }
  }
}

pub fn serialize_to_file<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
  let buff = serde_json::to_string_pretty(obj)?;
  std::fs::write(path, buff)?;
  Ok(())
}
