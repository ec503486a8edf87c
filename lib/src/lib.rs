//! Movie recommendations from a Restricted Boltzmann Machine.
//!
//! Ratings are pivoted into a dense users x movies matrix scaled to [0, 1]
//! ([`dataset::RatingMatrix`]), an [`model::Rbm`] is trained on it with per-row
//! contrastive divergence, and a user's row is reconstructed into a score per movie
//! ([`model::Rbm::score`]) that [`recommend::rank`] turns into a top-N list.
//!
//! All sampling takes an explicit [`rand::Rng`], so training is reproducible for a seed.

pub mod dataset;
mod error;
pub mod model;
pub mod recommend;
pub mod subcommands;
pub mod utils;

pub use error::{Error, Result};
