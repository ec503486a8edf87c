use std::{error::Error, path::Path};

use rbmrec::model::Hyperparameters;
use serde::Deserialize;

/// Training settings, from a YAML file or the command line.
/// Also defines the config file format (every field can be omitted).
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  pub hidden_units: Option<usize>,
  pub epochs: Option<usize>,
  pub batch_size: Option<usize>,
  /// Gibbs rounds (K) per row
  pub contrastive_steps: Option<usize>,
  pub learning_rate: Option<f32>,
  /// Seed for the sampler; drawn from the OS when absent
  pub seed: Option<u64>,
}

impl AppConfig {
  pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    Self::from_yaml(&content)
  }

  pub fn from_yaml(content: &str) -> Result<Self, Box<dyn Error>> {
    Ok(serde_yaml::from_str(content)?)
  }

  // merge configs where the second overwrites the first
  pub fn merge(self, other: Self) -> Self {
    Self {
      hidden_units: other.hidden_units.or(self.hidden_units),
      epochs: other.epochs.or(self.epochs),
      batch_size: other.batch_size.or(self.batch_size),
      contrastive_steps: other.contrastive_steps.or(self.contrastive_steps),
      learning_rate: other.learning_rate.or(self.learning_rate),
      seed: other.seed.or(self.seed),
    }
  }

  pub fn hyperparameters(&self) -> Hyperparameters {
    let defaults = Hyperparameters::default();
    Hyperparameters {
      hidden_units: self.hidden_units.unwrap_or(defaults.hidden_units),
      epochs: self.epochs.unwrap_or(defaults.epochs),
      batch_size: self.batch_size.unwrap_or(defaults.batch_size),
      contrastive_steps: self.contrastive_steps.unwrap_or(defaults.contrastive_steps),
      learning_rate: self.learning_rate.unwrap_or(defaults.learning_rate),
    }
  }
}
