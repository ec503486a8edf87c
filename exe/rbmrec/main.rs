mod app_config;

use rbmrec::{recommend, subcommands, utils};

use app_config::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::{error::Error, path::PathBuf};
use subcommands::DEFAULT_USER_ID;
use tracing::info;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Train on a ratings file and report the reconstruction error per batch
  Train {
    /// MovieLens ratings.dat (UserID::MovieID::Rating::Timestamp)
    #[arg(long, value_name = "PATH")]
    ratings: PathBuf,
    /// Write the per-batch reconstruction errors as JSON
    #[arg(long, value_name = "PATH")]
    diagnostics: Option<PathBuf>,
    #[command(flatten)]
    settings: Settings,
  },
  /// Train, then print the top scored movies for one user
  Recommend {
    /// MovieLens ratings.dat (UserID::MovieID::Rating::Timestamp)
    #[arg(long, value_name = "PATH")]
    ratings: PathBuf,
    /// MovieLens movies.dat (MovieID::Title::Genres)
    #[arg(long, value_name = "PATH")]
    movies: PathBuf,
    #[arg(short, long, default_value_t = DEFAULT_USER_ID)]
    user_id: u32,
    #[arg(short, long, value_name = "INT", default_value_t = recommend::DEFAULT_TOP_N)]
    top: usize,
    /// Leave out movies the user already rated
    #[arg(long)]
    unseen_only: bool,
    #[command(flatten)]
    settings: Settings,
  },
}

#[derive(Args)]
struct Settings {
  /// YAML file with training settings; flags below override it
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,
  #[arg(long, value_name = "INT")]
  hidden_units: Option<usize>,
  #[arg(short, long, value_name = "INT")]
  epochs: Option<usize>,
  #[arg(long, value_name = "INT")]
  batch_size: Option<usize>,
  /// Gibbs rounds (K) per row
  #[arg(long, value_name = "INT")]
  contrastive_steps: Option<usize>,
  #[arg(long, value_name = "FLOAT")]
  learning_rate: Option<f32>,
  #[arg(long, value_name = "INT")]
  seed: Option<u64>,
}

impl Settings {
  fn resolve(self) -> Result<AppConfig, Box<dyn Error>> {
    let file = match &self.config {
      Some(path) => AppConfig::from_file(path)?,
      None => AppConfig::default(),
    };
    let flags = AppConfig {
      hidden_units: self.hidden_units,
      epochs: self.epochs,
      batch_size: self.batch_size,
      contrastive_steps: self.contrastive_steps,
      learning_rate: self.learning_rate,
      seed: self.seed,
    };
    Ok(file.merge(flags))
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  utils::init_logging()?;
  let args = Cli::parse();

  match args.command {
    Command::Train {
      ratings,
      diagnostics,
      settings,
    } => {
      let config = settings.resolve()?;
      let app = subcommands::Train::new(
        &ratings,
        config.hyperparameters(),
        config.seed,
        diagnostics.as_deref(),
      );
      let report = app.run()?;
      if let Some(err) = report.last_error() {
        println!(
          "{} batches, final reconstruction error {:.6}",
          report.batches.len(),
          err
        );
      }
    }
    Command::Recommend {
      ratings,
      movies,
      user_id,
      top,
      unseen_only,
      settings,
    } => {
      let config = settings.resolve()?;
      let app = subcommands::Recommend::new(
        &ratings,
        &movies,
        user_id,
        top,
        unseen_only,
        config.hyperparameters(),
        config.seed,
      );
      let ranked = app.run()?;
      info!("Printing {} recommendations", ranked.len());
      println!("{:>6}  {:<8}  rated  title", "movie", "score");
      for r in ranked {
        println!("{r}");
      }
    }
  }
  Ok(())
}
