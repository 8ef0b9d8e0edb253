use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Database {
  pub workbook: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
  pub debug: bool,
  pub database: Database,
}

impl Settings {
  pub fn new() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = Config::builder()
      // the "default" configuration file
      .add_source(File::with_name("config/default"))
      // the current environment configuration file
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // local configuration file
      .add_source(File::with_name("config/local").required(false))
      .build()?;

    config.try_deserialize()
  }

  pub fn test(folder: PathBuf) -> Settings {
    Settings {
      debug: false,
      database: Database { workbook: folder.join("order-track.xlsx") },
    }
  }
}
