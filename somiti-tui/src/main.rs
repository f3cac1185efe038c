mod app;
mod config;
mod error;
mod fixture;
mod form;
mod paths;

use std::fs::{self, File};
use std::process::ExitCode;

use simplelog::{Config as LogConfig, WriteLogger};

use crate::app::RoleEditor;
use crate::config::Config;
use crate::error::AppError;
use crate::fixture::RoleFixture;

/// Log to a file under the data directory; the terminal owns stdout.
fn init_logging(config: &Config) {
    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no home directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Warning: failed to create log directory {}: {e}", dir.display());
        }
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(config.log_level, LogConfig::default(), file) {
                eprintln!("Warning: failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Warning: cannot create {}: {e}", path.display()),
    }
}

async fn run(config: Config) -> Result<Option<String>, AppError> {
    let fixture = RoleFixture::load(config.fixture.as_deref())?;
    let submitted = RoleEditor::new(fixture).run().await?;
    submitted
        .map(|form| serde_json::to_string_pretty(&form))
        .transpose()
        .map_err(AppError::from)
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_logging(&config);
    log::info!("somiti-tui starting with {config:?}");

    match run(config).await {
        Ok(Some(payload)) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
