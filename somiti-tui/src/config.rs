//! Runtime configuration from the command line and environment.
//!
//! - first argument or `SOMITI_FIXTURE`: path of the role fixture (JSON)
//! - `SOMITI_LOG`: log level (`error`, `warn`, `info`, `debug`, `trace`, `off`)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use simplelog::LevelFilter;

pub const FIXTURE_VAR: &str = "SOMITI_FIXTURE";
pub const LOG_VAR: &str = "SOMITI_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// None means the bundled sample fixture.
    pub fixture: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixture: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_sources(
            env::args().nth(1),
            env::var(FIXTURE_VAR).ok(),
            env::var(LOG_VAR).ok(),
        )
    }

    fn from_sources(
        arg: Option<String>,
        fixture_var: Option<String>,
        log_var: Option<String>,
    ) -> Self {
        let fixture = arg
            .or(fixture_var)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_level = match log_var {
            Some(level) => LevelFilter::from_str(level.trim()).unwrap_or_else(|_| {
                eprintln!("Warning: unknown {LOG_VAR} level {level:?}, using info");
                LevelFilter::Info
            }),
            None => LevelFilter::Info,
        };

        Self { fixture, log_level }
    }
}
