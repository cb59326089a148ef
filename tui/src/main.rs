use std::process::ExitCode;

use anyhow::{Context, Result};
use housing::{AppContext, CsvFile, DatasetCache};
use log::{error, info};

use crate::config::AppConfig;

mod app;
mod config;
mod logging;
mod state;
mod ui;

fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("housing-tui: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<()> {
    let config = config::load().context("loading configuration")?;
    logging::init(&config.log_path)?;
    info!("starting with {config:?}");

    // logger is up; later failures are logged before main prints them
    serve(&config).map_err(|e| {
        error!("{e:#}");
        e
    })
}

fn serve(config: &AppConfig) -> Result<()> {
    let cache = DatasetCache::new(CsvFile::new(&config.dataset_path));
    let ctx = AppContext::bootstrap(&cache, config.seed).with_context(|| {
        format!(
            "cannot start with dataset '{}'",
            config.dataset_path.display()
        )
    })?;

    app::run::run(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dataset_fails_before_the_page_starts() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            dataset_path: dir.path().join("absent.csv"),
            ..AppConfig::default()
        };

        let err = serve(&config).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("absent.csv"), "{message}");
        assert!(message.contains("cannot open"), "{message}");
    }
}
