mod cli;
pub mod media;
pub mod models;
pub mod scan;
pub mod settings;
pub mod store;
mod utils;
pub mod views;
pub mod vision;

#[cfg(test)]
mod test_support;

use std::{path::Path, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use scan::ScanController;
use settings::{SettingsStore, SETTINGS_FILE};
use store::{LocalScanStore, LocalStorage};
use vision::GeminiVisionClient;

pub use utils::logging;

pub struct AppState {
    pub(crate) controller: ScanController,
    pub(crate) settings: SettingsStore,
}

impl AppState {
    pub fn new(controller: ScanController, settings: SettingsStore) -> Self {
        Self {
            controller,
            settings,
        }
    }

    /// Wires the file-backed store and the Gemini client under `data_dir`.
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;
        let storage = LocalStorage::new(data_dir.join("storage"))
            .context("failed to open local storage")?;
        let vision = GeminiVisionClient::new(settings.vision_config())
            .context("failed to build vision client")?;

        let controller = ScanController::new(
            Arc::new(LocalScanStore::new(storage)),
            Arc::new(vision),
        );

        log::info!("Data directory {}", data_dir.display());
        Ok(Self::new(controller, settings))
    }

    pub fn controller(&self) -> &ScanController {
        &self.controller
    }
}

pub fn run() -> ExitCode {
    logging::init();

    let cli = Cli::parse();

    let result = (|| -> anyhow::Result<ExitCode> {
        let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        runtime.block_on(async move {
            let data_dir = settings::resolve_data_dir(cli.data_dir)?;
            let state = AppState::open(&data_dir)?;
            match cli.command {
                Some(command) => cli::execute(command, &state).await,
                None => cli::interactive(&state).await,
            }
        })
    })();

    match result {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
