use anyhow::{Context, Result};
use std::path::PathBuf;
use taskboard::{config::GlobalConfig, logging, service, tui};

const USAGE: &str = "Usage: taskboard [SEED_FILE]\n\n\
    SEED_FILE  JSON file with \"tasks\" and \"columns\" to load instead of the sample board";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let seed_file = match args.get(1).map(|s| s.as_str()) {
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(path) => Some(PathBuf::from(path)),
        None => None,
    };

    // A broken config file should not keep the board from starting
    let (mut config, config_error) = match GlobalConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (GlobalConfig::default(), Some(e)),
    };
    if seed_file.is_some() {
        config.service.seed_file = seed_file;
    }

    let log_dir = GlobalConfig::data_dir()?.join("logs");
    let _log_guard = logging::init(&config.log, &log_dir).context("Failed to setup logging")?;
    if let Some(e) = config_error {
        tracing::warn!(error = ?e, "using default config");
    }

    let task_service = service::from_config(&config.service);

    // Initialize and run the app
    let mut app = tui::App::new(config, task_service)?;
    app.run().await?;

    Ok(())
}
