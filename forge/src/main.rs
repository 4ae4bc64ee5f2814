//! Forge editor entry point

mod app;
mod demo;

use forge_engine::config::{ConfigError, EngineConfig};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let config_path = EngineConfig::path_from_args(std::env::args());
    let (config, config_error) = match EngineConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(ConfigError::NotFound(_)) => (EngineConfig::default(), None),
        Err(e) => (EngineConfig::default(), Some(e)),
    };

    forge_engine::init_logging(&config.log);
    if let Some(e) = config_error {
        warn!(error = %e, "Ignoring config file, using defaults");
    }
    install_panic_hook();
    info!(config = %config_path.display(), "Starting Forge");

    match std::panic::catch_unwind(AssertUnwindSafe(|| app::run(config))) {
        Ok(Ok(())) => {
            info!("Forge exited cleanly");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            error!(error = %e, "Fatal error during start-up");
            show_fatal_dialog("Fatal Error", &e.to_string());
            ExitCode::FAILURE
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            show_fatal_dialog("Fatal Crash", &format!("Crash detected: {message}\nSee log.txt"));
            ExitCode::from(2)
        }
    }
}

/// Route panics through tracing so they land in the log file
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!(panic = %info, "Panic in run loop");
        default_hook(info);
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn show_fatal_dialog(title: &str, message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
