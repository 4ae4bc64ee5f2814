//! Forge engine runtime
//!
//! Scene graph, editor camera, scripting boundary and the wgpu plumbing the
//! editor renders through.

pub mod config;
pub mod core;
pub mod graphics;
pub mod scripting;
pub mod shaders;

use config::LogConfig;
use std::fs::File;
use std::sync::Mutex;

/// Initialize logging to stdout and, if configured, a log file.
///
/// `RUST_LOG` takes precedence over the configured filter. The log file is
/// truncated; if it cannot be created logging continues on stdout only.
pub fn init_logging(config: &LogConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let (file_layer, file_error) = match config.file.as_ref().map(File::create) {
        Some(Ok(file)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!(
            path = ?config.file,
            error = %e,
            "Failed to create log file, logging to stdout only"
        );
    }
}
