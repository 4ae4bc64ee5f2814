//! Scripting boundary
//!
//! Entities opt in with a [`ScriptComponent`]. The [`ScriptEngine`] is an
//! explicit context owned by the host; it is never a process-wide singleton.

pub mod components;
pub mod engine;

pub use components::ScriptComponent;
pub use engine::ScriptEngine;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the scripting boundary
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Script engine is not initialized")]
    NotInitialized,

    #[error("Script assembly not found: {0}")]
    AssemblyNotFound(PathBuf),
}
