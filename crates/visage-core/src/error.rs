//! Error types for Visage

use thiserror::Error;

/// Core Visage errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisageError {
    // Parse errors
    #[error("Unknown avatar state: {0}")]
    UnknownState(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    // Theme errors
    #[error("Theme {theme} is missing color {field}")]
    MissingColor { theme: String, field: &'static str },

    #[error("Invalid color {value:?} for {field}: expected #RRGGBB")]
    InvalidColor { field: String, value: String },

    // Scene errors
    #[error("Scene node not found: {0}")]
    NodeNotFound(u32),

    #[error("Scene node {0} is not a mesh")]
    NotAMesh(u32),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Visage operations
pub type VisageResult<T> = Result<T, VisageError>;
