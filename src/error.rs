use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tpadder operations
#[derive(Error, Diagnostic, Debug)]
pub enum TpError {
    #[error("Unable to load {path}: {message}")]
    #[diagnostic(code(tpadder::decode))]
    Decode {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unable to save {path}: {message}")]
    #[diagnostic(code(tpadder::encode))]
    Encode { path: PathBuf, message: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(tpadder::config))]
    InvalidConfig {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Refusing to write {path}: {message}")]
    #[diagnostic(code(tpadder::conflict))]
    Conflict {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tpadder::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tpadder::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{message}")]
    #[diagnostic(code(tpadder::batch))]
    Batch {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TpError>;
