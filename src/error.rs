use miette::Diagnostic;
use thiserror::Error;

/// Fatal error type for ss14-tiled runs.
///
/// Anything that ends up here aborts the run. Per-item problems that only
/// exclude one tile, decal or entity are [`crate::render::Skip`] instead.
#[derive(Error, Diagnostic, Debug)]
pub enum TiledError {
    #[error("IO error: {0}")]
    #[diagnostic(code(ss14_tiled::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(ss14_tiled::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Setup error: {message}")]
    #[diagnostic(code(ss14_tiled::setup))]
    Setup {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(ss14_tiled::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Resolution error: {message}")]
    #[diagnostic(code(ss14_tiled::resolve))]
    Resolution {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TiledError>;
