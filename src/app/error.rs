use std::path::PathBuf;
use thiserror::Error;

/// Problems with the requested setup, detected before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Source directory {} doesn't exist", .0.display())]
    MissingSource(PathBuf),

    #[error("No pattern given (pass --pattern or set one in the preset)")]
    MissingPattern,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Destination directory {} is not empty (use --force or --continue)", .0.display())]
    DestinationNotEmpty(PathBuf),

    #[error("Failed to create destination directory {}", .0.display())]
    CreateDestination(PathBuf, #[source] std::io::Error),

    #[error("Failed to read destination directory {}", .0.display())]
    InspectDestination(PathBuf, #[source] std::io::Error),

    #[error("Failed to get current directory")]
    WorkingDirectory(#[source] std::io::Error),
}

/// Failures while executing a relocation plan. Always fatal.
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("Failed to relocate {} to {}", .source_path.display(), .destination.display())]
    Transfer {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to write status output")]
    Report(#[source] std::io::Error),
}
