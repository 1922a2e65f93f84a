use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid prompt configuration. Raised at construction and never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("a base path is required")]
    MissingBasePath,
    #[error("start path {} is not inside base path {}", start.display(), base.display())]
    StartOutsideBase { start: PathBuf, base: PathBuf },
    #[error("cannot determine the working directory")]
    WorkingDirectory(#[source] io::Error),
}

/// A directory could not be listed while building a choice list.
#[derive(Debug, Error)]
#[error("cannot list {}: {source}", path.display())]
pub struct ListError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Listing(#[from] ListError),
}
