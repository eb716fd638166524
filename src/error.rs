use std::path::PathBuf;

use thiserror::Error;

/// Collection-level failure: nothing could be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("profile source {path:?} is unreadable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single source record was left out of the collection.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("duplicate slug '{0}', already provided by an earlier file")]
    DuplicateSlug(String),
}

/// A record parsed but does not describe a valid profile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("unknown profile type '{0}'")]
    UnknownType(String),
    #[error("slug '{0}' is not URL-safe")]
    InvalidSlug(String),
    #[error("invalid value '{value}' for '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
