use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StatsError {
    Io { path: PathBuf, source: std::io::Error },
    InvalidData(String),
    Table(fable_core::TableError),
    Config(toml::de::Error),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            StatsError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            StatsError::Table(e) => write!(f, "inconsistent statistics: {e}"),
            StatsError::Config(e) => write!(f, "bad configuration: {e}"),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::Io { source, .. } => Some(source),
            StatsError::Table(e) => Some(e),
            StatsError::Config(e) => Some(e),
            StatsError::InvalidData(_) => None,
        }
    }
}

impl From<fable_core::TableError> for StatsError {
    fn from(e: fable_core::TableError) -> Self {
        StatsError::Table(e)
    }
}

impl From<toml::de::Error> for StatsError {
    fn from(e: toml::de::Error) -> Self {
        StatsError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
