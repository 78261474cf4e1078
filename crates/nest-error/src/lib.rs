use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum NestError {
    VarFileRead(PathBuf, io::Error),
    VarFileWrite(PathBuf, io::Error),
    HubFileWrite(PathBuf, io::Error),
    InvalidVarName(String),
    Io(io::Error),
    Other(String),
}

impl fmt::Display for NestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarFileRead(path, err) => {
                write!(f, "Failed to read var file {}: {err}", path.display())
            }
            Self::VarFileWrite(path, err) => {
                write!(f, "Failed to write var file {}: {err}", path.display())
            }
            Self::HubFileWrite(path, err) => {
                write!(f, "Failed to write hub pointer {}: {err}", path.display())
            }
            Self::InvalidVarName(name) => {
                write!(f, "Invalid variable name '{name}'")
            }
            Self::Io(err) => {
                write!(f, "IO error: {err}")
            }
            Self::Other(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl std::error::Error for NestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VarFileRead(_, err)
            | Self::VarFileWrite(_, err)
            | Self::HubFileWrite(_, err)
            | Self::Io(err) => Some(err),
            Self::InvalidVarName(_) | Self::Other(_) => None,
        }
    }
}

impl From<io::Error> for NestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for NestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NestError>;
