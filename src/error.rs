// SPDX-License-Identifier: MPL-2.0
use crate::application::port::SurfaceError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was missing or blank (e.g. a message title).
    InvalidArgument(String),
    Surface(SurfaceError),
    Config(String),
    Io(String),
    /// The banner service task has stopped and no longer accepts commands.
    ServiceStopped,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            Error::Surface(e) => write!(f, "Surface Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::ServiceStopped => write!(f, "Banner service has stopped"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Error::Surface(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
