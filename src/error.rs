use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::tools::matrix::{MatrixError, MatrixExportError, MatrixImportError};
use crate::tools::planner::PlannerError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Matrix(MatrixError),
    Import(MatrixImportError),
    Export(MatrixExportError),
    Planner(PlannerError),
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Matrix(err) => write!(f, "decision matrix error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Planner(err) => write!(f, "planner error: {}", err),
            AppError::InvalidInput(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Matrix(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Planner(err) => Some(err),
            AppError::InvalidInput(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MatrixError> for AppError {
    fn from(value: MatrixError) -> Self {
        Self::Matrix(value)
    }
}

impl From<MatrixImportError> for AppError {
    fn from(value: MatrixImportError) -> Self {
        Self::Import(value)
    }
}

impl From<MatrixExportError> for AppError {
    fn from(value: MatrixExportError) -> Self {
        Self::Export(value)
    }
}

impl From<PlannerError> for AppError {
    fn from(value: PlannerError) -> Self {
        Self::Planner(value)
    }
}
