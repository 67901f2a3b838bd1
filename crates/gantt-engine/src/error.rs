//! Error types for the Gantt engine
//!
//! The transform and filter never fail; their degraded cases are reported
//! as [`Diagnostic`](crate::transform::Diagnostic) values. Errors here cover
//! the boundaries around them:
//! - Configuration loading and filter-value parsing
//! - Raw record decoding

use gantt_model::UnknownVariant;
use std::path::PathBuf;

/// Top-level engine error
#[derive(Debug, thiserror::Error)]
pub enum GanttError {
    /// Configuration could not be loaded or applied
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Raw record file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raw record JSON did not decode
    #[error("invalid record data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

impl GanttError {
    /// Create IO error for path
    #[inline]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON document
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Invalid YAML document
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// Value not acceptable for a key
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// Name did not match a known variant
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
}

impl ConfigError {
    /// Create IO error for path
    #[inline]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid value error
    #[inline]
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::invalid_value("spaceType", "galaxy");
        assert_eq!(err.to_string(), "invalid value for spaceType: 'galaxy'");
    }

    #[test]
    fn unknown_variant_is_transparent() {
        let err = ConfigError::from(UnknownVariant::new("filter key", "colour"));
        assert_eq!(err.to_string(), "unknown filter key: 'colour'");
    }

    #[test]
    fn gantt_error_wraps_config() {
        let err = GanttError::from(ConfigError::invalid_value("viewType", "defect"));
        assert!(err.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn io_error_names_path() {
        let err = GanttError::io_error(
            "/missing/data.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/missing/data.json"));
    }
}
