use crate::config::ConfigError;
use crate::datasource::StoreError;
use crate::orchestration::fetch::FetchError;
use crate::orchestration::side_tables::SideTableError;
use thiserror::Error;

/// Terminal error of a run. Every variant aborts the run with no partial report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to list bucket {bucket}: {source}")]
    Listing {
        bucket: String,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    SideTable(#[from] SideTableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_failing_key() {
        let err: AppError = FetchError::Object {
            bucket: "daily".to_string(),
            key: "1700000000-part0".to_string(),
            source: StoreError::Io("connection reset".to_string()),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "failed to fetch daily/1700000000-part0: I/O error: connection reset"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err: AppError = ConfigError::MissingEnv("TRANSFER_BUCKET".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variable: TRANSFER_BUCKET"
        );
    }
}
