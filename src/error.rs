//! Error types for the dashboards

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Only one render pass fails; details stay in the log.
        tracing::error!("Render failed: {}", self);
        let (status, error_message) = match &self {
            Error::Read { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Data file could not be read".to_string(),
            ),
            Error::Parse { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Data file is malformed".to_string(),
            ),
            Error::Csv(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Export failed".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_maps_to_server_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Parse {
            path: PathBuf::from("data/posts.json"),
            source,
        };
        assert!(err.to_string().contains("data/posts.json"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
