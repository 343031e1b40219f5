use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_import::ImportError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

pub const SOURCE_UNAVAILABLE_MESSAGE: &str = "Error reading sales data";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error reading sales data")]
    SourceUnavailable(#[source] std::io::Error),

    #[error("Invalid sales data: {0}")]
    InvalidRecords(#[source] ImportError),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Io(e) => ApiError::SourceUnavailable(e),
            other => ApiError::InvalidRecords(other),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<RecordErrorDetail>,
}

/// Location of the offending value when a record fails validation.
#[derive(Debug, Serialize)]
struct RecordErrorDetail {
    line: u64,
    field: &'static str,
    value: String,
    reason: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::SourceUnavailable(ref e) => {
                tracing::error!(error = %e, "sales data source unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: SOURCE_UNAVAILABLE_MESSAGE.to_string(),
                        detail: None,
                    },
                )
            }
            ApiError::InvalidRecords(ref e) => {
                tracing::warn!(error = %e, "rejected sales data");
                let detail = match e {
                    ImportError::InvalidField {
                        line,
                        field,
                        value,
                        reason,
                    } => Some(RecordErrorDetail {
                        line: *line,
                        field: *field,
                        value: value.clone(),
                        reason: reason.clone(),
                    }),
                    _ => None,
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody {
                        message: self.to_string(),
                        detail,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
