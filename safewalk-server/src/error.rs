use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use safewalk_core::Error;
use serde_json::json;

/// Error returned by every handler, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                Error::NodeNotFound(_) | Error::NoPathExists { .. } | Error::EdgeNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                Error::InvalidSeverity(_) | Error::InvalidData(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                Error::ConcurrentUpdate(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Core(err) => write!(f, "{err}"),
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Worker task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{self}");
        } else {
            tracing::debug!(%status, "{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_conditions_map_to_404() {
        let missing = ApiError::from(Error::NodeNotFound("x".into()));
        let unreachable = ApiError::from(Error::NoPathExists {
            origin: "a".into(),
            destination: "b".into(),
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(unreachable.status(), StatusCode::NOT_FOUND);
        assert_ne!(missing.to_string(), unreachable.to_string());
    }

    #[test]
    fn invalid_observation_is_unprocessable() {
        assert_eq!(
            ApiError::from(Error::InvalidSeverity(0)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(Error::Store("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
