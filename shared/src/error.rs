use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    // 入力は正しいがマッチング対象のスケジュールが 1 件もない場合
    #[error("{0}")]
    NoAvailability(String),
    // 依頼された面接官のうち、選択されたスロットで空いていない人がいる場合
    #[error(
        "requested interviewers [{}] but only [{}] are available",
        join_ids(.requested),
        join_ids(.available)
    )]
    InterviewerMismatch {
        requested: Vec<String>,
        available: Vec<String>,
    },
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation error")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

fn join_ids(ids: &[String]) -> String {
    ids.join(",")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AppError::UnprocessableEntity(_)
            | AppError::NoAvailability(_)
            | AppError::InterviewerMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ConversionEntityError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status_code.into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interviewer_mismatch_names_both_id_sets() {
        let e = AppError::InterviewerMismatch {
            requested: vec!["a".into(), "b".into()],
            available: vec!["a".into()],
        };
        assert_eq!(
            e.to_string(),
            "requested interviewers [a,b] but only [a] are available"
        );
    }
}
