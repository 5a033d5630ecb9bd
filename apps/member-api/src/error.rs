//! # Member API エラー定義
//!
//! 会員 API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `InvalidArgument` | 400 Bad Request |
//! | `Unauthorized` | 401 Unauthorized |
//! | `Forbidden` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `Conflict` | 409 Conflict |
//! | `Unavailable` | 503 Service Unavailable |
//! | `Internal` | 500 Internal Server Error |
//!
//! ストアのエラーは握りつぶさず、種別の分類のみ行う。

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use minidooray_domain::DomainError;
use minidooray_infra::InfraError;
use minidooray_shared::ErrorResponse;
use thiserror::Error;

/// 会員 API で発生するエラー
#[derive(Debug, Error)]
pub enum MemberError {
    /// 必須入力の欠落、不正なページ指定、バリデーション失敗
    #[error("{0}")]
    InvalidArgument(String),

    /// 認証情報の不一致
    #[error("{0}")]
    Unauthorized(String),

    /// 退会済み会員への参照・認証
    #[error("{0}")]
    Forbidden(String),

    /// 会員が存在しない
    #[error("{0}")]
    NotFound(String),

    /// 会員 ID の重複
    #[error("{0}")]
    Conflict(String),

    /// ストアの一時的な障害
    #[error("ストアが一時的に利用できません: {0}")]
    Unavailable(#[source] InfraError),

    /// 上記に分類できないストアの障害
    #[error("内部エラー: {0}")]
    Internal(#[source] InfraError),
}

impl MemberError {
    /// HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for MemberError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => Self::InvalidArgument(msg),
            e @ DomainError::NotFound { .. } => Self::NotFound(e.to_string()),
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Forbidden(msg) => Self::Forbidden(msg),
        }
    }
}

impl From<InfraError> for MemberError {
    fn from(error: InfraError) -> Self {
        if let Some((entity, id)) = error.as_conflict() {
            return Self::Conflict(format!("{entity} の ID が既に使用されています: {id}"));
        }
        if error.is_transient() {
            Self::Unavailable(error)
        } else {
            Self::Internal(error)
        }
    }
}

impl From<JsonRejection> for MemberError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<PathRejection> for MemberError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<QueryRejection> for MemberError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::Unavailable(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "ストアが一時的に利用できません"
                );
                ErrorResponse::service_unavailable()
            }
            Self::Internal(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "内部エラーが発生しました"
                );
                ErrorResponse::internal_error()
            }
            client_error => ErrorResponse::new(status.as_u16(), client_error.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
