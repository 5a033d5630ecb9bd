//! # ヘルスチェックハンドラ
//!
//! 会員 API の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` : Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` : Readiness Check（ストアへの疎通を確認）
//!
//! レスポンス型は [`minidooray_shared::HealthResponse`] / [`minidooray_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use minidooray_infra::repository::MemberRepository;
use minidooray_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// 会員 API のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub repository: Arc<dyn MemberRepository>,
}

/// 会員 API の Readiness Check エンドポイント
///
/// ストアへの疎通を確認する。OK → 200、失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = match state.repository.ping().await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
    };

    let response = ReadinessResponse::from_checks(HashMap::from([(
        "database".to_string(),
        database,
    )]));
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}
