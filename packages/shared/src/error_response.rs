//! # エラーレスポンス
//!
//! 会員 API が返す共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はアプリ側の責務（shared に axum 依存を入れない）
//! - `timestamp` は生成時刻（UTC, RFC 3339）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// ## JSON 形式
///
/// ```json
/// {
///   "message": "Member が見つかりません: 999",
///   "status": 404,
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message:   String,
    pub status:    u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// 現在時刻でエラーレスポンスを作成する
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self::at(status, message, Utc::now())
    }

    /// 時刻を指定してエラーレスポンスを作成する
    pub fn at(status: u16, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            status,
            timestamp,
        }
    }

    /// 500 Internal Server Error
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(500, "内部エラーが発生しました")
    }

    /// 503 Service Unavailable
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn service_unavailable() -> Self {
        Self::new(503, "一時的にサービスを利用できません")
    }
}
