//! # Minidooray 共有ユーティリティ
//!
//! 会員サービス全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, member-api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP フレームワークには依存しない（`IntoResponse` 変換は各アプリの責務）

pub mod error_response;
pub mod health;
pub mod observability;
pub mod page_response;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use page_response::PageResponse;
