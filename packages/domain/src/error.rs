//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | 会員が存在しない |
//! | `Conflict` | 409 Conflict | 会員 ID の重複 |
//! | `Forbidden` | 403 Forbidden | 退会済み会員への参照 |
//!
//! ## 使用例
//!
//! ```rust
//! use minidooray_domain::DomainError;
//!
//! fn find_member(id: &str) -> Result<(), DomainError> {
//!     Err(DomainError::NotFound {
//!         entity_type: "Member",
//!         id:          id.to_string(),
//!     })
//! }
//!
//! assert!(find_member("123").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の違反
    /// - 不正なフォーマット（メールアドレス、会員状態など）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Member" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 競合エラー
    ///
    /// 既に使用されている会員 ID で登録しようとした場合に使用する。
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// 権限エラー
    ///
    /// 退会済み会員の参照・認証など、状態によって拒否される操作に使用する。
    #[error("権限がありません: {0}")]
    Forbidden(String),
}
