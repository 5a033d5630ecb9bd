//! # Minidooray ドメイン層
//!
//! 会員アカウント管理の中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Member）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: MemberId,
//!   Email）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! member-api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、ハッシャー）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`member`] - 会員エンティティと値オブジェクト
//! - [`paging`] - 一覧取得のページ指定
//! - [`password`] - 平文パスワードと検証子
//!
//! ## 使用例
//!
//! ```rust
//! use minidooray_domain::{DomainError, member::MemberId};
//!
//! let id = MemberId::new("123").unwrap();
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Member",
//!     id:          id.to_string(),
//! };
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod member;
pub mod paging;
pub mod password;

pub use error::DomainError;
