//! # Minidooray インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ストア（リポジトリトレイト）とパスワードハッシャーを能力（capability）として
//! 定義し、その具体的な実装を提供する。ユースケース層はトレイトにのみ依存するため、
//! 実装の差し替えでユースケースを変更する必要はない。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: 会員ストアの PostgreSQL 実装（テスト用にインメモリ実装）
//! - **パスワードハッシュ**: 平文パスワードから検証子を導出する決定的変換
//!
//! ## 依存関係
//!
//! ```text
//! member-api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードハッシャー
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use minidooray_infra::{db, repository::PostgresMemberRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/minidooray").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let repository = PostgresMemberRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{HasherKind, PasswordHasher, build_password_hasher};
