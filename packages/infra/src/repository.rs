//! # リポジトリ実装
//!
//! 会員ストアの能力（トレイト）と、その具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: `test-utils` feature でインメモリ実装に差し替え可能

pub mod member_repository;

pub use member_repository::{MemberRepository, PostgresMemberRepository};
