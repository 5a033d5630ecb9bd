//! # ユースケース層
//!
//! 会員サービスのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ストアとハッシャーを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//! - **状態を持たない**: ユースケース自体は可変状態を保持しない

pub(crate) mod helpers;

pub mod member;

pub use member::{LookupInput, MemberUseCaseImpl, RegisterInput, UpdateInput};
