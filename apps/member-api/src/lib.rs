//! # 会員 API ライブラリ
//!
//! 会員サービスのユースケース・ハンドラ・ルーター構築を公開する。
//! バイナリ（`main.rs`）と統合テストの双方から利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

pub use app_builder::build_app;
