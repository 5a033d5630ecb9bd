//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `member`: 会員の登録・取得・更新・退会・一覧・認証・一括参照

pub mod health;
pub mod member;

pub use health::{ReadinessState, health_check, readiness_check};
pub use member::{
    MemberState,
    MemberSummary,
    MemberView,
    delete_member,
    get_member,
    list_members,
    login,
    lookup_members,
    register_member,
    update_member,
};
