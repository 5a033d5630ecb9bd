//! # 会員 API アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ルーティング
//!
//! 会員エンドポイントは設定されたプレフィックス配下に置く。
//! ヘルスチェックはプレフィックスに関係なくルート直下に置く。
//!
//! ```text
//! /health, /health/ready
//! {prefix}/register, {prefix}/login, {prefix}/lookup
//! {prefix}, {prefix}/      ← 一覧
//! {prefix}/{id}            ← 取得・更新・退会
//! ```

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use minidooray_infra::{PasswordHasher, repository::MemberRepository};
use tower_http::trace::TraceLayer;

use crate::{
    config::PagingConfig,
    handler::{
        MemberState,
        ReadinessState,
        delete_member,
        get_member,
        health_check,
        list_members,
        login,
        lookup_members,
        readiness_check,
        register_member,
        update_member,
    },
    usecase::MemberUseCaseImpl,
};

/// DI コンテナの構築とルーター定義を行う
///
/// 初期化済みのストアとハッシャーを受け取り、ユースケース → State → Router の
/// 順に組み立てる。
pub fn build_app(
    repository: Arc<dyn MemberRepository>,
    hasher: Arc<dyn PasswordHasher>,
    paging: PagingConfig,
    path_prefix: &str,
) -> Router {
    let readiness_state = Arc::new(ReadinessState {
        repository: repository.clone(),
    });
    let member_state = Arc::new(MemberState {
        usecase: MemberUseCaseImpl::new(repository, hasher),
        paging,
    });

    let prefix = normalize_prefix(path_prefix);
    let list_route = get(list_members);

    let mut member_router = Router::new()
        .route(&format!("{prefix}/register"), post(register_member))
        .route(&format!("{prefix}/login"), post(login))
        .route(&format!("{prefix}/lookup"), post(lookup_members))
        .route(
            &format!("{prefix}/{{id}}"),
            get(get_member).put(update_member).delete(delete_member),
        )
        .route(&format!("{prefix}/"), list_route.clone());
    if !prefix.is_empty() {
        member_router = member_router.route(&prefix, list_route);
    }

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(member_router.with_state(member_state))
        .layer(TraceLayer::new_for_http())
}

/// ルートのプレフィックスを `/xxx` 形式（末尾スラッシュなし）に正規化する
///
/// 空文字列と `/` はルート直下を表す空文字列になる。
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/member", "/member")]
    #[case("member", "/member")]
    #[case("/member/", "/member")]
    #[case(" /api/member ", "/api/member")]
    #[case("/", "")]
    #[case("", "")]
    fn test_プレフィックスを正規化する(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_prefix(raw), expected);
    }
}
