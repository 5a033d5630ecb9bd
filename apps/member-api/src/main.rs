//! # 会員 API サーバー
//!
//! 会員アカウント（登録・取得・更新・退会・一覧・認証・一括参照）を管理する
//! HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `MEMBER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `MEMBER_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `MEMBER_PATH_PREFIX` | No | ルートのプレフィックス（デフォルト: `/member`） |
//! | `PASSWORD_HASHER` | No | `none` / `sha256` / `argon2`（デフォルト: `none`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! その他の変数は [`minidooray_member_api::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p minidooray-member-api
//!
//! # 本番環境
//! MEMBER_PORT=8080 DATABASE_URL=postgres://... PASSWORD_HASHER=argon2 \
//!   PASSWORD_HASHER_SECRET=... cargo run -p minidooray-member-api --release
//! ```

use std::sync::Arc;

use anyhow::Context;
use minidooray_infra::{
    build_password_hasher,
    db,
    repository::{MemberRepository, PostgresMemberRepository},
};
use minidooray_member_api::{build_app, config::MemberApiConfig};
use minidooray_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// 会員 API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("member-api"));
    let _tracing_guard = tracing::info_span!("app", service = "member-api").entered();

    // 設定読み込み
    let config = MemberApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        hasher = %config.hasher.kind,
        path_prefix = %config.path_prefix,
        "会員 API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let repository: Arc<dyn MemberRepository> = Arc::new(PostgresMemberRepository::new(pool));
    let hasher = build_password_hasher(config.hasher.kind, &config.hasher.secret)
        .context("パスワードハッシャーの初期化に失敗しました")?;

    let app = build_app(repository, hasher, config.paging, &config.path_prefix);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("会員 API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
