//! # MemberRepository
//!
//! 会員情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID をキーとする永続マップ**: 存在確認、取得、upsert、削除、ページ列挙、
//!   ID + 検証子の存在確認を提供する
//! - **挿入専用の操作**: 登録時は `insert` を使い、一意制約違反を
//!   `InfraErrorKind::Conflict` として返す（存在確認との競合を防ぐ）
//! - **決定的な列挙順**: ページ列挙は ID の昇順
//!
//! テーブル定義: `migrations/20240101000001_create_member.sql`

use async_trait::async_trait;
use minidooray_domain::{
    member::{Email, Member, MemberId, MemberName, MemberStatus},
    paging::{Page, PageRequest},
    password::PasswordVerifier,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 会員リポジトリトレイト
///
/// 書き込みは戻る前に永続化され、同一呼び出し内では自分の書き込みが読める。
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// 指定 ID の会員が存在するか
    async fn exists(&self, id: &MemberId) -> Result<bool, InfraError>;

    /// ID で会員を検索
    ///
    /// 状態は問わない（退会済みも返す）。
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, InfraError>;

    /// 会員を新規挿入する
    ///
    /// 同じ ID が既に存在する場合は `InfraErrorKind::Conflict` を返す。
    async fn insert(&self, member: &Member) -> Result<(), InfraError>;

    /// 会員を保存する（ID をキーに挿入または置換）
    async fn save(&self, member: &Member) -> Result<(), InfraError>;

    /// 会員を物理削除する
    ///
    /// 退会処理（論理削除）では使用しない。存在しない ID は何もしない。
    async fn delete(&self, id: &MemberId) -> Result<(), InfraError>;

    /// ID 昇順でページ単位に列挙する
    ///
    /// すべての状態の会員を含む。`size = 0` の場合は要素なしで総件数のみ返す。
    async fn find_page(&self, request: PageRequest) -> Result<Page<Member>, InfraError>;

    /// ID と検証子が一致する会員が存在するか
    async fn exists_by_id_and_verifier(
        &self,
        id: &MemberId,
        verifier: &PasswordVerifier,
    ) -> Result<bool, InfraError>;

    /// ストアへの疎通を確認する（Readiness Check 用）
    async fn ping(&self) -> Result<(), InfraError>;
}

/// `member` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id:       String,
    password: String,
    email:    String,
    name:     String,
    status:   String,
}

impl TryFrom<MemberRow> for Member {
    type Error = InfraError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let corrupted = |e: minidooray_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(Member::from_db(
            MemberId::new(row.id).map_err(corrupted)?,
            PasswordVerifier::new(row.password).map_err(corrupted)?,
            Email::new(row.email).map_err(corrupted)?,
            MemberName::new(row.name).map_err(corrupted)?,
            row.status.parse::<MemberStatus>().map_err(corrupted)?,
        ))
    }
}

/// PostgreSQL 実装の MemberRepository
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists(&self, id: &MemberId) -> Result<bool, InfraError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM member WHERE id = $1)",
        )
        .bind(id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, InfraError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, password, email, name, status
            FROM member
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Member::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %member.id()))]
    async fn insert(&self, member: &Member) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO member (id, password, email, name, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id().as_str())
        .bind(member.verifier().as_str())
        .bind(member.email().as_str())
        .bind(member.name().as_str())
        .bind(member.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                InfraError::conflict("Member", member.id().as_str())
            }
            e => e.into(),
        })?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %member.id()))]
    async fn save(&self, member: &Member) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO member (id, password, email, name, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                password = EXCLUDED.password,
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                status = EXCLUDED.status
            "#,
        )
        .bind(member.id().as_str())
        .bind(member.verifier().as_str())
        .bind(member.email().as_str())
        .bind(member.name().as_str())
        .bind(member.status().as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &MemberId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(page = request.page(), size = request.size()))]
    async fn find_page(&self, request: PageRequest) -> Result<Page<Member>, InfraError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;
        let total = u64::try_from(total).unwrap_or_default();

        if request.limit() == 0 {
            return Ok(Page::new(Vec::new(), request, total));
        }

        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, password, email, name, status
            FROM member
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::try_from(request.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let members = rows
            .into_iter()
            .map(Member::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(members, request, total))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists_by_id_and_verifier(
        &self,
        id: &MemberId,
        verifier: &PasswordVerifier,
    ) -> Result<bool, InfraError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM member WHERE id = $1 AND password = $2)",
        )
        .bind(id.as_str())
        .bind(verifier.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
