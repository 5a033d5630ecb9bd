//! # 会員ハンドラ
//!
//! 会員サービスの HTTP エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! パスはプレフィックス（デフォルト `/member`）からの相対パス。
//!
//! - `POST /register` - 会員登録
//! - `GET /` - 会員一覧（`page`, `size`）
//! - `POST /login` - 認証情報の照合
//! - `POST /lookup` - 会員の一括参照
//! - `GET /{id}` - 会員取得
//! - `PUT /{id}` - 会員更新
//! - `DELETE /{id}` - 会員退会
//!
//! リクエストボディ・パス・クエリの抽出失敗は [`MemberError::InvalidArgument`]
//! として共通のエラーボディで返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use minidooray_domain::member::{Member, MemberStatus};
use minidooray_shared::PageResponse;
use serde::{Deserialize, Serialize};

use crate::{
    config::PagingConfig,
    error::MemberError,
    usecase::{LookupInput, MemberUseCaseImpl, RegisterInput, UpdateInput, helpers::required},
};

/// 会員ハンドラの共有状態
pub struct MemberState {
    pub usecase: MemberUseCaseImpl,
    pub paging:  PagingConfig,
}

// --- リクエスト/レスポンス型 ---

/// 会員登録リクエスト
///
/// 欠落したフィールドは 400 として扱うため、すべて `Option` で受ける。
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub id:       Option<String>,
    pub password: Option<String>,
    pub email:    Option<String>,
    pub name:     Option<String>,
}

/// 会員更新リクエスト
///
/// 省略・`null` のフィールドは現在の値を保持する。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    pub password: Option<String>,
    pub email:    Option<String>,
    pub name:     Option<String>,
    pub status:   Option<MemberStatus>,
}

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id:       Option<String>,
    pub password: Option<String>,
}

/// 一括参照リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub member_ids: Option<Vec<String>>,
}

/// 一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListMembersQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// 会員ビュー
///
/// パスワード検証子は含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub id:     String,
    pub email:  String,
    pub name:   String,
    pub status: MemberStatus,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            id:     member.id().as_str().to_string(),
            email:  member.email().as_str().to_string(),
            name:   member.name().as_str().to_string(),
            status: member.status(),
        }
    }
}

/// 一括参照の要約（ID と名前のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id:   String,
    pub name: String,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id:   member.id().as_str().to_string(),
            name: member.name().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /register
///
/// 会員を登録する。成功時は 201 と会員ビューを返す。
pub async fn register_member(
    State(state): State<Arc<MemberState>>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, MemberError>,
) -> Result<impl IntoResponse, MemberError> {
    let input = RegisterInput {
        id:       required(req.id, "会員 ID")?,
        password: required(req.password, "パスワード")?,
        email:    required(req.email, "メールアドレス")?,
        name:     required(req.name, "会員名")?,
    };

    let member = state.usecase.register(input).await?;

    Ok((StatusCode::CREATED, Json(MemberView::from(&member))))
}

/// GET /{id}
pub async fn get_member(
    State(state): State<Arc<MemberState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, MemberError>,
) -> Result<Json<MemberView>, MemberError> {
    let member = state.usecase.get(&id).await?;
    Ok(Json(MemberView::from(&member)))
}

/// PUT /{id}
///
/// 指定されたフィールドのみ更新する。
pub async fn update_member(
    State(state): State<Arc<MemberState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, MemberError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateRequest>, MemberError>,
) -> Result<Json<MemberView>, MemberError> {
    let input = UpdateInput {
        password: req.password,
        email:    req.email,
        name:     req.name,
        status:   req.status,
    };

    let member = state.usecase.update(&id, input).await?;
    Ok(Json(MemberView::from(&member)))
}

/// DELETE /{id}
///
/// 会員を退会状態にする（論理削除）。
pub async fn delete_member(
    State(state): State<Arc<MemberState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, MemberError>,
) -> Result<StatusCode, MemberError> {
    state.usecase.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /
///
/// 会員を ID 昇順でページ単位に返す。パラメータ省略時は設定のデフォルト値を使う。
pub async fn list_members(
    State(state): State<Arc<MemberState>>,
    WithRejection(Query(query), _): WithRejection<Query<ListMembersQuery>, MemberError>,
) -> Result<Json<PageResponse<MemberView>>, MemberError> {
    let page = query.page.unwrap_or(state.paging.default_page);
    let size = query.size.unwrap_or(state.paging.default_size);

    let result = state.usecase.list(page, size).await?;
    let total_pages = result.total_pages();
    let request = result.request();

    Ok(Json(PageResponse {
        items: result.items().iter().map(MemberView::from).collect(),
        page: request.page(),
        size: request.size(),
        total: result.total(),
        total_pages,
    }))
}

/// POST /login
///
/// ID とパスワードの組を照合する。一致すれば 204、不一致なら 401。
pub async fn login(
    State(state): State<Arc<MemberState>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, MemberError>,
) -> Result<StatusCode, MemberError> {
    let id = required(req.id, "会員 ID")?;
    let password = required(req.password, "パスワード")?;

    if state.usecase.matches(&id, &password).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(MemberError::Unauthorized(
            "会員 ID またはパスワードが一致しません".to_string(),
        ))
    }
}

/// POST /lookup
///
/// 指定された会員の要約を入力順に返す。
pub async fn lookup_members(
    State(state): State<Arc<MemberState>>,
    WithRejection(Json(req), _): WithRejection<Json<LookupRequest>, MemberError>,
) -> Result<Json<Vec<MemberSummary>>, MemberError> {
    let ids = required(req.member_ids, "memberIds")?;

    let members = state.usecase.lookup(LookupInput { ids }).await?;
    Ok(Json(members.iter().map(MemberSummary::from).collect()))
}
