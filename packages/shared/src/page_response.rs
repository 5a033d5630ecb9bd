//! # ページレスポンス
//!
//! ページ番号ベースのページネーションに対応した API レスポンス型。

use serde::{Deserialize, Serialize};

/// ページレスポンス
///
/// ## JSON 形式
///
/// ```json
/// {
///   "items": [...],
///   "page": 0,
///   "size": 2,
///   "total": 3,
///   "totalPages": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items:       Vec<T>,
    pub page:        u32,
    pub size:        u32,
    pub total:       u64,
    pub total_pages: u64,
}
