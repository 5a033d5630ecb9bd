//! # ページング
//!
//! 一覧取得で使用するページ指定とページ結果を定義する。
//!
//! ページ番号は 0 始まり。`size = 0` は「要素を返さず総件数のみ」を意味する。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use minidooray_domain::paging::{Page, PageRequest};
//!
//! let request = PageRequest::new(1, 2)?;
//! assert_eq!(request.offset(), 2);
//!
//! let page = Page::new(vec!["c", "d"], request, 5);
//! assert_eq!(page.total_pages(), 3);
//! # Ok(())
//! # }
//! ```

use crate::DomainError;

/// ページ指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// ページ指定を作成する
    ///
    /// 負の値、および `u32` に収まらない値は拒否する。
    pub fn new(page: i64, size: i64) -> Result<Self, DomainError> {
        let page = u32::try_from(page).map_err(|_| {
            DomainError::Validation(format!("ページ番号は 0 以上である必要があります: {page}"))
        })?;
        let size = u32::try_from(size).map_err(|_| {
            DomainError::Validation(format!("ページサイズは 0 以上である必要があります: {size}"))
        })?;
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 読み飛ばす件数
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// 取得する最大件数
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// ページ結果
///
/// 指定されたページの要素と、ストア全体の総件数を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items:   Vec<T>,
    request: PageRequest,
    total:   u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            request,
            total,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// 総ページ数
    ///
    /// サイズ 0 の場合は 0 とする。
    pub fn total_pages(&self) -> u64 {
        match self.request.limit() {
            0 => 0,
            size => self.total.div_ceil(size),
        }
    }

    /// 要素を変換した新しいページを返す
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items:   self.items.into_iter().map(f).collect(),
            request: self.request,
            total:   self.total,
        }
    }
}
