//! # インメモリ会員リポジトリ
//!
//! ユースケーステスト・HTTP テストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! minidooray-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
        PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use minidooray_domain::{
    member::{Member, MemberId},
    paging::{Page, PageRequest},
    password::PasswordVerifier,
};

use crate::{error::InfraError, repository::MemberRepository};

/// インメモリの会員リポジトリ
///
/// `BTreeMap` のキー順がそのまま ID 昇順の列挙順になる。
/// [`set_unavailable`](Self::set_unavailable) で障害モードに切り替えると、
/// すべての操作が一時的なデータベースエラー（プールタイムアウト）を返す。
#[derive(Clone, Default)]
pub struct InMemoryMemberRepository {
    members:     Arc<Mutex<BTreeMap<String, Member>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 会員を事前登録した状態で作成する
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        let repository = Self::new();
        {
            let mut map = repository.members();
            for member in members {
                map.insert(member.id().as_str().to_string(), member);
            }
        }
        repository
    }

    /// 障害モードを切り替える
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 保存されている会員を取得する（テストの検証用）
    pub fn get(&self, id: &str) -> Option<Member> {
        self.members().get(id).cloned()
    }

    /// 保存件数
    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    fn members(&self) -> MutexGuard<'_, BTreeMap<String, Member>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn exists(&self, id: &MemberId) -> Result<bool, InfraError> {
        self.check_available()?;
        Ok(self.members().contains_key(id.as_str()))
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, InfraError> {
        self.check_available()?;
        Ok(self.members().get(id.as_str()).cloned())
    }

    async fn insert(&self, member: &Member) -> Result<(), InfraError> {
        self.check_available()?;
        let mut members = self.members();
        if members.contains_key(member.id().as_str()) {
            return Err(InfraError::conflict("Member", member.id().as_str()));
        }
        members.insert(member.id().as_str().to_string(), member.clone());
        Ok(())
    }

    async fn save(&self, member: &Member) -> Result<(), InfraError> {
        self.check_available()?;
        self.members()
            .insert(member.id().as_str().to_string(), member.clone());
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> Result<(), InfraError> {
        self.check_available()?;
        self.members().remove(id.as_str());
        Ok(())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Member>, InfraError> {
        self.check_available()?;
        let members = self.members();
        let total = members.len() as u64;

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = members.values().skip(offset).take(limit).cloned().collect();

        Ok(Page::new(items, request, total))
    }

    async fn exists_by_id_and_verifier(
        &self,
        id: &MemberId,
        verifier: &PasswordVerifier,
    ) -> Result<bool, InfraError> {
        self.check_available()?;
        Ok(self
            .members()
            .get(id.as_str())
            .is_some_and(|m| m.verifier() == verifier))
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.check_available()
    }
}
