//! # 会員ユースケース
//!
//! 会員の登録・取得・更新・退会・一覧・認証・一括参照を扱う。
//!
//! ## 状態による制約
//!
//! - 単体取得（`get`）と認証（`matches`）は退会済み会員を `Forbidden` で拒否する
//! - 一覧（`list`）と一括参照（`lookup`）は状態で絞り込まない
//! - 退会状態から抜け出せるのは更新（`update`）のみ
//!
//! ## ストア呼び出し
//!
//! 各操作はストア呼び出しを数回行うだけで、内部で並行処理はしない。
//! 同じ ID への並行更新はストア上で後勝ちになる。登録の一意性は
//! 存在確認と挿入時の一意制約の二段で保証する。

use std::sync::Arc;

use minidooray_domain::{
    DomainError,
    member::{Email, Member, MemberId, MemberName, MemberStatus},
    paging::{Page, PageRequest},
    password::{PasswordVerifier, PlainPassword},
};
use minidooray_infra::{PasswordHasher, repository::MemberRepository};

use super::helpers::FindResultExt;
use crate::error::MemberError;

/// 会員登録の入力
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub id:       String,
    pub password: String,
    pub email:    String,
    pub name:     String,
}

/// 会員更新の入力
///
/// `None` のフィールドは現在の値を保持する。
#[derive(Debug, Clone, Default)]
pub struct UpdateInput {
    pub password: Option<String>,
    pub email:    Option<String>,
    pub name:     Option<String>,
    pub status:   Option<MemberStatus>,
}

/// 一括参照の入力
#[derive(Debug, Clone)]
pub struct LookupInput {
    pub ids: Vec<String>,
}

/// 会員ユースケース
pub struct MemberUseCaseImpl {
    repository: Arc<dyn MemberRepository>,
    hasher:     Arc<dyn PasswordHasher>,
}

impl MemberUseCaseImpl {
    pub fn new(repository: Arc<dyn MemberRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// 会員を登録する
    ///
    /// 1. 入力を値オブジェクトに変換（バリデーション）
    /// 2. 同じ ID の会員が存在すれば `Conflict`
    /// 3. パスワードから検証子を導出
    /// 4. `REGISTERED` 状態で挿入（並行登録の敗者は一意制約で `Conflict`）
    #[tracing::instrument(skip_all, fields(member_id = %input.id))]
    pub async fn register(&self, input: RegisterInput) -> Result<Member, MemberError> {
        let id = MemberId::new(input.id)?;
        let password = PlainPassword::new(input.password)?;
        let email = Email::new(input.email)?;
        let name = MemberName::new(input.name)?;

        if self.repository.exists(&id).await? {
            return Err(
                DomainError::Conflict(format!("既に使用されている会員 ID です: {id}")).into(),
            );
        }

        let verifier = self.derive_verifier(&password)?;
        let member = Member::new(id, verifier, email, name);

        self.repository.insert(&member).await?;

        tracing::info!("会員を登録しました");
        Ok(member)
    }

    /// 会員を取得する
    ///
    /// 退会済みの場合は `Forbidden`。
    #[tracing::instrument(skip_all, fields(member_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Member, MemberError> {
        let id = MemberId::new(id)?;

        let member = self.repository.find_by_id(&id).await.or_not_found(&id)?;
        member.ensure_not_withdrawn()?;

        Ok(member)
    }

    /// 会員を部分更新する
    ///
    /// 指定されたフィールドのみ上書きし、パスワードは再ハッシュする。
    /// 状態は 3 状態間で自由に遷移できる（退会からの復帰を含む）。
    #[tracing::instrument(skip_all, fields(member_id = %id))]
    pub async fn update(&self, id: &str, input: UpdateInput) -> Result<Member, MemberError> {
        let id = MemberId::new(id)?;

        let current = self.repository.find_by_id(&id).await.or_not_found(&id)?;
        let previous_status = current.status();

        let member = if let Some(password) = input.password {
            let password = PlainPassword::new(password)?;
            current.with_verifier(self.derive_verifier(&password)?)
        } else {
            current
        };

        let member = if let Some(email) = input.email {
            member.with_email(Email::new(email)?)
        } else {
            member
        };

        let member = if let Some(name) = input.name {
            member.with_name(MemberName::new(name)?)
        } else {
            member
        };

        let member = if let Some(status) = input.status {
            member.with_status(status)
        } else {
            member
        };

        self.repository.save(&member).await?;

        if member.status() != previous_status {
            tracing::info!(
                from = %previous_status,
                to = %member.status(),
                "会員状態を変更しました"
            );
        }

        Ok(member)
    }

    /// 会員を退会させる（論理削除）
    ///
    /// 既に退会済みの場合は何もせず成功する。
    #[tracing::instrument(skip_all, fields(member_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), MemberError> {
        let id = MemberId::new(id)?;

        let member = self.repository.find_by_id(&id).await.or_not_found(&id)?;
        if member.is_withdrawn() {
            tracing::debug!("既に退会済みです");
            return Ok(());
        }

        self.repository.save(&member.withdrawn()).await?;

        tracing::info!("会員を退会させました");
        Ok(())
    }

    /// 会員を ID 昇順でページ単位に取得する
    ///
    /// すべての状態の会員を含む（管理用の一覧）。
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: i64, size: i64) -> Result<Page<Member>, MemberError> {
        let request = PageRequest::new(page, size)?;

        Ok(self.repository.find_page(request).await?)
    }

    /// ID とパスワードの組が一致するか判定する
    ///
    /// 1. 会員が存在しなければ `NotFound`、退会済みなら `Forbidden`
    /// 2. パスワードから検証子を導出し、ID + 検証子の存在をストアに問い合わせる
    ///
    /// 検証子そのものは呼び出し元に返さない。
    #[tracing::instrument(skip_all, fields(member_id = %id))]
    pub async fn matches(&self, id: &str, password: &str) -> Result<bool, MemberError> {
        let id = MemberId::new(id)?;
        let password = PlainPassword::new(password)?;

        let member = self.repository.find_by_id(&id).await.or_not_found(&id)?;
        member.ensure_not_withdrawn()?;

        let verifier = self.derive_verifier(&password)?;
        let matched = self
            .repository
            .exists_by_id_and_verifier(&id, &verifier)
            .await?;

        tracing::debug!(matched, "認証情報を照合しました");
        Ok(matched)
    }

    /// 複数の会員を入力順に取得する
    ///
    /// 1 つでも存在しない ID があれば、最初のものを `NotFound` として返す。
    /// 会員 ID の制約（1 〜 20 文字）を満たさない ID も存在しない ID として扱う。
    /// 状態では絞り込まない。
    #[tracing::instrument(skip_all, fields(count = input.ids.len()))]
    pub async fn lookup(&self, input: LookupInput) -> Result<Vec<Member>, MemberError> {
        if input.ids.is_empty() {
            return Err(MemberError::InvalidArgument(
                "会員 ID を 1 つ以上指定してください".to_string(),
            ));
        }

        let mut members = Vec::with_capacity(input.ids.len());
        for raw in input.ids {
            // 制約を満たさない ID はストアに存在し得ないため、未登録として扱う
            let id = MemberId::new(raw.as_str()).map_err(|_| DomainError::NotFound {
                entity_type: "Member",
                id:          raw,
            })?;
            let member = self.repository.find_by_id(&id).await.or_not_found(&id)?;
            members.push(member);
        }

        Ok(members)
    }

    fn derive_verifier(&self, password: &PlainPassword) -> Result<PasswordVerifier, MemberError> {
        let hashed = self.hasher.hash(password)?;
        Ok(PasswordVerifier::new(hashed)?)
    }
}

#[cfg(test)]
mod tests {
    use minidooray_infra::{
        mock::InMemoryMemberRepository,
        password::{NoopPasswordHasher, Sha256PasswordHasher},
    };
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    // ===== フィクスチャ =====

    fn register_input(id: &str) -> RegisterInput {
        RegisterInput {
            id:       id.to_string(),
            password: "456".to_string(),
            email:    "a@b.c".to_string(),
            name:     "두레이".to_string(),
        }
    }

    fn usecase_with(
        repository: &InMemoryMemberRepository,
        hasher: Arc<dyn PasswordHasher>,
    ) -> MemberUseCaseImpl {
        MemberUseCaseImpl::new(Arc::new(repository.clone()), hasher)
    }

    #[fixture]
    fn repository() -> InMemoryMemberRepository {
        InMemoryMemberRepository::new()
    }

    #[fixture]
    fn sut(repository: InMemoryMemberRepository) -> (MemberUseCaseImpl, InMemoryMemberRepository) {
        (
            usecase_with(&repository, Arc::new(NoopPasswordHasher)),
            repository,
        )
    }

    // ===== register =====

    #[rstest]
    #[tokio::test]
    async fn test_登録した会員は登録済み状態で取得できる(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let registered = sut.register(register_input("123")).await.unwrap();
        let found = sut.get("123").await.unwrap();

        assert_eq!(found, registered);
        assert_eq!(found.id().as_str(), "123");
        assert_eq!(found.email().as_str(), "a@b.c");
        assert_eq!(found.name().as_str(), "두레이");
        assert_eq!(found.status(), MemberStatus::Registered);
    }

    #[rstest]
    #[tokio::test]
    async fn test_前後の空白を含むidと会員名はそのまま保存される(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;
        let input = RegisterInput {
            name: " 두레이".to_string(),
            ..register_input(" a")
        };

        sut.register(input).await.unwrap();
        let found = sut.get(" a").await.unwrap();

        assert_eq!(found.id().as_str(), " a");
        assert_eq!(found.name().as_str(), " 두레이");
        assert!(matches!(sut.get("a").await, Err(MemberError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_空白の有無だけが異なるidは別会員として登録できる(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, repository) = sut;

        sut.register(register_input(" a")).await.unwrap();
        sut.register(register_input("a")).await.unwrap();

        assert_eq!(repository.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_前後の空白で2文字以上になる会員名を受け入れる(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;
        let input = RegisterInput {
            name: " x ".to_string(),
            ..register_input("123")
        };

        let member = sut.register(input).await.unwrap();

        assert_eq!(member.name().as_str(), " x ");
    }

    #[rstest]
    #[tokio::test]
    async fn test_同じidの登録は競合(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, repository) = sut;
        sut.register(register_input("123")).await.unwrap();

        let err = sut.register(register_input("123")).await.unwrap_err();

        assert!(matches!(err, MemberError::Conflict(_)));
        assert_eq!(repository.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_並行登録は1件のみ成功する(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, repository) = sut;

        let (first, second) = tokio::join!(
            sut.register(register_input("123")),
            sut.register(register_input("123")),
        );

        let results = [first, second];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(MemberError::Conflict(_))))
            .count();
        assert_eq!((successes, conflicts), (1, 1));
        assert_eq!(repository.len(), 1);
    }

    #[rstest]
    #[case(RegisterInput { id: "".into(), ..register_input("x") }, "空の ID")]
    #[case(RegisterInput { id: "123456789012345678901".into(), ..register_input("x") }, "21文字の ID")]
    #[case(RegisterInput { password: "".into(), ..register_input("123") }, "空のパスワード")]
    #[case(RegisterInput { email: "not-an-email".into(), ..register_input("123") }, "不正なメールアドレス")]
    #[case(RegisterInput { name: "a".into(), ..register_input("123") }, "1文字の会員名")]
    #[tokio::test]
    async fn test_不正な入力での登録はinvalid_argument(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
        #[case] input: RegisterInput,
        #[case] _reason: &str,
    ) {
        let (sut, repository) = sut;

        let err = sut.register(input).await.unwrap_err();

        assert!(matches!(err, MemberError::InvalidArgument(_)));
        assert!(repository.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_登録時にハッシャーの出力が検証子として保存される(
        repository: InMemoryMemberRepository,
    ) {
        let sut = usecase_with(&repository, Arc::new(Sha256PasswordHasher::default()));
        let input = RegisterInput {
            password: "abc".to_string(),
            ..register_input("123")
        };

        sut.register(input).await.unwrap();

        let stored = repository.get("123").unwrap();
        assert_eq!(
            stored.verifier().as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_ストア障害時の登録はunavailable(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, repository) = sut;
        repository.set_unavailable(true);

        let err = sut.register(register_input("123")).await.unwrap_err();

        assert!(matches!(err, MemberError::Unavailable(_)));
    }

    // ===== get =====

    #[rstest]
    #[tokio::test]
    async fn test_存在しない会員の取得はnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.get("999").await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_不正なidの取得はinvalid_argument(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.get("123456789012345678901").await.unwrap_err();

        assert!(matches!(err, MemberError::InvalidArgument(_)));
    }

    // ===== update =====

    #[rstest]
    #[tokio::test]
    async fn test_状態のみの更新は他のフィールドを保持する(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, repository) = sut;
        let before = sut.register(register_input("123")).await.unwrap();

        let input = UpdateInput {
            status: Some(MemberStatus::Dormant),
            ..UpdateInput::default()
        };
        let after = sut.update("123", input).await.unwrap();

        assert_eq!(after.id(), before.id());
        assert_eq!(after.email(), before.email());
        assert_eq!(after.name(), before.name());
        assert_eq!(after.verifier(), before.verifier());
        assert_eq!(after.status(), MemberStatus::Dormant);
        assert_eq!(repository.get("123"), Some(after));
    }

    #[rstest]
    #[tokio::test]
    async fn test_全フィールドの更新(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();

        let input = UpdateInput {
            password: Some("789".to_string()),
            email:    Some("x@y.z".to_string()),
            name:     Some("새이름".to_string()),
            status:   Some(MemberStatus::Dormant),
        };
        let after = sut.update("123", input).await.unwrap();

        assert_eq!(after.id().as_str(), "123");
        assert_eq!(after.verifier().as_str(), "789");
        assert_eq!(after.email().as_str(), "x@y.z");
        assert_eq!(after.name().as_str(), "새이름");
        assert!(sut.matches("123", "789").await.unwrap());
        assert!(!sut.matches("123", "456").await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn test_不正な値での更新は保存されない(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, repository) = sut;
        let before = sut.register(register_input("123")).await.unwrap();

        let input = UpdateInput {
            name: Some("a".to_string()),
            ..UpdateInput::default()
        };
        let err = sut.update("123", input).await.unwrap_err();

        assert!(matches!(err, MemberError::InvalidArgument(_)));
        assert_eq!(repository.get("123"), Some(before));
    }

    #[rstest]
    #[tokio::test]
    async fn test_存在しない会員の更新はnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.update("999", UpdateInput::default()).await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(_)));
    }

    #[rstest]
    #[case(MemberStatus::Registered)]
    #[case(MemberStatus::Dormant)]
    #[tokio::test]
    async fn test_退会済み会員は更新で復帰できる(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
        #[case] status: MemberStatus,
    ) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();
        sut.delete("123").await.unwrap();

        let input = UpdateInput {
            status: Some(status),
            ..UpdateInput::default()
        };
        sut.update("123", input).await.unwrap();

        assert_eq!(sut.get("123").await.unwrap().status(), status);
        assert!(sut.matches("123", "456").await.unwrap());
    }

    // ===== delete =====

    #[rstest]
    #[tokio::test]
    async fn test_退会は論理削除で冪等(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, repository) = sut;
        sut.register(register_input("123")).await.unwrap();

        sut.delete("123").await.unwrap();
        sut.delete("123").await.unwrap();

        let stored = repository.get("123").unwrap();
        assert_eq!(stored.status(), MemberStatus::Withdrawn);
    }

    #[rstest]
    #[tokio::test]
    async fn test_退会済み会員は取得も認証もforbidden(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();
        sut.delete("123").await.unwrap();

        assert!(matches!(
            sut.get("123").await,
            Err(MemberError::Forbidden(_))
        ));
        assert!(matches!(
            sut.matches("123", "456").await,
            Err(MemberError::Forbidden(_))
        ));

        let page = sut.list(0, 20).await.unwrap();
        assert_eq!(page.items().len(), 1);
        assert_eq!(page.items()[0].status(), MemberStatus::Withdrawn);
    }

    #[rstest]
    #[tokio::test]
    async fn test_存在しない会員の退会はnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.delete("999").await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(_)));
    }

    // ===== list =====

    #[rstest]
    #[tokio::test]
    async fn test_一覧はid昇順でページングされる(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;
        for id in ["3", "1", "2"] {
            sut.register(register_input(id)).await.unwrap();
        }

        let page = sut.list(0, 2).await.unwrap();

        let ids: Vec<&str> = page.items().iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(page.total(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_サイズ0の一覧は総件数のみ(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, _) = sut;
        sut.register(register_input("1")).await.unwrap();

        let page = sut.list(0, 0).await.unwrap();

        assert!(page.items().is_empty());
        assert_eq!(page.total(), 1);
    }

    #[rstest]
    #[case(-1, 20)]
    #[case(0, -1)]
    #[tokio::test]
    async fn test_負のページ指定はinvalid_argument(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
        #[case] page: i64,
        #[case] size: i64,
    ) {
        let (sut, _) = sut;

        let err = sut.list(page, size).await.unwrap_err();

        assert!(matches!(err, MemberError::InvalidArgument(_)));
    }

    // ===== matches =====

    #[rstest]
    #[tokio::test]
    async fn test_パスワードの一致判定(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();

        assert!(sut.matches("123", "456").await.unwrap());
        assert!(!sut.matches("123", "wrong").await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn test_ハッシャー設定時も一致判定できる(repository: InMemoryMemberRepository) {
        let sut = usecase_with(&repository, Arc::new(Sha256PasswordHasher::new("pepper")));
        sut.register(register_input("123")).await.unwrap();

        assert!(sut.matches("123", "456").await.unwrap());
        assert!(!sut.matches("123", "457").await.unwrap());
        assert_ne!(repository.get("123").unwrap().verifier().as_str(), "456");
    }

    #[rstest]
    #[tokio::test]
    async fn test_存在しない会員の認証はnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.matches("999", "456").await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(_)));
    }

    // ===== lookup =====

    #[rstest]
    #[tokio::test]
    async fn test_一括参照は入力順で返す(sut: (MemberUseCaseImpl, InMemoryMemberRepository)) {
        let (sut, _) = sut;
        for id in ["1", "2", "3"] {
            sut.register(register_input(id)).await.unwrap();
        }
        sut.delete("2").await.unwrap();

        let input = LookupInput {
            ids: vec!["3".to_string(), "2".to_string(), "1".to_string()],
        };
        let members = sut.lookup(input).await.unwrap();

        let ids: Vec<&str> = members.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_一括参照で存在しないidがあればnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();

        let input = LookupInput {
            ids: vec!["123".to_string(), "999".to_string(), "998".to_string()],
        };
        let err = sut.lookup(input).await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(msg) if msg.contains("999")));
    }

    #[rstest]
    #[case("123456789012345678901")]
    #[case("")]
    #[tokio::test]
    async fn test_会員idの制約を満たさないidの一括参照はnot_found(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
        #[case] missing: &str,
    ) {
        let (sut, _) = sut;
        sut.register(register_input("123")).await.unwrap();

        let input = LookupInput {
            ids: vec!["123".to_string(), missing.to_string()],
        };
        let err = sut.lookup(input).await.unwrap_err();

        assert!(matches!(err, MemberError::NotFound(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_空の一括参照はinvalid_argument(
        sut: (MemberUseCaseImpl, InMemoryMemberRepository),
    ) {
        let (sut, _) = sut;

        let err = sut.lookup(LookupInput { ids: vec![] }).await.unwrap_err();

        assert!(matches!(err, MemberError::InvalidArgument(_)));
    }
}
