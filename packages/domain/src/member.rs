//! # 会員
//!
//! 会員エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 制約 |
//! |---|------------|------|
//! | [`Member`] | 会員 | ID は作成後に変更されない |
//! | [`MemberId`] | 会員 ID | 1 〜 20 文字 |
//! | [`Email`] | メールアドレス | 50 文字以内、`local@domain` 形式 |
//! | [`MemberName`] | 会員名 | 2 〜 20 文字 |
//! | [`MemberStatus`] | 会員状態 | `REGISTERED` / `DORMANT` / `WITHDRAWN` |
//!
//! ## 状態遷移
//!
//! ```text
//! (register) ──> REGISTERED <──update──> DORMANT
//!                    │  ↑                  │  ↑
//!             delete │  │ update    delete │  │ update
//!                    ↓  │                  ↓  │
//!                   WITHDRAWN <────────────┘──┘
//! ```
//!
//! 退会（`WITHDRAWN`）は論理削除であり、レコードは残り続ける。
//! 退会状態から抜け出せるのは更新（`with_status`）のみ。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use minidooray_domain::{
//!     member::{Email, Member, MemberId, MemberName, MemberStatus},
//!     password::PasswordVerifier,
//! };
//!
//! let member = Member::new(
//!     MemberId::new("123")?,
//!     PasswordVerifier::new("456")?,
//!     Email::new("a@b.c")?,
//!     MemberName::new("두레이")?,
//! );
//! assert_eq!(member.status(), MemberStatus::Registered);
//!
//! let member = member.withdrawn();
//! assert!(member.is_withdrawn());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{DomainError, password::PasswordVerifier};

define_validated_string! {
    /// 会員 ID（主キー）
    ///
    /// 登録時に利用者が指定する不透明な文字列。作成後は変更されない。
    pub struct MemberId {
        label: "会員 ID",
        min_length: 1,
        max_length: 20,
    }
}

define_validated_string! {
    /// 会員名
    ///
    /// PII のため Debug 出力はマスクされる。
    pub struct MemberName {
        label: "会員名",
        min_length: 2,
        max_length: 20,
        pii: true,
    }
}

/// メールアドレス（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// 最大文字数
    pub const MAX_LENGTH: usize = 50;

    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 空白文字を含まない
    /// - `local@domain` の形式（`@` はちょうど 1 つ）
    /// - ドメイン部はドットで始まらず、終わらず、連続しない
    /// - 最大 50 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは{}文字以内である必要があります",
                Self::MAX_LENGTH
            )));
        }

        let invalid = || DomainError::Validation("メールアドレスの形式が不正です".to_string());

        if value.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(invalid());
        };

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || domain.contains("..")
        {
            return Err(invalid());
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 会員状態
///
/// 列挙名の文字列（`REGISTERED` など）でシリアライズ・永続化する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// 登録済み（初期状態）
    Registered,
    /// 休眠
    Dormant,
    /// 退会（論理削除）
    Withdrawn,
}

impl MemberStatus {
    /// 永続化用の文字列表現を返す
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTERED" => Ok(Self::Registered),
            "DORMANT" => Ok(Self::Dormant),
            "WITHDRAWN" => Ok(Self::Withdrawn),
            _ => Err(DomainError::Validation(format!(
                "不正な会員状態: {}",
                s
            ))),
        }
    }
}

/// 会員エンティティ
///
/// # 不変条件
///
/// - `id` はストア内で一意であり、作成後に変更されない
/// - すべてのフィールドは値オブジェクトの制約を満たす
/// - 削除は `status = WITHDRAWN` への遷移で表現し、物理削除はしない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id:       MemberId,
    verifier: PasswordVerifier,
    email:    Email,
    name:     MemberName,
    status:   MemberStatus,
}

impl Member {
    /// 新しい会員を作成する
    ///
    /// 作成時のステータスは `Registered`。
    pub fn new(
        id: MemberId,
        verifier: PasswordVerifier,
        email: Email,
        name: MemberName,
    ) -> Self {
        Self {
            id,
            verifier,
            email,
            name,
            status: MemberStatus::Registered,
        }
    }

    /// 既存のデータから会員を復元する（データベースから取得時）
    pub fn from_db(
        id: MemberId,
        verifier: PasswordVerifier,
        email: Email,
        name: MemberName,
        status: MemberStatus,
    ) -> Self {
        Self {
            id,
            verifier,
            email,
            name,
            status,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn verifier(&self) -> &PasswordVerifier {
        &self.verifier
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &MemberName {
        &self.name
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    // ビジネスロジックメソッド

    /// 退会済みか判定する
    pub fn is_withdrawn(&self) -> bool {
        self.status == MemberStatus::Withdrawn
    }

    /// 参照系操作（単体取得・認証）で会員を扱えるか検証する
    ///
    /// 退会済みの場合は `DomainError::Forbidden` を返す。
    pub fn ensure_not_withdrawn(&self) -> Result<(), DomainError> {
        if self.is_withdrawn() {
            return Err(DomainError::Forbidden(format!(
                "退会済みの会員です: {}",
                self.id
            )));
        }
        Ok(())
    }

    /// 検証子を差し替えた新しいインスタンスを返す
    pub fn with_verifier(self, verifier: PasswordVerifier) -> Self {
        Self { verifier, ..self }
    }

    /// メールアドレスを変更した新しいインスタンスを返す
    pub fn with_email(self, email: Email) -> Self {
        Self { email, ..self }
    }

    /// 会員名を変更した新しいインスタンスを返す
    pub fn with_name(self, name: MemberName) -> Self {
        Self { name, ..self }
    }

    /// 会員状態を変更した新しいインスタンスを返す
    ///
    /// 3 状態間の遷移はすべて許可される（退会からの復帰を含む）。
    pub fn with_status(self, status: MemberStatus) -> Self {
        Self { status, ..self }
    }

    /// 退会（論理削除）した新しいインスタンスを返す
    ///
    /// 既に退会済みの場合は状態を変えない。
    pub fn withdrawn(self) -> Self {
        self.with_status(MemberStatus::Withdrawn)
    }
}
