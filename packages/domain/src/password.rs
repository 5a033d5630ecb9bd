//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録・更新・ログイン時の入力値 |
//! | [`PasswordVerifier`] | 検証子 | 永続化される値（ハッシャー未設定時は平文そのもの） |

use crate::DomainError;

/// パスワード・検証子に共通の最大文字数
const MAX_LENGTH: usize = 255;

fn validate_length(label: &str, value: &str) -> Result<(), DomainError> {
    let length = value.chars().count();
    if length == 0 || length > MAX_LENGTH {
        return Err(DomainError::Validation(format!(
            "{label}は 1 〜 {MAX_LENGTH} 文字である必要があります"
        )));
    }
    Ok(())
}

/// 平文パスワード
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    ///
    /// 前後の空白も入力の一部として扱うため trim しない。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_length("パスワード", &value)?;
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワード検証子（永続化用）
///
/// ハッシャーの出力をラップする。中身は不透明な文字列として扱い、
/// 呼び出し元へ返すレスポンスには決して含めない。
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordVerifier(String);

impl std::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PasswordVerifier").field(&"[REDACTED]").finish()
    }
}

impl PasswordVerifier {
    /// 検証子を作成する
    ///
    /// ハッシャーの出力、またはデータベースからの復元値を受け取る。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_length("パスワード検証子", &value)?;
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
