//! # パスワードハッシャー
//!
//! 平文パスワードから永続化用の検証子を導出する。
//!
//! 認証は「検証子同士の一致」をストアに問い合わせる方式のため、
//! ハッシャーは同じ入力に対して常に同じ出力を返す（決定的である）必要がある。
//!
//! | 種別 | 実装 | 出力 |
//! |------|------|------|
//! | `none` | [`NoopPasswordHasher`] | 平文そのもの |
//! | `sha256` | [`Sha256PasswordHasher`] | ペッパー + 平文の SHA-256（小文字 16 進） |
//! | `argon2` | [`Argon2PasswordHasher`] | 固定ソルトの Argon2id PHC 文字列 |

use std::sync::Arc;

use argon2::{Argon2, Params, PasswordHasher as _, password_hash::SaltString};
use minidooray_domain::password::PlainPassword;
use sha2::{Digest, Sha256};

use crate::InfraError;

/// パスワードハッシャーの能力
///
/// ユースケースの構築時に注入される。実装を差し替えても
/// ユースケースを変更する必要はない。
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードから検証子文字列を導出する
    fn hash(&self, password: &PlainPassword) -> Result<String, InfraError>;
}

/// ハッシャーの種別（設定値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HasherKind {
    /// ハッシュしない（検証子 = 平文）
    #[default]
    None,
    Sha256,
    Argon2,
}

/// 設定に応じたハッシャーを構築する
///
/// `secret` は sha256 のペッパー、argon2 のソルトとして使用する。
pub fn build_password_hasher(
    kind: HasherKind,
    secret: &str,
) -> Result<Arc<dyn PasswordHasher>, InfraError> {
    let hasher: Arc<dyn PasswordHasher> = match kind {
        HasherKind::None => Arc::new(NoopPasswordHasher),
        HasherKind::Sha256 => Arc::new(Sha256PasswordHasher::new(secret)),
        HasherKind::Argon2 => Arc::new(Argon2PasswordHasher::new(secret)?),
    };
    Ok(hasher)
}

/// 恒等変換のハッシャー
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPasswordHasher;

impl PasswordHasher for NoopPasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<String, InfraError> {
        Ok(password.as_str().to_string())
    }
}

/// SHA-256 によるハッシャー
///
/// 出力は 64 文字の小文字 16 進文字列。
#[derive(Clone, Default)]
pub struct Sha256PasswordHasher {
    pepper: String,
}

impl Sha256PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<String, InfraError> {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(password.as_str().as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Argon2id によるハッシャー
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
///
/// ストア側で検証子を比較するため、ソルトは設定値から導出した固定値を使う。
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    salt:   SaltString,
}

impl Argon2PasswordHasher {
    /// ソルトとして使える秘密値の最小バイト数
    pub const MIN_SALT_BYTES: usize = 8;
    /// ソルトとして使える秘密値の最大バイト数（B64 で 64 文字）
    pub const MAX_SALT_BYTES: usize = 48;

    pub fn new(salt: &str) -> Result<Self, InfraError> {
        let length = salt.len();
        if !(Self::MIN_SALT_BYTES..=Self::MAX_SALT_BYTES).contains(&length) {
            return Err(InfraError::unexpected(format!(
                "Argon2 のソルトは {} 〜 {} バイトである必要があります（実際: {length}）",
                Self::MIN_SALT_BYTES,
                Self::MAX_SALT_BYTES,
            )));
        }

        let salt = SaltString::encode_b64(salt.as_bytes())
            .map_err(|e| InfraError::unexpected(format!("不正なソルト: {e}")))?;

        let params = Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
            salt,
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<String, InfraError> {
        let hash = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &self.salt)
            .map_err(|e| InfraError::unexpected(format!("ハッシュ計算に失敗しました: {e}")))?;
        Ok(hash.to_string())
    }
}
