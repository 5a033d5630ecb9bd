//! # Member API 設定
//!
//! 環境変数から会員 API サーバーの設定を読み込む。
//!
//! | 環境変数 | デフォルト | 説明 |
//! |---------|-----------|------|
//! | `MEMBER_HOST` | `0.0.0.0` | バインドアドレス |
//! | `MEMBER_PORT` | 必須 | ポート番号 |
//! | `DATABASE_URL` | 必須 | PostgreSQL 接続 URL |
//! | `MEMBER_PATH_PREFIX` | `/member` | ルートのプレフィックス（空または `/` でルート直下） |
//! | `PASSWORD_HASHER` | `none` | `none` / `sha256` / `argon2` |
//! | `PASSWORD_HASHER_SECRET` | 空 | sha256 のペッパー / argon2 のソルト |
//! | `PAGING_DEFAULT_PAGE` | `0` | ページ番号のデフォルト |
//! | `PAGING_DEFAULT_SIZE` | `20` | ページサイズのデフォルト |

use std::env;

use minidooray_infra::HasherKind;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値が不正
    #[error("{key} の値が不正です（{value:?}）: {reason}")]
    Invalid {
        key:    &'static str,
        value:  String,
        reason: String,
    },
}

/// 会員 API サーバーの設定
#[derive(Debug, Clone)]
pub struct MemberApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// ルートのプレフィックス
    pub path_prefix:  String,
    /// パスワードハッシャー設定
    pub hasher:       HasherConfig,
    /// ページング設定
    pub paging:       PagingConfig,
}

/// パスワードハッシャーの設定
#[derive(Clone)]
pub struct HasherConfig {
    pub kind:   HasherKind,
    /// sha256 のペッパー / argon2 のソルト
    pub secret: String,
}

impl std::fmt::Debug for HasherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasherConfig")
            .field("kind", &self.kind)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// 一覧取得でクエリパラメータが省略された場合のデフォルト値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page: i64,
    pub default_size: i64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_size: 20,
        }
    }
}

impl MemberApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// キーから値を引く関数で設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default =
            |key: &'static str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = parse("MEMBER_PORT", required("MEMBER_PORT")?)?;

        let hasher_kind = parse("PASSWORD_HASHER", or_default("PASSWORD_HASHER", "none"))?;
        let hasher_secret = or_default("PASSWORD_HASHER_SECRET", "");

        let default_page: i64 =
            parse("PAGING_DEFAULT_PAGE", or_default("PAGING_DEFAULT_PAGE", "0"))?;
        let default_size: i64 =
            parse("PAGING_DEFAULT_SIZE", or_default("PAGING_DEFAULT_SIZE", "20"))?;
        non_negative("PAGING_DEFAULT_PAGE", default_page)?;
        non_negative("PAGING_DEFAULT_SIZE", default_size)?;

        Ok(Self {
            host: or_default("MEMBER_HOST", "0.0.0.0"),
            port,
            database_url: required("DATABASE_URL")?,
            path_prefix: or_default("MEMBER_PATH_PREFIX", "/member"),
            hasher: HasherConfig {
                kind:   hasher_kind,
                secret: hasher_secret,
            },
            paging: PagingConfig {
                default_page,
                default_size,
            },
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn non_negative(key: &'static str, value: i64) -> Result<(), ConfigError> {
    if value < 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "0 以上である必要があります".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<MemberApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MemberApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("MEMBER_PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/minidooray"),
    ];

    #[test]
    fn test_必須項目のみでデフォルト値が使われる() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.path_prefix, "/member");
        assert_eq!(config.hasher.kind, HasherKind::None);
        assert_eq!(config.paging, PagingConfig::default());
    }

    #[test]
    fn test_すべての項目を上書きできる() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("MEMBER_HOST", "127.0.0.1"),
            ("MEMBER_PATH_PREFIX", "/api/members"),
            ("PASSWORD_HASHER", "sha256"),
            ("PASSWORD_HASHER_SECRET", "pepper"),
            ("PAGING_DEFAULT_PAGE", "1"),
            ("PAGING_DEFAULT_SIZE", "50"),
        ]);

        let config = load(&vars).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.path_prefix, "/api/members");
        assert_eq!(config.hasher.kind, HasherKind::Sha256);
        assert_eq!(config.hasher.secret, "pepper");
        assert_eq!(
            config.paging,
            PagingConfig {
                default_page: 1,
                default_size: 50,
            }
        );
    }

    #[rstest]
    #[case("MEMBER_PORT")]
    #[case("DATABASE_URL")]
    fn test_必須項目がないとエラー(#[case] missing: &str) {
        let vars: Vec<_> = REQUIRED.into_iter().filter(|(k, _)| *k != missing).collect();

        let err = load(&vars).unwrap_err();

        assert!(matches!(err, ConfigError::Missing(key) if key == missing));
    }

    #[rstest]
    #[case("MEMBER_PORT", "not-a-port")]
    #[case("PASSWORD_HASHER", "bcrypt")]
    #[case("PAGING_DEFAULT_SIZE", "-1")]
    #[case("PAGING_DEFAULT_PAGE", "abc")]
    fn test_不正な値はエラー(#[case] key: &str, #[case] value: &str) {
        let mut vars: Vec<_> = REQUIRED.into_iter().filter(|(k, _)| *k != key).collect();
        vars.push((key, value));

        let err = load(&vars).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: k, .. } if k == key));
    }

    #[test]
    fn test_ハッシャーの秘密値はdebug出力に含まれない() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PASSWORD_HASHER_SECRET", "top-secret"));

        let config = load(&vars).unwrap();

        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
