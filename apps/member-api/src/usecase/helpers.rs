//! ユースケース層の共通ヘルパー

use minidooray_domain::{DomainError, member::MemberId};
use minidooray_infra::InfraError;

use crate::error::MemberError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, MemberError>` に変換する
///
/// ```ignore
/// let member = self.repository.find_by_id(&id).await.or_not_found(&id)?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `MemberError::NotFound`、`InfraError` は種別に応じて分類する
    fn or_not_found(self, id: &MemberId) -> Result<T, MemberError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, id: &MemberId) -> Result<T, MemberError> {
        self?.ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Member",
                id:          id.to_string(),
            }
            .into()
        })
    }
}

/// 必須入力を取り出す
///
/// 欠落している場合は `MemberError::InvalidArgument` を返す。
pub(crate) fn required<T>(value: Option<T>, label: &str) -> Result<T, MemberError> {
    value.ok_or_else(|| MemberError::InvalidArgument(format!("{label}は必須です")))
}
