/// UUID をラップした ID 型を定義する
///
/// 生成される API:
///
/// - `new()`: UUID v7 で採番する（生成順にソート可能）
/// - `from_uuid()` / `as_uuid()` / `into_uuid()`: DB との相互変換
/// - `Display`: ハイフン区切りの UUID 文字列
/// - `Default`: `new()` と同じ
///
/// ```rust
/// use qna_domain::qna::QuestionId;
///
/// let id = QuestionId::new();
/// let restored = QuestionId::from_uuid(*id.as_uuid());
/// assert_eq!(id, restored);
/// assert_eq!(id.to_string(), restored.into_uuid().to_string());
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            pub fn into_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<$Name> for uuid::Uuid {
            fn from(id: $Name) -> Self {
                id.0
            }
        }
    };
}

/// 長さ制約付きの文字列値オブジェクトを定義する
///
/// `new()` は前後の空白を除去したうえで、空文字列と `max_length` 文字
/// （`chars().count()` 基準）超過を `DomainError::Validation` で拒否する。
///
/// `pii: true` を付けると `Debug` を `[REDACTED]` にマスクし、`Display` を実装しない。
/// 付けない場合は `Debug` / `Display` とも平文を出力する。
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use qna_domain::value_objects::{QuestionTitle, UserName};
///
/// let name = UserName::new(" 山田太郎 ")?;
/// assert_eq!(name.as_str(), "山田太郎");
/// assert!(format!("{:?}", name).contains("[REDACTED]"));
///
/// let title = QuestionTitle::new("所有権について")?;
/// assert_eq!(title.to_string(), "所有権について");
/// # Ok(())
/// # }
/// ```
macro_rules! define_validated_string {
    (@base $(#[$meta:meta])* $vis:vis $Name:ident, $label:expr, $max_length:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        $vis struct $Name(String);

        impl $Name {
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into();
                let value = value.trim();

                if value.is_empty() {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は必須です",
                        $label
                    )));
                }

                if value.chars().count() > $max_length {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は {} 文字以内である必要があります",
                        $label, $max_length
                    )));
                }

                Ok(Self(value.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr,
            pii: true $(,)?
        }
    ) => {
        define_validated_string!(@base $(#[$meta])* $vis $Name, $label, $max_length);

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&"[REDACTED]").finish()
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr $(,)?
        }
    ) => {
        define_validated_string!(@base $(#[$meta])* #[derive(Debug)] $vis $Name, $label, $max_length);

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
