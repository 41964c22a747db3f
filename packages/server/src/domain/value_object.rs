//! Value Object 定義
//!
//! ドメインで扱う値を型で表現します。生成時にバリデーションを行うため、
//! 一度生成された値は常に有効です。

use std::fmt;

use uuid::Uuid;

use super::ValueObjectError;

/// Room 名の最大文字数
pub const ROOM_NAME_MAX_LEN: usize = 64;

/// ニックネームの最大文字数
pub const NICKNAME_MAX_LEN: usize = 32;

/// Room 名
///
/// URL パスの一部として受け取るため、空白と `/` を含めることはできません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = value.chars().count();
        if len > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: len,
            });
        }
        if value.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ValueObjectError::RoomNameInvalidCharacter(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ニックネーム
///
/// ハンドシェイクで受け取った 1 行から生成されます。前後の空白は取り除かれます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::NicknameEmpty);
        }
        let len = trimmed.chars().count();
        if len > NICKNAME_MAX_LEN {
            return Err(ValueObjectError::NicknameTooLong {
                max: NICKNAME_MAX_LEN,
                actual: len,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValueObjectError::NicknameInvalidCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続ごとに払い出されるクライアント ID
///
/// 同じニックネームを名乗る別々の接続を区別するために使います。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix タイムスタンプ（JST, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn now() -> Self {
        Self(hiroba_shared::time::get_jst_timestamp())
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_accepts_simple_name() {
        // テスト項目: 通常の Room 名は生成できる
        // given (前提条件):
        let value = "general".to_string();

        // when (操作):
        let result = RoomName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "general");
    }

    #[test]
    fn test_room_name_rejects_empty_and_blank() {
        // テスト項目: 空文字列・空白のみの Room 名はエラーになる
        // given (前提条件):
        let empty = String::new();
        let blank = "   ".to_string();

        // when (操作):
        let empty_result = RoomName::new(empty);
        let blank_result = RoomName::new(blank);

        // then (期待する結果):
        assert_eq!(empty_result, Err(ValueObjectError::RoomNameEmpty));
        assert_eq!(blank_result, Err(ValueObjectError::RoomNameEmpty));
    }

    #[test]
    fn test_room_name_rejects_too_long() {
        // テスト項目: 最大文字数を超える Room 名はエラーになる
        // given (前提条件):
        let value = "a".repeat(ROOM_NAME_MAX_LEN + 1);

        // when (操作):
        let result = RoomName::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: ROOM_NAME_MAX_LEN + 1,
            })
        );
    }

    #[test]
    fn test_room_name_rejects_slash_and_whitespace() {
        // テスト項目: `/` や空白を含む Room 名はエラーになる
        // given (前提条件):
        let with_slash = "a/b".to_string();
        let with_space = "a b".to_string();

        // when (操作) / then (期待する結果):
        assert!(matches!(
            RoomName::new(with_slash),
            Err(ValueObjectError::RoomNameInvalidCharacter(_))
        ));
        assert!(matches!(
            RoomName::new(with_space),
            Err(ValueObjectError::RoomNameInvalidCharacter(_))
        ));
    }

    #[test]
    fn test_nickname_is_trimmed() {
        // テスト項目: ニックネームの前後の空白・改行は取り除かれる
        // given (前提条件):
        let value = "  alice\n".to_string();

        // when (操作):
        let nickname = Nickname::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(nickname.as_str(), "alice");
    }

    #[test]
    fn test_nickname_rejects_invalid_values() {
        // テスト項目: 空・長すぎる・制御文字を含むニックネームはエラーになる
        // given (前提条件):
        let too_long = "n".repeat(NICKNAME_MAX_LEN + 1);

        // when (操作) / then (期待する結果):
        assert_eq!(
            Nickname::new("\t ".to_string()),
            Err(ValueObjectError::NicknameEmpty)
        );
        assert!(matches!(
            Nickname::new(too_long),
            Err(ValueObjectError::NicknameTooLong { .. })
        ));
        assert_eq!(
            Nickname::new("al\u{7}ice".to_string()),
            Err(ValueObjectError::NicknameInvalidCharacter)
        );
    }

    #[test]
    fn test_client_id_is_unique_per_generation() {
        // テスト項目: ClientId は生成のたびに異なる値になる
        // given (前提条件) / when (操作):
        let first = ClientId::generate();
        let second = ClientId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
