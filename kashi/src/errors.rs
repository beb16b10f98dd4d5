//! エラー型の定義
//!
//! このモジュールは、kashiで使用されるすべてのエラー型を定義します。
//! 辞書の読み込み時のエラー（[`DictionaryError`]）と、入力テキストの
//! 文字コードエラー（[`EncodingError`]）が呼び出し側に届く主なエラーです。
//! 検索結果が空であることはエラーではなく、
//! [`SearchOutcome::IndexMiss`](crate::index::SearchOutcome::IndexMiss)で表現されます。

use std::error::Error;
use std::fmt;

use crate::dictionary::PosTag;

/// kashi専用のResult型
///
/// エラー型としてデフォルトで[`KashiError`]を使用します。
pub type Result<T, E = KashiError> = std::result::Result<T, E>;

/// kashiのエラー型
#[derive(Debug, thiserror::Error)]
pub enum KashiError {
    /// 辞書エントリが不正
    ///
    /// 起動時の辞書構築でのみ発生します。実行時に回復されることはありません。
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// 入力が有効な文字データとして解釈できない
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// 無効な引数エラー
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効な状態エラー
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 整数変換エラー
    #[error(transparent)]
    TryFromInt(std::num::TryFromIntError),

    /// I/Oエラー
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// rkyvシリアライゼーションエラー
    #[error(transparent)]
    Rkyv(#[from] rkyv::rancor::Error),
}

impl KashiError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// 辞書の構築・読み込み時のエラー
///
/// プロセス起動時に致命的なものとして扱われます。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    /// 表層形が空のエントリ
    #[error("DictionaryError: entry #{index} has an empty surface form")]
    EmptySurface {
        /// 宣言順のエントリ番号
        index: usize,
    },

    /// (表層形, 読み, 品詞) が重複したエントリ
    #[error("DictionaryError: entry #{index} duplicates ({surface}, {reading}, {tag})")]
    DuplicateEntry {
        /// 宣言順のエントリ番号
        index: usize,
        /// 表層形
        surface: String,
        /// 読み
        reading: String,
        /// 品詞
        tag: PosTag,
    },

    /// 辞書ソースのフォーマットが不正
    #[error("DictionaryError: {name}: {msg}")]
    InvalidFormat {
        /// ソースの名前
        name: &'static str,
        /// エラーメッセージ
        msg: String,
    },
}

impl DictionaryError {
    pub(crate) fn invalid_format<S>(name: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat {
            name,
            msg: msg.into(),
        }
    }
}

/// 入力バイト列が有効なUTF-8ではない場合のエラー
///
/// 分割処理の前に拒否され、部分的な結果は生成されません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError {
    /// 先頭から有効だったバイト数
    pub(crate) valid_up_to: usize,

    /// 不正なバイト列の長さ。入力が途中で終わっている場合は`None`
    pub(crate) error_len: Option<usize>,
}

impl EncodingError {
    /// 最初の不正なバイト列の開始位置（バイト単位）を返します。
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// 不正なバイト列の長さを返します。
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.error_len {
            Some(len) => write!(
                f,
                "EncodingError: invalid UTF-8 sequence of {} byte(s) at offset {}",
                len, self.valid_up_to
            ),
            None => write!(
                f,
                "EncodingError: incomplete UTF-8 sequence at offset {}",
                self.valid_up_to
            ),
        }
    }
}

impl Error for EncodingError {}

impl From<std::str::Utf8Error> for EncodingError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self {
            valid_up_to: error.valid_up_to(),
            error_len: error.error_len(),
        }
    }
}

/// rasword単語帳サービスへの書き出しエラー
///
/// `rasword`フィーチャーが有効な場合のみ利用可能です。
#[cfg(feature = "rasword")]
#[cfg_attr(docsrs, doc(cfg(feature = "rasword")))]
#[derive(Debug, thiserror::Error)]
pub enum RaswordError {
    /// ネットワークリクエストの失敗
    #[error("Network request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// サービスがリクエストを拒否した
    #[error("rasword {endpoint} failed: {msg}")]
    Rejected {
        /// エンドポイント
        endpoint: &'static str,
        /// サービスが返したメッセージ
        msg: String,
    },
}

#[cfg(feature = "rasword")]
impl RaswordError {
    pub(crate) fn rejected<S>(endpoint: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Rejected {
            endpoint,
            msg: msg.into(),
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

impl From<std::num::TryFromIntError> for KashiError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::TryFromInt(error)
    }
}

impl From<std::str::Utf8Error> for KashiError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Encoding(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_from_utf8() {
        let bytes = b"ab\xffcd";
        let err = EncodingError::from(std::str::from_utf8(bytes).unwrap_err());
        assert_eq!(err.valid_up_to(), 2);
        assert_eq!(err.error_len(), Some(1));
        assert_eq!(
            err.to_string(),
            "EncodingError: invalid UTF-8 sequence of 1 byte(s) at offset 2"
        );
    }

    #[test]
    fn test_encoding_error_incomplete() {
        let bytes = "歌".as_bytes();
        let err = EncodingError::from(std::str::from_utf8(&bytes[..2]).unwrap_err());
        assert_eq!(err.valid_up_to(), 0);
        assert_eq!(err.error_len(), None);
    }
}
