//! 単語帳への書き出し
//!
//! 歌詞中のトークンを外部の単語帳サービスに登録するための契約を定義します。
//! 書き出し先のエラーは書き出し先自身の型のまま呼び出し側に返されます。

#[cfg(feature = "rasword")]
#[cfg_attr(docsrs, doc(cfg(feature = "rasword")))]
pub mod rasword;

use std::convert::Infallible;

use parking_lot::Mutex;

/// 単語帳に登録する単語
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VocabularyWord {
    /// 表層形
    pub surface: String,
    /// 読み。解決できなかった場合は`None`
    pub reading: Option<String>,
}

impl VocabularyWord {
    /// 新しい単語を作成します。
    pub fn new<S>(surface: S, reading: Option<String>) -> Self
    where
        S: Into<String>,
    {
        Self {
            surface: surface.into(),
            reading,
        }
    }
}

/// 書き出しの結果
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportAck {
    /// 新しく登録された
    Created,
    /// すでに登録されていた
    AlreadyExists,
}

/// 単語帳への書き出し先
pub trait VocabularyExporter {
    /// 書き出し先のエラー型
    type Error;

    /// 単語を書き出します。
    ///
    /// # 引数
    ///
    /// * `word` - 書き出す単語
    ///
    /// # 戻り値
    ///
    /// 新規登録か既存かを示す[`ExportAck`]
    fn export(&self, word: &VocabularyWord) -> Result<ExportAck, Self::Error>;
}

impl<E> VocabularyExporter for &E
where
    E: VocabularyExporter + ?Sized,
{
    type Error = E::Error;

    fn export(&self, word: &VocabularyWord) -> Result<ExportAck, Self::Error> {
        (**self).export(word)
    }
}

/// プロセス内の単語帳
///
/// 表層形で重複を除きます。テストや試行に使用します。
#[derive(Default)]
pub struct MemoryVocabulary {
    words: Mutex<Vec<VocabularyWord>>,
}

impl MemoryVocabulary {
    /// 空の単語帳を作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録された単語を登録順に返します。
    pub fn words(&self) -> Vec<VocabularyWord> {
        self.words.lock().clone()
    }

    /// 登録された単語の数を返します。
    pub fn len(&self) -> usize {
        self.words.lock().len()
    }

    /// 単語が一つも登録されていないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 表層形が登録されているかどうかを返します。
    pub fn contains(&self, surface: &str) -> bool {
        self.words.lock().iter().any(|w| w.surface == surface)
    }
}

impl VocabularyExporter for MemoryVocabulary {
    type Error = Infallible;

    fn export(&self, word: &VocabularyWord) -> Result<ExportAck, Self::Error> {
        let mut words = self.words.lock();
        if words.iter().any(|w| w.surface == word.surface) {
            return Ok(ExportAck::AlreadyExists);
        }
        words.push(word.clone());
        Ok(ExportAck::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_vocabulary() {
        let vocab = MemoryVocabulary::new();
        assert!(vocab.is_empty());

        let word = VocabularyWord::new("歌", Some("うた".to_string()));
        assert_eq!(vocab.export(&word), Ok(ExportAck::Created));
        assert_eq!(
            vocab.export(&VocabularyWord::new("歌", None)),
            Ok(ExportAck::AlreadyExists)
        );
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains("歌"));
        assert_eq!(vocab.words(), vec![word]);
    }

    #[test]
    fn test_exporter_by_reference() {
        fn export_all<E: VocabularyExporter>(exporter: E, words: &[VocabularyWord]) -> usize {
            words
                .iter()
                .filter(|w| matches!(exporter.export(w), Ok(ExportAck::Created)))
                .count()
        }
        let vocab = MemoryVocabulary::new();
        let words = [
            VocabularyWord::new("桜", None),
            VocabularyWord::new("桜", None),
            VocabularyWord::new("空", None),
        ];
        assert_eq!(export_all(&vocab, &words), 2);
        assert_eq!(vocab.len(), 2);
    }
}
