//! トライ構造による高速文字列検索
//!
//! このモジュールは、ダブル配列トライを使用した共通接頭辞検索を提供します。

use crate::errors::{DictionaryError, Result};

/// ダブル配列トライ
///
/// 登録語が一つもない場合は内部のトライを持たず、すべての検索が空になります。
pub struct Trie {
    da: Option<crawdad::Trie>,
}

impl Trie {
    /// レコードからトライを構築します。
    ///
    /// # 引数
    ///
    /// * `records` - 辞書順に整列済みで重複のないキーと値の組
    pub fn from_records<K>(records: &[(K, u32)]) -> Result<Self>
    where
        K: AsRef<str>,
    {
        if records.is_empty() {
            return Ok(Self { da: None });
        }
        let da = crawdad::Trie::from_records(records.iter().map(|(k, v)| (k, *v)))
            .map_err(|e| DictionaryError::invalid_format("trie", e.to_string()))?;
        Ok(Self { da: Some(da) })
    }

    /// 入力の接頭辞に一致するキーを短い順に列挙します。
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = TrieMatch> + 'a {
        self.da.iter().flat_map(move |da| {
            da.common_prefix_search(input.iter().cloned())
                .map(move |(value, end_char)| TrieMatch::new(value, end_char))
        })
    }

    /// キーに完全一致する値を返します。
    #[inline(always)]
    pub fn exact_match(&self, key: &str) -> Option<u32> {
        self.da.as_ref().and_then(|da| da.exact_match(key.chars()))
    }
}

/// トライマッチング結果
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_char: usize,
}

impl TrieMatch {
    /// 新しいマッチング結果を作成します。
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_iterator() {
        let trie = Trie::from_records(&[("京都", 2), ("東京", 0), ("東京都", 1)]).unwrap();
        let input: Vec<_> = "東京都庁".chars().collect();
        let matches: Vec<_> = trie.common_prefix_iterator(&input).collect();
        assert_eq!(matches, vec![TrieMatch::new(0, 2), TrieMatch::new(1, 3)]);
        assert_eq!(trie.exact_match("京都"), Some(2));
        assert_eq!(trie.exact_match("京"), None);
    }

    #[test]
    fn test_empty_trie() {
        let trie = Trie::from_records::<&str>(&[]).unwrap();
        let input: Vec<_> = "歌".chars().collect();
        assert_eq!(trie.common_prefix_iterator(&input).count(), 0);
        assert_eq!(trie.exact_match("歌"), None);
    }
}
