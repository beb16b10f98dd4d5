//! 単語マッピング
//!
//! 表層形をトライに登録し、同じ表層形を持つ単語IDをポスティングリストで引きます。

pub mod posting;
pub mod trie;

use std::collections::BTreeMap;

use crate::dictionary::lexicon::map::posting::{Postings, PostingsBuilder};
use crate::dictionary::lexicon::map::trie::Trie;
use crate::errors::Result;
use crate::utils::FromU32;

/// 単語をトライ構造で管理するマップ
pub struct WordMap {
    trie: Trie,
    postings: Postings,
    num_surfaces: usize,
}

impl WordMap {
    /// 表層形のイテレータから新しいインスタンスを作成します。
    ///
    /// 単語IDは列挙順に0から振られます。
    pub fn new<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut b = WordMapBuilder::new();
        for (i, w) in words.into_iter().enumerate() {
            b.add_record(w.as_ref().to_string(), u32::try_from(i)?);
        }
        b.build()
    }

    /// 入力の接頭辞に一致する単語の `(単語ID, 終了文字位置)` を列挙します。
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = (u32, usize)> + 'a {
        self.trie.common_prefix_iterator(input).flat_map(move |e| {
            self.postings
                .ids(usize::from_u32(e.value))
                .map(move |word_id| (word_id, e.end_char))
        })
    }

    /// 表層形が完全一致する単語IDを宣言順に列挙します。
    pub fn exact_iterator<'a>(&'a self, surface: &str) -> impl Iterator<Item = u32> + 'a {
        self.trie
            .exact_match(surface)
            .into_iter()
            .flat_map(move |offset| self.postings.ids(usize::from_u32(offset)))
    }

    /// 異なり表層形の数を返します。
    #[inline(always)]
    pub const fn num_surfaces(&self) -> usize {
        self.num_surfaces
    }
}

/// 単語マップを構築するビルダー
#[derive(Default)]
pub struct WordMapBuilder {
    map: BTreeMap<String, Vec<u32>>,
}

impl WordMapBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn add_record(&mut self, word: String, id: u32) {
        self.map.entry(word).or_default().push(id);
    }

    pub fn build(self) -> Result<WordMap> {
        let mut entries = vec![];
        let mut builder = PostingsBuilder::new();
        for (word, ids) in self.map {
            let offset = builder.push(&ids)?;
            entries.push((word, u32::try_from(offset)?));
        }
        Ok(WordMap {
            num_surfaces: entries.len(),
            trie: Trie::from_records(&entries)?,
            postings: builder.build(),
        })
    }
}
