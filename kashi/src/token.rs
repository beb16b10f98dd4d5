//! トークンの結果コンテナ
//!
//! 分割結果として得られるトークンを表現する型を提供します。
//! [`TokenRef`]は[`Worker`]への軽量な参照で、[`Token`]はその所有型版です。

use std::ops::Range;

use crate::dictionary::{DictionaryEntry, PosTag, ScriptClass};
use crate::segmenter::lattice::Node;
use crate::segmenter::worker::Worker;

/// 分割結果のトークンへの軽量な参照
///
/// 実際のデータはWorkerが保持しています。トークンはWorkerが生存している間のみ有効です。
pub struct TokenRef<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> TokenRef<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn node(&self) -> &'w (usize, Node) {
        &self.worker.top_nodes[self.index]
    }

    /// トークンの文字単位の位置範囲を取得します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        let (end_word, node) = self.node();
        node.start_word..*end_word
    }

    /// トークンのバイト単位の位置範囲を取得します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let sent = &self.worker.sent;
        let (end_word, node) = self.node();
        sent.byte_position(node.start_word)..sent.byte_position(*end_word)
    }

    /// トークンの表層形（元のテキスト中の文字列）を取得します。
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        let sent = &self.worker.sent;
        &sent.raw()[self.range_byte()]
    }

    /// トークンの単語IDを取得します。未知語の場合は`None`です。
    #[inline(always)]
    pub fn word_id(&self) -> Option<u32> {
        let (_, node) = self.node();
        if node.is_unknown() {
            None
        } else {
            Some(node.word_id)
        }
    }

    /// トークンの辞書エントリを取得します。未知語の場合は`None`です。
    #[inline(always)]
    pub fn entry(&self) -> Option<&'w DictionaryEntry> {
        self.word_id()
            .and_then(|word_id| self.worker.segmenter.dictionary().entry(word_id))
    }

    /// 辞書に由来するトークンかどうかを返します。
    #[inline(always)]
    pub fn is_known(&self) -> bool {
        self.word_id().is_some()
    }

    /// トークンの先頭文字の文字種を取得します。
    #[inline(always)]
    pub fn script(&self) -> ScriptClass {
        let (_, node) = self.node();
        self.worker.sent.char_info(node.start_word).class()
    }

    /// トークンの品詞を取得します。
    ///
    /// 未知語は、記号の連続であれば[`PosTag::Symbol`]、それ以外は[`PosTag::Unknown`]です。
    pub fn tag(&self) -> PosTag {
        match self.entry() {
            Some(entry) => entry.tag(),
            None if self.script() == ScriptClass::Punctuation => PosTag::Symbol,
            None => PosTag::Unknown,
        }
    }

    /// トークンの単語コストを取得します。
    #[inline(always)]
    pub fn word_cost(&self) -> u64 {
        self.node().1.word_cost
    }

    /// 文頭からこのトークンまでの累積コストを取得します。
    #[inline(always)]
    pub fn total_cost(&self) -> u64 {
        self.node().1.min_cost
    }

    /// このトークンビューを所有型の[`Token`]に変換します。
    pub fn to_token(&self) -> Token {
        Token {
            surface: self.surface().to_string(),
            range_char: self.range_char(),
            range_byte: self.range_byte(),
            tag: self.tag(),
            script: self.script(),
            word_id: self.word_id(),
            word_cost: self.word_cost(),
            total_cost: self.total_cost(),
            reading: None,
        }
    }
}

impl std::fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRef")
            .field("surface", &self.surface())
            .field("range_char", &self.range_char())
            .field("range_byte", &self.range_byte())
            .field("tag", &self.tag())
            .field("script", &self.script())
            .field("word_id", &self.word_id())
            .field("word_cost", &self.word_cost())
            .field("total_cost", &self.total_cost())
            .finish()
    }
}

/// トークンのイテレータ
pub struct TokenIter<'w> {
    worker: &'w Worker,
    front: usize,
    back: usize,
}

impl<'w> TokenIter<'w> {
    #[inline(always)]
    pub(crate) fn new(worker: &'w Worker) -> Self {
        let num_tokens = worker.num_tokens();
        Self {
            worker,
            front: 0,
            back: num_tokens,
        }
    }
}

impl<'w> Iterator for TokenIter<'w> {
    type Item = TokenRef<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let t = self.worker.token(self.front);
            self.front += 1;
            Some(t)
        } else {
            None
        }
    }
}

impl<'w> DoubleEndedIterator for TokenIter<'w> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            let t = self.worker.token(self.back);
            Some(t)
        } else {
            None
        }
    }
}

/// 所有型の自己完結したトークン
///
/// 読みは注釈されるまで`None`です（[`Annotator::annotated`](crate::Annotator::annotated)）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    surface: String,
    range_char: Range<usize>,
    range_byte: Range<usize>,
    tag: PosTag,
    script: ScriptClass,
    word_id: Option<u32>,
    word_cost: u64,
    total_cost: u64,
    reading: Option<String>,
}

impl Token {
    /// 表層形を返します。
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 文字単位の位置範囲を返します。
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.range_char.clone()
    }

    /// バイト単位の位置範囲を返します。
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.range_byte.clone()
    }

    /// 品詞を返します。
    #[inline(always)]
    pub const fn tag(&self) -> PosTag {
        self.tag
    }

    /// 先頭文字の文字種を返します。
    #[inline(always)]
    pub const fn script(&self) -> ScriptClass {
        self.script
    }

    /// 単語IDを返します。未知語の場合は`None`です。
    #[inline(always)]
    pub const fn word_id(&self) -> Option<u32> {
        self.word_id
    }

    /// 辞書に由来するトークンかどうかを返します。
    #[inline(always)]
    pub const fn is_known(&self) -> bool {
        self.word_id.is_some()
    }

    /// 単語コストを返します。
    #[inline(always)]
    pub const fn word_cost(&self) -> u64 {
        self.word_cost
    }

    /// 文頭からこのトークンまでの累積コストを返します。
    #[inline(always)]
    pub const fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// 注釈済みの読みを返します。注釈されていない場合は`None`です。
    #[inline(always)]
    pub fn reading(&self) -> Option<&str> {
        self.reading.as_deref()
    }

    #[inline(always)]
    pub(crate) fn set_reading(&mut self, reading: Option<String>) {
        self.reading = reading;
    }
}

impl<'w> From<TokenRef<'w>> for Token {
    fn from(token: TokenRef<'w>) -> Self {
        token.to_token()
    }
}
