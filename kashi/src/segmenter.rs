//! 最小コスト経路探索に基づく分割器。
//!
//! 入力文の各文字位置から始まる辞書語をエッジとしてラティスに追加し、
//! 文頭から文末までの最小コスト経路を単語列として取り出します。
//! 辞書語が一つも始まらない位置では、同じ文字種の連続を一つの未知語エッジとして追加します。
//!
//! # 例
//!
//! ```
//! use kashi::{Dictionary, DictionaryEntry, PosTag, Segmenter};
//!
//! let dict = Dictionary::from_entries([
//!     DictionaryEntry::new("東京", "とうきょう", PosTag::Content, 5),
//!     DictionaryEntry::new("都", "と", PosTag::Content, 1),
//! ])?;
//! let segmenter = Segmenter::new(dict);
//! let mut worker = segmenter.new_worker();
//!
//! worker.reset_sentence("東京都でLove");
//! worker.segment();
//!
//! let surfaces: Vec<_> = worker.token_iter().map(|t| t.surface()).collect();
//! assert_eq!(surfaces, ["東京", "都", "で", "Love"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub(crate) mod lattice;
pub mod worker;

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::segmenter::lattice::{Lattice, UNKNOWN_WORD_ID};
use crate::segmenter::worker::Worker;
use crate::sentence::Sentence;
use crate::token::Token;

/// 未知語エッジのコスト
///
/// 辞書語のコストは`u16`に収まるため、現実的な長さの行では
/// 辞書語だけからなる経路が常に未知語を含む経路より優先されます。
pub const UNKNOWN_WORD_COST: u64 = 1 << 32;

/// 辞書に基づいてテキストを単語に分割する分割器。
///
/// 辞書を共有参照で保持するため、複製は安価です。
/// 複数の[`Worker`]を生成して並列に分割できます。
#[derive(Clone)]
pub struct Segmenter {
    dict: Arc<Dictionary>,
    max_grouping_len: Option<usize>,
}

impl Segmenter {
    /// 新しい分割器を作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 分割に使用する辞書
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 共有された辞書から新しい分割器を作成します。
    ///
    /// # 引数
    ///
    /// * `dict` - 共有された辞書
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        Self {
            dict,
            max_grouping_len: None,
        }
    }

    /// 未知語の最大グルーピング長を指定します。
    ///
    /// デフォルトでは長さは無制限です。
    ///
    /// # 引数
    ///
    /// * `max_grouping_len` - 未知語の最大グルーピング長。0は無制限を示します。
    pub const fn max_grouping_len(mut self, max_grouping_len: usize) -> Self {
        if max_grouping_len != 0 {
            self.max_grouping_len = Some(max_grouping_len);
        } else {
            self.max_grouping_len = None;
        }
        self
    }

    /// 辞書への参照を取得します。
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// 共有された辞書を取得します。
    #[inline(always)]
    pub fn shared_dictionary(&self) -> Arc<Dictionary> {
        Arc::clone(&self.dict)
    }

    /// 新しいワーカーを作成します。
    ///
    /// ワーカーは内部バッファを保持し、文をまたいで再利用します。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// テキストを分割し、所有型のトークン列を返します。
    ///
    /// 空のテキストに対しては空の列を返します。
    /// トークンの表層形を順に連結すると入力テキストに一致します。
    ///
    /// # 引数
    ///
    /// * `text` - 分割するテキスト
    pub fn segment(&self, text: &str) -> Vec<Token> {
        let mut worker = self.new_worker();
        worker.reset_sentence(text);
        worker.segment();
        worker.to_tokens()
    }

    /// ラティス構造を構築します。
    pub(crate) fn build_lattice(&self, sent: &Sentence, lattice: &mut Lattice) {
        lattice.reset(sent.len_char());

        for start_word in 0..sent.len_char() {
            if !lattice.has_previous_node(start_word) {
                continue;
            }
            self.add_lattice_edges(sent, lattice, start_word);
        }
    }

    fn add_lattice_edges(&self, sent: &Sentence, lattice: &mut Lattice, start_word: usize) {
        let input = &sent.chars()[start_word..];

        if !self.dict.contains_prefix_chars(input) {
            let mut len_char = sent.groupable(start_word);
            if let Some(max_grouping_len) = self.max_grouping_len {
                len_char = len_char.min(max_grouping_len);
            }
            lattice.insert_node(
                start_word,
                start_word + len_char,
                UNKNOWN_WORD_ID,
                UNKNOWN_WORD_COST,
            );
            return;
        }

        for m in self.dict.lookup_chars(input) {
            lattice.insert_node(
                start_word,
                start_word + m.len_char,
                m.word_id,
                u64::from(m.entry.cost()),
            );
        }
    }
}
