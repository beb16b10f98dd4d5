//! 分割処理のためのルーチンを提供するモジュール。
//!
//! ワーカーは内部データ構造を保持し、再利用することで不要なメモリアロケーションを避けます。
use crate::segmenter::lattice::{Lattice, Node};
use crate::segmenter::Segmenter;
use crate::sentence::Sentence;
use crate::token::{Token, TokenIter, TokenRef};

/// 分割処理のためのルーチンを提供する構造体。
///
/// # 例
///
/// ```
/// use kashi::{Dictionary, DictionaryEntry, PosTag, Segmenter};
///
/// let dict = Dictionary::from_entries([DictionaryEntry::new("歌", "うた", PosTag::Content, 1)])?;
/// let segmenter = Segmenter::new(dict);
/// let mut worker = segmenter.new_worker();
///
/// for line in ["歌", "歌と歌"] {
///     worker.reset_sentence(line);
///     worker.segment();
///     assert!(worker.token_iter().all(|t| !t.surface().is_empty()));
/// }
/// assert_eq!(worker.num_tokens(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Worker {
    pub(crate) segmenter: Segmenter,
    pub(crate) sent: Sentence,
    pub(crate) lattice: Lattice,
    pub(crate) top_nodes: Vec<(usize, Node)>,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    pub(crate) fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            sent: Sentence::new(),
            lattice: Lattice::default(),
            top_nodes: vec![],
        }
    }

    /// 分割する入力文をリセットします。
    ///
    /// # 引数
    ///
    /// * `input` - 分割する入力文字列
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.top_nodes.clear();
        self.sent.set_sentence(input);
    }

    /// 設定された入力文を分割します。
    ///
    /// 結果は内部状態に保存され、[`Worker::token_iter`]や[`Worker::token`]で
    /// アクセスできます。空の文が設定されている場合は何も行いません。
    pub fn segment(&mut self) {
        self.top_nodes.clear();
        if self.sent.chars().is_empty() {
            return;
        }
        self.segmenter.build_lattice(&self.sent, &mut self.lattice);
        self.lattice.append_top_nodes(&mut self.top_nodes);
    }

    /// 分割結果のトークン数を取得します。
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.top_nodes.len()
    }

    /// `i`番目のトークンを取得します。
    ///
    /// # 引数
    ///
    /// * `i` - トークンのインデックス（0から始まる）
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> TokenRef<'w> {
        let index = self.num_tokens() - i - 1;
        TokenRef::new(self, index)
    }

    /// 分割結果のイテレータを作成します。
    #[inline(always)]
    pub fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self)
    }

    /// 分割結果を所有型のトークン列に変換します。
    pub fn to_tokens(&self) -> Vec<Token> {
        self.token_iter().map(|t| t.to_token()).collect()
    }
}
