//! 入力テキストの内部表現を提供するモジュール
//!
//! 入力文字列を文字単位に分割し、各文字の文字種、バイト位置のマッピング、
//! 文字のグループ化可能性を計算・保持します。

use crate::dictionary::character::CharInfo;

/// 入力テキストの内部表現を保持する構造体
///
/// # フィールド
///
/// * `input` - 元の入力文字列
/// * `chars` - 入力文字列を文字単位に分割した配列
/// * `c2b` - 文字位置からバイト位置へのマッピング配列
/// * `cinfos` - 各文字の文字種情報を保持する配列
/// * `groupable` - 各文字位置から同じ未知語にまとめられる文字数を保持する配列
#[derive(Default, Clone, Debug)]
pub struct Sentence {
    input: String,
    chars: Vec<char>,
    c2b: Vec<usize>,
    cinfos: Vec<CharInfo>,
    groupable: Vec<usize>,
}

impl Sentence {
    /// 新しい空の `Sentence` インスタンスを生成します
    pub fn new() -> Self {
        Self::default()
    }

    /// 内部状態をクリアします
    #[inline(always)]
    pub fn clear(&mut self) {
        self.input.clear();
        self.chars.clear();
        self.c2b.clear();
        self.cinfos.clear();
        self.groupable.clear();
    }

    /// 入力文字列を設定し、内部データ構造を構築します
    ///
    /// # 引数
    ///
    /// * `input` - 設定する入力文字列
    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        self.input.push_str(input.as_ref());
        self.compute_basic();
        self.compute_char_infos();
        self.compute_groupable();
    }

    fn compute_basic(&mut self) {
        for (bi, ch) in self.input.char_indices() {
            self.chars.push(ch);
            self.c2b.push(bi);
        }
        self.c2b.push(self.input.len());
    }

    fn compute_char_infos(&mut self) {
        self.cinfos.reserve(self.chars.len());
        for &c in &self.chars {
            self.cinfos.push(CharInfo::from_char(c));
        }
    }

    /// 各文字位置からグループ化可能な文字数を計算します（内部メソッド）
    ///
    /// 隣接する文字が同じ文字種に属し、どちらもグループ化可能な場合に連続とみなします。
    fn compute_groupable(&mut self) {
        debug_assert_eq!(self.chars.len(), self.cinfos.len());

        self.groupable.resize(self.chars.len(), 1);
        for i in (1..self.chars.len()).rev() {
            if self.cinfos[i - 1].groups_with(self.cinfos[i]) {
                self.groupable[i - 1] = self.groupable[i] + 1;
            }
        }
    }

    /// 元の入力文字列への参照を返します
    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }

    /// 文字配列への参照を返します
    #[inline(always)]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// 文字数を返します
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.chars.len()
    }

    /// 指定された文字位置に対応するバイト位置を返します
    ///
    /// # 引数
    ///
    /// * `pos_char` - 文字位置（0始まり）。文字数と等しい値も受け付けます
    #[inline(always)]
    pub fn byte_position(&self, pos_char: usize) -> usize {
        self.c2b[pos_char]
    }

    /// 指定された文字位置の文字情報を返します
    #[inline(always)]
    pub fn char_info(&self, pos_char: usize) -> CharInfo {
        self.cinfos[pos_char]
    }

    /// 指定された文字位置からグループ化可能な文字数を返します
    ///
    /// 値は常に1以上です。
    #[inline(always)]
    pub fn groupable(&self, pos_char: usize) -> usize {
        self.groupable[pos_char]
    }
}
