//! 読みの解決
//!
//! トークンの表層形に対して、辞書に登録された読み、またはかな表記の平仮名化によって
//! 読みを決定します。注釈は純粋な関数であり、同じトークンに対して何度呼び出しても
//! 同じ結果を返します。

use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::segmenter::Segmenter;
use crate::token::Token;
use crate::utils::{is_kana_only, katakana_to_hiragana};

/// トークンの読み
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reading {
    /// 解決された読み（平仮名）
    Known(String),
    /// 読みを決定できない（ラテン文字、数字、記号、辞書にない漢字など）
    Unknown,
}

impl Reading {
    /// 解決された読みを返します。
    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Known(reading) => Some(reading),
            Self::Unknown => None,
        }
    }

    /// 読みが解決されたかどうかを返します。
    #[inline(always)]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// 読みを`Option`に変換します。
    #[inline(always)]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Known(reading) => Some(reading),
            Self::Unknown => None,
        }
    }
}

/// 読みを解決する注釈器
#[derive(Clone)]
pub struct Annotator {
    dict: Arc<Dictionary>,
}

impl Annotator {
    /// 共有された辞書から新しい注釈器を作成します。
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        Self { dict }
    }

    /// トークンの読みを返します。
    ///
    /// 1. 表層形に完全一致し、読みを持つ辞書エントリがあれば、最もコストの低いものの読み
    /// 2. 表層形がかなのみで構成されていれば、それを平仮名にしたもの
    /// 3. それ以外は[`Reading::Unknown`]
    pub fn annotate(&self, token: &Token) -> Reading {
        self.reading_of(token.surface())
    }

    /// 表層形から読みを解決します。
    ///
    /// # 引数
    ///
    /// * `surface` - 表層形
    pub fn reading_of(&self, surface: &str) -> Reading {
        if surface.is_empty() {
            return Reading::Unknown;
        }
        let from_dict = self
            .dict
            .exact(surface)
            .into_iter()
            .map(|(_, entry)| entry.reading())
            .find(|reading| !reading.is_empty());
        if let Some(reading) = from_dict {
            return Reading::Known(reading.to_string());
        }
        if is_kana_only(surface) {
            return Reading::Known(katakana_to_hiragana(surface));
        }
        Reading::Unknown
    }

    /// 読みを埋めたトークンを返します。
    pub fn annotated(&self, mut token: Token) -> Token {
        let reading = self.annotate(&token).into_option();
        token.set_reading(reading);
        token
    }

    /// トークン列全体の読みを返します。
    ///
    /// 読みが解決できないトークンは表層形をそのまま使い、連結した結果の前後の空白を除きます。
    pub fn furigana<'a, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut out = String::new();
        for token in tokens {
            match self.annotate(token) {
                Reading::Known(reading) => out.push_str(&reading),
                Reading::Unknown => out.push_str(token.surface()),
            }
        }
        out.trim().to_string()
    }

    /// テキストを分割し、その読みを返します。
    pub fn furigana_text(&self, segmenter: &Segmenter, text: &str) -> String {
        self.furigana(&segmenter.segment(text))
    }
}
