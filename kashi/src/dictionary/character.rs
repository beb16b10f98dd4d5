//! 文字種の定義
//!
//! 各文字を文字種（漢字、平仮名、片仮名、ラテン文字、数字、記号、その他）に分類し、
//! 未知語を文字種の境界でまとめるためのグループ化フラグを保持します。

use std::fmt;

const CLASS_BITS: u8 = 3;
const CLASS_MASK: u8 = (1 << CLASS_BITS) - 1;

/// 文字種
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScriptClass {
    /// 漢字（`々`、`〆`、`〇`、`ヶ`を含む）
    Kanji,
    /// 平仮名
    Hiragana,
    /// 片仮名（長音符`ー`、半角片仮名を含む）
    Katakana,
    /// ラテン文字（全角を含む）
    Latin,
    /// 数字（全角を含む）
    Digit,
    /// 句読点・記号
    Punctuation,
    /// その他（空白、改行を含む）
    Other,
}

impl ScriptClass {
    /// 文字の文字種を返します。
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            return Self::Other;
        }
        match c {
            '\u{3005}' | '\u{3006}' | '\u{3007}' | '\u{30F6}' => Self::Kanji,
            '\u{30A0}' | '\u{30FB}' => Self::Punctuation,
            '\u{3041}'..='\u{309F}' => Self::Hiragana,
            '\u{30A1}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                Self::Katakana
            }
            '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{3FFFF}' => Self::Kanji,
            '0'..='9' | '\u{FF10}'..='\u{FF19}' => Self::Digit,
            'A'..='Z'
            | 'a'..='z'
            | '\u{FF21}'..='\u{FF3A}'
            | '\u{FF41}'..='\u{FF5A}'
            | '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{024F}' => Self::Latin,
            '\u{00A1}'..='\u{00BF}'
            | '\u{00D7}'
            | '\u{00F7}'
            | '\u{2000}'..='\u{206F}'
            | '\u{2190}'..='\u{2BFF}'
            | '\u{3000}'..='\u{303F}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}' => Self::Punctuation,
            _ if c.is_ascii_punctuation() => Self::Punctuation,
            _ => Self::Other,
        }
    }

    /// かな（平仮名または片仮名）かどうかを返します。
    #[inline(always)]
    pub const fn is_kana(self) -> bool {
        matches!(self, Self::Hiragana | Self::Katakana)
    }

    const fn id(self) -> u8 {
        match self {
            Self::Kanji => 0,
            Self::Hiragana => 1,
            Self::Katakana => 2,
            Self::Latin => 3,
            Self::Digit => 4,
            Self::Punctuation => 5,
            Self::Other => 6,
        }
    }

    const fn from_id(id: u8) -> Self {
        match id {
            0 => Self::Kanji,
            1 => Self::Hiragana,
            2 => Self::Katakana,
            3 => Self::Latin,
            4 => Self::Digit,
            5 => Self::Punctuation,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ScriptClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Kanji => "kanji",
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
            Self::Latin => "latin",
            Self::Digit => "digit",
            Self::Punctuation => "punctuation",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// 文字の情報
///
/// 文字種とグループ化フラグを8ビットにパックして保持します。
///
/// # メモリレイアウト
///
/// ```text
/// class = 3 ビット
/// group = 1 ビット
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo(u8);

impl fmt::Debug for CharInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharInfo")
            .field("class", &self.class())
            .field("group", &self.group())
            .finish()
    }
}

impl CharInfo {
    /// 文字から情報を作成します。
    ///
    /// 空白文字はグループ化されません。改行やスペースは常に1文字ずつのトークンになります。
    pub fn from_char(c: char) -> Self {
        let group = !c.is_whitespace();
        Self(ScriptClass::of(c).id() | (u8::from(group) << CLASS_BITS))
    }

    /// 文字種を取得します。
    #[inline(always)]
    pub const fn class(&self) -> ScriptClass {
        ScriptClass::from_id(self.0 & CLASS_MASK)
    }

    /// 同じ文字種の隣接文字とまとめてよいかどうかを取得します。
    #[inline(always)]
    pub const fn group(&self) -> bool {
        (self.0 >> CLASS_BITS) & 1 != 0
    }

    /// `rhs`と同じ未知語にまとめられるかどうかを判定します。
    #[inline(always)]
    pub fn groups_with(&self, rhs: CharInfo) -> bool {
        self.group() && rhs.group() && self.class() == rhs.class()
    }
}
