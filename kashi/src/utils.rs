//! ユーティリティ関数と型変換トレイトを提供するモジュール
//!
//! - `FromU32`: u32からの型変換トレイト
//! - 片仮名から平仮名への変換

/// u32から他の型への変換を提供するトレイト
///
/// 標準ライブラリのFromトレイトとは異なり、
/// プラットフォーム固有の仮定を行うことができます。
pub trait FromU32 {
    /// u32値から実装型を生成する
    ///
    /// # 引数
    ///
    /// * `src` - 変換元のu32値
    ///
    /// # 戻り値
    ///
    /// 変換された実装型の値
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

const KATAKANA_TO_HIRAGANA_OFFSET: u32 = 0x60;

/// 片仮名の1文字を平仮名に変換します。対応する平仮名がない文字はそのまま返します。
///
/// `ァ`(U+30A1)から`ヶ`(U+30F6)と、踊り字`ヽ``ヾ`が変換対象です。
/// 長音符`ー`は変換されません。
#[inline(always)]
pub fn katakana_char_to_hiragana(c: char) -> char {
    match c {
        '\u{30A1}'..='\u{30F6}' | '\u{30FD}' | '\u{30FE}' => {
            char::from_u32(u32::from(c) - KATAKANA_TO_HIRAGANA_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

/// 文字列中の片仮名を平仮名に変換します。
///
/// # 引数
///
/// * `text` - 変換元の文字列
///
/// # 戻り値
///
/// 片仮名を平仮名に置き換えた文字列
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars().map(katakana_char_to_hiragana).collect()
}

/// 空でない文字列がかな（平仮名、片仮名、長音符）のみで構成されるかどうかを返します。
pub fn is_kana_only(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| crate::dictionary::ScriptClass::of(c).is_kana())
}
