//! 辞書の語彙情報を管理するモジュール
//!
//! このモジュールは、単語の表層形、読み、品詞、コストを保持する
//! 語彙データ構造と、CSV形式の語彙ファイルのパーサを提供します。

mod map;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use csv_core::ReadFieldResult;
use hashbrown::HashSet;
use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::lexicon::map::WordMap;
use crate::errors::{DictionaryError, Result};
use crate::utils::{katakana_to_hiragana, FromU32};

/// 品詞（粗い分類）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
pub enum PosTag {
    /// 内容語（名詞、動詞、形容詞など）
    Content,
    /// 助詞
    Particle,
    /// 助動詞
    Auxiliary,
    /// 記号
    Symbol,
    /// 不明
    Unknown,
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Content => "content",
            Self::Particle => "particle",
            Self::Auxiliary => "auxiliary",
            Self::Symbol => "symbol",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for PosTag {
    type Err = &'static str;

    /// 文字列から品詞をパースします。
    ///
    /// 英語名（大文字小文字を区別しない）と日本語の品詞名を受け付けます。
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "content" | "noun" | "verb" | "adjective" | "adverb" | "名詞" | "動詞" | "形容詞"
            | "副詞" => Ok(Self::Content),
            "particle" | "助詞" => Ok(Self::Particle),
            "auxiliary" | "助動詞" => Ok(Self::Auxiliary),
            "symbol" | "記号" => Ok(Self::Symbol),
            "unknown" => Ok(Self::Unknown),
            _ => Err("Could not parse a part-of-speech tag"),
        }
    }
}

/// 辞書エントリ
///
/// 読みは平仮名に正規化して保持されます。読みを持たないエントリの読みは空文字列です。
#[derive(Clone, Debug, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
pub struct DictionaryEntry {
    surface: String,
    reading: String,
    tag: PosTag,
    cost: u16,
}

impl DictionaryEntry {
    /// 新しいエントリを作成します。
    ///
    /// # 引数
    ///
    /// * `surface` - 表層形
    /// * `reading` - 読み（片仮名は平仮名に変換されます。`*`は読みなしを表します）
    /// * `tag` - 品詞
    /// * `cost` - 生起コスト。小さいほど優先されます
    pub fn new<S, R>(surface: S, reading: R, tag: PosTag, cost: u16) -> Self
    where
        S: Into<String>,
        R: AsRef<str>,
    {
        let reading = reading.as_ref().trim();
        let reading = if reading == "*" {
            String::new()
        } else {
            katakana_to_hiragana(reading)
        };
        Self {
            surface: surface.into(),
            reading,
            tag,
            cost,
        }
    }

    /// 表層形を返します。
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 読みを返します。読みがない場合は空文字列です。
    #[inline(always)]
    pub fn reading(&self) -> &str {
        &self.reading
    }

    /// 品詞を返します。
    #[inline(always)]
    pub const fn tag(&self) -> PosTag {
        self.tag
    }

    /// 生起コストを返します。
    #[inline(always)]
    pub const fn cost(&self) -> u16 {
        self.cost
    }
}

/// 単語の語彙情報
pub struct Lexicon {
    map: WordMap,
    entries: Vec<DictionaryEntry>,
}

impl Lexicon {
    /// エントリのリストから新しいインスタンスを構築します。
    ///
    /// # エラー
    ///
    /// 表層形が空のエントリ、または (表層形, 読み, 品詞) が重複するエントリがある場合に
    /// [`DictionaryError`]を返します。コストだけが異なる重複は許され、両方が保持されます。
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Result<Self> {
        {
            let mut seen = HashSet::with_capacity(entries.len());
            for (index, e) in entries.iter().enumerate() {
                if e.surface.is_empty() {
                    return Err(DictionaryError::EmptySurface { index }.into());
                }
                if !seen.insert((e.surface.as_str(), e.reading.as_str(), e.tag)) {
                    return Err(DictionaryError::DuplicateEntry {
                        index,
                        surface: e.surface.clone(),
                        reading: e.reading.clone(),
                        tag: e.tag,
                    }
                    .into());
                }
            }
        }
        let map = WordMap::new(entries.iter().map(|e| &e.surface))?;
        Ok(Self { map, entries })
    }

    /// CSV形式の語彙ファイルから新しいインスタンスを構築します。
    ///
    /// 各行は `表層形,品詞,読み,コスト` です。5列目以降は無視されます。
    /// `#`で始まる行はコメントとして読み飛ばされます。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut buf = vec![];
        rdr.read_to_end(&mut buf)?;

        let entries = Self::parse_csv(&buf, "lexicon.csv")?;

        Self::from_entries(entries)
    }

    fn parse_csv(
        mut bytes: &[u8],
        name: &'static str,
    ) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let mut entries = vec![];

        let mut rdr = csv_core::ReaderBuilder::new().comment(Some(b'#')).build();
        let mut output = [0; 4096];
        let mut output_len = 0;
        let mut fields: Vec<String> = vec![];

        loop {
            let (result, nin, nout) = rdr.read_field(bytes, &mut output[output_len..]);
            // The reader has already counted a consumed `\n` terminator.
            let ends_with_lf = nin > 0 && bytes[nin - 1] == b'\n';
            let line = rdr.line() - u64::from(ends_with_lf);
            bytes = &bytes[nin..];
            output_len += nout;
            match result {
                ReadFieldResult::InputEmpty => {}
                ReadFieldResult::OutputFull => {
                    return Err(DictionaryError::invalid_format(name, "Field too large"));
                }
                ReadFieldResult::Field { record_end } => {
                    let field = std::str::from_utf8(&output[..output_len]).map_err(|e| {
                        DictionaryError::invalid_format(name, format!("line {line}: {e}"))
                    })?;
                    fields.push(field.to_string());
                    output_len = 0;
                    if record_end {
                        if let Some(entry) = Self::parse_record(&fields, line, name)? {
                            entries.push(entry);
                        }
                        fields.clear();
                    }
                }
                ReadFieldResult::End => break,
            }
        }
        Ok(entries)
    }

    /// 1レコードをエントリに変換します。`line`はレコードが終わる行番号（1始まり）です。
    fn parse_record(
        fields: &[String],
        line: u64,
        name: &'static str,
    ) -> Result<Option<DictionaryEntry>, DictionaryError> {
        if fields.len() == 1 && fields[0].trim().is_empty() {
            return Ok(None);
        }
        if fields.len() < 4 {
            let msg = format!(
                "line {line}: A csv row of lexicon must have four items at least, {:?}",
                fields.join(","),
            );
            return Err(DictionaryError::invalid_format(name, msg));
        }
        let tag = fields[1].trim().parse::<PosTag>().map_err(|e| {
            DictionaryError::invalid_format(name, format!("line {line}: {e}: {:?}", fields[1]))
        })?;
        let cost = fields[3].trim().parse::<u16>().map_err(|e| {
            DictionaryError::invalid_format(
                name,
                format!("line {line}: invalid cost {:?}: {e}", fields[3]),
            )
        })?;
        Ok(Some(DictionaryEntry::new(
            fields[0].as_str(),
            &fields[2],
            tag,
            cost,
        )))
    }

    /// 入力の接頭辞に一致する単語を返します。
    ///
    /// 一致長の長い順、コストの低い順、宣言順に整列されます。
    pub fn common_prefix_matches(&self, input: &[char]) -> Vec<LexMatch<'_>> {
        let mut matches: Vec<_> = self
            .map
            .common_prefix_iterator(input)
            .map(|(word_id, end_char)| LexMatch::new(word_id, end_char, self.entry(word_id)))
            .collect();
        matches.sort_by(|a, b| {
            b.len_char
                .cmp(&a.len_char)
                .then(a.entry.cost.cmp(&b.entry.cost))
                .then(a.word_id.cmp(&b.word_id))
        });
        matches
    }

    /// 入力の接頭辞に一致する単語が存在するかどうかを返します。
    #[inline(always)]
    pub fn has_prefix_match(&self, input: &[char]) -> bool {
        self.map.common_prefix_iterator(input).next().is_some()
    }

    /// 表層形が完全一致する単語を、コストの低い順、宣言順に返します。
    pub fn exact_matches(&self, surface: &str) -> Vec<(u32, &DictionaryEntry)> {
        let mut matches: Vec<_> = self
            .map
            .exact_iterator(surface)
            .map(|word_id| (word_id, self.entry(word_id)))
            .collect();
        matches.sort_by(|(ia, a), (ib, b)| a.cost.cmp(&b.cost).then(ia.cmp(ib)));
        matches
    }

    /// 単語IDのエントリを返します。
    #[inline(always)]
    pub fn entry(&self, word_id: u32) -> &DictionaryEntry {
        &self.entries[usize::from_u32(word_id)]
    }

    /// 宣言順のエントリ列を返します。
    #[inline(always)]
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// 異なり表層形の数を返します。
    #[inline(always)]
    pub const fn num_surfaces(&self) -> usize {
        self.map.num_surfaces()
    }
}

/// 語彙マッチング結果
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LexMatch<'a> {
    /// 単語ID（宣言順）
    pub word_id: u32,
    /// 一致した長さ（文字数）
    pub len_char: usize,
    /// 一致したエントリ
    pub entry: &'a DictionaryEntry,
}

impl<'a> LexMatch<'a> {
    /// 新しいマッチング結果を作成します。
    #[inline(always)]
    pub const fn new(word_id: u32, len_char: usize, entry: &'a DictionaryEntry) -> Self {
        Self {
            word_id,
            len_char,
            entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(surface: &str, reading: &str, cost: u16) -> DictionaryEntry {
        DictionaryEntry::new(surface, reading, PosTag::Content, cost)
    }

    #[test]
    fn test_common_prefix_matches_order() {
        let lexicon = Lexicon::from_entries(vec![
            entry("東京", "とうきょう", 5),
            entry("東京都", "とうきょうと", 9),
            entry("東", "ひがし", 3),
            DictionaryEntry::new("東京", "とうけい", PosTag::Content, 2),
            DictionaryEntry::new("東", "あずま", PosTag::Content, 3),
        ])
        .unwrap();
        let input: Vec<_> = "東京都".chars().collect();
        let matches = lexicon.common_prefix_matches(&input);
        let got: Vec<_> = matches.iter().map(|m| (m.word_id, m.len_char)).collect();
        assert_eq!(got, vec![(1, 3), (3, 2), (0, 2), (2, 1), (4, 1)]);
        assert!(lexicon.has_prefix_match(&input));
        assert!(!lexicon.has_prefix_match(&['京']));
    }

    #[test]
    fn test_exact_matches() {
        let lexicon = Lexicon::from_entries(vec![
            entry("東京", "とうきょう", 5),
            DictionaryEntry::new("東京", "とうけい", PosTag::Content, 2),
        ])
        .unwrap();
        let got: Vec<_> = lexicon
            .exact_matches("東京")
            .into_iter()
            .map(|(id, e)| (id, e.reading().to_string()))
            .collect();
        assert_eq!(got, vec![(1, "とうけい".to_string()), (0, "とうきょう".to_string())]);
        assert!(lexicon.exact_matches("東").is_empty());
    }

    #[test]
    fn test_from_entries_empty_surface() {
        let result = Lexicon::from_entries(vec![entry("歌", "うた", 1), entry("", "", 1)]);
        assert!(matches!(
            result,
            Err(crate::errors::KashiError::Dictionary(DictionaryError::EmptySurface { index: 1 }))
        ));
    }

    #[test]
    fn test_from_entries_duplicate() {
        let result = Lexicon::from_entries(vec![entry("歌", "うた", 1), entry("歌", "ウタ", 4)]);
        assert!(matches!(
            result,
            Err(crate::errors::KashiError::Dictionary(DictionaryError::DuplicateEntry { index: 1, .. }))
        ));
    }

    #[test]
    fn test_from_entries_keeps_declaration_order() {
        let entries = vec![entry("夢", "ゆめ", 2), entry("歌", "うた", 1), entry("夢", "む", 9)];
        let lexicon = Lexicon::from_entries(entries.clone()).unwrap();
        assert_eq!(lexicon.entries(), entries.as_slice());
        assert_eq!(lexicon.num_surfaces(), 2);
        assert_eq!(lexicon.entry(2).reading(), "む");
    }

    #[test]
    fn test_from_entries_cost_tie_is_kept() {
        let lexicon = Lexicon::from_entries(vec![
            DictionaryEntry::new("は", "は", PosTag::Particle, 1),
            DictionaryEntry::new("は", "は", PosTag::Content, 1),
        ])
        .unwrap();
        assert_eq!(lexicon.exact_matches("は").len(), 2);
    }

    #[test]
    fn test_from_reader() {
        let data = "# surface,tag,reading,cost\n歌,noun,ウタ,1\n\nを,助詞,を,1,extra\n♪,symbol,*,0";
        let lex = Lexicon::from_reader(data.as_bytes()).unwrap();
        assert_eq!(lex.entries().len(), 3);
        assert_eq!(lex.entry(0), &DictionaryEntry::new("歌", "うた", PosTag::Content, 1));
        assert_eq!(lex.entry(1).tag(), PosTag::Particle);
        assert_eq!(lex.entry(2).reading(), "");
        assert_eq!(lex.entry(2).cost(), 0);
    }

    #[test]
    fn test_from_reader_few_cols() {
        let data = "自然,noun,しぜん";
        let result = Lexicon::from_reader(data.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_reader_negative_cost() {
        let data = "自然,noun,しぜん,-2";
        let result = Lexicon::from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(crate::errors::KashiError::Dictionary(DictionaryError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_from_reader_invalid_tag() {
        let data = "自然,名刺,しぜん,2";
        let result = Lexicon::from_reader(data.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_reader_empty_surface() {
        let data = "自然,noun,しぜん,1\n,noun,げんご,4";
        let result = Lexicon::from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(crate::errors::KashiError::Dictionary(DictionaryError::EmptySurface { index: 1 }))
        ));
    }
}
