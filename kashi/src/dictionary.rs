//! 辞書
//!
//! 表層形、読み、品詞、コストを持つエントリの集合を保持し、
//! 任意の文字位置から始まる全ての辞書語を共通接頭辞検索で列挙します。
//! 辞書は一度構築されると変更されず、複数のスレッドから同時に参照できます。
pub(crate) mod character;
pub(crate) mod lexicon;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;

use crate::errors::{KashiError, Result};

pub use crate::dictionary::character::ScriptClass;
pub use crate::dictionary::lexicon::{DictionaryEntry, LexMatch, PosTag};

use crate::dictionary::lexicon::Lexicon;

/// シリアライズされた辞書ファイルの先頭に置かれるマジックナンバー
pub const MODEL_MAGIC: &[u8] = b"KashiDictionaryRkyv 0.1\n";

const RKYV_ALIGNMENT: usize = 16;
const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

/// 辞書
///
/// エントリの単語IDは宣言順に0から振られます。
pub struct Dictionary {
    lexicon: Lexicon,
    max_cost: u16,
}

impl Dictionary {
    /// エントリの列から辞書を構築します。
    ///
    /// # 引数
    ///
    /// * `entries` - 辞書エントリ。宣言順が単語IDになります
    ///
    /// # 戻り値
    ///
    /// 構築された辞書
    ///
    /// # エラー
    ///
    /// 表層形が空のエントリ、または (表層形, 読み, 品詞) が重複するエントリがある場合、
    /// [`DictionaryError`](crate::errors::DictionaryError)が返されます。
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let lexicon = Lexicon::from_entries(entries.into_iter().collect())?;
        Ok(Self::from_lexicon(lexicon))
    }

    fn from_lexicon(lexicon: Lexicon) -> Self {
        let max_cost = lexicon.entries().iter().map(|e| e.cost()).max().unwrap_or(0);
        log::debug!(
            "built a dictionary of {} entries ({} distinct surfaces)",
            lexicon.entries().len(),
            lexicon.num_surfaces(),
        );
        Self { lexicon, max_cost }
    }

    /// CSV形式の語彙ファイルから辞書を構築します。
    ///
    /// 各行は `表層形,品詞,読み,コスト` の形式です。
    ///
    /// # 引数
    ///
    /// * `rdr` - 語彙ファイルのリーダー
    ///
    /// # エラー
    ///
    /// 入力の形式が不正な場合、[`DictionaryError::InvalidFormat`](crate::errors::DictionaryError::InvalidFormat)が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(Self::from_lexicon(Lexicon::from_reader(rdr)?))
    }

    /// 辞書をバイナリ形式で書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、またはシリアライズに失敗した場合にエラーが返されます。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        let entries = self.lexicon.entries().to_vec();
        let bytes = rkyv::to_bytes::<Error>(&entries).map_err(|e| {
            KashiError::invalid_state("rkyv serialization failed".to_string(), e.to_string())
        })?;
        wtr.write_all(&bytes)?;

        Ok(())
    }

    /// [`Dictionary::write`]で書き出したバイナリから辞書を読み込みます。
    ///
    /// # エラー
    ///
    /// マジックナンバーが一致しない場合、データが破損している場合にエラーが返されます。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if !magic.starts_with(MODEL_MAGIC) {
            return Err(KashiError::invalid_argument(
                "rdr",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let entries =
            rkyv::from_bytes::<Vec<DictionaryEntry>, Error>(&aligned_bytes).map_err(|e| {
                KashiError::invalid_state(
                    "rkyv validation failed. The dictionary file may be corrupted or incompatible."
                        .to_string(),
                    e.to_string(),
                )
            })?;

        Self::from_entries(entries)
    }

    /// zstdで圧縮されたバイナリ辞書ファイルを読み込みます。
    ///
    /// `compile`コマンドが出力するファイルを想定しています。
    ///
    /// # 引数
    ///
    /// * `path` - 圧縮された辞書ファイルのパス
    ///
    /// # エラー
    ///
    /// ファイルが開けない場合、展開に失敗した場合、または[`Dictionary::read`]が
    /// 失敗した場合にエラーが返されます。
    pub fn from_zstd<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        log::debug!("loading compressed dictionary from {}", path.display());
        let decoder = zstd::Decoder::new(File::open(path)?)?;
        Self::read(BufReader::new(decoder))
    }

    /// `offset_char`文字目から始まる全ての辞書語を返します。
    ///
    /// 結果は一致長の長い順、コストの低い順、単語IDの小さい順に整列されます。
    /// 一致がない場合やオフセットが範囲外の場合は空のリストを返します。
    ///
    /// # 引数
    ///
    /// * `text` - 検索対象のテキスト
    /// * `offset_char` - 開始位置（文字単位）
    pub fn lookup(&self, text: &str, offset_char: usize) -> Vec<LexMatch<'_>> {
        let chars: Vec<char> = text.chars().skip(offset_char).collect();
        self.lookup_chars(&chars)
    }

    #[inline(always)]
    pub(crate) fn lookup_chars(&self, input: &[char]) -> Vec<LexMatch<'_>> {
        self.lexicon.common_prefix_matches(input)
    }

    /// `offset_char`文字目から始まる辞書語が一つでもあるかどうかを返します。
    ///
    /// # 引数
    ///
    /// * `text` - 検索対象のテキスト
    /// * `offset_char` - 開始位置（文字単位）
    pub fn contains_prefix(&self, text: &str, offset_char: usize) -> bool {
        let chars: Vec<char> = text.chars().skip(offset_char).collect();
        self.contains_prefix_chars(&chars)
    }

    #[inline(always)]
    pub(crate) fn contains_prefix_chars(&self, input: &[char]) -> bool {
        self.lexicon.has_prefix_match(input)
    }

    /// 表層形が完全一致するエントリを、コストの低い順、単語IDの小さい順に返します。
    pub fn exact(&self, surface: &str) -> Vec<(u32, &DictionaryEntry)> {
        self.lexicon.exact_matches(surface)
    }

    /// 単語IDのエントリを返します。
    pub fn entry(&self, word_id: u32) -> Option<&DictionaryEntry> {
        self.lexicon.entries().get(usize::try_from(word_id).ok()?)
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.lexicon.entries().len()
    }

    /// エントリが一つもないかどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// エントリのコストの最大値を返します。空の辞書では0です。
    #[inline(always)]
    pub const fn max_cost(&self) -> u16 {
        self.max_cost
    }
}
