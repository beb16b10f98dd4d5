//! # kashi
//!
//! kashiは、日本語の歌詞を単語単位で閲覧・検索するためのエンジンです。
//!
//! ## 概要
//!
//! 空白で区切られない日本語テキストを、辞書に基づく最小コスト経路探索で単語に分割し、
//! 単語ごとの読み（ふりがな）を必要に応じて解決し、タイトルと本文に対する
//! キーワード検索のための転置インデックスを管理します。
//!
//! ## 主な機能
//!
//! - **辞書**: ダブル配列トライによる共通接頭辞検索（[`Dictionary`]）
//! - **分割**: 辞書語のコストと未知語ペナルティによる最小コスト経路探索（[`Segmenter`]）
//! - **読み付与**: 辞書の読み、またはかなの平仮名化による読みの解決（[`Annotator`]）
//! - **検索**: 正規化した単語をキーとする転置インデックス（[`SearchIndex`]）
//! - **ファサード**: 上記をまとめた4つの操作（[`Engine`]）
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kashi::{Dictionary, DictionaryEntry, Engine, Lyric, LyricId, PosTag, Reading};
//!
//! let dict = Dictionary::from_entries([
//!     DictionaryEntry::new("歌", "うた", PosTag::Content, 1),
//!     DictionaryEntry::new("を", "を", PosTag::Particle, 1),
//!     DictionaryEntry::new("歌う", "うたう", PosTag::Content, 1),
//! ])?;
//! let engine = Engine::new(dict);
//!
//! let lyric = Lyric::new(LyricId(1), "歌を歌う", "")?;
//! let prepared = engine.prepare(&lyric);
//! let surfaces: Vec<_> = prepared.title().iter().map(|t| t.surface()).collect();
//! assert_eq!(surfaces, ["歌", "を", "歌う"]);
//! assert_eq!(prepared.title()[2].range_char(), 2..4);
//! assert_eq!(engine.annotate(&prepared.title()[2]), Reading::Known("うたう".to_string()));
//!
//! engine.reindex(&lyric);
//! assert_eq!(engine.query("歌").lyric_ids(), [LyricId(1)]);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// 読みの解決
pub mod annotator;

/// 辞書データ構造
pub mod dictionary;

/// 歌詞のファサード
pub mod engine;

/// エラー型の定義
pub mod errors;

/// 検索インデックス
pub mod index;

/// 分割器の実装
pub mod segmenter;

/// 文の内部表現
mod sentence;

/// トークン型の定義
pub mod token;

/// 内部ユーティリティ関数
pub mod utils;

/// 単語帳への書き出し
pub mod vocabulary;

#[cfg(test)]
mod tests;

// Re-exports
pub use annotator::{Annotator, Reading};
pub use dictionary::{Dictionary, DictionaryEntry, PosTag, ScriptClass};
pub use engine::{Engine, Lyric, PreparedLyric};
pub use errors::{DictionaryError, EncodingError, KashiError};
pub use index::{LyricId, SearchHit, SearchIndex, SearchOutcome};
pub use segmenter::Segmenter;
pub use token::Token;
pub use vocabulary::{ExportAck, MemoryVocabulary, VocabularyExporter, VocabularyWord};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
