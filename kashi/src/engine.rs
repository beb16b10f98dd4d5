//! 歌詞のファサード
//!
//! 分割器、注釈器、検索インデックスをまとめ、アプリケーションが必要とする
//! 操作（準備、再インデックス、インデックス解除、検索）を提供します。
//! ファサード自身は可変状態を持たず、共有の辞書と検索インデックスへの参照のみを保持します。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::annotator::{Annotator, Reading};
use crate::dictionary::Dictionary;
use crate::errors::{EncodingError, KashiError, Result};
use crate::index::{LyricId, SearchIndex, SearchOutcome};
use crate::segmenter::Segmenter;
use crate::token::Token;
use crate::vocabulary::{ExportAck, VocabularyExporter, VocabularyWord};

/// 歌詞
///
/// 永続化は外部の責務であり、エンジンは呼び出しごとに不変の値として扱います。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lyric {
    id: LyricId,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Lyric {
    /// 新しい歌詞を作成します。作成日時と更新日時は現在時刻になります。
    ///
    /// # 引数
    ///
    /// * `id` - 歌詞の識別子
    /// * `title` - タイトル（空であってはならない）
    /// * `body` - 本文（空でもよい）
    ///
    /// # エラー
    ///
    /// タイトルが空または空白のみの場合、[`KashiError::InvalidArgument`]が返されます。
    pub fn new<T, B>(id: LyricId, title: T, body: B) -> Result<Self>
    where
        T: Into<String>,
        B: Into<String>,
    {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(KashiError::invalid_argument("title", "must not be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            title,
            body: body.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// バイト列から歌詞を作成します。
    ///
    /// # エラー
    ///
    /// タイトルまたは本文が有効なUTF-8でない場合、[`KashiError::Encoding`]が返されます。
    /// 位置はそれぞれのバイト列の先頭からのオフセットです。
    pub fn from_utf8(id: LyricId, title: &[u8], body: &[u8]) -> Result<Self> {
        let title = std::str::from_utf8(title).map_err(EncodingError::from)?;
        let body = std::str::from_utf8(body).map_err(EncodingError::from)?;
        Self::new(id, title, body)
    }

    /// 作成日時と更新日時を指定します。
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// 識別子を返します。
    #[inline(always)]
    pub const fn id(&self) -> LyricId {
        self.id
    }

    /// タイトルを返します。
    #[inline(always)]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 本文を返します。
    #[inline(always)]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// 作成日時を返します。
    #[inline(always)]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 更新日時を返します。
    #[inline(always)]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 分割済みの歌詞
///
/// 読みは含まれません。読みが必要なトークンだけを[`Engine::annotate`]で解決します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedLyric {
    title: Vec<Token>,
    body: Vec<Token>,
}

impl PreparedLyric {
    /// タイトルのトークン列を返します。
    #[inline(always)]
    pub fn title(&self) -> &[Token] {
        &self.title
    }

    /// 本文のトークン列を返します。
    #[inline(always)]
    pub fn body(&self) -> &[Token] {
        &self.body
    }

    /// タイトルと本文のトークン列に分解します。
    pub fn into_parts(self) -> (Vec<Token>, Vec<Token>) {
        (self.title, self.body)
    }
}

/// 歌詞エンジン
#[derive(Clone)]
pub struct Engine {
    segmenter: Segmenter,
    annotator: Annotator,
    index: Arc<SearchIndex>,
}

impl Engine {
    /// 辞書から新しいエンジンを作成します。検索インデックスは空の状態で作成されます。
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 共有された辞書から新しいエンジンを作成します。
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        Self::from_segmenter(Segmenter::from_shared_dictionary(dict))
    }

    /// 設定済みの分割器から新しいエンジンを作成します。
    pub fn from_segmenter(segmenter: Segmenter) -> Self {
        Self::with_index(Arc::new(SearchIndex::new(segmenter)))
    }

    /// 既存の検索インデックスを共有するエンジンを作成します。
    ///
    /// 分割器と辞書はインデックスのものを使用するため、
    /// 登録と検索で分割結果が食い違うことはありません。
    pub fn with_index(index: Arc<SearchIndex>) -> Self {
        let segmenter = index.segmenter().clone();
        let annotator = Annotator::from_shared_dictionary(segmenter.shared_dictionary());
        Self {
            segmenter,
            annotator,
            index,
        }
    }

    /// 分割器への参照を返します。
    #[inline(always)]
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// 検索インデックスへの参照を返します。
    #[inline(always)]
    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    /// 歌詞のタイトルと本文をそれぞれ分割します。読みは解決しません。
    pub fn prepare(&self, lyric: &Lyric) -> PreparedLyric {
        PreparedLyric {
            title: self.segmenter.segment(lyric.title()),
            body: self.segmenter.segment(lyric.body()),
        }
    }

    /// テキストを分割します。
    pub fn segment(&self, text: &str) -> Vec<Token> {
        self.segmenter.segment(text)
    }

    /// トークンの読みを解決します。
    pub fn annotate(&self, token: &Token) -> Reading {
        self.annotator.annotate(token)
    }

    /// 読みを埋めたトークンを返します。
    pub fn annotated(&self, token: Token) -> Token {
        self.annotator.annotated(token)
    }

    /// テキスト全体の読みを返します。
    pub fn furigana(&self, text: &str) -> String {
        self.annotator.furigana_text(&self.segmenter, text)
    }

    /// 歌詞を検索インデックスに登録します。以前の登録は置き換えられます。
    pub fn reindex(&self, lyric: &Lyric) {
        self.index.index(lyric.id(), lyric.title(), lyric.body());
    }

    /// 歌詞を検索インデックスから削除します。登録されていなければ何もしません。
    ///
    /// # 戻り値
    ///
    /// 登録されていた場合は`true`
    pub fn unindex(&self, lyric_id: LyricId) -> bool {
        self.index.remove(lyric_id)
    }

    /// 歌詞を検索します。
    pub fn query(&self, text: &str) -> SearchOutcome {
        self.index.search(text)
    }

    /// バイト列のクエリで歌詞を検索します。
    ///
    /// # エラー
    ///
    /// クエリが有効なUTF-8でない場合、[`KashiError::Encoding`]が返されます。
    pub fn query_bytes(&self, text: &[u8]) -> Result<SearchOutcome> {
        let text = std::str::from_utf8(text)?;
        Ok(self.query(text))
    }

    /// トークンの読みを解決し、単語帳に書き出します。
    ///
    /// 書き出し先のエラーはそのまま返されます。
    pub fn export_token<E>(&self, exporter: &E, token: &Token) -> Result<ExportAck, E::Error>
    where
        E: VocabularyExporter + ?Sized,
    {
        let word = VocabularyWord::new(token.surface(), self.annotate(token).into_option());
        exporter.export(&word)
    }
}
