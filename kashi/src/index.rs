//! 検索インデックス
//!
//! 歌詞のタイトルと本文を分割し、正規化した単語をキーとする転置インデックスを管理します。
//!
//! 一つの歌詞の更新（古いポスティングの削除と新しいポスティングの追加）は
//! 単一の書き込みロックの下で行われるため、検索側から更新途中の状態が見えることはありません。
//! 検索は読み込みロックのみを取るため、検索同士は並行に実行できます。

use std::collections::BTreeMap;
use std::fmt;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use unicode_normalization::UnicodeNormalization;

use crate::dictionary::ScriptClass;
use crate::errors::{KashiError, Result};
use crate::segmenter::Segmenter;
use crate::token::Token;
use crate::utils::katakana_to_hiragana;

/// タイトル出現の既定の重み
pub const DEFAULT_TITLE_WEIGHT: u64 = 5;

/// 歌詞の識別子
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LyricId(pub u64);

impl fmt::Display for LyricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LyricId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// ある歌詞におけるキーの出現回数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Occurrence {
    /// タイトル中の出現回数
    pub title: u32,
    /// 本文中の出現回数
    pub body: u32,
}

impl Occurrence {
    fn score(&self, title_weight: u64) -> u64 {
        u64::from(self.title) * title_weight + u64::from(self.body)
    }
}

/// 検索結果の1件
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// 歌詞の識別子
    pub lyric_id: LyricId,
    /// スコア（タイトル出現回数 × タイトル重み + 本文出現回数 の総和）
    pub score: u64,
}

/// 検索の結果
///
/// 何も見つからなかった場合はエラーではなく[`SearchOutcome::IndexMiss`]で表されます。
/// インデックスは単語単位の一致のみを扱うため、部分文字列検索などの代替手段を取るかどうかは
/// 呼び出し側が判断します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// スコアの降順、同点は識別子の昇順に並んだ一致
    Hits(Vec<SearchHit>),
    /// インデックスに一致なし（クエリからキーが得られなかった場合を含む）
    IndexMiss,
}

impl SearchOutcome {
    /// 一致がなかったかどうかを返します。
    #[inline(always)]
    pub const fn is_miss(&self) -> bool {
        matches!(self, Self::IndexMiss)
    }

    /// 一致の列を返します。一致がない場合は空のスライスです。
    #[inline(always)]
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            Self::Hits(hits) => hits,
            Self::IndexMiss => &[],
        }
    }

    /// 一致した歌詞の識別子を順位順に返します。
    pub fn lyric_ids(&self) -> Vec<LyricId> {
        self.hits().iter().map(|h| h.lyric_id).collect()
    }

    /// 一致の列に変換します。
    pub fn into_hits(self) -> Vec<SearchHit> {
        match self {
            Self::Hits(hits) => hits,
            Self::IndexMiss => vec![],
        }
    }
}

/// 表層形をインデックスのキーに正規化します。
///
/// NFKC正規化、小文字化、片仮名の平仮名化を順に適用します。
/// 空白と記号だけからなる表層形はキーを持たず、`None`を返します。
///
/// # 例
///
/// ```
/// use kashi::index::normalize_key;
///
/// assert_eq!(normalize_key("ＬＯＶＥ").as_deref(), Some("love"));
/// assert_eq!(normalize_key("サクラ").as_deref(), Some("さくら"));
/// assert_eq!(normalize_key("、"), None);
/// ```
pub fn normalize_key(surface: &str) -> Option<String> {
    let normalized: String = surface.nfkc().collect::<String>().to_lowercase();
    let has_content = normalized
        .chars()
        .any(|c| !c.is_whitespace() && ScriptClass::of(c) != ScriptClass::Punctuation);
    if !has_content {
        return None;
    }
    Some(katakana_to_hiragana(&normalized))
}

#[derive(Default)]
struct IndexInner {
    postings: HashMap<String, BTreeMap<LyricId, Occurrence>>,
    keys_by_lyric: HashMap<LyricId, Vec<String>>,
}

impl IndexInner {
    fn remove(&mut self, lyric_id: LyricId) -> bool {
        let Some(keys) = self.keys_by_lyric.remove(&lyric_id) else {
            return false;
        };
        for key in keys {
            if let Some(lyrics) = self.postings.get_mut(&key) {
                lyrics.remove(&lyric_id);
                if lyrics.is_empty() {
                    self.postings.remove(&key);
                }
            }
        }
        true
    }

    fn insert(&mut self, lyric_id: LyricId, occurrences: HashMap<String, Occurrence>) {
        let mut keys = Vec::with_capacity(occurrences.len());
        for (key, occurrence) in occurrences {
            self.postings
                .entry(key.clone())
                .or_default()
                .insert(lyric_id, occurrence);
            keys.push(key);
        }
        self.keys_by_lyric.insert(lyric_id, keys);
    }
}

/// 正規化した単語から歌詞の識別子への転置インデックス
pub struct SearchIndex {
    segmenter: Segmenter,
    title_weight: u64,
    inner: RwLock<IndexInner>,
}

impl SearchIndex {
    /// 新しい空のインデックスを作成します。
    ///
    /// # 引数
    ///
    /// * `segmenter` - タイトル、本文、クエリの分割に使用する分割器
    pub fn new(segmenter: Segmenter) -> Self {
        Self {
            segmenter,
            title_weight: DEFAULT_TITLE_WEIGHT,
            inner: RwLock::new(IndexInner::default()),
        }
    }

    /// タイトル出現の重みを指定します。
    ///
    /// # エラー
    ///
    /// `title_weight`が1以下の場合、[`KashiError::InvalidArgument`]が返されます。
    pub fn with_title_weight(mut self, title_weight: u64) -> Result<Self> {
        if title_weight <= 1 {
            return Err(KashiError::invalid_argument(
                "title_weight",
                "must be greater than 1",
            ));
        }
        self.title_weight = title_weight;
        Ok(self)
    }

    /// タイトル出現の重みを返します。
    #[inline(always)]
    pub const fn title_weight(&self) -> u64 {
        self.title_weight
    }

    /// 分割器への参照を返します。
    #[inline(always)]
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    fn keys_of(tokens: &[Token]) -> impl Iterator<Item = String> + '_ {
        tokens.iter().filter_map(|t| normalize_key(t.surface()))
    }

    /// 歌詞をインデックスに登録します。
    ///
    /// 同じ識別子の以前の登録は、一つの手順として置き換えられます。
    ///
    /// # 引数
    ///
    /// * `lyric_id` - 歌詞の識別子
    /// * `title` - タイトル
    /// * `body` - 本文
    pub fn index(&self, lyric_id: LyricId, title: &str, body: &str) {
        let mut occurrences: HashMap<String, Occurrence> = HashMap::new();
        for key in Self::keys_of(&self.segmenter.segment(title)) {
            occurrences.entry(key).or_default().title += 1;
        }
        for key in Self::keys_of(&self.segmenter.segment(body)) {
            occurrences.entry(key).or_default().body += 1;
        }
        let num_keys = occurrences.len();

        let mut inner = self.inner.write();
        let replaced = inner.remove(lyric_id);
        inner.insert(lyric_id, occurrences);
        drop(inner);

        log::debug!("indexed lyric {lyric_id} with {num_keys} keys (replaced: {replaced})");
    }

    /// 歌詞をインデックスから削除します。
    ///
    /// 登録されていない識別子に対しては何もしません。
    ///
    /// # 戻り値
    ///
    /// 登録されていた場合は`true`
    pub fn remove(&self, lyric_id: LyricId) -> bool {
        let removed = self.inner.write().remove(lyric_id);
        log::debug!("removed lyric {lyric_id} (present: {removed})");
        removed
    }

    /// クエリに一致する歌詞を検索します。
    ///
    /// クエリはインデックス対象と同じ方法で分割、正規化されます。重複するキーは1回として数えます。
    ///
    /// # 引数
    ///
    /// * `query` - 検索クエリ
    pub fn search(&self, query: &str) -> SearchOutcome {
        let tokens = self.segmenter.segment(query);
        let mut seen = HashSet::new();
        let keys: Vec<String> = Self::keys_of(&tokens)
            .filter(|key| seen.insert(key.clone()))
            .collect();
        if keys.is_empty() {
            log::trace!("query {query:?} has no index keys");
            return SearchOutcome::IndexMiss;
        }

        let mut scores: HashMap<LyricId, u64> = HashMap::new();
        {
            let inner = self.inner.read();
            for key in &keys {
                let Some(lyrics) = inner.postings.get(key) else {
                    continue;
                };
                for (&lyric_id, occurrence) in lyrics {
                    *scores.entry(lyric_id).or_default() += occurrence.score(self.title_weight);
                }
            }
        }
        if scores.is_empty() {
            log::trace!("query {query:?} missed the index");
            return SearchOutcome::IndexMiss;
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .map(|(lyric_id, score)| SearchHit { lyric_id, score })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.lyric_id.cmp(&b.lyric_id)));
        SearchOutcome::Hits(hits)
    }

    /// 登録されている歌詞の数を返します。
    pub fn len(&self) -> usize {
        self.inner.read().keys_by_lyric.len()
    }

    /// 登録されている歌詞がないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 歌詞が登録されているかどうかを返します。
    pub fn contains(&self, lyric_id: LyricId) -> bool {
        self.inner.read().keys_by_lyric.contains_key(&lyric_id)
    }

    /// 異なりキーの数を返します。
    pub fn num_keys(&self) -> usize {
        self.inner.read().postings.len()
    }

    /// キーに対する歌詞の出現回数を返します。
    ///
    /// `term`はキーと同じ方法で正規化されます。
    pub fn occurrence(&self, term: &str, lyric_id: LyricId) -> Option<Occurrence> {
        let key = normalize_key(term)?;
        self.inner
            .read()
            .postings
            .get(&key)
            .and_then(|lyrics| lyrics.get(&lyric_id))
            .copied()
    }
}
