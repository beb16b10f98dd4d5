use std::sync::Arc;

use crate::dictionary::{Dictionary, DictionaryEntry, PosTag};
use crate::index::{LyricId, SearchHit, SearchIndex, SearchOutcome};
use crate::segmenter::Segmenter;

fn build_index() -> SearchIndex {
    let dict = Dictionary::from_entries([
        DictionaryEntry::new("桜", "さくら", PosTag::Content, 1),
        DictionaryEntry::new("空", "そら", PosTag::Content, 1),
        DictionaryEntry::new("の", "の", PosTag::Particle, 1),
        DictionaryEntry::new("下", "した", PosTag::Content, 1),
        DictionaryEntry::new("雨", "あめ", PosTag::Content, 1),
    ])
    .unwrap();
    SearchIndex::new(Segmenter::new(dict))
}

#[test]
fn test_update_replaces_old_postings() {
    let index = build_index();
    index.index(LyricId(1), "春", "桜の下");
    assert_eq!(index.search("桜").lyric_ids(), vec![LyricId(1)]);

    index.index(LyricId(1), "春", "空の下");
    assert!(index.search("桜").is_miss());
    assert_eq!(index.search("空").lyric_ids(), vec![LyricId(1)]);
    assert_eq!(index.search("下").lyric_ids(), vec![LyricId(1)]);
    assert_eq!(index.len(), 1);
}

#[test]
fn test_remove() {
    let index = build_index();
    index.index(LyricId(1), "春", "桜の下");
    index.index(LyricId(2), "夏", "桜");

    assert!(index.remove(LyricId(1)));
    assert_eq!(index.search("桜").lyric_ids(), vec![LyricId(2)]);
    assert!(index.search("下").is_miss());
    assert!(!index.contains(LyricId(1)));

    assert!(!index.remove(LyricId(1)));
    assert!(!index.remove(LyricId(100)));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_title_outranks_body() {
    let index = build_index();
    index.index(LyricId(2), "Rain", "love love love");
    index.index(LyricId(1), "Love", "");

    let outcome = index.search("love");
    assert_eq!(
        outcome,
        SearchOutcome::Hits(vec![
            SearchHit {
                lyric_id: LyricId(1),
                score: 5
            },
            SearchHit {
                lyric_id: LyricId(2),
                score: 3
            },
        ])
    );
}

#[test]
fn test_score_sums_over_keys() {
    let index = build_index();
    index.index(LyricId(1), "桜", "雨");
    index.index(LyricId(2), "雨", "桜 桜 桜 桜 桜 桜");
    index.index(LyricId(3), "空", "雨");

    let hits = index.search("桜と雨").into_hits();
    let got: Vec<_> = hits.iter().map(|h| (h.lyric_id.0, h.score)).collect();
    assert_eq!(got, vec![(2, 11), (1, 6), (3, 1)]);
}

#[test]
fn test_empty_body() {
    let index = build_index();
    index.index(LyricId(7), "題", "");
    assert!(index.contains(LyricId(7)));
    assert!(!index.search("anything").lyric_ids().contains(&LyricId(7)));
    assert_eq!(index.search(""), SearchOutcome::IndexMiss);
    assert!(index.search("").lyric_ids().is_empty());
}

#[test]
fn test_punctuation_query() {
    let index = build_index();
    index.index(LyricId(1), "！", "、、、");
    assert!(index.search("、").is_miss());
    assert!(index.search("！？ 。").is_miss());
    assert_eq!(index.num_keys(), 0);
}

#[test]
fn test_normalized_query() {
    let index = build_index();
    index.index(LyricId(1), "サクラ", "LOVE");
    assert_eq!(index.search("さくら").lyric_ids(), vec![LyricId(1)]);
    assert_eq!(index.search("ｌｏｖｅ").lyric_ids(), vec![LyricId(1)]);
}

#[test]
fn test_concurrent_update_is_atomic() {
    let index = Arc::new(build_index());
    index.index(LyricId(1), "題", "桜");

    let writer = {
        let index = Arc::clone(&index);
        std::thread::spawn(move || {
            for i in 0..500 {
                if i % 2 == 0 {
                    index.index(LyricId(1), "題", "空 空");
                } else {
                    index.index(LyricId(1), "題", "桜");
                }
            }
        })
    };
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let hits = index.search("桜 空").into_hits();
                    assert_eq!(hits.len(), 1);
                    assert_eq!(hits[0].lyric_id, LyricId(1));
                    assert!(hits[0].score == 1 || hits[0].score == 2, "{hits:?}");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
