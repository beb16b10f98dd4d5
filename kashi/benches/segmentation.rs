//! 歌詞の分割と検索のベンチマーク
//!
//! 小さな語彙から構築した辞書を使い、分割速度と検索インデックスの更新・検索速度を計測します。

use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kashi::{Dictionary, LyricId, SearchIndex, Segmenter};

const LEXICON: &str = "\
夜空,noun,よぞら,2
星,noun,ほし,2
君,noun,きみ,2
僕,noun,ぼく,2
声,noun,こえ,2
歌,noun,うた,2
歌う,verb,うたう,3
届け,verb,とどけ,3
聞こえる,verb,きこえる,3
見上げ,verb,みあげ,3
遠く,adverb,とおく,3
まで,particle,まで,1
の,particle,の,1
が,particle,が,1
を,particle,を,1
に,particle,に,1
で,particle,で,1
と,particle,と,1
は,particle,は,1
た,auxiliary,た,1
ます,auxiliary,ます,1
";

const CORPUS: &str = "\
夜空を見上げた 君の声が聞こえる
遠くまで届け 僕の歌
星と歌う Starlight の夜に
ラララ ラララ 君と歌う
Love song は 2024 年の夏に
";

fn bench_segmentation(c: &mut Criterion) {
    let dict = Arc::new(Dictionary::from_reader(LEXICON.as_bytes()).unwrap());
    let lines: Vec<&str> = CORPUS.lines().collect();

    let mut group = c.benchmark_group("Segmentation Speed");
    group.throughput(Throughput::Bytes(CORPUS.len() as u64));
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(5));

    group.bench_function(BenchmarkId::new("Default", "Lyrics"), |b| {
        b.iter_with_setup(
            || Segmenter::from_shared_dictionary(dict.clone()).new_worker(),
            |mut worker| {
                for line in &lines {
                    worker.reset_sentence(line);
                    worker.segment();
                }
            },
        );
    });

    group.bench_function(BenchmarkId::new("MaxGrouping", "Lyrics"), |b| {
        b.iter_with_setup(
            || {
                Segmenter::from_shared_dictionary(dict.clone())
                    .max_grouping_len(4)
                    .new_worker()
            },
            |mut worker| {
                for line in &lines {
                    worker.reset_sentence(line);
                    worker.segment();
                }
            },
        );
    });

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let dict = Dictionary::from_reader(LEXICON.as_bytes()).unwrap();
    let segmenter = Segmenter::new(dict);
    let lines: Vec<&str> = CORPUS.lines().collect();

    let mut group = c.benchmark_group("Search Index");

    group.bench_function("Reindex", |b| {
        let index = SearchIndex::new(segmenter.clone());
        b.iter(|| {
            for (i, line) in lines.iter().enumerate() {
                index.index(LyricId(i as u64), line, CORPUS);
            }
        });
    });

    group.bench_function("Query", |b| {
        let index = SearchIndex::new(segmenter.clone());
        for (i, line) in lines.iter().enumerate() {
            index.index(LyricId(i as u64), line, CORPUS);
        }
        b.iter(|| index.search("君の歌"));
    });

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_index);
criterion_main!(benches);
