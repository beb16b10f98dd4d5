use crate::dictionary::{Dictionary, DictionaryEntry, PosTag, ScriptClass};
use crate::segmenter::{Segmenter, UNKNOWN_WORD_COST};
use crate::token::Token;

const LEXICON: &str = "\
# surface,tag,reading,cost
東京,noun,とうきょう,5
都,noun,と,1
京都,noun,きょうと,5
東,noun,ひがし,3
君,noun,きみ,2
の,particle,の,1
声,noun,こえ,2
が,particle,が,1
聞こえる,verb,きこえる,3
聞こ,noun,きこ,1
える,auxiliary,える,1
夜空,noun,よぞら,2
に,particle,に,1
";

fn build_segmenter() -> Segmenter {
    Segmenter::new(Dictionary::from_reader(LEXICON.as_bytes()).unwrap())
}

#[track_caller]
fn assert_partition(text: &str, tokens: &[Token]) {
    let concat: String = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(concat, text);

    let mut pos_char = 0;
    let mut pos_byte = 0;
    for t in tokens {
        assert!(!t.surface().is_empty());
        assert_eq!(t.range_char().start, pos_char);
        assert_eq!(t.range_byte().start, pos_byte);
        assert_eq!(&text[t.range_byte()], t.surface());
        pos_char = t.range_char().end;
        pos_byte = t.range_byte().end;
    }
    assert_eq!(pos_char, text.chars().count());
    assert_eq!(pos_byte, text.len());
}

#[test]
fn test_coverage() {
    let segmenter = build_segmenter();
    for text in [
        "",
        "東京都",
        "君の声が聞こえる",
        "夜空に　Starlight　✨\n\n東京 2024",
        "ｶﾀｶﾅとＡＢＣと１２３",
        "!!?? 、。「」",
        "𠮷野家の々〆",
        "\r\n\t",
    ] {
        let tokens = segmenter.segment(text);
        assert_partition(text, &tokens);
    }
}

#[test]
fn test_determinism() {
    let segmenter = build_segmenter();
    let text = "君の声が聞こえる東京都の夜空にLove";
    let first = segmenter.segment(text);
    let second = segmenter.segment(text);
    assert_eq!(first, second);

    let other = build_segmenter();
    assert_eq!(first, other.segment(text));
}

#[test]
fn test_dictionary_precedence() {
    let segmenter = build_segmenter();
    let tokens = segmenter.segment("東京都");
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(surfaces, ["東京", "都"]);
    assert!(tokens.iter().all(|t| t.is_known()));
    assert_eq!(tokens[1].total_cost(), 6);
}

#[test]
fn test_minimum_cost_path() {
    let segmenter = build_segmenter();
    // 聞こ+える (1+1) beats 聞こえる (3).
    let tokens = segmenter.segment("聞こえる");
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(surfaces, ["聞こ", "える"]);
    assert_eq!(tokens[1].tag(), PosTag::Auxiliary);
}

#[test]
fn test_unknown_run() {
    let segmenter = build_segmenter();
    let tokens = segmenter.segment("hello");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface(), "hello");
    assert_eq!(tokens[0].range_char(), 0..5);
    assert_eq!(tokens[0].script(), ScriptClass::Latin);
    assert_eq!(tokens[0].word_cost(), UNKNOWN_WORD_COST);
    assert!(!tokens[0].is_known());
}

#[test]
fn test_unknown_runs_split_by_script() {
    let segmenter = build_segmenter();
    let tokens = segmenter.segment("ラブレター2024ok!!");
    let got: Vec<_> = tokens.iter().map(|t| (t.surface(), t.script())).collect();
    assert_eq!(
        got,
        [
            ("ラブレター", ScriptClass::Katakana),
            ("2024", ScriptClass::Digit),
            ("ok", ScriptClass::Latin),
            ("!!", ScriptClass::Punctuation),
        ]
    );
    assert_eq!(tokens[3].tag(), PosTag::Symbol);
    assert_eq!(tokens[0].tag(), PosTag::Unknown);
}

#[test]
fn test_whitespace_tokens() {
    let segmenter = build_segmenter();
    let text = "君\n\n声  が\u{3000}\u{3000}";
    let tokens = segmenter.segment(text);
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(
        surfaces,
        ["君", "\n", "\n", "声", " ", " ", "が", "\u{3000}", "\u{3000}"]
    );
    assert_eq!(tokens[1].script(), ScriptClass::Other);
}

#[test]
fn test_unknown_only_text() {
    let segmenter = Segmenter::new(Dictionary::from_entries([]).unwrap());
    let text = "さよならバイバイ";
    let tokens = segmenter.segment(text);
    assert_partition(text, &tokens);
    let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
    assert_eq!(surfaces, ["さよなら", "バイバイ"]);
}

#[test]
fn test_shared_dictionary() {
    let dict = std::sync::Arc::new(
        Dictionary::from_entries([DictionaryEntry::new("歌", "うた", PosTag::Content, 1)]).unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let segmenter = Segmenter::from_shared_dictionary(dict.clone());
            std::thread::spawn(move || segmenter.segment("歌と歌"))
        })
        .collect();
    for handle in handles {
        let tokens = handle.join().unwrap();
        let surfaces: Vec<_> = tokens.iter().map(|t| t.surface()).collect();
        assert_eq!(surfaces, ["歌", "と", "歌"]);
    }
}
