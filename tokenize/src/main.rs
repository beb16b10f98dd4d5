//! 歌詞を分割するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだテキストを行ごとに分割し、
//! 指定された出力形式（wakati、detail、reading）で結果を出力します。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use kashi::{Annotator, Dictionary, Segmenter};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Wakati,
    Detail,
    Reading,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"wakati"、"detail"、"reading"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            "reading" => Ok(Self::Reading),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Segments lyrics into words")]
struct Args {
    /// System dictionary (in zstd) built by the compile command.
    #[clap(short = 'i', long, conflicts_with = "lexicon", required_unless_present = "lexicon")]
    sysdic: Option<PathBuf>,

    /// Lexicon CSV (surface,tag,reading,cost), compiled on the fly.
    #[clap(short = 'l', long)]
    lexicon: Option<PathBuf>,

    /// Output mode. Choices are wakati, detail, and reading.
    #[clap(short = 'O', long, default_value = "wakati")]
    output_mode: OutputMode,

    /// Maximum length of unknown words.
    #[clap(short = 'M', long)]
    max_grouping_len: Option<usize>,
}

/// 引数で指定された辞書を読み込む
fn load_dictionary(args: &Args) -> Result<Dictionary, Box<dyn Error>> {
    let dict = match (&args.sysdic, &args.lexicon) {
        (Some(sysdic), _) => Dictionary::from_zstd(sysdic)?,
        (None, Some(lexicon)) => Dictionary::from_reader(BufReader::new(File::open(lexicon)?))?,
        (None, None) => return Err("Either --sysdic or --lexicon must be specified.".into()),
    };
    Ok(dict)
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだテキストを分割して、
/// 指定された形式で結果を標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = load_dictionary(&args)?;
    log::info!("{} entries loaded", dict.len());

    let segmenter = Segmenter::new(dict).max_grouping_len(args.max_grouping_len.unwrap_or(0));
    let annotator = Annotator::from_shared_dictionary(segmenter.shared_dictionary());
    let mut worker = segmenter.new_worker();

    eprintln!("Ready to tokenize");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        worker.reset_sentence(line);
        worker.segment();
        match args.output_mode {
            OutputMode::Wakati => {
                for i in 0..worker.num_tokens() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(worker.token(i).surface().as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for t in worker.to_tokens() {
                    let reading = annotator.annotate(&t);
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}\tscript={:?}\tknown={}\tword_cost={}\ttotal_cost={}",
                        t.surface(),
                        t.tag(),
                        reading.as_str().unwrap_or("*"),
                        t.script(),
                        t.is_known(),
                        t.word_cost(),
                        t.total_cost(),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Reading => {
                let tokens = worker.to_tokens();
                out.write_all(annotator.furigana(&tokens).as_bytes())?;
                out.write_all(b"\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
