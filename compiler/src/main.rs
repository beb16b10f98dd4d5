//! kashi 辞書コンパイラ
//!
//! 語彙CSV(`表層形,品詞,読み,コスト`)からバイナリ形式のシステム辞書を構築し、
//! zstdで圧縮して出力します。出力されたファイルは
//! [`Dictionary::from_zstd`](kashi::Dictionary::from_zstd)で読み込めます。

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use kashi::errors::KashiError;
use kashi::Dictionary;

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    version,
    about = "A program to build the system dictionary from a lexicon CSV."
)]
struct Args {
    /// System lexicon file (surface,tag,reading,cost).
    #[clap(short = 'l', long)]
    lexicon_in: PathBuf,

    /// File to which the binary dictionary is output (in zstd).
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,

    /// Compression level of zstd.
    #[clap(long, default_value = "19")]
    level: i32,
}

/// コンパイル中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
enum CompileError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    Kashi(#[from] KashiError),
}

/// 語彙ファイルから辞書を構築する
///
/// # 引数
///
/// * `lexicon` - 語彙CSVのパス
///
/// # エラー
///
/// ファイルが読めない場合、または語彙に不正な行がある場合にエラーを返します。
fn build_dictionary(lexicon: &Path) -> Result<Dictionary, CompileError> {
    let rdr = BufReader::new(File::open(lexicon)?);
    Ok(Dictionary::from_reader(rdr)?)
}

/// メイン関数
///
/// 語彙ファイルを読み込んで辞書を構築し、zstd圧縮したバイナリ形式で出力します。
fn main() -> Result<(), CompileError> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Compiling the system dictionary...");
    let dict = build_dictionary(&args.lexicon_in)?;
    log::info!(
        "{} entries, max cost {}",
        dict.len(),
        dict.max_cost()
    );

    eprintln!("Writing the system dictionary...");
    let file = File::create(&args.sysdic_out)?;
    let mut encoder = zstd::Encoder::new(file, args.level)?;
    dict.write(&mut encoder)?;
    encoder.finish()?;

    eprintln!(
        "Successfully built the dictionary to {}",
        args.sysdic_out.display()
    );
    Ok(())
}
