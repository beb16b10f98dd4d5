//! kashiのテストモジュール群
//!
//! 分割、検索インデックス、ファサードのシナリオと、辞書の読み書きを検証するテストを含みます。

mod index;
mod segmenter;
